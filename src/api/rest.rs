use crate::api::traits::CollectionApi;
use crate::models::{Entity, EntityId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

/// Build the shared HTTP client.
///
/// Without a timeout the transport default applies.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().context("Failed to create HTTP client")
}

/// JSON collection endpoint: `GET/POST {base}/{resource}` and
/// `PUT/DELETE {base}/{resource}/{id}`
pub struct RestCollection<T> {
    client: Client,
    collection_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> RestCollection<T> {
    pub fn new(client: Client, base_url: &str, resource: &str) -> Self {
        let collection_url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            resource.trim_matches('/')
        );

        Self {
            client,
            collection_url,
            _record: PhantomData,
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn item_url(&self, id: &EntityId) -> String {
        format!("{}/{}", self.collection_url, id)
    }
}

/// Turn a non-2xx response into an error carrying the status and body
async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("{} returned status: {}", action, status);
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        anyhow::bail!("{} failed: {}", action, status);
    }
    anyhow::bail!("{} failed: {}: {}", action, status, body)
}

#[async_trait]
impl<T> CollectionApi<T> for RestCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Entity<T>>> {
        debug!("GET {}", self.collection_url);

        let response = self
            .client
            .get(&self.collection_url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.collection_url))?;
        let response = ensure_success(response, "List").await?;

        response
            .json()
            .await
            .context("Failed to decode collection")
    }

    async fn create(&self, body: &T) -> Result<Entity<T>> {
        debug!("POST {}", self.collection_url);

        let response = self
            .client
            .post(&self.collection_url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to post to {}", self.collection_url))?;
        let response = ensure_success(response, "Create").await?;

        response
            .json()
            .await
            .context("Failed to decode created record")
    }

    async fn update(&self, id: &EntityId, body: &T) -> Result<Entity<T>> {
        let url = self.item_url(id);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to put to {}", url))?;
        let response = ensure_success(response, "Update").await?;

        response
            .json()
            .await
            .context("Failed to decode updated record")
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to delete {}", url))?;
        ensure_success(response, "Delete").await?;

        Ok(())
    }
}
