use crate::api::CollectionApi;
use crate::models::{Entity, EntityId};
use crate::store::reconcile;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What views render from: the cached list plus request flags
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState<T> {
    /// Server order, never re-sorted locally
    pub items: Vec<Entity<T>>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: None,
        }
    }
}

/// Client-side mirror of one remote collection.
///
/// Calls are not queued: overlapping operations each apply their rule when
/// they settle, so the last response to arrive wins. Every change is
/// published as a whole new state to subscribers.
pub struct CollectionCache<T> {
    name: &'static str,
    api: Arc<dyn CollectionApi<T>>,
    state: watch::Sender<CacheState<T>>,
}

impl<T> CollectionCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, api: Arc<dyn CollectionApi<T>>) -> Self {
        let (state, _) = watch::channel(CacheState::default());
        Self { name, api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<CacheState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CacheState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<Entity<T>> {
        self.state.borrow().items.clone()
    }

    /// Forget the last error and success messages
    pub fn clear_status(&self) {
        self.state.send_modify(|state| {
            state.error = None;
            state.success = None;
        });
    }

    pub(crate) fn set_loading(&self) {
        self.state.send_modify(|state| state.loading = true);
    }

    /// Record a failure that happened before the remote call (bad input,
    /// image upload) and hand the error back
    pub(crate) fn fail(&self, err: anyhow::Error) -> anyhow::Error {
        warn!("{}: {:#}", self.name, err);
        let message = err.to_string();
        self.state.send_modify(|state| {
            state.loading = false;
            state.error = Some(message);
        });
        err
    }

    pub async fn fetch_all(&self) -> Result<()> {
        debug!("{}: fetching collection", self.name);
        self.set_loading();

        match self.api.list().await {
            Ok(fresh) => {
                info!("{}: loaded {} record(s)", self.name, fresh.len());
                self.state.send_modify(|state| {
                    state.loading = false;
                    reconcile::replace_all(&mut state.items, fresh);
                });
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn create(&self, body: &T, success: &str) -> Result<Entity<T>> {
        self.set_loading();

        match self.api.create(body).await {
            Ok(created) => {
                info!("{}: created record {}", self.name, created.id);
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.success = Some(success.to_string());
                    reconcile::append(&mut state.items, created.clone());
                });
                Ok(created)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn update(&self, id: &EntityId, body: &T, success: &str) -> Result<Entity<T>> {
        match self.api.update(id, body).await {
            Ok(updated) => {
                info!("{}: updated record {}", self.name, updated.id);
                let mut replaced = false;
                self.state.send_modify(|state| {
                    state.success = Some(success.to_string());
                    replaced = reconcile::replace_by_id(&mut state.items, updated.clone());
                });
                if !replaced {
                    debug!("{}: record {} was not cached", self.name, updated.id);
                }
                Ok(updated)
            }
            Err(err) => Err(self.record_error(err)),
        }
    }

    pub async fn delete(&self, id: &EntityId, success: &str) -> Result<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                info!("{}: deleted record {}", self.name, id);
                self.state.send_modify(|state| {
                    state.success = Some(success.to_string());
                    reconcile::remove_by_id(&mut state.items, id);
                });
                Ok(())
            }
            Err(err) => Err(self.record_error(err)),
        }
    }

    /// Like [`fail`](Self::fail) but leaves `loading` alone, for calls that
    /// never raised it
    pub(crate) fn record_error(&self, err: anyhow::Error) -> anyhow::Error {
        warn!("{}: {:#}", self.name, err);
        let message = err.to_string();
        self.state.send_modify(|state| state.error = Some(message));
        err
    }
}
