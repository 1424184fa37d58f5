//! In-memory collaborators for tests.

use crate::api::{CollectionApi, ImageFile, ImageUploader};
use crate::models::{Entity, EntityId, Listing, ListingStatus, PropertyCategory, PropertyListing};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn sample_listing(id: i64, title: &str) -> PropertyListing {
    Entity::new(
        id,
        Listing {
            title: title.to_string(),
            address: format!("{} Derb Sidi Bouloukat, Marrakech", id),
            description: "Patio, terrasse et hammam".to_string(),
            price: 500.0,
            surface: 140.0,
            rooms: 3,
            bathrooms: 2,
            kind: PropertyCategory::House.into(),
            status: ListingStatus::Available,
            reserved_from: None,
            reserved_to: None,
            main_image: format!("https://cdn.test/listing-{}.jpg", id),
            images: vec![],
        },
    )
}

/// Collection backed by a vector. Ids are handed out as increasing integers.
pub struct FakeCollection<T> {
    records: Mutex<Vec<Entity<T>>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    update_delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<&'static str>>,
}

impl<T> FakeCollection<T> {
    pub fn new(records: Vec<Entity<T>>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| match r.id {
                EntityId::Int(n) => Some(n),
                EntityId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(next_id),
            failing: AtomicBool::new(false),
            update_delays: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Swap the server-side contents
    pub fn reset(&self, records: Vec<Entity<T>>) {
        *self.records.lock().unwrap() = records;
    }

    /// Make every following call fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Hold back the next update responses, one delay per call
    pub fn delay_updates(&self, delays: Vec<Duration>) {
        self.update_delays.lock().unwrap().extend(delays);
    }

    /// Names of the calls that reached the collection
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("backend unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl<T> CollectionApi<T> for FakeCollection<T>
where
    T: Clone + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Entity<T>>> {
        self.enter("list")?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, body: &T) -> Result<Entity<T>> {
        self.enter("create")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Entity::new(id, body.clone());
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &EntityId, body: &T) -> Result<Entity<T>> {
        self.enter("update")?;
        let delay = self.update_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let updated = Entity {
            id: id.clone(),
            data: body.clone(),
        };
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| &r.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => anyhow::bail!("404 Not Found"),
        }
        Ok(updated)
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.enter("delete")?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            anyhow::bail!("404 Not Found");
        }
        Ok(())
    }
}

/// Uploader that answers `https://cdn.test/{file_name}`
pub struct FakeUploader {
    fail_on: Option<String>,
    uploaded: Mutex<Vec<String>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            uploaded: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(file_name: &str) -> Self {
        Self {
            fail_on: Some(file_name.to_string()),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    /// File names successfully uploaded, in call order
    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for FakeUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        if self.fail_on.as_deref() == Some(file.file_name.as_str()) {
            anyhow::bail!("upload rejected: {}", file.file_name);
        }
        self.uploaded.lock().unwrap().push(file.file_name.clone());
        Ok(format!("https://cdn.test/{}", file.file_name))
    }
}
