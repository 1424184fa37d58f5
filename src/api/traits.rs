use crate::api::types::ImageFile;
use crate::models::{Entity, EntityId};
use anyhow::Result;
use async_trait::async_trait;

/// A remote collection of one kind of record.
///
/// Every failure (transport, 4xx/5xx, bad body) comes back as a plain error
/// with a message; callers don't branch on the cause.
#[async_trait]
pub trait CollectionApi<T>: Send + Sync {
    /// Fetch the whole collection in server order
    async fn list(&self) -> Result<Vec<Entity<T>>>;

    /// Store a new record and return it with its server-assigned id
    async fn create(&self, body: &T) -> Result<Entity<T>>;

    /// Replace the record with `id` by `body`
    async fn update(&self, id: &EntityId, body: &T) -> Result<Entity<T>>;

    async fn delete(&self, id: &EntityId) -> Result<()>;
}

/// Image hosting service that turns a file into a public URL
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<String>;
}
