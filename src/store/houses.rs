use crate::api::{CollectionApi, ImageFile, ImageUploader};
use crate::forms::{ListingEdit, PropertyDraft};
use crate::models::{EntityId, Listing, PropertyListing};
use crate::store::cache::{CacheState, CollectionCache};
use crate::store::filter::ListingFilter;
use crate::store::uploads::upload_all;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

pub const HOUSE_ADDED: &str = "House added successfully";
pub const HOUSE_UPDATED: &str = "House updated successfully";
pub const HOUSE_DELETED: &str = "House deleted successfully";

/// Mirror of the remote listing collection, with the image uploads that go
/// with creating and editing a listing
pub struct HouseStore {
    cache: CollectionCache<Listing>,
    uploader: Arc<dyn ImageUploader>,
}

impl HouseStore {
    pub fn new(api: Arc<dyn CollectionApi<Listing>>, uploader: Arc<dyn ImageUploader>) -> Self {
        Self {
            cache: CollectionCache::new("houses", api),
            uploader,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CacheState<Listing>> {
        self.cache.subscribe()
    }

    pub fn snapshot(&self) -> CacheState<Listing> {
        self.cache.snapshot()
    }

    pub fn items(&self) -> Vec<PropertyListing> {
        self.cache.items()
    }

    pub fn clear_status(&self) {
        self.cache.clear_status();
    }

    /// Look a listing up by a route-style key
    pub fn find(&self, key: &str) -> Option<PropertyListing> {
        self.cache
            .items()
            .into_iter()
            .find(|listing| listing.id.matches_key(key))
    }

    pub fn filtered(&self, filter: &ListingFilter) -> Vec<PropertyListing> {
        self.cache
            .items()
            .into_iter()
            .filter(|listing| filter.matches(&listing.data))
            .collect()
    }

    /// Replace the cached list with the server's
    pub async fn fetch_all(&self) -> Result<()> {
        self.cache.fetch_all().await
    }

    /// Publish a new listing.
    ///
    /// The cover image is required. It is uploaded first, then the gallery in
    /// order; any failure aborts before the listing is submitted.
    pub async fn create(
        &self,
        draft: &PropertyDraft,
        main_image: Option<&ImageFile>,
        gallery: &[ImageFile],
    ) -> Result<PropertyListing> {
        self.cache.set_loading();

        let listing = match self.prepare_new(draft, main_image, gallery).await {
            Ok(listing) => listing,
            Err(err) => return Err(self.cache.fail(err)),
        };

        self.cache.create(&listing, HOUSE_ADDED).await
    }

    async fn prepare_new(
        &self,
        draft: &PropertyDraft,
        main_image: Option<&ImageFile>,
        gallery: &[ImageFile],
    ) -> Result<Listing> {
        draft.validate(main_image.is_some())?;
        let main_image = main_image.context("Main image is required")?;

        info!("Uploading cover and {} gallery image(s)", gallery.len());
        let main_url = self
            .uploader
            .upload(main_image)
            .await
            .with_context(|| format!("Image upload failed for {}", main_image.file_name))?;
        let images = upload_all(self.uploader.as_ref(), gallery).await?;

        Ok(draft.to_listing(main_url, images)?)
    }

    /// Submit a full replacement of listing `id`.
    ///
    /// A new cover replaces the old URL; new gallery files are uploaded and
    /// appended after the images the user kept.
    pub async fn update(&self, id: &EntityId, edit: &ListingEdit) -> Result<PropertyListing> {
        let listing = match self.prepare_edit(edit).await {
            Ok(listing) => listing,
            Err(err) => return Err(self.cache.record_error(err)),
        };

        self.cache.update(id, &listing, HOUSE_UPDATED).await
    }

    async fn prepare_edit(&self, edit: &ListingEdit) -> Result<Listing> {
        let has_cover = edit.new_main_image.is_some() || !edit.main_image.trim().is_empty();
        edit.draft.validate(has_cover)?;

        let main_url = match &edit.new_main_image {
            Some(file) => self
                .uploader
                .upload(file)
                .await
                .with_context(|| format!("Image upload failed for {}", file.file_name))?,
            None => edit.main_image.clone(),
        };

        let uploaded = upload_all(self.uploader.as_ref(), &edit.new_images).await?;
        let mut images = edit.kept_images.clone();
        images.extend(uploaded);

        Ok(edit.draft.to_listing(main_url, images)?)
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.cache.delete(id, HOUSE_DELETED).await
    }
}
