//! Read-through image lookup: storage first, network on miss.

use std::sync::Arc;

use crate::api::{ApiError, ImageData, Photo, PhotosApi};

use super::storage::ImageStorage;

/// Resolves image bytes for photos, caching every successful download.
///
/// Failures are returned to the caller and never cached.
pub struct ImageDataRepository {
    storage: Arc<dyn ImageStorage>,
    api: Arc<dyn PhotosApi>,
}

impl ImageDataRepository {
    pub fn new(storage: Arc<dyn ImageStorage>, api: Arc<dyn PhotosApi>) -> Self {
        Self { storage, api }
    }

    pub async fn image_data(&self, photo: &Photo) -> Result<ImageData, ApiError> {
        if let Some(data) = self.storage.get(&photo.id) {
            tracing::trace!(photo_id = %photo.id, "Image cache hit");
            return Ok(data);
        }

        tracing::trace!(photo_id = %photo.id, "Image cache miss");
        let data = self.api.fetch_image(photo).await?;
        self.storage.put(&photo.id, data.clone());
        Ok(data)
    }
}
