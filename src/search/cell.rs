//! Per-photo cell models with lazy image loading.

use std::fmt;
use std::sync::Arc;

use tokio::task::AbortHandle;

use crate::api::{ImageData, Photo};
use crate::cache::ImageDataRepository;

/// Decoded-and-validated image for a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellImage {
    pub data: ImageData,
    pub width: u32,
    pub height: u32,
}

/// Deferred image lookup for one photo: cache first, then network.
#[derive(Clone)]
pub struct ImageLoader {
    photo: Photo,
    repository: Arc<ImageDataRepository>,
}

impl ImageLoader {
    /// Resolve the image. Failures are logged and yield `None`.
    pub async fn load(&self) -> Option<CellImage> {
        let data = match self.repository.image_data(&self.photo).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(
                    photo_id = %self.photo.id,
                    error_type = err.error_type(),
                    error = %err,
                    "Failed to get image"
                );
                return None;
            }
        };

        match image::load_from_memory(&data) {
            Ok(decoded) => Some(CellImage {
                width: decoded.width(),
                height: decoded.height(),
                data,
            }),
            Err(err) => {
                tracing::warn!(
                    photo_id = %self.photo.id,
                    error = %err,
                    "Failed to create image from data"
                );
                None
            }
        }
    }

    /// Load on a background task and hand the image to `deliver` at most once.
    ///
    /// Dropping the returned handle cancels the load; `deliver` is then
    /// never called.
    pub fn spawn<F>(&self, deliver: F) -> ImageLoadHandle
    where
        F: FnOnce(CellImage) + Send + 'static,
    {
        let loader = self.clone();
        let task = tokio::spawn(async move {
            if let Some(image) = loader.load().await {
                deliver(image);
            }
        });
        ImageLoadHandle {
            task: task.abort_handle(),
        }
    }
}

/// Pending cell image load, cancelled when dropped.
///
/// A cell holds this for as long as it shows the photo the load was
/// started for.
#[derive(Debug)]
pub struct ImageLoadHandle {
    task: AbortHandle,
}

impl Drop for ImageLoadHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// What the grid needs to render one photo.
#[derive(Clone)]
pub struct PhotoCellModel {
    pub id: String,
    pub title: String,
    pub image: ImageLoader,
}

impl fmt::Debug for PhotoCellModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoCellModel")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Projects photos into cell models sharing one image repository.
#[derive(Clone)]
pub struct CellModelsBuilder {
    repository: Arc<ImageDataRepository>,
}

impl CellModelsBuilder {
    pub fn new(repository: Arc<ImageDataRepository>) -> Self {
        Self { repository }
    }

    pub fn cell_model(&self, photo: &Photo) -> PhotoCellModel {
        PhotoCellModel {
            id: photo.id.clone(),
            title: photo.title.clone(),
            image: ImageLoader {
                photo: photo.clone(),
                repository: Arc::clone(&self.repository),
            },
        }
    }

    pub fn cell_models(&self, photos: &[Photo]) -> Vec<PhotoCellModel> {
        photos.iter().map(|photo| self.cell_model(photo)).collect()
    }
}
