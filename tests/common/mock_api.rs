//! Scripted in-memory `PhotosApi`.

#![allow(dead_code)]

use async_trait::async_trait;
use flickr_search::api::{ApiError, ImageData, Photo, PhotosApi, PhotosPage, TransportCause};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Clone)]
enum Reply {
    Page(PhotosPage),
    Fail(String),
}

#[derive(Clone)]
struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// Answers searches from a `(query, page)` script, optionally after a delay.
#[derive(Default)]
pub struct ScriptedPhotosApi {
    pages: Mutex<HashMap<(String, u32), Scripted>>,
    images: Mutex<HashMap<String, (Vec<u8>, Duration)>>,
    search_calls: Mutex<Vec<SearchCall>>,
    image_calls: Mutex<Vec<String>>,
}

impl ScriptedPhotosApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, query: &str, page: PhotosPage) -> Self {
        self.with_delayed_page(query, page, Duration::ZERO)
    }

    pub fn with_delayed_page(self, query: &str, page: PhotosPage, delay: Duration) -> Self {
        self.pages.lock().insert(
            (query.to_string(), page.page_number),
            Scripted {
                reply: Reply::Page(page),
                delay,
            },
        );
        self
    }

    pub fn with_failure(self, query: &str, page_number: u32, message: &str) -> Self {
        self.pages.lock().insert(
            (query.to_string(), page_number),
            Scripted {
                reply: Reply::Fail(message.to_string()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_image(self, photo_id: &str, bytes: Vec<u8>) -> Self {
        self.with_delayed_image(photo_id, bytes, Duration::ZERO)
    }

    pub fn with_delayed_image(self, photo_id: &str, bytes: Vec<u8>, delay: Duration) -> Self {
        self.images
            .lock()
            .insert(photo_id.to_string(), (bytes, delay));
        self
    }

    pub fn search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().clone()
    }

    pub fn image_calls(&self) -> Vec<String> {
        self.image_calls.lock().clone()
    }
}

#[async_trait]
impl PhotosApi for ScriptedPhotosApi {
    async fn search(
        &self,
        query: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<PhotosPage, ApiError> {
        self.search_calls.lock().push(SearchCall {
            query: query.to_string(),
            page: page_number,
            page_size,
        });

        let scripted = self
            .pages
            .lock()
            .get(&(query.to_string(), page_number))
            .cloned();

        let Some(scripted) = scripted else {
            return Err(ApiError::Remote {
                code: 0,
                message: format!("no scripted page {} for '{}'", page_number, query),
            });
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        match scripted.reply {
            Reply::Page(page) => Ok(page),
            Reply::Fail(message) => Err(ApiError::Remote { code: 1, message }),
        }
    }

    async fn fetch_image(&self, photo: &Photo) -> Result<ImageData, ApiError> {
        self.image_calls.lock().push(photo.id.clone());
        let scripted = self.images.lock().get(&photo.id).cloned();
        let Some((bytes, delay)) = scripted else {
            return Err(TransportCause::Status(404).into());
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(ImageData::from(bytes))
    }
}
