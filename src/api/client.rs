//! HTTP implementation of the photos API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};

use crate::config::{ApiConfig, ConfigError};

use super::error::{ApiError, TransportCause};
use super::models::{FlickrResponse, Photo, PhotosPage, PhotosPayload};
use super::request::{RequestBuilder, SearchPhotosRequest};
use super::url::PhotoUrlBuilder;

/// Raw image bytes, shared between the cache and its readers.
pub type ImageData = Arc<[u8]>;

/// Remote photo search and image download.
///
/// Both futures are cancel-safe: dropping one (or aborting the task that
/// polls it) abandons the request without delivering anything.
#[async_trait]
pub trait PhotosApi: Send + Sync {
    /// Fetch page `page_number` of the results for `query`.
    async fn search(
        &self,
        query: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<PhotosPage, ApiError>;

    /// Download the image bytes for `photo`.
    async fn fetch_image(&self, photo: &Photo) -> Result<ImageData, ApiError>;
}

/// Resolved settings for [`FlickrPhotosApi`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub image_url_template: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientSettings {
    /// Resolve settings from config, requiring an API key.
    pub fn from_config(api: &ApiConfig) -> Result<Self, ConfigError> {
        let api_key = api.resolved_api_key().ok_or_else(|| ConfigError::ValidationError {
            message: format!(
                "No API key configured (set api.api_key or {})",
                ApiConfig::API_KEY_ENV
            ),
        })?;

        Ok(Self {
            api_key,
            base_url: api.base_url.clone(),
            image_url_template: api.image_url_template.clone(),
            timeout: Duration::from_secs(api.timeout_seconds.into()),
            connect_timeout: Duration::from_secs(api.connect_timeout_seconds.into()),
        })
    }
}

const USER_AGENT: &str = concat!("flickr-search/", env!("CARGO_PKG_VERSION"));

fn build_client(builder: ClientBuilder) -> Result<Client, ApiError> {
    builder.build().map_err(|e| ApiError::FailedToBuildRequest {
        reason: format!("failed to build HTTP client: {}", e),
    })
}

/// [`PhotosApi`] backed by the Flickr REST endpoint.
pub struct FlickrPhotosApi {
    client: Client,
    requests: RequestBuilder,
    urls: PhotoUrlBuilder,
}

impl FlickrPhotosApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = build_client(
            Client::builder()
                .user_agent(USER_AGENT)
                .timeout(settings.timeout)
                .connect_timeout(settings.connect_timeout),
        )?;

        Ok(Self {
            client,
            requests: RequestBuilder::new(settings.api_key, settings.base_url),
            urls: PhotoUrlBuilder::new(settings.image_url_template),
        })
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportCause::Status(status.as_u16()).into());
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ApiError::NoData);
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PhotosApi for FlickrPhotosApi {
    async fn search(
        &self,
        query: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<PhotosPage, ApiError> {
        let url = self
            .requests
            .url(&SearchPhotosRequest::new(query, page_number, page_size))?;

        tracing::debug!(query = %query, page = page_number, page_size, "Searching photos");

        let start = Instant::now();
        let result: Result<PhotosPage, ApiError> = async {
            let body = self.get_bytes(url).await?;
            match serde_json::from_slice::<FlickrResponse<PhotosPayload>>(&body)? {
                FlickrResponse::Ok(payload) => Ok(payload.photos),
                FlickrResponse::Fail(failure) => Err(ApiError::Remote {
                    code: failure.code,
                    message: failure.message,
                }),
            }
        }
        .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(page) => tracing::debug!(
                query = %query,
                page = page.page_number,
                pages = page.total_number_of_pages,
                photos = page.photos.len(),
                latency_ms,
                "Search page received"
            ),
            Err(err) => tracing::warn!(
                query = %query,
                page = page_number,
                error_type = err.error_type(),
                error = %err,
                latency_ms,
                "Search request failed"
            ),
        }

        result
    }

    async fn fetch_image(&self, photo: &Photo) -> Result<ImageData, ApiError> {
        let url_string = self.urls.url_string(photo);
        let url = Url::parse(&url_string).map_err(|e| ApiError::FailedToBuildRequest {
            reason: format!("invalid image URL '{}': {}", url_string, e),
        })?;

        let bytes = self.get_bytes(url).await.inspect_err(|err| {
            tracing::warn!(
                photo_id = %photo.id,
                error_type = err.error_type(),
                error = %err,
                "Image download failed"
            );
        })?;

        tracing::debug!(photo_id = %photo.id, bytes = bytes.len(), "Image downloaded");
        Ok(ImageData::from(bytes))
    }
}
