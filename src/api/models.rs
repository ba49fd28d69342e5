//! Wire models for the photo search provider.

use serde::{Deserialize, Deserializer, Serialize};

/// A single photo record as returned by the search endpoint.
///
/// Identity is the provider `id`; every other field only feeds the image URL
/// or the caption.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub secret: String,
    pub server: String,
    pub farm: u32,
}

impl Photo {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        secret: impl Into<String>,
        server: impl Into<String>,
        farm: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            secret: secret.into(),
            server: server.into(),
            farm,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotosPage {
    #[serde(rename = "page")]
    pub page_number: u32,
    #[serde(rename = "pages")]
    pub total_number_of_pages: u32,
    #[serde(rename = "perpage")]
    pub items_per_page: u32,
    #[serde(rename = "total", deserialize_with = "lenient_u64")]
    pub total_items: u64,
    #[serde(rename = "photo", default)]
    pub photos: Vec<Photo>,
}

impl PhotosPage {
    /// Page holds no more photos than the server-declared page size.
    pub fn is_consistent(&self) -> bool {
        self.photos.len() <= self.items_per_page as usize
    }
}

/// Payload of a successful search response: `{"photos": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotosPayload {
    pub photos: PhotosPage,
}

/// Provider-level failure body: `{"stat": "fail", "code": 112, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFailure {
    pub code: i64,
    pub message: String,
}

/// Top-level response envelope, discriminated by the `stat` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "stat")]
pub enum FlickrResponse<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "fail")]
    Fail(RemoteFailure),
}

// `total` arrives as "182391" from some endpoints and as 182391 from others.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
