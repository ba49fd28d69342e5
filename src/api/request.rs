//! Request construction for the REST endpoint.

use reqwest::Url;

use super::error::ApiError;

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.flickr.com/services/rest/";

/// A provider method call: method-specific query parameters on top of the
/// shared ones added by [`RequestBuilder`].
pub trait FlickrRequest {
    fn query_items(&self) -> Vec<(&'static str, String)>;
}

/// `flickr.photos.search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPhotosRequest {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchPhotosRequest {
    pub const METHOD: &'static str = "flickr.photos.search";

    pub fn new(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page,
            page_size,
        }
    }
}

impl FlickrRequest for SearchPhotosRequest {
    fn query_items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("per_page", self.page_size.to_string()),
            ("page", self.page.to_string()),
            ("method", Self::METHOD.to_string()),
            ("text", self.query.clone()),
        ]
    }
}

/// Builds request URLs for one API key and endpoint.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_key: String,
    base_url: String,
}

impl RequestBuilder {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn shared_query_items(&self) -> [(&'static str, &str); 4] {
        [
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
            ("nojsoncallback", "1"),
            ("safe_search", "1"),
        ]
    }

    /// Full GET URL for `request`.
    pub fn url(&self, request: &impl FlickrRequest) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::FailedToBuildRequest {
            reason: format!("invalid base URL '{}': {}", self.base_url, e),
        })?;

        if url.cannot_be_a_base() {
            return Err(ApiError::FailedToBuildRequest {
                reason: format!("base URL '{}' cannot carry a query", self.base_url),
            });
        }

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in self.shared_query_items() {
                pairs.append_pair(name, value);
            }
            for (name, value) in request.query_items() {
                pairs.append_pair(name, &value);
            }
        }

        Ok(url)
    }
}
