use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BASE_URL, DEFAULT_IMAGE_URL_TEMPLATE};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Remote endpoint and HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST endpoint (default: "https://api.flickr.com/services/rest/").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Image URL template with `{farm}`, `{server}`, `{id}`, `{secret}` placeholders.
    #[serde(default = "default_image_url_template")]
    pub image_url_template: String,
    /// API key. `FLICKR_API_KEY` overrides this when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Search session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Photos requested per page (default: 21, a multiple of the 3-column grid).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Quiet period before a typed query is sent, in milliseconds (default: 300).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Image cache settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached images. Unbounded when absent.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl ApiConfig {
    pub const API_KEY_ENV: &'static str = "FLICKR_API_KEY";

    /// The configured API key, ignoring blank values.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_url_template() -> String {
    DEFAULT_IMAGE_URL_TEMPLATE.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    21
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_url_template: default_image_url_template(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
