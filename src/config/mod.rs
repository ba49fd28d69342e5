//! Configuration loading and validation.

mod loader;
mod types;

pub use loader::{ConfigError, MAX_PAGE_SIZE};
pub use types::{ApiConfig, CacheConfig, Config, SearchConfig};
