//! Intents driving the search reducer.

use crate::api::PhotosPage;
use crate::mvi::Intent;

/// User events and request completions.
#[derive(Debug, Clone)]
pub enum SearchIntent {
    /// Search field text settled on a new value.
    QueryChanged(String),

    /// List reached its bottom edge.
    ScrolledToBottom,

    /// A page request finished.
    PageLoaded { generation: u64, page: PhotosPage },

    /// A page request failed.
    PageFailed { generation: u64, message: String },
}

impl Intent for SearchIntent {}
