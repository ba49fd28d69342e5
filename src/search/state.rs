//! Search screen state.

use crate::api::Photo;
use crate::mvi::UiState;

use super::page::SearchPage;

/// Whether a load starts a session or continues it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    /// First page of a new query.
    Initial,
    /// Continuation triggered by reaching the end of the list.
    Iterative,
}

/// What the view should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Empty,
    NoResult,
    Error(String),
    Loading(LoadingStage),
    Loaded(LoadingStage),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// The single outstanding page request of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Tag matched against completions; a mismatch marks a stale response.
    pub generation: u64,
    pub query: String,
    pub page_number: u32,
    pub page_size: u32,
    pub stage: LoadingStage,
}

/// Complete search session state, replaced wholesale on every reduction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    /// Query and last loaded page.
    pub page: SearchPage,
    pub view_state: ViewState,
    /// Accumulated photos, ids unique.
    pub photos: Vec<Photo>,
    /// Request the runtime must have running, if any.
    pub in_flight: Option<PageRequest>,
    /// Failure of the last continuation load; the list itself is kept.
    pub page_error: Option<String>,
    /// Last generation handed out; only ever grows.
    pub generation: u64,
}

impl UiState for SearchState {}

impl SearchState {
    /// Empty state whose sessions use `page_size`.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page: SearchPage::new("", page_size),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.page.query
    }

    /// A scroll to the bottom would load another page.
    pub fn can_load_more(&self) -> bool {
        self.in_flight.is_none()
            && matches!(self.view_state, ViewState::Loaded(_) | ViewState::NoResult)
            && self.page.next().is_some()
    }
}
