//! Paginated photo search feature.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent):
//! - `state.rs` - view state enum and the session aggregate
//! - `intent.rs` - user events and request completions
//! - `reducer.rs` - state transitions (pure, no side effects)
//! - `view_model.rs` - runtime that performs the requests the state asks for
//!
//! `fetcher.rs` offers the same paging as a plain async API for callers that
//! drive pages one by one.

mod cell;
mod dedupe;
mod fetcher;
mod input;
mod intent;
mod page;
mod paginator;
mod reducer;
mod state;
mod view_model;

pub use cell::{CellImage, CellModelsBuilder, ImageLoadHandle, ImageLoader, PhotoCellModel};
pub use dedupe::{dedupe, ids};
pub use fetcher::{FetchResult, SearchSession, SearchedPhotosFetcher};
pub use input::{BottomEdgeDetector, QueryDebouncer};
pub use intent::SearchIntent;
pub use page::{SearchPage, DEFAULT_PAGE_SIZE};
pub use paginator::Paginator;
pub use reducer::SearchReducer;
pub use state::{LoadingStage, PageRequest, SearchState, ViewState};
pub use view_model::{SearchViewModel, ViewModelSettings};
