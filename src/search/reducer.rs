//! Reducer for the search session state machine.

use crate::api::PhotosPage;
use crate::mvi::Reducer;

use super::dedupe::{dedupe, ids};
use super::intent::SearchIntent;
use super::page::SearchPage;
use super::state::{LoadingStage, PageRequest, SearchState, ViewState};

/// Reducer for search state transitions.
///
/// Pure function. Starting and aborting network requests is left to the
/// caller, which compares `in_flight` before and after each dispatch: a new
/// generation means "start this request", `None` means "cancel whatever is
/// running". Completions carrying any other generation are stale and ignored.
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::QueryChanged(text) => query_changed(state, text),
            SearchIntent::ScrolledToBottom => scrolled_to_bottom(state),
            SearchIntent::PageLoaded { generation, page } => match pending(&state, generation) {
                Some(request) => page_loaded(state, request, page),
                None => state,
            },
            SearchIntent::PageFailed {
                generation,
                message,
            } => match pending(&state, generation) {
                Some(request) => page_failed(state, request, message),
                None => state,
            },
        }
    }
}

fn pending(state: &SearchState, generation: u64) -> Option<PageRequest> {
    state
        .in_flight
        .as_ref()
        .filter(|request| request.generation == generation)
        .cloned()
}

fn request_for(page: &SearchPage, generation: u64, stage: LoadingStage) -> PageRequest {
    PageRequest {
        generation,
        query: page.query.clone(),
        page_number: page.number,
        page_size: page.page_size,
        stage,
    }
}

fn query_changed(state: SearchState, text: String) -> SearchState {
    let page_size = state.page.page_size;

    if text.trim().is_empty() {
        return SearchState {
            page: SearchPage::new("", page_size),
            view_state: ViewState::Empty,
            photos: Vec::new(),
            in_flight: None,
            page_error: None,
            generation: state.generation,
        };
    }

    // Same query: nothing to refetch unless the last attempt failed.
    if text == state.page.query && !matches!(state.view_state, ViewState::Error(_)) {
        return state;
    }

    let page = SearchPage::new(text, page_size);
    let generation = state.generation + 1;
    let in_flight = page
        .next()
        .map(|first| request_for(&first, generation, LoadingStage::Initial));

    SearchState {
        page,
        view_state: ViewState::Loading(LoadingStage::Initial),
        photos: Vec::new(),
        in_flight,
        page_error: None,
        generation,
    }
}

fn scrolled_to_bottom(state: SearchState) -> SearchState {
    if !state.can_load_more() {
        return state;
    }
    let Some(next) = state.page.next() else {
        return state;
    };

    let generation = state.generation + 1;
    SearchState {
        view_state: ViewState::Loading(LoadingStage::Iterative),
        in_flight: Some(request_for(&next, generation, LoadingStage::Iterative)),
        page_error: None,
        generation,
        ..state
    }
}

fn page_loaded(state: SearchState, request: PageRequest, loaded: PhotosPage) -> SearchState {
    let total = loaded.total_number_of_pages;

    match request.stage {
        LoadingStage::Initial => {
            let page = state.page.loaded(request.page_number, total);
            if loaded.photos.is_empty() {
                return SearchState {
                    page,
                    view_state: ViewState::NoResult,
                    photos: Vec::new(),
                    in_flight: None,
                    ..state
                };
            }

            SearchState {
                page,
                view_state: ViewState::Loaded(LoadingStage::Initial),
                photos: dedupe::<&str>(&[], &loaded.photos),
                in_flight: None,
                ..state
            }
        }
        LoadingStage::Iterative => {
            if loaded.photos.is_empty() {
                // An empty continuation page ends the result set.
                let number = state.page.number;
                return SearchState {
                    page: state.page.loaded(number, number),
                    view_state: ViewState::Loaded(LoadingStage::Iterative),
                    in_flight: None,
                    ..state
                };
            }

            let fresh = dedupe(&ids(&state.photos), &loaded.photos);
            let mut photos = state.photos;
            photos.extend(fresh);

            SearchState {
                page: state.page.loaded(request.page_number, total),
                view_state: ViewState::Loaded(LoadingStage::Iterative),
                photos,
                in_flight: None,
                page_error: None,
                generation: state.generation,
            }
        }
    }
}

fn page_failed(state: SearchState, request: PageRequest, message: String) -> SearchState {
    match request.stage {
        LoadingStage::Initial => SearchState {
            view_state: ViewState::Error(message),
            photos: Vec::new(),
            in_flight: None,
            ..state
        },
        // Keep what is already shown; the next scroll retries the same page.
        LoadingStage::Iterative => SearchState {
            view_state: ViewState::Loaded(LoadingStage::Iterative),
            in_flight: None,
            page_error: Some(message),
            ..state
        },
    }
}
