//! Search session runtime.
//!
//! Owns the [`SearchState`], feeds user input through the debouncer and
//! edge detector into [`SearchReducer`], and runs the request the state asks
//! for. Only the event loop task mutates state; request tasks report back
//! over a channel and are aborted when superseded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{sleep_until, Instant};

use crate::api::{Photo, PhotosApi};
use crate::cache::ImageDataRepository;
use crate::config::SearchConfig;
use crate::mvi::Reducer;

use super::cell::{CellModelsBuilder, PhotoCellModel};
use super::input::{BottomEdgeDetector, QueryDebouncer};
use super::intent::SearchIntent;
use super::reducer::SearchReducer;
use super::state::{PageRequest, SearchState, ViewState};

/// Runtime knobs for [`SearchViewModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModelSettings {
    pub page_size: u32,
    pub debounce: Duration,
}

impl From<&SearchConfig> for ViewModelSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            page_size: config.page_size,
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}

impl Default for ViewModelSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

enum ViewEvent {
    SearchText(String),
    ScrollPosition(bool),
    Shutdown,
}

/// Handle to a running search session.
pub struct SearchViewModel {
    input: mpsc::UnboundedSender<ViewEvent>,
    state: watch::Receiver<SearchState>,
    cells: CellModelsBuilder,
    task: JoinHandle<()>,
}

impl SearchViewModel {
    /// Spawn the session loop on the current tokio runtime.
    pub fn spawn(
        api: Arc<dyn PhotosApi>,
        images: Arc<ImageDataRepository>,
        settings: ViewModelSettings,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let initial = SearchState::with_page_size(settings.page_size);
        let (state_tx, state_rx) = watch::channel(initial.clone());

        let session = SessionLoop::new(api, initial, state_tx, settings.debounce);
        let task = tokio::spawn(session.run(input_rx));

        Self {
            input: input_tx,
            state: state_rx,
            cells: CellModelsBuilder::new(images),
            task,
        }
    }

    /// Search field text changed.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let _ = self.input.send(ViewEvent::SearchText(text.into()));
    }

    /// Whether the list is currently scrolled to its bottom.
    pub fn set_scrolled_to_bottom(&self, at_bottom: bool) {
        let _ = self.input.send(ViewEvent::ScrollPosition(at_bottom));
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.state.borrow().view_state.clone()
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.state.borrow().photos.clone()
    }

    /// Cell models for the current photo list, in display order.
    pub fn items(&self) -> Vec<PhotoCellModel> {
        self.cells.cell_models(&self.state.borrow().photos)
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Stop the session loop, aborting any in-flight request.
    pub async fn shutdown(self) {
        let _ = self.input.send(ViewEvent::Shutdown);
        if let Err(err) = self.task.await {
            if !err.is_cancelled() {
                tracing::error!(error = %err, "Search session loop panicked");
            }
        }
    }
}

struct SessionLoop {
    api: Arc<dyn PhotosApi>,
    state: SearchState,
    publisher: watch::Sender<SearchState>,
    completions_tx: mpsc::UnboundedSender<SearchIntent>,
    completions_rx: mpsc::UnboundedReceiver<SearchIntent>,
    running: Option<AbortHandle>,
    debouncer: QueryDebouncer,
    edge: BottomEdgeDetector,
}

impl SessionLoop {
    fn new(
        api: Arc<dyn PhotosApi>,
        state: SearchState,
        publisher: watch::Sender<SearchState>,
        debounce: Duration,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            api,
            state,
            publisher,
            completions_tx,
            completions_rx,
            running: None,
            debouncer: QueryDebouncer::new(debounce),
            edge: BottomEdgeDetector::new(),
        }
    }

    async fn run(mut self, mut input: mpsc::UnboundedReceiver<ViewEvent>) {
        tracing::debug!("Search session started");

        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                event = input.recv() => match event {
                    Some(ViewEvent::SearchText(text)) => {
                        if let Some(text) = self.debouncer.push(text, Instant::now()) {
                            self.dispatch(SearchIntent::QueryChanged(text));
                        }
                    }
                    Some(ViewEvent::ScrollPosition(at_bottom)) => {
                        if self.edge.update(at_bottom) {
                            self.dispatch(SearchIntent::ScrolledToBottom);
                        }
                    }
                    Some(ViewEvent::Shutdown) | None => break,
                },
                Some(intent) = self.completions_rx.recv() => self.dispatch(intent),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = self.debouncer.take_due(Instant::now()) {
                        self.dispatch(SearchIntent::QueryChanged(text));
                    }
                }
            }
        }

        self.cancel_running();
        tracing::debug!("Search session stopped");
    }

    fn dispatch(&mut self, intent: SearchIntent) {
        let before = self.state.in_flight.as_ref().map(|r| r.generation);

        let state = std::mem::take(&mut self.state);
        self.state = SearchReducer::reduce(state, intent);

        match self.state.in_flight.clone() {
            Some(request) if Some(request.generation) != before => {
                self.cancel_running();
                self.start(request);
            }
            None if before.is_some() => self.cancel_running(),
            _ => {}
        }

        let state = &self.state;
        self.publisher.send_if_modified(|current| {
            if current == state {
                return false;
            }
            tracing::debug!(
                query = %state.page.query,
                view_state = ?state.view_state,
                photos = state.photos.len(),
                page = state.page.number,
                "Search state updated"
            );
            *current = state.clone();
            true
        });
    }

    fn start(&mut self, request: PageRequest) {
        tracing::info!(
            query = %request.query,
            page = request.page_number,
            stage = ?request.stage,
            generation = request.generation,
            "Requesting search page"
        );

        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let generation = request.generation;
            let intent = match api
                .search(&request.query, request.page_number, request.page_size)
                .await
            {
                Ok(page) => SearchIntent::PageLoaded { generation, page },
                Err(err) => SearchIntent::PageFailed {
                    generation,
                    message: err.user_message(),
                },
            };
            let _ = completions.send(intent);
        });
        self.running = Some(task.abort_handle());
    }

    fn cancel_running(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.abort();
        }
    }
}
