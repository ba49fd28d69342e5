//! Sequential page loading for one search session at a time.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use crate::api::{ApiError, Photo, PhotosApi, PhotosPage};

use super::paginator::Paginator;

/// Outcome of one page load.
#[derive(Debug)]
pub enum FetchResult {
    /// The page held no photos.
    Empty,
    Photos(Vec<Photo>),
    Error(ApiError),
}

/// Query and pagination position of the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub query: String,
    pub paginator: Paginator,
}

/// Loads the first and following pages of a query, keeping at most one
/// request outstanding.
///
/// Loads resolve to `None` when they were cancelled or superseded; a
/// cancelled request never produces a result.
pub struct SearchedPhotosFetcher {
    api: Arc<dyn PhotosApi>,
    page_size: u32,
    inner: Mutex<FetcherInner>,
}

#[derive(Default)]
struct FetcherInner {
    session: Option<SearchSession>,
    current: Option<AbortHandle>,
    generation: u64,
}

type SearchTask = JoinHandle<Result<PhotosPage, ApiError>>;

impl SearchedPhotosFetcher {
    pub fn new(api: Arc<dyn PhotosApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            inner: Mutex::new(FetcherInner::default()),
        }
    }

    /// Snapshot of the active session, if a first page has loaded.
    pub fn search_info(&self) -> Option<SearchSession> {
        self.inner.lock().session.clone()
    }

    /// Abort the outstanding request and forget the session.
    pub fn cancel_current_request(&self) {
        let mut inner = self.inner.lock();
        inner.session = None;
        inner.generation += 1;
        if let Some(handle) = inner.current.take() {
            tracing::debug!("Cancelling in-flight search request");
            handle.abort();
        }
    }

    /// Start a new session for `text` and load its first page.
    pub async fn load_first_page(&self, text: &str) -> Option<FetchResult> {
        self.cancel_current_request();

        let (generation, task) = self.start(text.to_string(), 1, self.page_size);
        let result = Self::join(task).await?;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return None;
        }
        inner.current = None;

        Some(match result {
            Ok(page) => {
                inner.session = Some(SearchSession {
                    query: text.to_string(),
                    paginator: Paginator::from_first_page(self.page_size, &page),
                });
                if page.photos.is_empty() {
                    FetchResult::Empty
                } else {
                    FetchResult::Photos(page.photos)
                }
            }
            Err(err) => FetchResult::Error(err),
        })
    }

    /// Load the page after the current one.
    ///
    /// `None` without a session, past the last page, or when cancelled.
    pub async fn load_next_page(&self) -> Option<FetchResult> {
        let (query, next_page, page_size) = {
            let inner = self.inner.lock();
            let session = inner.session.as_ref()?;
            let next_page = session.paginator.next_page()?;
            (
                session.query.clone(),
                next_page,
                session.paginator.page_size(),
            )
        };

        let (generation, task) = self.start(query, next_page, page_size);
        let result = Self::join(task).await?;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return None;
        }
        inner.current = None;

        Some(match result {
            Ok(page) => {
                let session = inner.session.as_mut()?;
                if page.photos.is_empty() {
                    session.paginator.finish();
                    FetchResult::Empty
                } else {
                    session.paginator.advance();
                    FetchResult::Photos(page.photos)
                }
            }
            Err(err) => FetchResult::Error(err),
        })
    }

    fn start(&self, query: String, page_number: u32, page_size: u32) -> (u64, SearchTask) {
        let api = Arc::clone(&self.api);
        let task = tokio::spawn(async move { api.search(&query, page_number, page_size).await });

        let mut inner = self.inner.lock();
        inner.generation += 1;
        if let Some(previous) = inner.current.replace(task.abort_handle()) {
            previous.abort();
        }
        (inner.generation, task)
    }

    async fn join(task: SearchTask) -> Option<Result<PhotosPage, ApiError>> {
        match task.await {
            Ok(result) => Some(result),
            Err(err) if err.is_cancelled() => None,
            Err(err) => {
                tracing::error!(error = %err, "Search task panicked");
                None
            }
        }
    }
}
