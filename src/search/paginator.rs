//! Mutable page tracker for [`SearchedPhotosFetcher`](super::SearchedPhotosFetcher).

use crate::api::PhotosPage;

/// Tracks the current page of one search session.
///
/// Starts on page 1 (the page that produced the totals) and only moves
/// forward through [`advance`](Self::advance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: u32,
    current_page: u32,
    total_number_of_pages: u32,
}

impl Paginator {
    pub fn new(page_size: u32, total_number_of_pages: u32) -> Self {
        Self {
            page_size,
            current_page: 1,
            total_number_of_pages,
        }
    }

    /// Paginator positioned on the first page of a search response.
    ///
    /// Keeps the requested page size; the server only supplies the total.
    pub fn from_first_page(page_size: u32, page: &PhotosPage) -> Self {
        Self::new(page_size, page.total_number_of_pages)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_number_of_pages(&self) -> u32 {
        self.total_number_of_pages
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_number_of_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        if self.is_last_page() {
            None
        } else {
            Some(self.current_page + 1)
        }
    }

    pub fn total_number_of_items(&self) -> u32 {
        self.current_page.saturating_mul(self.page_size)
    }

    /// Move to the next page. Past the last page this is a no-op returning `None`.
    pub fn advance(&mut self) -> Option<u32> {
        let next = self.next_page()?;
        self.current_page = next;
        Some(next)
    }

    /// Stop paginating at the current page.
    pub fn finish(&mut self) {
        self.total_number_of_pages = self.current_page;
    }
}
