//! Immutable pagination descriptor for one search session.

/// Photos per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 21;

/// Where a search session stands: the query and the last page loaded for it.
///
/// `number == 0` means nothing has been loaded yet, so `next()` yields page 1.
/// A new value replaces the old one on every advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub query: String,
    pub page_size: u32,
    pub number: u32,
    /// Known once the server has answered for this query.
    pub total_number_of_pages: Option<u32>,
}

impl SearchPage {
    /// Fresh session for `query`; nothing loaded.
    pub fn new(query: impl Into<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            number: 0,
            total_number_of_pages: None,
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    /// True once the last known page has been reached.
    ///
    /// Uses `>=` so inconsistent paging metadata (a current page beyond the
    /// declared total) still terminates pagination.
    pub fn is_last(&self) -> bool {
        self.total_number_of_pages
            .is_some_and(|total| self.number >= total)
    }

    /// Number of photos covered by the loaded pages.
    pub fn total_number_of_items(&self) -> u32 {
        self.number.saturating_mul(self.page_size)
    }

    /// The page after this one, or `None` past the last page.
    pub fn next(&self) -> Option<SearchPage> {
        if self.is_last() {
            return None;
        }
        Some(SearchPage {
            number: self.number + 1,
            ..self.clone()
        })
    }

    /// This page after the server reported `number` of `total` pages.
    pub fn loaded(&self, number: u32, total: u32) -> SearchPage {
        SearchPage {
            number,
            total_number_of_pages: Some(total),
            ..self.clone()
        }
    }
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new("", DEFAULT_PAGE_SIZE)
    }
}
