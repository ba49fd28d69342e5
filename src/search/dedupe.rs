//! Photo id deduplication across and within pages.
//!
//! The provider has been seen returning the same photo id more than once in
//! one page and across consecutive pages for a single query. Lists handed to
//! the view must keep ids unique.

use std::collections::HashSet;

use crate::api::Photo;

/// Ids of `photos`, in order.
pub fn ids(photos: &[Photo]) -> Vec<&str> {
    photos.iter().map(|p| p.id.as_str()).collect()
}

/// Photos of `incoming` whose ids are neither in `existing` nor repeated
/// earlier in `incoming`, in their original order.
pub fn dedupe<S: AsRef<str>>(existing: &[S], incoming: &[Photo]) -> Vec<Photo> {
    let mut seen: HashSet<&str> = existing.iter().map(AsRef::as_ref).collect();
    incoming
        .iter()
        .filter(|photo| seen.insert(photo.id.as_str()))
        .cloned()
        .collect()
}
