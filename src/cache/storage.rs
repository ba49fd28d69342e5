//! Key-value storage for downloaded image bytes.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::api::ImageData;

/// Image byte cache keyed by photo id.
///
/// Lookups never block past the lookup itself; a miss is `None`.
pub trait ImageStorage: Send + Sync {
    fn get(&self, photo_id: &str) -> Option<ImageData>;
    fn put(&self, photo_id: &str, data: ImageData);
}

/// In-process [`ImageStorage`] behind a single mutex.
///
/// All reads and writes are serialised, so concurrent `get`/`put` on one key
/// are linearizable and the last `put` wins. With `max_entries` set, the
/// oldest inserted key is evicted to make room for a new one.
pub struct InMemoryImageStorage {
    inner: Mutex<StorageInner>,
    max_entries: Option<usize>,
}

#[derive(Default)]
struct StorageInner {
    entries: HashMap<String, ImageData>,
    insertion_order: VecDeque<String>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::with_max_entries(None)
    }

    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(StorageInner::default()),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.inner.lock().entries.contains_key(photo_id)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.insertion_order.clear();
    }
}

impl Default for InMemoryImageStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStorage for InMemoryImageStorage {
    fn get(&self, photo_id: &str) -> Option<ImageData> {
        self.inner.lock().entries.get(photo_id).cloned()
    }

    fn put(&self, photo_id: &str, data: ImageData) {
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(photo_id) {
            inner.entries.insert(photo_id.to_string(), data);
            return;
        }

        if let Some(max) = self.max_entries {
            while inner.entries.len() >= max {
                let Some(oldest) = inner.insertion_order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
                tracing::trace!(photo_id = %oldest, "Evicted cached image");
            }
        }

        inner.entries.insert(photo_id.to_string(), data);
        inner.insertion_order.push_back(photo_id.to_string());
    }
}
