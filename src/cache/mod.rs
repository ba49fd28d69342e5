//! Image byte caching.

mod repository;
mod storage;

pub use repository::ImageDataRepository;
pub use storage::{ImageStorage, InMemoryImageStorage};
