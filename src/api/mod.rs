//! Typed client for the remote photo search service.
//!
//! - `models` - wire records and the `stat` response envelope
//! - `request` - query-string construction for REST method calls
//! - `url` - image URL template substitution
//! - `client` - the [`PhotosApi`] seam and its HTTP implementation

mod client;
mod error;
mod models;
mod request;
mod url;

pub use client::{ClientSettings, FlickrPhotosApi, ImageData, PhotosApi};
pub use error::{ApiError, TransportCause};
pub use models::{FlickrResponse, Photo, PhotosPage, PhotosPayload, RemoteFailure};
pub use request::{FlickrRequest, RequestBuilder, SearchPhotosRequest, DEFAULT_BASE_URL};
pub use url::{PhotoUrlBuilder, DEFAULT_IMAGE_URL_TEMPLATE};
