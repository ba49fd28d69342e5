//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;
pub mod mock_server;

use flickr_search::api::{Photo, PhotosPage};
use std::io::Cursor;
use std::net::TcpListener;
use std::path::PathBuf;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

pub fn photo(id: &str) -> Photo {
    Photo::new(id, format!("Photo {}", id), "secret", "65535", 66)
}

/// Search result page holding photos with the given ids.
pub fn photos_page(number: u32, total: u32, ids: &[&str]) -> PhotosPage {
    PhotosPage {
        page_number: number,
        total_number_of_pages: total,
        items_per_page: 21,
        total_items: u64::from(total) * 21,
        photos: ids.iter().map(|id| photo(id)).collect(),
    }
}

pub fn photo_ids(photos: &[Photo]) -> Vec<String> {
    photos.iter().map(|p| p.id.clone()).collect()
}

/// A valid PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer.into_inner()
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
