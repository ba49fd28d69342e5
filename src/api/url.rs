//! Photo image URL construction.

use super::models::Photo;

/// Default static image host template.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://farm{farm}.static.flickr.com/{server}/{id}_{secret}.jpg";

/// Maps a photo record to its image URL by placeholder substitution.
///
/// Recognised placeholders: `{farm}`, `{server}`, `{id}`, `{secret}`.
#[derive(Debug, Clone)]
pub struct PhotoUrlBuilder {
    template: String,
}

impl PhotoUrlBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn url_string(&self, photo: &Photo) -> String {
        self.template
            .replace("{farm}", &photo.farm.to_string())
            .replace("{server}", &photo.server)
            .replace("{id}", &photo.id)
            .replace("{secret}", &photo.secret)
    }
}

impl Default for PhotoUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_URL_TEMPLATE)
    }
}
