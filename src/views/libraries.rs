//! Rendering of stored libraries into their public JSON shape.
//!
//! Stored image paths never leave the server; clients only see URLs built
//! from the configured public base URL.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Image, Library};

/// Library as returned by `GET /libraries` and `GET /libraries/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LibraryView {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub about: String,
    pub phone: String,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageView {
    pub id: i32,
    /// Absolute URL of the image file
    pub url: String,
}

pub fn render(library: &Library, base_url: &str) -> LibraryView {
    LibraryView {
        id: library.id,
        name: library.name.clone(),
        latitude: library.latitude,
        longitude: library.longitude,
        about: library.about.clone(),
        phone: library.phone.clone(),
        website: library.website.clone(),
        facebook: library.facebook.clone(),
        instagram: library.instagram.clone(),
        opening_hours: library.opening_hours.clone(),
        open_on_weekends: library.open_on_weekends,
        images: library
            .images
            .iter()
            .map(|image| render_image(image, base_url))
            .collect(),
    }
}

pub fn render_many(libraries: &[Library], base_url: &str) -> Vec<LibraryView> {
    libraries.iter().map(|library| render(library, base_url)).collect()
}

fn render_image(image: &Image, base_url: &str) -> ImageView {
    ImageView {
        id: image.id,
        url: format!("{}/files/{}", base_url.trim_end_matches('/'), image.path),
    }
}
