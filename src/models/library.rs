//! Library and image models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Library record as stored, with its images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Library {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free text description, at most 500 characters
    pub about: String,
    pub phone: String,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    /// Loaded separately from the `images` table, ordered by id
    #[sqlx(skip)]
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Image record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Image {
    pub id: i32,
    #[serde(skip)]
    pub library_id: i32,
    /// File name relative to the upload directory
    pub path: String,
}

/// Validated library ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewLibrary {
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
    pub images: Vec<NewImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub path: String,
}

/// Create payload as received, before validation.
///
/// Every field is optional so that missing values are reported together
/// instead of failing on the first one. Coordinates stay as text until the
/// schema checks that they are numbers.
#[derive(Debug, Clone, Default, Validate)]
pub struct LibraryCandidate {
    #[validate(required(message = "name is a required field"))]
    pub name: Option<String>,
    #[validate(required(message = "latitude is a required field"))]
    pub latitude: Option<String>,
    #[validate(required(message = "longitude is a required field"))]
    pub longitude: Option<String>,
    #[validate(
        required(message = "about is a required field"),
        length(max = 500, message = "about must be at most 500 characters")
    )]
    pub about: Option<String>,
    #[validate(required(message = "phone is a required field"))]
    pub phone: Option<String>,
    #[validate(required(message = "website is a required field"))]
    pub website: Option<String>,
    #[validate(required(message = "facebook is a required field"))]
    pub facebook: Option<String>,
    #[validate(required(message = "instagram is a required field"))]
    pub instagram: Option<String>,
    #[validate(required(message = "opening_hours is a required field"))]
    pub opening_hours: Option<String>,
    #[validate(required(message = "open_on_weekends is a required field"))]
    pub open_on_weekends: Option<bool>,
    #[validate(nested)]
    pub images: Vec<ImageCandidate>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ImageCandidate {
    #[validate(required(message = "path is a required field"))]
    pub path: Option<String>,
}

impl LibraryCandidate {
    /// Set a scalar text field by its form name.
    ///
    /// Empty values count as missing. Returns `false` for unknown names.
    pub fn set_text(&mut self, name: &str, value: String) -> bool {
        let value = Some(value).filter(|v| !v.is_empty());
        match name {
            "name" => self.name = value,
            "latitude" => self.latitude = value,
            "longitude" => self.longitude = value,
            "about" => self.about = value,
            "phone" => self.phone = value,
            "website" => self.website = value,
            "facebook" => self.facebook = value,
            "instagram" => self.instagram = value,
            "opening_hours" => self.opening_hours = value,
            // Only the literal "true" switches the flag on
            "open_on_weekends" => self.open_on_weekends = Some(value.as_deref() == Some("true")),
            _ => return false,
        }
        true
    }

    pub fn push_image(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.images.push(ImageCandidate {
            path: Some(path).filter(|p| !p.is_empty()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_treats_empty_as_missing() {
        let mut candidate = LibraryCandidate::default();
        assert!(candidate.set_text("name", String::new()));
        assert_eq!(candidate.name, None);
        assert!(candidate.set_text("name", "Lib A".to_string()));
        assert_eq!(candidate.name.as_deref(), Some("Lib A"));
    }

    #[test]
    fn test_open_on_weekends_coercion() {
        let mut candidate = LibraryCandidate::default();
        assert_eq!(candidate.open_on_weekends, None);

        candidate.set_text("open_on_weekends", "true".to_string());
        assert_eq!(candidate.open_on_weekends, Some(true));

        candidate.set_text("open_on_weekends", "false".to_string());
        assert_eq!(candidate.open_on_weekends, Some(false));

        candidate.set_text("open_on_weekends", "yes".to_string());
        assert_eq!(candidate.open_on_weekends, Some(false));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut candidate = LibraryCandidate::default();
        assert!(!candidate.set_text("email", "a@b.c".to_string()));
    }
}
