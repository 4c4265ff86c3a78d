//! Libraries API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Multipart, WithRejection};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Library, LibraryCandidate},
    views::{self, LibraryView},
    AppState,
};

/// Form field carrying image files
pub const IMAGES_FIELD: &str = "images";

/// Multipart body of `POST /libraries`, for the OpenAPI document
#[derive(ToSchema)]
pub struct CreateLibraryForm {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// At most 500 characters
    pub about: String,
    pub phone: String,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub opening_hours: String,
    /// `"true"` or `"false"`
    pub open_on_weekends: String,
    /// Image files, repeated once per file
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<String>,
}

/// List all libraries
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "libraries",
    responses(
        (status = 200, description = "Library list", body = Vec<LibraryView>)
    )
)]
pub async fn list_libraries(State(state): State<AppState>) -> AppResult<Json<Vec<LibraryView>>> {
    let libraries = state.services.libraries.list().await?;
    Ok(Json(views::render_many(&libraries, &state.config.server.public_url)))
}

/// Get library by ID
#[utoipa::path(
    get,
    path = "/libraries/{id}",
    tag = "libraries",
    params(("id" = i32, Path, description = "Library ID")),
    responses(
        (status = 200, description = "Library details", body = LibraryView),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<LibraryView>> {
    let library = state.services.libraries.get_by_id(id).await?;
    Ok(Json(views::render(&library, &state.config.server.public_url)))
}

/// Create a library with its images.
///
/// The response is the stored record as is: images carry their stored
/// `path`, not a URL. A missing `open_on_weekends` field means `false`.
#[utoipa::path(
    post,
    path = "/libraries",
    tag = "libraries",
    request_body(content = CreateLibraryForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Library created", body = Library),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_library(
    State(state): State<AppState>,
    WithRejection(mut multipart, _): WithRejection<Multipart, AppError>,
) -> AppResult<(StatusCode, Json<Library>)> {
    let service = &state.services.libraries;
    let mut candidate = LibraryCandidate::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            if name != IMAGES_FIELD {
                return Err(AppError::BadRequest(format!("Unexpected file field `{}`", name)));
            }
            let original_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            files.push(service.uploads().stage(original_name.as_deref(), bytes));
            continue;
        }

        let value = field.text().await?;
        if !candidate.set_text(&name, value) {
            tracing::debug!("Ignoring unknown form field `{}`", name);
        }
    }

    if candidate.open_on_weekends.is_none() {
        candidate.open_on_weekends = Some(false);
    }

    let library = service.create(candidate, files).await?;
    Ok((StatusCode::CREATED, Json(library)))
}
