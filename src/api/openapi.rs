//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, libraries};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libraries API",
        version = "1.0.0",
        description = "Directory of libraries with location, contact details and photos"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        libraries::list_libraries,
        libraries::get_library,
        libraries::create_library,
    ),
    components(
        schemas(
            libraries::CreateLibraryForm,
            crate::models::Library,
            crate::models::Image,
            crate::views::LibraryView,
            crate::views::ImageView,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "libraries", description = "Library directory")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
