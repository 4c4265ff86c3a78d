//! Persistence layer for libraries and their images

pub mod libraries;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Library, NewLibrary},
};

pub use libraries::LibrariesRepository;

/// Storage gateway for libraries.
///
/// Handlers receive it through application state; implementations own
/// their connection resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Every library with its images, ascending by id
    async fn list_all(&self) -> AppResult<Vec<Library>>;

    /// One library with its images, `AppError::NotFound` when absent
    async fn get_by_id(&self, id: i32) -> AppResult<Library>;

    /// Insert a library and all of its images atomically
    async fn create(&self, data: &NewLibrary) -> AppResult<Library>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}
