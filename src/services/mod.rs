//! Business logic services

pub mod libraries;
pub mod uploads;

use std::sync::Arc;

use crate::repository::LibraryStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub libraries: libraries::LibrariesService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn LibraryStore>, uploads: uploads::UploadStore) -> Self {
        Self {
            libraries: libraries::LibrariesService::new(store, uploads),
        }
    }
}
