//! Libraries service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Library, LibraryCandidate},
    repository::LibraryStore,
    schema,
};

use super::uploads::{PendingUpload, UploadStore};

#[derive(Clone)]
pub struct LibrariesService {
    store: Arc<dyn LibraryStore>,
    uploads: UploadStore,
}

impl LibrariesService {
    pub fn new(store: Arc<dyn LibraryStore>, uploads: UploadStore) -> Self {
        Self { store, uploads }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// List all libraries with their images
    pub async fn list(&self) -> AppResult<Vec<Library>> {
        self.store.list_all().await
    }

    /// Get a library by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        self.store.get_by_id(id).await
    }

    /// Validate and persist a library with its uploaded images.
    ///
    /// Nothing is written when validation fails. Files are removed again if
    /// the database insert fails or the request is dropped before it ends.
    pub async fn create(
        &self,
        mut candidate: LibraryCandidate,
        files: Vec<PendingUpload>,
    ) -> AppResult<Library> {
        for file in &files {
            candidate.push_image(file.file_name.as_str());
        }

        let data = schema::validate_library(&candidate)?;

        let written = self.uploads.persist(&files).await?;

        match self.store.create(&data).await {
            Ok(library) => {
                written.keep();
                tracing::info!(
                    "Created library {} ({}) with {} image(s)",
                    library.id,
                    library.name,
                    library.images.len()
                );
                Ok(library)
            }
            Err(e) => {
                tracing::warn!("Library insert failed: {}", e);
                Err(e)
            }
        }
    }

    /// Readiness of the underlying store
    pub async fn ping(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Image, NewLibrary};
    use crate::repository::MockLibraryStore;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use std::time::Duration;

    fn valid_candidate() -> LibraryCandidate {
        let mut candidate = LibraryCandidate::default();
        for (name, value) in [
            ("name", "Lib A"),
            ("latitude", "1"),
            ("longitude", "2"),
            ("about", "ok"),
            ("phone", "123"),
            ("website", "http://w"),
            ("facebook", "http://f"),
            ("instagram", "http://i"),
            ("opening_hours", "8-18"),
            ("open_on_weekends", "true"),
        ] {
            candidate.set_text(name, value.to_string());
        }
        candidate
    }

    fn stored(data: &NewLibrary) -> Library {
        Library {
            id: 1,
            name: data.name.clone(),
            latitude: data.latitude,
            longitude: data.longitude,
            about: data.about.clone(),
            phone: data.phone.clone(),
            website: data.website.clone(),
            facebook: data.facebook.clone(),
            instagram: data.instagram.clone(),
            opening_hours: data.opening_hours.clone(),
            open_on_weekends: data.open_on_weekends,
            images: data
                .images
                .iter()
                .enumerate()
                .map(|(i, image)| Image {
                    id: i as i32 + 1,
                    library_id: 1,
                    path: image.path.clone(),
                })
                .collect(),
        }
    }

    fn dir_entries(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_create_persists_files_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let files = vec![
            uploads.stage(Some("a.jpg"), Bytes::from_static(b"a")),
            uploads.stage(Some("b.jpg"), Bytes::from_static(b"b")),
        ];

        let mut store = MockLibraryStore::new();
        store
            .expect_create()
            .withf(|data| data.images.len() == 2 && data.open_on_weekends)
            .times(1)
            .returning(|data| Ok(stored(data)));

        let service = LibrariesService::new(Arc::new(store), uploads);
        let library = service.create(valid_candidate(), files.clone()).await.unwrap();

        assert_eq!(library.images.len(), 2);
        assert_eq!(library.images[0].path, files[0].file_name);
        assert_eq!(dir_entries(dir.path()), 2);
    }

    #[tokio::test]
    async fn test_invalid_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let files = vec![uploads.stage(Some("a.jpg"), Bytes::from_static(b"a"))];

        let mut store = MockLibraryStore::new();
        store.expect_create().never();

        let mut candidate = valid_candidate();
        candidate.about = Some("x".repeat(501));
        candidate.phone = None;

        let service = LibrariesService::new(Arc::new(store), uploads);
        match service.create(candidate, files).await {
            Err(AppError::ValidationFailed(report)) => {
                assert!(report.has_field("about"));
                assert!(report.has_field("phone"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(dir_entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_store_failure_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let files = vec![uploads.stage(Some("a.jpg"), Bytes::from_static(b"a"))];

        let mut store = MockLibraryStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::Internal("insert failed".into())));

        let service = LibrariesService::new(Arc::new(store), uploads);
        assert!(service.create(valid_candidate(), files).await.is_err());
        assert_eq!(dir_entries(dir.path()), 0);
    }

    /// Store whose insert never completes
    struct StalledStore;

    #[async_trait]
    impl LibraryStore for StalledStore {
        async fn list_all(&self) -> AppResult<Vec<Library>> {
            Ok(Vec::new())
        }

        async fn get_by_id(&self, id: i32) -> AppResult<Library> {
            Err(AppError::NotFound(format!("Library {} not found", id)))
        }

        async fn create(&self, _data: &NewLibrary) -> AppResult<Library> {
            std::future::pending().await
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_cancelled_create_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let files = vec![
            uploads.stage(Some("a.jpg"), Bytes::from_static(b"a")),
            uploads.stage(Some("b.jpg"), Bytes::from_static(b"b")),
        ];

        let service = LibrariesService::new(Arc::new(StalledStore), uploads);
        let outcome =
            tokio::time::timeout(Duration::from_millis(50), service.create(valid_candidate(), files))
                .await;

        assert!(outcome.is_err());
        assert_eq!(dir_entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_ping_failure_is_unavailable() {
        let mut store = MockLibraryStore::new();
        store
            .expect_ping()
            .returning(|| Err(AppError::Internal("connection refused".into())));

        let service = LibrariesService::new(Arc::new(store), UploadStore::new("unused"));
        assert!(matches!(service.ping().await, Err(AppError::Unavailable(_))));
    }
}
