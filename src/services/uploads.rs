//! Upload storage for library images.
//!
//! Files are staged in memory under a generated name first; they only reach
//! the disk once the payload they belong to has been validated. Written files
//! are removed again when their [`StoredUploads`] guard is dropped without
//! [`StoredUploads::keep`], whether by an error or a cancelled request.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::AppResult;

/// An uploaded file that has been named but not written yet
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Name under the upload directory, also the stored image path
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct UploadStore {
    directory: PathBuf,
    sequence: Arc<AtomicU64>,
}

impl UploadStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_directory(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    /// Give an uploaded file its final name: `<millis>-<seq>-<original>`
    pub fn stage(&self, original_name: Option<&str>, bytes: Bytes) -> PendingUpload {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let file_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            seq,
            sanitize_file_name(original_name.unwrap_or_default())
        );
        PendingUpload { file_name, bytes }
    }

    /// Write staged files. On failure, files written so far are removed.
    pub async fn persist(&self, uploads: &[PendingUpload]) -> AppResult<StoredUploads> {
        let mut stored = StoredUploads {
            paths: Vec::with_capacity(uploads.len()),
            kept: false,
        };
        for upload in uploads {
            self.write(upload).await?;
            stored.paths.push(self.directory.join(&upload.file_name));
        }
        tracing::debug!("Stored {} uploaded file(s)", uploads.len());
        Ok(stored)
    }

    async fn write(&self, upload: &PendingUpload) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.directory.join(&upload.file_name))
            .await?;
        file.write_all(&upload.bytes).await?;
        file.flush().await
    }
}

/// Files written by [`UploadStore::persist`], removed on drop unless kept
#[derive(Debug)]
#[must_use = "dropping the guard removes the files"]
pub struct StoredUploads {
    paths: Vec<PathBuf>,
    kept: bool,
}

impl StoredUploads {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The files now belong to a committed record
    pub fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for StoredUploads {
    fn drop(&mut self) {
        if self.kept || self.paths.is_empty() {
            return;
        }
        tracing::warn!("Removing {} uploaded file(s) of an unsaved library", self.paths.len());
        for path in &self.paths {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
            }
        }
    }
}

/// Keep the last path component and replace anything outside `[A-Za-z0-9._-]`
fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}
