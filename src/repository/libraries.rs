//! PostgreSQL implementation of the library store

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LibraryStore;
use crate::{
    error::{AppError, AppResult},
    models::{Image, Library, NewLibrary},
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load images for the given libraries, grouped by owner and ordered by id
    async fn images_for(&self, library_ids: &[i32]) -> AppResult<HashMap<i32, Vec<Image>>> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT id, library_id, path FROM images WHERE library_id = ANY($1) ORDER BY id",
        )
        .bind(library_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<Image>> = HashMap::new();
        for image in images {
            grouped.entry(image.library_id).or_default().push(image);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl LibraryStore for LibrariesRepository {
    async fn list_all(&self) -> AppResult<Vec<Library>> {
        let mut libraries = sqlx::query_as::<_, Library>("SELECT * FROM libraries ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i32> = libraries.iter().map(|l| l.id).collect();
        let mut images = self.images_for(&ids).await?;
        for library in &mut libraries {
            library.images = images.remove(&library.id).unwrap_or_default();
        }

        Ok(libraries)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        let mut library = sqlx::query_as::<_, Library>("SELECT * FROM libraries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Library {} not found", id)))?;

        library.images = self.images_for(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(library)
    }

    async fn create(&self, data: &NewLibrary) -> AppResult<Library> {
        // Dropping the transaction on any early return rolls everything back
        let mut tx = self.pool.begin().await?;

        let mut library = sqlx::query_as::<_, Library>(
            r#"
            INSERT INTO libraries (name, latitude, longitude, about, phone, website,
                                   facebook, instagram, opening_hours, open_on_weekends)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(&data.about)
        .bind(&data.phone)
        .bind(&data.website)
        .bind(&data.facebook)
        .bind(&data.instagram)
        .bind(&data.opening_hours)
        .bind(data.open_on_weekends)
        .fetch_one(&mut *tx)
        .await?;

        for image in &data.images {
            let row = sqlx::query_as::<_, Image>(
                "INSERT INTO images (path, library_id) VALUES ($1, $2) RETURNING id, library_id, path",
            )
            .bind(&image.path)
            .bind(library.id)
            .fetch_one(&mut *tx)
            .await?;
            library.images.push(row);
        }

        tx.commit().await?;

        Ok(library)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
