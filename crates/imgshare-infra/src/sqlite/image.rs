//! SQLite image repository implementation.

use imgshare_core::repository::image::ImageRepository;
use imgshare_types::error::RepositoryError;
use imgshare_types::image::{ImageId, ImageModel, NewImage};
use imgshare_types::post::PostId;
use imgshare_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ImageRepository`.
#[derive(Debug, Clone)]
pub struct SqliteImageRepository {
    pool: DatabasePool,
}

impl SqliteImageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_image(row: &sqlx::sqlite::SqliteRow) -> Result<ImageModel, sqlx::Error> {
    let user_id: Option<i64> = row.try_get("user_id")?;
    let post_id: Option<i64> = row.try_get("post_id")?;

    Ok(ImageModel {
        id: ImageId(row.try_get("id")?),
        name: row.try_get("name")?,
        image_bytes: row.try_get("image_bytes")?,
        user_id: user_id.map(UserId),
        post_id: post_id.map(PostId),
    })
}

impl ImageRepository for SqliteImageRepository {
    async fn find_by_post_id(
        &self,
        post_id: &PostId,
    ) -> Result<Option<ImageModel>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM images WHERE post_id = ? ORDER BY id LIMIT 1")
            .bind(post_id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref()
            .map(row_to_image)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn create(&self, image: &NewImage) -> Result<ImageModel, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO images (name, image_bytes, user_id, post_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&image.name)
        .bind(&image.image_bytes)
        .bind(image.user_id.map(|id| id.0))
        .bind(image.post_id.map(|id| id.0))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ImageModel {
            id: ImageId(result.last_insert_rowid()),
            name: image.name.clone(),
            image_bytes: image.image_bytes.clone(),
            user_id: image.user_id,
            post_id: image.post_id,
        })
    }

    async fn save(&self, image: &ImageModel) -> Result<ImageModel, RepositoryError> {
        let result = sqlx::query(
            "UPDATE images SET name = ?, image_bytes = ?, user_id = ?, post_id = ? WHERE id = ?",
        )
        .bind(&image.name)
        .bind(&image.image_bytes)
        .bind(image.user_id.map(|id| id.0))
        .bind(image.post_id.map(|id| id.0))
        .bind(image.id.0)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(image.clone())
    }

    async fn delete(&self, id: &ImageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
