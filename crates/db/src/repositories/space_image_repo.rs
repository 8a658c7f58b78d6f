//! Repository for the `space_images` table (ordered galleries).

use sqlx::PgPool;
use venia_core::types::DbId;

use crate::models::image::SpaceImage;

const COLUMNS: &str = "id, space_id, url, position";

/// Gallery operations. A space owns its images exclusively; reordering
/// rewrites the whole gallery.
pub struct SpaceImageRepo;

impl SpaceImageRepo {
    /// List a space's gallery in display order.
    pub async fn list_for_space(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Vec<SpaceImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM space_images WHERE space_id = $1 ORDER BY position");
        sqlx::query_as::<_, SpaceImage>(&query)
            .bind(space_id)
            .fetch_all(pool)
            .await
    }

    /// Rebuild a space's gallery from scratch in the given order.
    ///
    /// Existing images not present in `urls` are dropped (orphan removal).
    /// Positions are assigned densely from 0.
    pub async fn replace_gallery(
        pool: &PgPool,
        space_id: DbId,
        urls: &[String],
    ) -> Result<Vec<SpaceImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM space_images WHERE space_id = $1")
            .bind(space_id)
            .execute(&mut *tx)
            .await?;

        let mut gallery = Vec::with_capacity(urls.len());
        for (position, url) in urls.iter().enumerate() {
            let insert = format!(
                "INSERT INTO space_images (space_id, url, position)
                 VALUES ($1, $2, $3)
                 RETURNING {COLUMNS}"
            );
            let image = sqlx::query_as::<_, SpaceImage>(&insert)
                .bind(space_id)
                .bind(url)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            gallery.push(image);
        }

        tx.commit().await?;
        Ok(gallery)
    }

    /// Number of images in a space's gallery.
    pub async fn count_for_space(pool: &PgPool, space_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM space_images WHERE space_id = $1")
            .bind(space_id)
            .fetch_one(pool)
            .await
    }
}
