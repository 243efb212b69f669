//! Orphanage repository for database operations.
//!
//! Implements the persistence contract for listings and their images:
//! create/find/update/delete for orphanages, plus single-image lookup and
//! deletion. Deleting an orphanage removes its image rows in the same
//! transaction (explicit cascade) and hands the orphaned file paths back to
//! the caller for unlinking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use haven_core::{Coordinates, ImageId, OrphanageId};

use super::RepositoryError;
use crate::models::{Image, NewOrphanage, Orphanage};

/// Raw `orphanages` row; images are attached by the repository.
#[derive(sqlx::FromRow)]
struct OrphanageRow {
    id: i32,
    name: String,
    latitude: Decimal,
    longitude: Decimal,
    about: String,
    instructions: String,
    opening_hours: String,
    open_on_weekends: bool,
    approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrphanageRow {
    fn into_orphanage(self, images: Vec<Image>) -> Result<Orphanage, RepositoryError> {
        let coordinates = Coordinates::new(self.latitude, self.longitude).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid coordinates in database: {e}"))
        })?;

        Ok(Orphanage {
            id: OrphanageId::new(self.id),
            name: self.name,
            coordinates,
            about: self.about,
            instructions: self.instructions,
            opening_hours: self.opening_hours,
            open_on_weekends: self.open_on_weekends,
            approved: self.approved,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i32,
    path: String,
    orphanage_id: i32,
}

impl ImageRow {
    fn into_image(self) -> Image {
        Image {
            id: ImageId::new(self.id),
            path: self.path,
            orphanage_id: OrphanageId::new(self.orphanage_id),
        }
    }
}

/// Repository for orphanage and image database operations.
pub struct OrphanageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrphanageRepository<'a> {
    /// Create a new orphanage repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an orphanage together with its image rows in one transaction.
    ///
    /// `image_paths` are filenames already written by the image store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// persisted in that case.
    pub async fn create(
        &self,
        data: &NewOrphanage,
        image_paths: &[String],
    ) -> Result<Orphanage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: OrphanageRow = sqlx::query_as(
            r"
            INSERT INTO orphanages
                (name, latitude, longitude, about, instructions,
                 opening_hours, open_on_weekends, approved)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, latitude, longitude, about, instructions,
                      opening_hours, open_on_weekends, approved,
                      created_at, updated_at
            ",
        )
        .bind(&data.name)
        .bind(data.coordinates.latitude())
        .bind(data.coordinates.longitude())
        .bind(&data.about)
        .bind(&data.instructions)
        .bind(&data.opening_hours)
        .bind(data.open_on_weekends)
        .bind(data.approved)
        .fetch_one(&mut *tx)
        .await?;

        let orphanage_id = OrphanageId::new(row.id);
        let images = insert_images(&mut tx, orphanage_id, image_paths).await?;

        tx.commit().await?;

        row.into_orphanage(images)
    }

    /// Fetch all orphanages with their images; empty vec when none exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Orphanage>, RepositoryError> {
        let rows: Vec<OrphanageRow> = sqlx::query_as(
            r"
            SELECT id, name, latitude, longitude, about, instructions,
                   opening_hours, open_on_weekends, approved,
                   created_at, updated_at
            FROM orphanages
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let image_rows: Vec<ImageRow> = sqlx::query_as(
            r"
            SELECT id, path, orphanage_id
            FROM images
            WHERE orphanage_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut orphanages = Vec::with_capacity(rows.len());
        for row in rows {
            let images = image_rows
                .iter()
                .filter(|i| i.orphanage_id == row.id)
                .map(|i| Image {
                    id: ImageId::new(i.id),
                    path: i.path.clone(),
                    orphanage_id: OrphanageId::new(i.orphanage_id),
                })
                .collect();
            orphanages.push(row.into_orphanage(images)?);
        }

        Ok(orphanages)
    }

    /// Find an orphanage by ID.
    ///
    /// An unknown ID yields `Ok(None)`, never an error; callers translate
    /// absence into an HTTP status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: OrphanageId,
    ) -> Result<Option<Orphanage>, RepositoryError> {
        let row: Option<OrphanageRow> = sqlx::query_as(
            r"
            SELECT id, name, latitude, longitude, about, instructions,
                   opening_hours, open_on_weekends, approved,
                   created_at, updated_at
            FROM orphanages
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let images = self.images_for(id).await?;
        Ok(Some(row.into_orphanage(images)?))
    }

    /// Update an orphanage's columns in place.
    ///
    /// Images are untouched; use [`Self::append_images`] to add more.
    /// Returns `Ok(None)` when the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: OrphanageId,
        data: &NewOrphanage,
    ) -> Result<Option<Orphanage>, RepositoryError> {
        let row: Option<OrphanageRow> = sqlx::query_as(
            r"
            UPDATE orphanages
            SET name = $2, latitude = $3, longitude = $4, about = $5,
                instructions = $6, opening_hours = $7, open_on_weekends = $8,
                approved = $9, updated_at = now()
            WHERE id = $1
            RETURNING id, name, latitude, longitude, about, instructions,
                      opening_hours, open_on_weekends, approved,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.coordinates.latitude())
        .bind(data.coordinates.longitude())
        .bind(&data.about)
        .bind(&data.instructions)
        .bind(&data.opening_hours)
        .bind(data.open_on_weekends)
        .bind(data.approved)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let images = self.images_for(id).await?;
        Ok(Some(row.into_orphanage(images)?))
    }

    /// Delete an orphanage and all its image rows in one transaction.
    ///
    /// Returns the stored file paths of the deleted images so the caller can
    /// unlink them, or `RepositoryError::NotFound` for an unknown ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// deleted in that case.
    pub async fn delete(&self, id: OrphanageId) -> Result<Vec<String>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let paths: Vec<(String,)> = sqlx::query_as(
            r"
            DELETE FROM images
            WHERE orphanage_id = $1
            RETURNING path
            ",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM orphanages WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(paths.into_iter().map(|(p,)| p).collect())
    }

    /// Append image rows to an existing orphanage.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn append_images(
        &self,
        orphanage_id: OrphanageId,
        image_paths: &[String],
    ) -> Result<Vec<Image>, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let images = insert_images(&mut tx, orphanage_id, image_paths).await?;
        tx.commit().await?;
        Ok(images)
    }

    /// Find an image by ID; unknown IDs yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_image(&self, id: ImageId) -> Result<Option<Image>, RepositoryError> {
        let row: Option<ImageRow> = sqlx::query_as(
            r"
            SELECT id, path, orphanage_id
            FROM images
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ImageRow::into_image))
    }

    /// Delete a single image row by ID.
    ///
    /// Returns `true` if a row was deleted, `false` if the ID was unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_image(&self, id: ImageId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn images_for(&self, id: OrphanageId) -> Result<Vec<Image>, RepositoryError> {
        let rows: Vec<ImageRow> = sqlx::query_as(
            r"
            SELECT id, path, orphanage_id
            FROM images
            WHERE orphanage_id = $1
            ORDER BY id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ImageRow::into_image).collect())
    }
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    orphanage_id: OrphanageId,
    paths: &[String],
) -> Result<Vec<Image>, RepositoryError> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let row: ImageRow = sqlx::query_as(
            r"
            INSERT INTO images (path, orphanage_id)
            VALUES ($1, $2)
            RETURNING id, path, orphanage_id
            ",
        )
        .bind(path)
        .bind(orphanage_id)
        .fetch_one(&mut **tx)
        .await?;

        images.push(row.into_image());
    }
    Ok(images)
}
