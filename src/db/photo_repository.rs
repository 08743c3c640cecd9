// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Upsert and read mirrored photos

use crate::errors::GraphError;
use crate::models::{Photo, UpsertPhotoRequest};
use sqlx::PgPool;

pub struct PhotoRepository;

impl PhotoRepository {
    /// Upsert a photo by Graph id
    /// DOCUMENTATION: Same insert-then-update shape as albums; `album_id`
    /// is overwritten too, so a re-fetch through another album moves the photo
    pub async fn upsert(
        pool: &PgPool,
        req: &UpsertPhotoRequest,
    ) -> Result<(Photo, bool), GraphError> {
        let author_type = req.author.map(|a| a.kind.as_str());
        let author_id = req.author.map(|a| a.id);

        let inserted = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO facebook_photos (
                id, album_id, author_json, author_type, author_id,
                likes_count, comments_count, link, picture, source,
                name, place, width, height, created_time, updated_time, fetched_at
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, NOW()
            )
            ON CONFLICT (id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(req.album_id)
        .bind(&req.author_json)
        .bind(author_type)
        .bind(author_id)
        .bind(req.likes_count)
        .bind(req.comments_count)
        .bind(&req.link)
        .bind(&req.picture)
        .bind(&req.source)
        .bind(&req.name)
        .bind(&req.place)
        .bind(req.width)
        .bind(req.height)
        .bind(req.created_time)
        .bind(req.updated_time)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert photo {}: {}", req.id, e);
            GraphError::DatabaseError(format!("Insert photo failed: {}", e))
        })?;

        if let Some(photo) = inserted {
            return Ok((photo, true));
        }

        let updated = sqlx::query_as::<_, Photo>(
            r#"
            UPDATE facebook_photos
            SET album_id = $2,
                author_json = $3,
                author_type = $4,
                author_id = $5,
                likes_count = $6,
                comments_count = $7,
                link = $8,
                picture = $9,
                source = $10,
                name = $11,
                place = $12,
                width = $13,
                height = $14,
                created_time = $15,
                updated_time = $16,
                fetched_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(req.album_id)
        .bind(&req.author_json)
        .bind(author_type)
        .bind(author_id)
        .bind(req.likes_count)
        .bind(req.comments_count)
        .bind(&req.link)
        .bind(&req.picture)
        .bind(&req.source)
        .bind(&req.name)
        .bind(&req.place)
        .bind(req.width)
        .bind(req.height)
        .bind(req.created_time)
        .bind(req.updated_time)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update photo {}: {}", req.id, e);
            GraphError::DatabaseError(format!("Update photo failed: {}", e))
        })?;

        Ok((updated, false))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Photo, GraphError> {
        sqlx::query_as::<_, Photo>("SELECT * FROM facebook_photos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching photo {}: {}", id, e);
                GraphError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| GraphError::NotFound(format!("photo {}", id)))
    }

    /// Photos of an album, newest first
    pub async fn get_by_album(
        pool: &PgPool,
        album_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, GraphError> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM facebook_photos
            WHERE album_id = $1
            ORDER BY created_time DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(album_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photos for album {}: {}", album_id, e);
            GraphError::DatabaseError(format!("Fetch photos failed: {}", e))
        })
    }
}
