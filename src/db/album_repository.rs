// src/db/album_repository.rs
// DOCUMENTATION: Album database operations
// PURPOSE: Upsert and read mirrored albums

use crate::errors::GraphError;
use crate::models::{Album, UpsertAlbumRequest};
use sqlx::PgPool;

pub struct AlbumRepository;

impl AlbumRepository {
    /// Upsert an album by Graph id
    /// DOCUMENTATION: Insert first with ON CONFLICT DO NOTHING so creation is
    /// detectable, then overwrite every mirrored column on the existing row.
    /// Returns the stored album and whether it was created.
    pub async fn upsert(
        pool: &PgPool,
        req: &UpsertAlbumRequest,
    ) -> Result<(Album, bool), GraphError> {
        let author_type = req.author.map(|a| a.kind.as_str());
        let author_id = req.author.map(|a| a.id);

        let inserted = sqlx::query_as::<_, Album>(
            r#"
            INSERT INTO facebook_albums (
                id, author_json, author_type, author_id,
                likes_count, comments_count, can_upload, photos_count,
                cover_photo, link, location, place, privacy, type,
                name, description, created_time, updated_time, fetched_at
            )
            VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8,
                $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, NOW()
            )
            ON CONFLICT (id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(&req.author_json)
        .bind(author_type)
        .bind(author_id)
        .bind(req.likes_count)
        .bind(req.comments_count)
        .bind(req.can_upload)
        .bind(req.photos_count)
        .bind(req.cover_photo)
        .bind(&req.link)
        .bind(&req.location)
        .bind(&req.place)
        .bind(&req.privacy)
        .bind(&req.album_type)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.created_time)
        .bind(req.updated_time)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert album {}: {}", req.id, e);
            GraphError::DatabaseError(format!("Insert album failed: {}", e))
        })?;

        if let Some(album) = inserted {
            return Ok((album, true));
        }

        let updated = sqlx::query_as::<_, Album>(
            r#"
            UPDATE facebook_albums
            SET author_json = $2,
                author_type = $3,
                author_id = $4,
                likes_count = $5,
                comments_count = $6,
                can_upload = $7,
                photos_count = $8,
                cover_photo = $9,
                link = $10,
                location = $11,
                place = $12,
                privacy = $13,
                type = $14,
                name = $15,
                description = $16,
                created_time = $17,
                updated_time = $18,
                fetched_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(&req.author_json)
        .bind(author_type)
        .bind(author_id)
        .bind(req.likes_count)
        .bind(req.comments_count)
        .bind(req.can_upload)
        .bind(req.photos_count)
        .bind(req.cover_photo)
        .bind(&req.link)
        .bind(&req.location)
        .bind(&req.place)
        .bind(&req.privacy)
        .bind(&req.album_type)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.created_time)
        .bind(req.updated_time)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update album {}: {}", req.id, e);
            GraphError::DatabaseError(format!("Update album failed: {}", e))
        })?;

        Ok((updated, false))
    }

    /// Retrieve album by Graph id
    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Album, GraphError> {
        sqlx::query_as::<_, Album>("SELECT * FROM facebook_albums WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching album {}: {}", id, e);
                GraphError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Album not found: {}", id);
                GraphError::NotFound(format!("album {}", id))
            })
    }
}
