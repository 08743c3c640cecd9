// src/db/store.rs
// DOCUMENTATION: Persistence seam used by the fetchers and handlers
// PURPOSE: Keep fetch logic independent of PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AlbumRepository, AuthorRepository, PhotoRepository};
use crate::errors::GraphError;
use crate::models::{
    Album, Author, AuthorRef, Photo, SmallResource, UpsertAlbumRequest, UpsertPhotoRequest,
};

/// Everything the mirror reads and writes
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Resolve an author stub, creating the user/page row if missing
    async fn get_or_create_author(&self, stub: &SmallResource) -> Result<AuthorRef, GraphError>;

    async fn get_author(&self, author: AuthorRef) -> Result<Option<Author>, GraphError>;

    /// Upsert by id; `true` when the row was created
    async fn upsert_album(&self, req: &UpsertAlbumRequest) -> Result<(Album, bool), GraphError>;

    /// Upsert by id; `true` when the row was created
    async fn upsert_photo(&self, req: &UpsertPhotoRequest) -> Result<(Photo, bool), GraphError>;

    async fn get_album(&self, id: i64) -> Result<Album, GraphError>;

    async fn get_photo(&self, id: i64) -> Result<Photo, GraphError>;

    async fn photos_by_album(
        &self,
        album_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, GraphError>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MirrorStore for PgStore {
    async fn get_or_create_author(&self, stub: &SmallResource) -> Result<AuthorRef, GraphError> {
        AuthorRepository::get_or_create(&self.pool, stub).await
    }

    async fn get_author(&self, author: AuthorRef) -> Result<Option<Author>, GraphError> {
        AuthorRepository::get(&self.pool, author).await
    }

    async fn upsert_album(&self, req: &UpsertAlbumRequest) -> Result<(Album, bool), GraphError> {
        AlbumRepository::upsert(&self.pool, req).await
    }

    async fn upsert_photo(&self, req: &UpsertPhotoRequest) -> Result<(Photo, bool), GraphError> {
        PhotoRepository::upsert(&self.pool, req).await
    }

    async fn get_album(&self, id: i64) -> Result<Album, GraphError> {
        AlbumRepository::get_by_id(&self.pool, id).await
    }

    async fn get_photo(&self, id: i64) -> Result<Photo, GraphError> {
        PhotoRepository::get_by_id(&self.pool, id).await
    }

    async fn photos_by_album(
        &self,
        album_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, GraphError> {
        PhotoRepository::get_by_album(&self.pool, album_id, limit, offset).await
    }
}
