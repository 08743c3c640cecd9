// src/db/memory.rs
// In-memory MirrorStore for tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::MirrorStore;
use crate::errors::GraphError;
use crate::models::{
    Album, Author, AuthorKind, AuthorRef, FacebookPage, FacebookUser, Photo, SmallResource,
    UpsertAlbumRequest, UpsertPhotoRequest,
};

#[derive(Default)]
pub struct MemoryStore {
    albums: Mutex<BTreeMap<i64, Album>>,
    photos: Mutex<BTreeMap<i64, Photo>>,
    users: Mutex<BTreeMap<i64, FacebookUser>>,
    pages: Mutex<BTreeMap<i64, FacebookPage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn album_count(&self) -> usize {
        self.albums.lock().unwrap().len()
    }

    pub fn photo_count(&self) -> usize {
        self.photos.lock().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.lock().unwrap().len()
    }
}

#[async_trait]
impl MirrorStore for MemoryStore {
    async fn get_or_create_author(&self, stub: &SmallResource) -> Result<AuthorRef, GraphError> {
        let kind = stub.kind();
        match kind {
            AuthorKind::User => {
                self.users.lock().unwrap().entry(stub.id).or_insert_with(|| FacebookUser {
                    id: stub.id,
                    name: stub.name.clone(),
                    created_at: Utc::now(),
                });
            }
            AuthorKind::Page => {
                self.pages.lock().unwrap().entry(stub.id).or_insert_with(|| FacebookPage {
                    id: stub.id,
                    name: stub.name.clone(),
                    category: stub.category.clone().unwrap_or_default(),
                    created_at: Utc::now(),
                });
            }
        }
        Ok(AuthorRef { kind, id: stub.id })
    }

    async fn get_author(&self, author: AuthorRef) -> Result<Option<Author>, GraphError> {
        Ok(match author.kind {
            AuthorKind::User => self.users.lock().unwrap().get(&author.id).cloned().map(Author::User),
            AuthorKind::Page => self.pages.lock().unwrap().get(&author.id).cloned().map(Author::Page),
        })
    }

    async fn upsert_album(&self, req: &UpsertAlbumRequest) -> Result<(Album, bool), GraphError> {
        let album = Album {
            id: req.id,
            author_json: req.author_json.clone(),
            author_type: req.author.map(|a| a.kind.as_str().to_string()),
            author_id: req.author.map(|a| a.id),
            likes_count: req.likes_count,
            comments_count: req.comments_count,
            can_upload: req.can_upload,
            photos_count: req.photos_count,
            cover_photo: req.cover_photo,
            link: req.link.clone(),
            location: req.location.clone(),
            place: req.place.clone(),
            privacy: req.privacy.clone(),
            album_type: req.album_type.clone(),
            name: req.name.clone(),
            description: req.description.clone(),
            created_time: req.created_time,
            updated_time: req.updated_time,
            fetched_at: Utc::now(),
        };
        let created = self.albums.lock().unwrap().insert(req.id, album.clone()).is_none();
        Ok((album, created))
    }

    async fn upsert_photo(&self, req: &UpsertPhotoRequest) -> Result<(Photo, bool), GraphError> {
        if let Some(album_id) = req.album_id {
            if !self.albums.lock().unwrap().contains_key(&album_id) {
                return Err(GraphError::DatabaseError(format!(
                    "foreign key violation: album {}",
                    album_id
                )));
            }
        }

        let photo = Photo {
            id: req.id,
            album_id: req.album_id,
            author_json: req.author_json.clone(),
            author_type: req.author.map(|a| a.kind.as_str().to_string()),
            author_id: req.author.map(|a| a.id),
            likes_count: req.likes_count,
            comments_count: req.comments_count,
            link: req.link.clone(),
            picture: req.picture.clone(),
            source: req.source.clone(),
            name: req.name.clone(),
            place: req.place.clone(),
            width: req.width,
            height: req.height,
            created_time: req.created_time,
            updated_time: req.updated_time,
            fetched_at: Utc::now(),
        };
        let created = self.photos.lock().unwrap().insert(req.id, photo.clone()).is_none();
        Ok((photo, created))
    }

    async fn get_album(&self, id: i64) -> Result<Album, GraphError> {
        self.albums
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound(format!("album {}", id)))
    }

    async fn get_photo(&self, id: i64) -> Result<Photo, GraphError> {
        self.photos
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound(format!("photo {}", id)))
    }

    async fn photos_by_album(
        &self,
        album_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, GraphError> {
        let mut photos: Vec<Photo> = self
            .photos
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.album_id == Some(album_id))
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.created_time.cmp(&a.created_time).then(b.id.cmp(&a.id)));
        Ok(photos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
