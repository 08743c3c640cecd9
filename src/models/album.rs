// src/models/album.rs
// DOCUMENTATION: Album record mirrored from the Graph API
// PURPOSE: Database row, upsert request (built from a parsed resource) and API DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::fields::{graph_id, name_or_text, optional_graph_id, optional_graph_time, text_or_empty};
use super::{Author, AuthorRef};

/// Album row from `facebook_albums`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Album {
    /// Graph id, immutable after creation
    pub id: i64,

    /// Raw `from` stub as received
    pub author_json: Option<Value>,

    /// `user` or `page`
    pub author_type: Option<String>,
    pub author_id: Option<i64>,

    pub likes_count: Option<i32>,
    pub comments_count: Option<i32>,

    pub can_upload: bool,

    /// Graph `count` at the last fetch
    pub photos_count: i32,

    /// Graph id of the cover photo
    pub cover_photo: Option<i64>,

    pub link: String,
    pub location: String,
    pub place: String,
    pub privacy: String,

    /// Album type: normal, profile, wall, mobile, ...
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub album_type: String,

    pub name: String,
    pub description: String,

    pub created_time: Option<DateTime<Utc>>,
    pub updated_time: Option<DateTime<Utc>>,

    /// When this row was last written by a fetch
    pub fetched_at: DateTime<Utc>,
}

/// Album fields after the parse pipeline, ready for upsert
/// DOCUMENTATION: Deserialized from the pipeline's output map.
/// `author` is filled in afterwards by author resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertAlbumRequest {
    #[serde(deserialize_with = "graph_id")]
    pub id: i64,

    #[serde(default)]
    pub author_json: Option<Value>,

    #[serde(skip)]
    pub author: Option<AuthorRef>,

    #[serde(default)]
    pub likes_count: Option<i32>,

    #[serde(default)]
    pub comments_count: Option<i32>,

    #[serde(default)]
    pub can_upload: bool,

    #[serde(default)]
    pub photos_count: i32,

    #[serde(default, deserialize_with = "optional_graph_id")]
    pub cover_photo: Option<i64>,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub link: String,

    #[serde(default, deserialize_with = "name_or_text")]
    pub location: String,

    #[serde(default, deserialize_with = "name_or_text")]
    pub place: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub privacy: String,

    #[serde(rename = "type", default, deserialize_with = "text_or_empty")]
    pub album_type: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,

    #[serde(default, deserialize_with = "optional_graph_time")]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "optional_graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// Album DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct AlbumResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub album_type: String,
    pub author: Option<AuthorRef>,
    pub photos_count: i32,
    pub likes_count: Option<i32>,
    pub comments_count: Option<i32>,
    pub can_upload: bool,
    pub cover_photo: Option<i64>,
    pub link: String,
    pub location: String,
    pub place: String,
    pub privacy: String,
    pub graph_url: String,
    pub created_time: Option<DateTime<Utc>>,
    pub updated_time: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
}

/// Album DTO with the author record attached
/// DOCUMENTATION: Used for GET /albums/{id}
#[derive(Debug, Serialize)]
pub struct AlbumDetailResponse {
    #[serde(flatten)]
    pub album: AlbumResponse,
    pub author_record: Option<Author>,
}

impl Album {
    /// Resolved author reference, if one was recorded
    pub fn author(&self) -> Option<AuthorRef> {
        AuthorRef::from_columns(self.author_type.as_deref(), self.author_id)
    }

    pub fn graph_url(&self) -> String {
        format!("https://facebook.com/{}", self.id)
    }

    /// Convert database album into API response DTO
    pub fn to_response(&self) -> AlbumResponse {
        AlbumResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            album_type: self.album_type.clone(),
            author: self.author(),
            photos_count: self.photos_count,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            can_upload: self.can_upload,
            cover_photo: self.cover_photo,
            link: self.link.clone(),
            location: self.location.clone(),
            place: self.place.clone(),
            privacy: self.privacy.clone(),
            graph_url: self.graph_url(),
            created_time: self.created_time,
            updated_time: self.updated_time,
            fetched_at: self.fetched_at,
        }
    }
}
