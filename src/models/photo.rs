// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::fields::{graph_id, graph_time, name_or_text, optional_graph_id, text_or_empty};
use super::AuthorRef;

/// Photo row from `facebook_photos`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: i64,
    pub album_id: Option<i64>,
    pub author_json: Option<Value>,
    pub author_type: Option<String>,
    pub author_id: Option<i64>,
    pub likes_count: Option<i32>,
    pub comments_count: Option<i32>,
    pub link: String,
    /// 100px wide rendition
    pub picture: String,
    /// Full size rendition
    pub source: String,
    pub name: String,
    pub place: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    pub fetched_at: DateTime<Utc>,
}

/// Photo fields after the parse pipeline, ready for upsert
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPhotoRequest {
    #[serde(deserialize_with = "graph_id")]
    pub id: i64,

    #[serde(default, deserialize_with = "optional_graph_id")]
    pub album_id: Option<i64>,

    #[serde(default)]
    pub author_json: Option<Value>,

    #[serde(skip)]
    pub author: Option<AuthorRef>,

    #[serde(default)]
    pub likes_count: Option<i32>,

    #[serde(default)]
    pub comments_count: Option<i32>,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub link: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub picture: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub source: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "name_or_text")]
    pub place: String,

    #[serde(default)]
    pub width: Option<i32>,

    #[serde(default)]
    pub height: Option<i32>,

    #[serde(deserialize_with = "graph_time")]
    pub created_time: DateTime<Utc>,

    #[serde(deserialize_with = "graph_time")]
    pub updated_time: DateTime<Utc>,
}

/// Photo DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub id: i64,
    pub album_id: Option<i64>,
    pub author: Option<AuthorRef>,
    pub name: String,
    pub link: String,
    pub picture: String,
    pub source: String,
    pub place: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub likes_count: Option<i32>,
    pub comments_count: Option<i32>,
    pub graph_url: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    pub fetched_at: DateTime<Utc>,
}

impl Photo {
    pub fn author(&self) -> Option<AuthorRef> {
        AuthorRef::from_columns(self.author_type.as_deref(), self.author_id)
    }

    pub fn graph_url(&self) -> String {
        format!("https://facebook.com/{}", self.id)
    }

    /// Convert database photo into API response DTO
    pub fn to_response(&self) -> PhotoResponse {
        PhotoResponse {
            id: self.id,
            album_id: self.album_id,
            author: self.author(),
            name: self.name.clone(),
            link: self.link.clone(),
            picture: self.picture.clone(),
            source: self.source.clone(),
            place: self.place.clone(),
            width: self.width,
            height: self.height,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            graph_url: self.graph_url(),
            created_time: self.created_time,
            updated_time: self.updated_time,
            fetched_at: self.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_response_carries_graph_url() {
        let taken = Utc.with_ymd_and_hms(2013, 4, 18, 16, 51, 3).unwrap();
        let photo = Photo {
            id: 10154446478041729,
            album_id: Some(42),
            author_json: None,
            author_type: Some("user".to_string()),
            author_id: Some(501),
            likes_count: None,
            comments_count: Some(2),
            link: String::new(),
            picture: String::new(),
            source: String::new(),
            name: String::new(),
            place: String::new(),
            width: None,
            height: None,
            created_time: taken,
            updated_time: taken,
            fetched_at: taken,
        };

        assert_eq!(photo.graph_url(), "https://facebook.com/10154446478041729");

        let response = photo.to_response();
        assert_eq!(response.graph_url, photo.graph_url());
        assert_eq!(response.author.map(|a| a.id), Some(501));
    }
}
