// src/models/author.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::fields::graph_id;
use crate::errors::GraphError;

/// Kind of entity that authored an album or photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    User,
    Page,
}

impl AuthorKind {
    /// Value stored in the `author_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorKind::User => "user",
            AuthorKind::Page => "page",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(AuthorKind::User),
            "page" => Some(AuthorKind::Page),
            _ => None,
        }
    }
}

/// Polymorphic author reference: which table plus which row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub kind: AuthorKind,
    pub id: i64,
}

impl AuthorRef {
    /// Rebuild from the `author_type` / `author_id` column pair
    pub fn from_columns(author_type: Option<&str>, author_id: Option<i64>) -> Option<Self> {
        match (author_type.and_then(AuthorKind::parse), author_id) {
            (Some(kind), Some(id)) => Some(AuthorRef { kind, id }),
            _ => None,
        }
    }
}

/// Abbreviated author stub as the Graph embeds it under `from`
/// DOCUMENTATION: `{id, name}` for users, `{id, name, category}` for pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallResource {
    #[serde(deserialize_with = "graph_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl SmallResource {
    pub fn from_json(value: &Value) -> Result<Self, GraphError> {
        serde_json::from_value(value.clone())
            .map_err(|e| GraphError::InvalidResource(format!("author stub {}: {}", value, e)))
    }

    /// Pages carry a category, users never do
    pub fn kind(&self) -> AuthorKind {
        if self.category.is_some() {
            AuthorKind::Page
        } else {
            AuthorKind::User
        }
    }
}

/// Mirrored Graph user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FacebookUser {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Mirrored Graph page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FacebookPage {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// A resolved author record
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Author {
    User(FacebookUser),
    Page(FacebookPage),
}
