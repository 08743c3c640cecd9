// src/services/authors.rs
// DOCUMENTATION: Author resolution for parsed resources
// PURPOSE: Turn the `author_json` stub left by the parse pipeline into an AuthorRef

use serde_json::Value;

use crate::db::MirrorStore;
use crate::errors::GraphError;
use crate::models::{AuthorRef, SmallResource};

/// Resolve the author stub, if any, through the store's small-resource factory
pub async fn resolve_author<S>(
    store: &S,
    author_json: Option<&Value>,
) -> Result<Option<AuthorRef>, GraphError>
where
    S: MirrorStore + ?Sized,
{
    match author_json {
        None | Some(Value::Null) => Ok(None),
        Some(stub) => {
            let stub = SmallResource::from_json(stub)?;
            store.get_or_create_author(&stub).await.map(Some)
        }
    }
}
