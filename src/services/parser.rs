// src/services/parser.rs
// DOCUMENTATION: Graph resource parse pipeline
// PURPOSE: Rewrite raw Graph JSON into the field layout of the upsert requests
//
// Each step edits the raw object in place before typed deserialization.
// Steps run in the order their pipeline lists them; caller-supplied extra
// fields are merged last so they always win.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::GraphError;
use crate::models::fields::parse_graph_id;
use crate::models::{UpsertAlbumRequest, UpsertPhotoRequest};

/// Raw Graph object
pub type Resource = Map<String, Value>;

/// One pre-processing step over a raw resource
pub type ParseStep = fn(&mut Resource);

/// Album: `count` → `photos_count`, author, likes, comments
pub const ALBUM_PIPELINE: &[ParseStep] = &[
    album_photos_count,
    author_json,
    likes_count,
    comments_count,
];

/// Photo: `album` → `album_id`, author, likes, comments
pub const PHOTO_PIPELINE: &[ParseStep] = &[photo_album_id, author_json, likes_count, comments_count];

/// `from` is kept verbatim as `author_json`; the stub is resolved later
pub fn author_json(resource: &mut Resource) {
    if let Some(from) = resource.remove("from") {
        resource.insert("author_json".to_string(), from);
    }
}

/// `likes.data` is replaced by its length
pub fn likes_count(resource: &mut Resource) {
    count_nested(resource, "likes", "likes_count");
}

/// `comments.data` is replaced by its length
pub fn comments_count(resource: &mut Resource) {
    count_nested(resource, "comments", "comments_count");
}

/// `count` becomes `photos_count`; numeric strings are coerced, anything
/// else unparseable is left for deserialization to reject
pub fn album_photos_count(resource: &mut Resource) {
    let count = match resource.remove("count") {
        None | Some(Value::Null) => Value::from(0),
        Some(Value::String(raw)) => match raw.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(raw),
        },
        Some(other) => other,
    };
    resource.insert("photos_count".to_string(), count);
}

/// Embedded `album` object or bare id becomes `album_id`
pub fn photo_album_id(resource: &mut Resource) {
    if let Some(album) = resource.remove("album") {
        let id = parse_graph_id(&album).map(Value::from).unwrap_or(Value::Null);
        resource.insert("album_id".to_string(), id);
    }
}

fn count_nested(resource: &mut Resource, field: &str, target: &str) {
    if let Some(nested) = resource.remove(field) {
        let count = nested
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        resource.insert(target.to_string(), Value::from(count));
    }
}

/// Run `steps` over `raw`, merge `extra`, deserialize into `T`
pub fn parse_resource<T: DeserializeOwned>(
    raw: Value,
    steps: &[ParseStep],
    extra: &Resource,
) -> Result<T, GraphError> {
    let mut resource = match raw {
        Value::Object(map) => map,
        other => {
            return Err(GraphError::InvalidResource(format!(
                "expected a JSON object, got {}",
                other
            )))
        }
    };

    for step in steps {
        step(&mut resource);
    }

    for (key, value) in extra {
        resource.insert(key.clone(), value.clone());
    }

    let id = resource.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(Value::Object(resource))
        .map_err(|e| GraphError::InvalidResource(format!("resource {}: {}", id, e)))
}

pub fn parse_album(raw: Value, extra: &Resource) -> Result<UpsertAlbumRequest, GraphError> {
    parse_resource(raw, ALBUM_PIPELINE, extra)
}

pub fn parse_photo(raw: Value, extra: &Resource) -> Result<UpsertPhotoRequest, GraphError> {
    parse_resource(raw, PHOTO_PIPELINE, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn album_json() -> Value {
        json!({
            "id": "10150146071791729",
            "from": {"id": "20531316728", "name": "Facebook", "category": "Product/service"},
            "name": "Timeline Photos",
            "link": "https://www.facebook.com/album.php?fbid=10150146071791729",
            "cover_photo": "10154446478041729",
            "privacy": "everyone",
            "count": 12,
            "type": "wall",
            "can_upload": false,
            "created_time": "2011-04-06T23:51:54+0000",
            "updated_time": "2013-04-18T16:51:03+0000",
            "likes": {"data": [{"id": "1"}, {"id": "2"}, {"id": "3"}]},
            "comments": {"data": []}
        })
    }

    fn photo_json() -> Value {
        json!({
            "id": "10154446478041729",
            "from": {"id": "501", "name": "Jane Doe"},
            "album": {"id": "999", "name": "Elsewhere"},
            "picture": "https://example.org/p_s.jpg",
            "source": "https://example.org/p_n.jpg",
            "width": 720,
            "height": 480,
            "place": {"id": "1", "name": "Menlo Park"},
            "created_time": "2013-04-18T16:51:03+0000",
            "updated_time": "2013-04-18T16:51:03+0000"
        })
    }

    #[test]
    fn test_likes_are_counted() {
        let album = parse_album(album_json(), &Resource::new()).unwrap();
        assert_eq!(album.likes_count, Some(3));
    }

    #[test]
    fn test_empty_comments_count_zero() {
        let album = parse_album(album_json(), &Resource::new()).unwrap();
        assert_eq!(album.comments_count, Some(0));
    }

    #[test]
    fn test_missing_likes_leave_count_unset() {
        let photo = parse_photo(photo_json(), &Resource::new()).unwrap();
        assert_eq!(photo.likes_count, None);
        assert_eq!(photo.comments_count, None);
    }

    #[test]
    fn test_from_becomes_author_json() {
        let mut resource = album_json().as_object().cloned().unwrap();
        author_json(&mut resource);
        assert!(!resource.contains_key("from"));
        assert_eq!(resource["author_json"]["id"], json!("20531316728"));
    }

    #[test]
    fn test_album_fields() {
        let album = parse_album(album_json(), &Resource::new()).unwrap();
        assert_eq!(album.id, 10150146071791729);
        assert_eq!(album.photos_count, 12);
        assert_eq!(album.cover_photo, Some(10154446478041729));
        assert_eq!(album.album_type, "wall");
        assert_eq!(album.privacy, "everyone");
        assert!(album.created_time.is_some());
        assert!(album.author.is_none());
        assert!(album.author_json.is_some());
    }

    #[test]
    fn test_album_without_count_has_zero_photos() {
        let album = parse_album(json!({"id": "5"}), &Resource::new()).unwrap();
        assert_eq!(album.photos_count, 0);
        assert_eq!(album.name, "");
        assert!(album.author_json.is_none());
    }

    #[test]
    fn test_album_count_as_string_is_coerced() {
        let album = parse_album(json!({"id": "5", "count": "12"}), &Resource::new()).unwrap();
        assert_eq!(album.photos_count, 12);
    }

    #[test]
    fn test_album_count_garbage_is_rejected() {
        let err = parse_album(json!({"id": "5", "count": "lots"}), &Resource::new()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidResource(_)));
    }

    #[test]
    fn test_photo_album_and_place() {
        let photo = parse_photo(photo_json(), &Resource::new()).unwrap();
        assert_eq!(photo.album_id, Some(999));
        assert_eq!(photo.place, "Menlo Park");
        assert_eq!(photo.width, Some(720));
    }

    #[test]
    fn test_extra_fields_override_resource() {
        let mut extra = Resource::new();
        extra.insert("album_id".to_string(), json!(42));

        let photo = parse_photo(photo_json(), &extra).unwrap();
        assert_eq!(photo.album_id, Some(42));
    }

    #[test]
    fn test_photo_requires_timestamps() {
        let err = parse_photo(json!({"id": "1"}), &Resource::new()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidResource(_)));
    }

    #[test]
    fn test_non_object_resource_is_rejected() {
        let err = parse_album(json!(["not", "an", "album"]), &Resource::new()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidResource(_)));
    }
}
