// src/handlers/albums.rs
// DOCUMENTATION: Read-only HTTP handlers over the local mirror
// PURPOSE: Serve mirrored albums and photos without touching the Graph

use crate::db::MirrorStore;
use crate::errors::GraphError;
use crate::models::AlbumDetailResponse;
use crate::services::params::PHOTOS_DEFAULT_LIMIT;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

/// Query string for photo listings
#[derive(Debug, Deserialize, Validate)]
pub struct PhotoListQuery {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// GET /albums/{id}
/// Retrieve a mirrored album with its author record
pub async fn get_album(
    store: web::Data<dyn MirrorStore>,
    path: web::Path<i64>,
) -> Result<impl Responder, GraphError> {
    let album = store.get_album(path.into_inner()).await?;

    let author_record = match album.author() {
        Some(author) => store.get_author(author).await?,
        None => None,
    };

    Ok(HttpResponse::Ok().json(AlbumDetailResponse {
        album: album.to_response(),
        author_record,
    }))
}

/// GET /albums/{id}/photos
/// List the mirrored photos of an album, newest first
pub async fn list_album_photos(
    store: web::Data<dyn MirrorStore>,
    path: web::Path<i64>,
    query: web::Query<PhotoListQuery>,
) -> Result<impl Responder, GraphError> {
    if let Err(e) = query.validate() {
        return Err(GraphError::ValidationError(e.to_string()));
    }

    let album = store.get_album(path.into_inner()).await?;
    let limit = query.limit.unwrap_or(PHOTOS_DEFAULT_LIMIT as i64);
    let offset = query.offset.unwrap_or(0);

    let photos = store.photos_by_album(album.id, limit, offset).await?;
    let photos: Vec<_> = photos.iter().map(|p| p.to_response()).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "album_id": album.id,
        "limit": limit,
        "offset": offset,
        "count": photos.len(),
        "photos": photos,
    })))
}

/// GET /photos/{id}
pub async fn get_photo(
    store: web::Data<dyn MirrorStore>,
    path: web::Path<i64>,
) -> Result<impl Responder, GraphError> {
    let photo = store.get_photo(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo.to_response()))
}

/// Configuration for album and photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/albums")
            .route("/{id}", web::get().to(get_album))
            .route("/{id}/photos", web::get().to(list_album_photos)),
    )
    .service(web::scope("/photos").route("/{id}", web::get().to(get_photo)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::{AuthorKind, SmallResource, UpsertAlbumRequest, UpsertPhotoRequest};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());

        let stub = SmallResource::from_json(&json!({"id": "7", "name": "Page", "category": "Band"}))
            .unwrap();
        let author = store.get_or_create_author(&stub).await.unwrap();

        let mut album: UpsertAlbumRequest =
            serde_json::from_value(json!({"id": "42", "name": "Tour", "photos_count": 3})).unwrap();
        album.author = Some(author);
        store.upsert_album(&album).await.unwrap();

        for (id, day) in [("1", "01"), ("2", "02"), ("3", "03")] {
            let photo: UpsertPhotoRequest = serde_json::from_value(json!({
                "id": id,
                "album_id": 42,
                "created_time": format!("2013-04-{}T10:00:00+0000", day),
                "updated_time": format!("2013-04-{}T10:00:00+0000", day),
            }))
            .unwrap();
            store.upsert_photo(&photo).await.unwrap();
        }

        store
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($store as Arc<dyn MirrorStore>))
                    .configure(config),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_get_album_includes_author_record() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/albums/42").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], 42);
        assert_eq!(body["name"], "Tour");
        assert_eq!(body["author"]["kind"], AuthorKind::Page.as_str());
        assert_eq!(body["author_record"]["type"], "page");
        assert_eq!(body["author_record"]["category"], "Band");
    }

    #[actix_rt::test]
    async fn test_missing_album_is_404() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/albums/404").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_list_photos_newest_first_with_paging() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get()
            .uri("/albums/42/photos?limit=2&offset=0")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["count"], 2);
        assert_eq!(body["photos"][0]["id"], 3);
        assert_eq!(body["photos"][1]["id"], 2);

        let req = test::TestRequest::get()
            .uri("/albums/42/photos?limit=2&offset=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["count"], 1);
        assert_eq!(body["photos"][0]["id"], 1);
    }

    #[actix_rt::test]
    async fn test_list_photos_rejects_bad_limit() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get()
            .uri("/albums/42/photos?limit=0")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_get_photo() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/photos/2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], 2);
        assert_eq!(body["album_id"], 42);
        assert_eq!(body["graph_url"], "https://facebook.com/2");
    }
}
