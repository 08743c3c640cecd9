// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for fetch operations
// PURPOSE: Trigger Graph fetches into the local mirror via REST endpoints

use crate::config::Config;
use crate::db::MirrorStore;
use crate::errors::GraphError;
use crate::models::{Album, FetchRequest, Photo};
use crate::services::parser::Resource;
use crate::services::{AlbumFetcher, FetchParams, GraphApi, PhotoFetcher};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// POST /admin/pages/{page_id}/albums/fetch
/// Mirror the albums of a page
///
/// DOCUMENTATION: One Graph call; responds with the touched albums and the fetch stats
/// Requires admin authentication via X-Admin-Token header
pub async fn fetch_page_albums(
    store: web::Data<dyn MirrorStore>,
    graph: web::Data<dyn GraphApi>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<FetchRequest>,
) -> Result<impl Responder, GraphError> {
    verify_admin_token(&req, &config)?;
    let params = fetch_params(&config, &body)?;

    let page_id = path.into_inner();
    log::info!("Admin album fetch requested for page: {}", page_id);

    let outcome = AlbumFetcher::fetch_by_page(
        graph.get_ref(),
        store.get_ref(),
        &page_id,
        &params,
        &Resource::new(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(outcome.map(Album::to_response)))
}

/// POST /admin/albums/{album_id}/photos/fetch
/// Mirror the photos of an already mirrored album
///
/// DOCUMENTATION: 404 when the album is not in the mirror yet
pub async fn fetch_album_photos(
    store: web::Data<dyn MirrorStore>,
    graph: web::Data<dyn GraphApi>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<FetchRequest>,
) -> Result<impl Responder, GraphError> {
    verify_admin_token(&req, &config)?;
    let params = fetch_params(&config, &body)?;

    let album_id = path.into_inner();
    log::info!("Admin photo fetch requested for album: {}", album_id);

    let outcome =
        PhotoFetcher::fetch_by_album_id(graph.get_ref(), store.get_ref(), album_id, &params)
            .await?;

    Ok(HttpResponse::Ok().json(outcome.map(Photo::to_response)))
}

/// Validate the body and check the Graph is usable
fn fetch_params(config: &Config, body: &FetchRequest) -> Result<FetchParams, GraphError> {
    if let Err(e) = body.validate() {
        return Err(GraphError::ValidationError(e.to_string()));
    }

    let params = FetchParams::from_request(body)?;

    if config.facebook_access_token.is_empty() {
        return Err(GraphError::InvalidInput(
            "Facebook access token not configured".to_string(),
        ));
    }

    Ok(params)
}

/// Malformed bodies get the same JSON error shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| GraphError::InvalidInput(err.to_string()).into())
}

/// Helper function to verify admin authentication
/// DOCUMENTATION: Checks X-Admin-Token header against configured admin token
fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), GraphError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            GraphError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(GraphError::Forbidden);
    }

    Ok(())
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(json_config())
            .route("/pages/{page_id}/albums/fetch", web::post().to(fetch_page_albums))
            .route("/albums/{album_id}/photos/fetch", web::post().to(fetch_album_photos)),
    );
}
