// src/services/photo_fetcher.rs
// DOCUMENTATION: Mirror the photos of an album
// PURPOSE: One `{album}/photos` Graph call, one upsert per returned photo

use serde_json::Value;
use std::time::Instant;

use crate::db::MirrorStore;
use crate::errors::GraphError;
use crate::models::{Album, FetchOutcome, FetchStats, Photo};
use crate::services::authors::resolve_author;
use crate::services::params::{FetchParams, PHOTOS_DEFAULT_LIMIT};
use crate::services::parser::{self, Resource};
use crate::services::GraphApi;

pub struct PhotoFetcher;

impl PhotoFetcher {
    /// Fetch the photos of a mirrored album and upsert them
    /// DOCUMENTATION: Every photo is attached to `album`, whatever album the
    /// Graph resource itself names.
    ///
    /// # Arguments
    /// * `params` - limit (default 100), offset (default 0), since, until
    /// * `extra` - fields forced onto every photo; `album_id` always wins
    pub async fn fetch_by_album<G, S>(
        graph: &G,
        store: &S,
        album: &Album,
        params: &FetchParams,
        extra: &Resource,
    ) -> Result<FetchOutcome<Photo>, GraphError>
    where
        G: GraphApi + ?Sized,
        S: MirrorStore + ?Sized,
    {
        let start_time = Instant::now();
        let path = format!("{}/photos", album.id);
        let query = params.to_query(PHOTOS_DEFAULT_LIMIT, Some(0));
        let mut outcome = FetchOutcome::new(FetchStats::new(path.clone()));

        let mut extra = extra.clone();
        extra.insert("album_id".to_string(), Value::from(album.id));

        log::info!("Fetching photos of album {} ({:?})", album.id, query);

        let response = graph.graph(&path, &query).await?;
        outcome.stats.api_requests += 1;
        outcome.stats.items_retrieved = response.data.len() as u32;
        outcome.stats.next_page = response.paging.and_then(|p| p.next);

        for raw in response.data {
            let mut req = parser::parse_photo(raw, &extra)?;
            req.author = resolve_author(store, req.author_json.as_ref()).await?;

            let (photo, created) = store.upsert_photo(&req).await?;
            log::debug!(
                "{} photo {} in album {}",
                if created { "Created" } else { "Updated" },
                photo.id,
                album.id
            );

            outcome.stats.record(created);
            outcome.push_unique(photo, |p| p.id);
        }

        outcome.stats.complete(start_time.elapsed().as_millis() as u64);

        log::info!(
            "Fetched {} photos of album {}: {} created, {} updated",
            outcome.stats.items_retrieved,
            album.id,
            outcome.stats.created,
            outcome.stats.updated
        );

        Ok(outcome)
    }

    /// Same as `fetch_by_album`, looking the album up in the mirror first
    pub async fn fetch_by_album_id<G, S>(
        graph: &G,
        store: &S,
        album_id: i64,
        params: &FetchParams,
    ) -> Result<FetchOutcome<Photo>, GraphError>
    where
        G: GraphApi + ?Sized,
        S: MirrorStore + ?Sized,
    {
        let album = store.get_album(album_id).await?;
        Self::fetch_by_album(graph, store, &album, params, &Resource::new()).await
    }
}
