// src/services/album_fetcher.rs
// DOCUMENTATION: Mirror the albums of a page
// PURPOSE: One `{page}/albums` Graph call, one upsert per returned album

use std::time::Instant;

use crate::db::MirrorStore;
use crate::errors::GraphError;
use crate::models::{Album, FetchOutcome, FetchStats};
use crate::services::authors::resolve_author;
use crate::services::params::{FetchParams, ALBUMS_DEFAULT_LIMIT};
use crate::services::parser::{self, Resource};
use crate::services::GraphApi;

pub struct AlbumFetcher;

impl AlbumFetcher {
    /// Fetch the albums of a page and upsert them
    /// DOCUMENTATION: Issues exactly one Graph request; `paging.next` is
    /// reported in the stats but never followed.
    ///
    /// # Arguments
    /// * `graph` - Graph API
    /// * `store` - Local mirror
    /// * `page_id` - Graph id (or vanity name) of the page
    /// * `params` - limit (default 1000), offset, since, until
    /// * `extra` - fields forced onto every album before upsert
    ///
    /// # Returns
    /// The albums touched by this call, deduplicated by id
    pub async fn fetch_by_page<G, S>(
        graph: &G,
        store: &S,
        page_id: &str,
        params: &FetchParams,
        extra: &Resource,
    ) -> Result<FetchOutcome<Album>, GraphError>
    where
        G: GraphApi + ?Sized,
        S: MirrorStore + ?Sized,
    {
        let page_id = page_id.trim();
        if page_id.is_empty() {
            return Err(GraphError::InvalidInput("page id is required".to_string()));
        }

        let start_time = Instant::now();
        let path = format!("{}/albums", page_id);
        let query = params.to_query(ALBUMS_DEFAULT_LIMIT, None);
        let mut outcome = FetchOutcome::new(FetchStats::new(path.clone()));

        log::info!("Fetching albums of page {} ({:?})", page_id, query);

        let response = graph.graph(&path, &query).await?;
        outcome.stats.api_requests += 1;
        outcome.stats.items_retrieved = response.data.len() as u32;
        outcome.stats.next_page = response.paging.and_then(|p| p.next);

        for raw in response.data {
            let mut req = parser::parse_album(raw, extra)?;
            req.author = resolve_author(store, req.author_json.as_ref()).await?;

            let (album, created) = store.upsert_album(&req).await?;
            log::debug!(
                "{} album {} ({})",
                if created { "Created" } else { "Updated" },
                album.id,
                album.name
            );

            outcome.stats.record(created);
            outcome.push_unique(album, |a| a.id);
        }

        outcome.stats.complete(start_time.elapsed().as_millis() as u64);

        log::info!(
            "Fetched {} albums of page {}: {} created, {} updated",
            outcome.stats.items_retrieved,
            page_id,
            outcome.stats.created,
            outcome.stats.updated
        );

        Ok(outcome)
    }
}
