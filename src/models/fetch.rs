// src/models/fetch.rs
// DOCUMENTATION: Fetch request and result DTOs
// PURPOSE: Shared by the album/photo fetchers and the admin endpoints

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Statistics for one fetch call
/// DOCUMENTATION: Tracks results of a single Graph request and its upserts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchStats {
    /// Graph path that was requested, e.g. `12345/albums`
    pub path: String,
    /// Number of Graph requests made (always 1 for a completed fetch)
    pub api_requests: u32,
    /// Items in the response `data` array
    pub items_retrieved: u32,
    /// Rows inserted
    pub created: u32,
    /// Rows overwritten in place
    pub updated: u32,
    /// `paging.next` as returned by the Graph; reported, never followed
    pub next_page: Option<String>,
    pub duration_ms: u64,
    pub started_at: String,
    pub completed_at: Option<String>,
}

impl FetchStats {
    pub fn new(path: String) -> Self {
        Self {
            path,
            api_requests: 0,
            items_retrieved: 0,
            created: 0,
            updated: 0,
            next_page: None,
            duration_ms: 0,
            started_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Count one upsert outcome
    pub fn record(&mut self, created: bool) {
        if created {
            self.created += 1;
        } else {
            self.updated += 1;
        }
    }

    /// Mark fetch as completed
    pub fn complete(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.completed_at = Some(Utc::now().to_rfc3339());
    }
}

/// Records touched by a fetch plus its statistics
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome<T> {
    pub records: Vec<T>,
    pub stats: FetchStats,
}

impl<T> FetchOutcome<T> {
    pub fn new(stats: FetchStats) -> Self {
        Self {
            records: Vec::new(),
            stats,
        }
    }

    /// Add a record; a later record with the same key replaces the earlier one
    pub fn push_unique<K, F>(&mut self, record: T, key: F)
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let k = key(&record);
        match self.records.iter().position(|r| key(r) == k) {
            Some(pos) => self.records[pos] = record,
            None => self.records.push(record),
        }
    }

    /// Map records into another shape (e.g. response DTOs), keeping stats
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> FetchOutcome<U> {
        FetchOutcome {
            records: self.records.iter().map(f).collect(),
            stats: self.stats.clone(),
        }
    }
}

/// Body of the admin fetch endpoints
/// DOCUMENTATION: `since`/`until` accept epoch seconds or a date/time string,
/// kept raw here and parsed by `FetchParams::from_request`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FetchRequest {
    #[validate(range(min = 1, max = 5000))]
    pub limit: Option<u32>,

    pub offset: Option<u32>,

    pub since: Option<Value>,

    pub until: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_stats_record_and_complete() {
        let mut stats = FetchStats::new("1/albums".to_string());
        stats.record(true);
        stats.record(true);
        stats.record(false);
        stats.complete(12);

        assert_eq!(stats.created, 2);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.duration_ms, 12);
        assert!(stats.completed_at.is_some());
    }

    #[test]
    fn test_fetch_request_limit_validation() {
        let ok: FetchRequest = serde_json::from_str(r#"{"limit": 25}"#).unwrap();
        assert!(ok.validate().is_ok());

        let too_big: FetchRequest = serde_json::from_str(r#"{"limit": 100000}"#).unwrap();
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_fetch_request_keeps_bounds_raw() {
        let req: FetchRequest = serde_json::from_str(r#"{"since": "soon"}"#).unwrap();
        assert_eq!(req.since, Some(Value::from("soon")));
        assert!(req.until.is_none());
    }
}
