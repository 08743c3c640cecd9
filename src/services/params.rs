// src/services/params.rs
// DOCUMENTATION: Paging parameter normalization for Graph list calls
// PURPOSE: Turn limit/offset/since/until into the query map sent to the Graph

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::GraphError;
use crate::models::FetchRequest;
use crate::models::fields::parse_graph_time;

/// Query parameters of a single Graph call
pub type GraphParams = BTreeMap<String, String>;

/// Default page size for `{page}/albums`
pub const ALBUMS_DEFAULT_LIMIT: u32 = 1000;
/// Default page size for `{album}/photos`
pub const PHOTOS_DEFAULT_LIMIT: u32 = 100;

/// A `since`/`until` bound: either epoch seconds or a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    Timestamp(i64),
    DateTime(DateTime<Utc>),
}

impl TimeBound {
    /// Parse a bound from text: integer epoch seconds or a date/time.
    /// Naive date/times are taken as UTC.
    pub fn parse(field: &str, raw: &str) -> Result<Self, GraphError> {
        let raw = raw.trim();

        if let Ok(seconds) = raw.parse::<i64>() {
            return Ok(TimeBound::Timestamp(seconds));
        }

        if let Some(dt) = parse_graph_time(raw) {
            return Ok(TimeBound::DateTime(dt));
        }

        for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
                return Ok(TimeBound::DateTime(naive.and_utc()));
            }
        }

        if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(TimeBound::DateTime(midnight.and_utc()));
        }

        Err(wrong_type(field, format!("{:?}", raw)))
    }

    /// Bound from a request body value: integer seconds or date/time text
    pub fn from_json(field: &str, value: &Value) -> Result<Option<Self>, GraphError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .map(|seconds| Some(TimeBound::Timestamp(seconds)))
                .ok_or_else(|| wrong_type(field, value.to_string())),
            Value::String(raw) => TimeBound::parse(field, raw).map(Some),
            other => Err(wrong_type(field, other.to_string())),
        }
    }

    /// Value sent to the Graph
    pub fn epoch_seconds(&self) -> i64 {
        match self {
            TimeBound::Timestamp(seconds) => *seconds,
            TimeBound::DateTime(dt) => dt.timestamp(),
        }
    }
}

fn wrong_type(field: &str, shown: String) -> GraphError {
    GraphError::InvalidInput(format!("Wrong type of argument {}: {}", field, shown))
}

impl From<i64> for TimeBound {
    fn from(seconds: i64) -> Self {
        TimeBound::Timestamp(seconds)
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeBound::DateTime(dt)
    }
}

impl From<NaiveDateTime> for TimeBound {
    fn from(naive: NaiveDateTime) -> Self {
        TimeBound::DateTime(naive.and_utc())
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.epoch_seconds())
    }
}

/// Caller-facing paging parameters
/// DOCUMENTATION: Unset fields fall back to per-endpoint defaults in `to_query`.
/// `extra` carries any other Graph parameter (e.g. `fields`) verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub since: Option<TimeBound>,
    pub until: Option<TimeBound>,
    pub extra: BTreeMap<String, String>,
}

impl FetchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn since(mut self, bound: impl Into<TimeBound>) -> Self {
        self.since = Some(bound.into());
        self
    }

    pub fn until(mut self, bound: impl Into<TimeBound>) -> Self {
        self.until = Some(bound.into());
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Params from an admin request body; malformed bounds name their field
    pub fn from_request(req: &FetchRequest) -> Result<Self, GraphError> {
        let since = req
            .since
            .as_ref()
            .map(|v| TimeBound::from_json("since", v))
            .transpose()?
            .flatten();
        let until = req
            .until
            .as_ref()
            .map(|v| TimeBound::from_json("until", v))
            .transpose()?
            .flatten();

        Ok(FetchParams {
            limit: req.limit,
            offset: req.offset,
            since,
            until,
            extra: BTreeMap::new(),
        })
    }

    /// Build the query map for one Graph call.
    /// Normalized fields override same-named entries in `extra`.
    pub fn to_query(&self, default_limit: u32, default_offset: Option<u32>) -> GraphParams {
        let mut query = self.extra.clone();

        query.insert(
            "limit".to_string(),
            self.limit.unwrap_or(default_limit).to_string(),
        );

        if let Some(offset) = self.offset.or(default_offset) {
            query.insert("offset".to_string(), offset.to_string());
        }

        if let Some(since) = self.since {
            query.insert("since".to_string(), since.epoch_seconds().to_string());
        }

        if let Some(until) = self.until {
            query.insert("until".to_string(), until.epoch_seconds().to_string());
        }

        query
    }
}
