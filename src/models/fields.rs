// src/models/fields.rs
// DOCUMENTATION: Serde helpers for Graph API field encodings
// PURPOSE: Graph ids arrive as strings or numbers, timestamps carry a `+0000` offset

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Graph timestamp layout, e.g. `2013-04-18T16:51:03+0000`
pub const GRAPH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Extract a numeric Graph id from a string, a number, or an object carrying `id`
pub fn parse_graph_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("id").and_then(parse_graph_id),
        _ => None,
    }
}

/// Parse a Graph timestamp (Graph layout first, RFC 3339 as fallback)
pub fn parse_graph_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, GRAPH_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn graph_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_graph_id(&value).ok_or_else(|| D::Error::custom(format!("invalid Graph id: {}", value)))
}

pub fn optional_graph_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => parse_graph_id(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid Graph id: {}", value))),
    }
}

pub fn graph_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_graph_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid Graph timestamp: {}", raw)))
}

pub fn optional_graph_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_graph_time(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid Graph timestamp: {}", raw))),
    }
}

/// Plain text field that the Graph may also send as a page object (`place`)
pub fn name_or_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Text field where the Graph sends `null` for empty values
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
