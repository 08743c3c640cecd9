// src/services/testing.rs
// Scripted GraphApi for fetcher tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::GraphError;
use crate::services::params::GraphParams;
use crate::services::{GraphApi, GraphResponse};

/// Returns canned `data` per path and records every call
#[derive(Default)]
pub struct ScriptedGraph {
    responses: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<(String, GraphParams)>>,
}

impl ScriptedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` (a full Graph response object) for `path`
    pub fn respond(self, path: &str, body: Value) -> Self {
        self.responses.lock().unwrap().insert(path.to_string(), body);
        self
    }

    pub fn set_response(&self, path: &str, body: Value) {
        self.responses.lock().unwrap().insert(path.to_string(), body);
    }

    pub fn calls(&self) -> Vec<(String, GraphParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphApi for ScriptedGraph {
    async fn graph(&self, path: &str, params: &GraphParams) -> Result<GraphResponse, GraphError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));

        let body = self
            .responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| GraphError::ExternalApiError(format!("no scripted response for {}", path)))?;

        serde_json::from_value(body).map_err(|e| GraphError::ExternalApiError(e.to_string()))
    }
}
