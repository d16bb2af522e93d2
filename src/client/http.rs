use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::params::QueryParams;
use crate::api::search::SearchGraph;
use crate::client::{EndpointClient, actions};
use crate::core::graph_def::GraphDef;
use crate::core::series::SeriesData;
use crate::error::{DashError, DashResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Blocking HTTP implementation of [`EndpointClient`] against one
/// `collection.fcgi`-style endpoint URL.
pub struct HttpEndpointClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpEndpointClient {
    pub fn new(base_url: impl Into<String>) -> DashResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> DashResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| endpoint_error("client_init", e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches data with an explicit action name, for servers that only
    /// understand the [`actions::GRAPH_DATA_JSON`] alias.
    pub fn fetch_data_with_action(
        &self,
        action: &str,
        params: &QueryParams,
    ) -> DashResult<Vec<SeriesData>> {
        Ok(self.get_json(action, params)?.unwrap_or_default())
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &QueryParams,
    ) -> DashResult<Option<T>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("action", action)])
            .query(params)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| endpoint_error(action, e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| endpoint_error(action, e.to_string()))?;
        if body.trim().is_empty() {
            debug!(action, "empty endpoint response");
            return Ok(None);
        }

        serde_json::from_str::<Option<T>>(&body)
            .map_err(|e| endpoint_error(action, format!("decode error: {e}")))
    }
}

impl EndpointClient for HttpEndpointClient {
    fn fetch_graph_def(&self, params: &QueryParams) -> DashResult<Option<GraphDef>> {
        self.get_json(actions::GRAPH_DEF_JSON, params)
    }

    fn fetch_instance_data(&self, params: &QueryParams) -> DashResult<Vec<SeriesData>> {
        self.fetch_data_with_action(actions::INSTANCE_DATA_JSON, params)
    }

    fn search(&self, query: &str) -> DashResult<Vec<SearchGraph>> {
        let mut params = QueryParams::new();
        params.insert("q", query);
        Ok(self
            .get_json(actions::SEARCH_JSON, &params)?
            .unwrap_or_default())
    }
}

fn endpoint_error(action: &str, detail: String) -> DashError {
    DashError::Endpoint {
        action: action.to_owned(),
        detail,
    }
}
