use crate::api::params::QueryParams;
use crate::api::search::SearchGraph;
use crate::core::graph_def::GraphDef;
use crate::core::series::SeriesData;
use crate::error::DashResult;

#[cfg(feature = "http-client")]
mod http;

#[cfg(feature = "http-client")]
pub use http::HttpEndpointClient;

/// Endpoint action names understood by the server-side dispatcher.
pub mod actions {
    pub const GRAPH_DEF_JSON: &str = "graph_def_json";
    pub const INSTANCE_DATA_JSON: &str = "instance_data_json";
    /// Alias for [`INSTANCE_DATA_JSON`] accepted by older servers.
    pub const GRAPH_DATA_JSON: &str = "graph_data_json";
    pub const SEARCH_JSON: &str = "search_json";
    pub const SHOW_INSTANCE: &str = "show_instance";
}

/// Transport seam for the remote JSON endpoint.
///
/// Implementations add the `action` parameter themselves; callers pass only
/// the reconciled selector and window parameters. Empty and `null` response
/// bodies map to `Ok(None)` and empty lists rather than errors.
pub trait EndpointClient {
    /// Fetches the graph definition for a reconciled selector.
    /// `Ok(None)` when the server has nothing for this selector.
    fn fetch_graph_def(&self, params: &QueryParams) -> DashResult<Option<GraphDef>>;

    /// Fetches the data series for a selector plus display window.
    fn fetch_instance_data(&self, params: &QueryParams) -> DashResult<Vec<SeriesData>>;

    /// Runs a suggestion search over graph titles and instances.
    fn search(&self, query: &str) -> DashResult<Vec<SearchGraph>>;
}
