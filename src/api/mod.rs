pub mod chart_model;
pub mod instance;
pub mod params;
pub mod search;
pub mod zoom;

pub use chart_model::{
    ChartModel, ChartSeries, ChartView, SeriesKind, build_chart_model, def_matches,
};
pub use instance::{Dashboard, FetchTicket, Instance, UpdateOutcome};
pub use params::{QueryParams, selector_pair, selector_params};
pub use search::{
    SearchGraph, SearchInstance, SearchSuggest, SuggestAction, render_suggestions,
};
pub use zoom::{GraphImage, ZoomOp, ZoomTarget, strip_window_fragments};
