use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::graph_def::{GraphDef, SeriesDef};
use crate::core::series::SeriesData;
use crate::core::window::MIN_ZOOM_SPAN_SECS;
use crate::error::{DashError, DashResult};

/// How one chart series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Area,
}

/// One renderable series, built from a drawing rule and a matching data
/// series. Points keep `None` gaps so the host library can break the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub name: String,
    pub stacked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub point_interval_ms: i64,
    pub point_start_ms: i64,
    pub points: Vec<Option<f64>>,
}

/// Renderer-agnostic chart configuration for one displayed graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub container: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_label: Option<String>,
    pub min_zoom_span_secs: i64,
    pub series: Vec<ChartSeries>,
}

/// True when the drawing rule applies to the data series: the optional
/// `ds_name` filter must equal the series' data source, and the rule's
/// selector must match the series' identifier.
#[must_use]
pub fn def_matches(def: &SeriesDef, data: &SeriesData) -> bool {
    if let Some(ds_name) = def.ds_name.as_deref() {
        if ds_name != data.data_source {
            return false;
        }
    }
    def.select.matches(&data.file)
}

fn build_series(def: &SeriesDef, data: &SeriesData) -> ChartSeries {
    ChartSeries {
        kind: if def.area {
            SeriesKind::Area
        } else {
            SeriesKind::Line
        },
        name: def
            .legend
            .clone()
            .unwrap_or_else(|| data.data_source.clone()),
        stacked: def.stack,
        color: def.fixed_color().map(str::to_owned),
        point_interval_ms: (data.interval * 1000.0).round() as i64,
        point_start_ms: (data.first_value_time * 1000.0).round() as i64,
        points: data.data.clone(),
    }
}

/// Builds the chart model for one graph.
///
/// Drawing rules are walked in reverse definition order so that rules
/// defined last end up at the bottom of the draw stack, matching the
/// server-side renderer. Within one rule, data series keep their response
/// order.
#[must_use]
pub fn build_chart_model(container: &str, def: &GraphDef, data_list: &[SeriesData]) -> ChartModel {
    let mut series = Vec::new();
    for rule in def.defs.iter().rev() {
        for data in data_list {
            if def_matches(rule, data) {
                series.push(build_series(rule, data));
            }
        }
    }
    debug!(
        rules = def.defs.len(),
        sources = data_list.len(),
        series = series.len(),
        "built chart model"
    );
    ChartModel {
        container: container.to_owned(),
        title: def.title.clone(),
        vertical_label: def.vertical_label.clone(),
        min_zoom_span_secs: MIN_ZOOM_SPAN_SECS,
        series,
    }
}

/// A drawn chart plus its per-series visibility toggles.
///
/// Hosts mirror this state into whatever chart library they embed; the
/// redraw contract below keeps that mirroring sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    model: ChartModel,
    visible: Vec<bool>,
}

impl ChartView {
    /// Wraps a freshly built model; every series starts visible.
    #[must_use]
    pub fn new(model: ChartModel) -> Self {
        let visible = vec![true; model.series.len()];
        Self { model, visible }
    }

    #[must_use]
    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.model.series.len()
    }

    #[must_use]
    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    #[must_use]
    pub fn series_visible(&self, index: usize) -> Option<bool> {
        self.visible.get(index).copied()
    }

    pub fn set_series_visible(&mut self, index: usize, visible: bool) -> DashResult<()> {
        let Some(slot) = self.visible.get_mut(index) else {
            return Err(DashError::InvalidData(format!("no series at index {index}")));
        };
        *slot = visible;
        Ok(())
    }

    /// Replaces every series with a fresh build for the same definition,
    /// keeping each series' visibility toggle by index position.
    ///
    /// The incoming model must carry exactly as many series as the current
    /// one; a mismatch means definition and data went out of sync, which is
    /// fatal for the host and leaves this view untouched.
    pub fn redraw(&mut self, model: ChartModel) -> DashResult<()> {
        if model.series.len() != self.model.series.len() {
            return Err(DashError::SeriesCountMismatch {
                expected: self.model.series.len(),
                actual: model.series.len(),
            });
        }
        self.model = model;
        Ok(())
    }
}
