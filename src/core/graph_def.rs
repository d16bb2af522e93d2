use serde::{Deserialize, Serialize};

use crate::core::ident::Selector;
use crate::error::{DashError, DashResult};

/// Color value the server sends when it wants the chart library to pick one.
pub const RANDOM_COLOR: &str = "random";

/// One drawing rule inside a graph definition: which data series it applies
/// to and how the matching series are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDef {
    pub select: Selector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ds_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub stack: bool,
    #[serde(default)]
    pub area: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SeriesDef {
    #[must_use]
    pub fn new(select: Selector) -> Self {
        Self {
            select,
            ds_name: None,
            legend: None,
            color: None,
            stack: false,
            area: false,
            format: None,
        }
    }

    #[must_use]
    pub fn with_ds_name(mut self, ds_name: impl Into<String>) -> Self {
        self.ds_name = Some(ds_name.into());
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: bool) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: bool) -> Self {
        self.stack = stack;
        self
    }

    /// Explicit color for this def, or `None` when unset or when the server
    /// delegated the choice with [`RANDOM_COLOR`].
    #[must_use]
    pub fn fixed_color(&self) -> Option<&str> {
        self.color.as_deref().filter(|color| *color != RANDOM_COLOR)
    }
}

/// Server-provided definition of one graph: display attributes plus the
/// ordered drawing rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_label: Option<String>,
    #[serde(default)]
    pub defs: Vec<SeriesDef>,
}

impl GraphDef {
    pub fn from_json_str(input: &str) -> DashResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashError::InvalidData(format!("failed to parse graph definition: {e}")))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
