use serde::{Deserialize, Serialize};

use crate::core::ident::Ident;
use crate::error::{DashError, DashResult};

/// One data series returned for a drawable graph.
///
/// `interval` and `first_value_time` are in seconds; `data` holds one sample
/// per step, with `null` marking gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub data_source: String,
    pub file: Ident,
    pub interval: f64,
    pub first_value_time: f64,
    #[serde(default)]
    pub data: Vec<Option<f64>>,
}

impl SeriesData {
    #[must_use]
    pub fn new(
        data_source: impl Into<String>,
        file: Ident,
        interval: f64,
        first_value_time: f64,
        data: Vec<Option<f64>>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            file,
            interval,
            first_value_time,
            data,
        }
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.data.iter().filter(|sample| sample.is_none()).count()
    }
}

/// Parses the data payload of one graph fetch. An empty or `null` body maps
/// to an empty list.
pub fn series_list_from_json_str(input: &str) -> DashResult<Vec<SeriesData>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<SeriesData>> = serde_json::from_str(input)
        .map_err(|e| DashError::InvalidData(format!("failed to parse series data: {e}")))?;
    Ok(parsed.unwrap_or_default())
}
