use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Narrowest window the navigation controls will zoom into, in seconds.
pub const MIN_ZOOM_SPAN_SECS: i64 = 300;

/// Absolute window presets offered by the preset button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomPreset {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl ZoomPreset {
    /// Window width selected by the preset.
    #[must_use]
    pub fn duration_secs(self) -> i64 {
        match self {
            ZoomPreset::Hour => 3_600,
            ZoomPreset::Day => 86_400,
            ZoomPreset::Week => 7 * 86_400,
            ZoomPreset::Month => 31 * 86_400,
            ZoomPreset::Year => 366 * 86_400,
        }
    }
}

/// Relative navigation steps offered by the navigation button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAction {
    Earlier,
    Later,
    In,
    Out,
}

impl ZoomAction {
    /// Shift factors applied to the window edges, as fractions of the width.
    #[must_use]
    pub fn factors(self) -> (f64, f64) {
        match self {
            ZoomAction::Earlier => (-0.2, -0.2),
            ZoomAction::Later => (0.2, 0.2),
            ZoomAction::In => (0.2, -0.2),
            ZoomAction::Out => (-1.0 / 3.0, 1.0 / 3.0),
        }
    }
}

/// Displayed time range in unix seconds, `begin` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub begin: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Window over `[begin, end)`. Reversed endpoints are swapped; an empty
    /// range is rejected.
    pub fn new(begin: i64, end: i64) -> DashResult<Self> {
        if begin == end {
            return Err(DashError::InvalidData(
                "time window must have a non-zero width".to_owned(),
            ));
        }
        if begin > end {
            return Ok(Self { begin: end, end: begin });
        }
        Ok(Self { begin, end })
    }

    /// Window of `duration_secs` ending at `now`.
    pub fn ending_at(now: i64, duration_secs: i64) -> DashResult<Self> {
        if duration_secs <= 0 {
            return Err(DashError::InvalidData(format!(
                "window duration must be positive, got {duration_secs}"
            )));
        }
        Ok(Self {
            begin: now - duration_secs,
            end: now,
        })
    }

    /// Preset window ending at `now`.
    #[must_use]
    pub fn preset_at(now: i64, preset: ZoomPreset) -> Self {
        Self {
            begin: now - preset.duration_secs(),
            end: now,
        }
    }

    /// Preset window ending at the current wall clock.
    #[must_use]
    pub fn preset_now(preset: ZoomPreset) -> Self {
        Self::preset_at(Utc::now().timestamp(), preset)
    }

    #[must_use]
    pub fn width_secs(self) -> i64 {
        self.end - self.begin
    }

    /// Shifts each edge by `width × factor`, rounded to whole seconds.
    ///
    /// Returns `false` without mutating when the window is already at or
    /// below [`MIN_ZOOM_SPAN_SECS`] and both factors would narrow it further.
    /// A `true` return means the window changed and a refresh is due.
    pub fn pan(&mut self, factor_begin: f64, factor_end: f64) -> bool {
        let width = self.width_secs();
        if width <= MIN_ZOOM_SPAN_SECS && factor_begin > 0.0 && factor_end < 0.0 {
            return false;
        }
        let width = width as f64;
        self.begin += (width * factor_begin).round() as i64;
        self.end += (width * factor_end).round() as i64;
        true
    }

    /// Applies one navigation step.
    pub fn apply(&mut self, action: ZoomAction) -> bool {
        let (factor_begin, factor_end) = action.factors();
        self.pan(factor_begin, factor_end)
    }
}
