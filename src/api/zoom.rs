use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::instance::Dashboard;
use crate::api::params::QueryParams;
use crate::core::window::{TimeWindow, ZoomAction, ZoomPreset};

/// Which displayed graph a navigation gesture addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTarget {
    Instance(usize),
    Image(usize),
}

/// Navigation operations shared by interactive charts and static images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOp {
    Preset(ZoomPreset),
    Navigate(ZoomAction),
}

/// One static graph image on the page, addressed by its DOM id.
///
/// The image URL is rebuilt from a stable base plus the current window, so
/// repeated navigation never accumulates stale `begin`/`end` fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphImage {
    pub(super) id: String,
    pub(super) base_url: String,
    pub(super) window: Option<TimeWindow>,
}

impl GraphImage {
    /// Captures an image from its current `src`, splitting any window
    /// fragments off into the stable base.
    #[must_use]
    pub fn from_src(id: impl Into<String>, src: &str) -> Self {
        Self {
            id: id.into(),
            base_url: strip_window_fragments(src),
            window: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    /// Current image URL: the base plus the window fragment when set.
    #[must_use]
    pub fn url(&self) -> String {
        match self.window {
            Some(window) => {
                let params = QueryParams::new().with_window(window);
                format!("{};{}", self.base_url, params.to_fragment())
            }
            None => self.base_url.clone(),
        }
    }
}

/// Removes every `begin`/`end` fragment from a graph URL; all other
/// fragments and the leading path stay intact.
#[must_use]
pub fn strip_window_fragments(src: &str) -> String {
    src.split(';')
        .enumerate()
        .filter(|(index, segment)| {
            *index == 0 || (!segment.starts_with("begin=") && !segment.starts_with("end="))
        })
        .map(|(_, segment)| segment)
        .collect::<Vec<_>>()
        .join(";")
}

impl Dashboard {
    /// Applies a zoom operation at an explicit reference clock.
    ///
    /// Returns `Some(changed)` when the target exists; `changed` reports
    /// whether the window moved and a refresh is due. A navigation step on a
    /// graph without a window yet falls back to the day preset.
    pub fn apply_zoom_at(&mut self, target: ZoomTarget, op: ZoomOp, now: i64) -> Option<bool> {
        let slot = self.window_slot(target)?;
        let changed = match op {
            ZoomOp::Preset(preset) => {
                *slot = Some(TimeWindow::preset_at(now, preset));
                true
            }
            ZoomOp::Navigate(action) => match slot {
                Some(window) => window.apply(action),
                None => {
                    *slot = Some(TimeWindow::preset_at(now, ZoomPreset::Day));
                    true
                }
            },
        };
        debug!(?target, ?op, changed, "zoom applied");
        Some(changed)
    }

    /// Same as [`Dashboard::apply_zoom_at`] with the current wall clock.
    pub fn apply_zoom(&mut self, target: ZoomTarget, op: ZoomOp) -> Option<bool> {
        self.apply_zoom_at(target, op, Utc::now().timestamp())
    }

    /// Copies the target's window onto every other displayed graph, so one
    /// graph can serve as the time reference for the whole page.
    ///
    /// Returns the propagated window, or `None` when the target does not
    /// exist or has no window yet. Refreshing the updated graphs is the
    /// caller's move.
    pub fn sync_reference(&mut self, source: ZoomTarget) -> Option<TimeWindow> {
        let window = match source {
            ZoomTarget::Instance(index) => self.instances.get(index)?.window,
            ZoomTarget::Image(index) => self.images.get(index)?.window,
        }?;

        for (index, instance) in self.instances.iter_mut().enumerate() {
            if source != ZoomTarget::Instance(index) {
                instance.window = Some(window);
            }
        }
        for (index, image) in self.images.iter_mut().enumerate() {
            if source != ZoomTarget::Image(index) {
                image.window = Some(window);
            }
        }
        debug!(
            ?source,
            begin = window.begin,
            end = window.end,
            "window propagated to all graphs"
        );
        Some(window)
    }

    /// Current URL for each static image, in registration order.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        self.images.iter().map(GraphImage::url).collect()
    }

    fn window_slot(&mut self, target: ZoomTarget) -> Option<&mut Option<TimeWindow>> {
        match target {
            ZoomTarget::Instance(index) => {
                self.instances.get_mut(index).map(|instance| &mut instance.window)
            }
            ZoomTarget::Image(index) => {
                self.images.get_mut(index).map(|image| &mut image.window)
            }
        }
    }
}
