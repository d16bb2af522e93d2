use serde::{Deserialize, Serialize};
use tracing::debug;

/// Queries shorter than this never hit the endpoint.
pub const MIN_QUERY_LEN: usize = 2;
/// Grace period between losing focus and hiding the suggest panel.
pub const HIDE_DELAY_MS: u64 = 500;

/// One matching instance inside a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInstance {
    pub description: String,
    /// Pre-reconciled selector fragment for the instance link.
    pub params: String,
}

/// One matching graph with its instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchGraph {
    pub title: String,
    #[serde(default)]
    pub instances: Vec<SearchInstance>,
}

/// What the embedding host must do after feeding an event into
/// [`SearchSuggest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestAction {
    /// Issue a search request for this query and feed the results back via
    /// [`SearchSuggest::apply_results`].
    Fetch(String),
    /// Hide the suggest panel; no request is due.
    HidePanel,
}

/// State machine behind the search box suggest panel.
///
/// The host forwards keystrokes and focus changes and performs whatever
/// [`SuggestAction`] comes back. Time never advances on its own; the host
/// reports it through [`SearchSuggest::tick`], which keeps the delayed
/// blur-hide deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSuggest {
    query: String,
    panel_visible: bool,
    results: Vec<SearchGraph>,
    hide_deadline_ms: Option<u64>,
}

impl SearchSuggest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    #[must_use]
    pub fn results(&self) -> &[SearchGraph] {
        &self.results
    }

    /// Records the current input text after a keystroke.
    ///
    /// Long enough queries show the panel (with whatever results are already
    /// there) and request fresh results; shorter ones hide the panel but keep
    /// the previous results for a later re-focus.
    pub fn input(&mut self, query: &str) -> SuggestAction {
        self.query = query.to_owned();
        if self.query.chars().count() >= MIN_QUERY_LEN {
            self.panel_visible = true;
            self.hide_deadline_ms = None;
            SuggestAction::Fetch(self.query.clone())
        } else {
            self.panel_visible = false;
            SuggestAction::HidePanel
        }
    }

    /// Applies results for `query`. Results for anything but the current
    /// query are dropped, so a slow early response can never overwrite a
    /// fresh one. Returns whether the results were applied.
    pub fn apply_results(&mut self, query: &str, results: Vec<SearchGraph>) -> bool {
        if query != self.query {
            debug!(
                stale = query,
                current = %self.query,
                "dropping stale search results"
            );
            return false;
        }
        self.results = results;
        true
    }

    /// The search box lost focus; the panel hides after [`HIDE_DELAY_MS`]
    /// unless focus returns first.
    pub fn focus_lost(&mut self, now_ms: u64) {
        self.hide_deadline_ms = Some(now_ms + HIDE_DELAY_MS);
    }

    /// The search box regained focus, cancelling any pending hide.
    pub fn focus_gained(&mut self) {
        self.hide_deadline_ms = None;
        self.panel_visible = self.query.chars().count() >= MIN_QUERY_LEN;
    }

    /// Advances time; applies a due delayed hide. Returns `true` when the
    /// panel was hidden by this call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.hide_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.hide_deadline_ms = None;
                self.panel_visible = false;
                true
            }
            _ => false,
        }
    }
}

/// Renders search results as `graph_list` items for the suggest panel.
///
/// `base_path` is the endpoint path instance links point at; the instance
/// params fragment is appended after the `show_instance` action. Titles and
/// descriptions are HTML-escaped.
#[must_use]
pub fn render_suggestions(base_path: &str, graphs: &[SearchGraph]) -> String {
    let mut out = String::new();
    for graph in graphs {
        out.push_str("<li class=\"graph\">");
        out.push_str(&html_escape(&graph.title));
        if !graph.instances.is_empty() {
            out.push_str("<ul class=\"instance_list\">");
            for instance in &graph.instances {
                out.push_str("<li class=\"instance\"><a href=\"");
                out.push_str(&html_escape(base_path));
                out.push_str("?action=show_instance;");
                out.push_str(&html_escape(&instance.params));
                out.push_str("\">");
                out.push_str(&html_escape(&instance.description));
                out.push_str("</a></li>");
            }
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
    out
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
