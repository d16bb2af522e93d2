use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::chart_model::{ChartView, build_chart_model};
use crate::api::params::{QueryParams, selector_params};
use crate::api::zoom::GraphImage;
use crate::client::EndpointClient;
use crate::core::graph_def::GraphDef;
use crate::core::ident::Selector;
use crate::core::series::SeriesData;
use crate::core::window::TimeWindow;
use crate::error::DashResult;

/// One graph slot on a dashboard page: the selector pair naming it plus
/// everything fetched or drawn for it so far.
///
/// Without an explicit window the server serves its default range (the last
/// day); the first navigation step then materializes a concrete window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub(super) graph_selector: Selector,
    pub(super) instance_selector: Selector,
    pub(super) container: Option<String>,
    pub(super) window: Option<TimeWindow>,
    pub(super) def: Option<GraphDef>,
    pub(super) chart: Option<ChartView>,
    #[serde(skip)]
    pub(super) generation: u64,
}

impl Instance {
    #[must_use]
    pub fn new(graph_selector: Selector, instance_selector: Selector) -> Self {
        Self {
            graph_selector,
            instance_selector,
            container: None,
            window: None,
            def: None,
            chart: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    #[must_use]
    pub fn graph_selector(&self) -> &Selector {
        &self.graph_selector
    }

    #[must_use]
    pub fn instance_selector(&self) -> &Selector {
        &self.instance_selector
    }

    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    #[must_use]
    pub fn def(&self) -> Option<&GraphDef> {
        self.def.as_ref()
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartView> {
        self.chart.as_ref()
    }

    #[must_use]
    pub fn chart_mut(&mut self) -> Option<&mut ChartView> {
        self.chart.as_mut()
    }

    /// Reconciled selector parameters for this instance, without a window.
    #[must_use]
    pub fn selector_params(&self) -> QueryParams {
        selector_params(&self.graph_selector, &self.instance_selector)
    }

    /// Parameters for a data fetch: the reconciled selector plus the current
    /// window when one is set.
    #[must_use]
    pub fn data_params(&self) -> QueryParams {
        let params = self.selector_params();
        match self.window {
            Some(window) => params.with_window(window),
            None => params,
        }
    }
}

/// Ticket identifying one in-flight data fetch for one instance.
///
/// Applying a ticket loses against any fetch begun later for the same
/// instance, so out-of-order responses can never overwrite newer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub(super) index: usize,
    pub(super) generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// What a single instance update ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// First draw of this instance's chart.
    Drawn,
    /// Existing chart redrawn in place.
    Redrawn,
    /// Definition or data was missing or empty; nothing was touched.
    NothingToRender,
    /// The dashboard has no instance at that index.
    NoSuchInstance,
}

/// Registry of every graph displayed on one page, interactive charts and
/// static images alike.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub(super) instances: Vec<Instance>,
    pub(super) images: Vec<GraphImage>,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instance and returns its index.
    pub fn add_instance(&mut self, instance: Instance) -> usize {
        self.instances.push(instance);
        self.instances.len() - 1
    }

    /// Registers a static image and returns its index.
    pub fn add_image(&mut self, image: GraphImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    #[must_use]
    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    #[must_use]
    pub fn instance_mut(&mut self, index: usize) -> Option<&mut Instance> {
        self.instances.get_mut(index)
    }

    #[must_use]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    #[must_use]
    pub fn image(&self, index: usize) -> Option<&GraphImage> {
        self.images.get(index)
    }

    #[must_use]
    pub fn image_mut(&mut self, index: usize) -> Option<&mut GraphImage> {
        self.images.get_mut(index)
    }

    #[must_use]
    pub fn images(&self) -> &[GraphImage] {
        &self.images
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Fetches and caches the graph definition for one instance when not
    /// already present. A server without a definition for the selector is
    /// not an error; the instance simply stays definition-less.
    pub fn ensure_graph_def<C: EndpointClient>(
        &mut self,
        index: usize,
        client: &C,
    ) -> DashResult<()> {
        let Some(instance) = self.instances.get_mut(index) else {
            return Ok(());
        };
        if instance.def.is_some() {
            return Ok(());
        }
        let params = instance.selector_params();
        match client.fetch_graph_def(&params)? {
            Some(def) => {
                debug!(index, rules = def.defs.len(), "cached graph definition");
                instance.def = Some(def);
            }
            None => debug!(index, "no graph definition for selector"),
        }
        Ok(())
    }

    /// Starts a data fetch for one instance, superseding any fetch still in
    /// flight. Returns the ticket to apply results with, plus the query
    /// parameters for the request.
    pub fn begin_data_fetch(&mut self, index: usize) -> Option<(FetchTicket, QueryParams)> {
        let instance = self.instances.get_mut(index)?;
        instance.generation += 1;
        let ticket = FetchTicket {
            index,
            generation: instance.generation,
        };
        Some((ticket, instance.data_params()))
    }

    /// Applies fetched data for the given ticket, drawing or redrawing the
    /// instance's chart.
    ///
    /// Returns `Ok(None)` when the data was dropped: the ticket lost
    /// against a later fetch, or its instance is gone.
    pub fn apply_series_data(
        &mut self,
        ticket: FetchTicket,
        data_list: &[SeriesData],
    ) -> DashResult<Option<UpdateOutcome>> {
        let Some(instance) = self.instances.get_mut(ticket.index) else {
            debug!(index = ticket.index, "dropping data for removed instance");
            return Ok(None);
        };
        if ticket.generation != instance.generation {
            debug!(
                index = ticket.index,
                ticket = ticket.generation,
                current = instance.generation,
                "dropping superseded data fetch"
            );
            return Ok(None);
        }
        render_instance(instance, ticket.index, data_list).map(Some)
    }

    /// Runs the full fetch-and-draw cycle for one instance: reuses the
    /// cached definition or fetches it, fetches current data, then draws or
    /// redraws the chart.
    ///
    /// A missing instance, definition or data is not an error; the call
    /// reports what happened through [`UpdateOutcome`]. A series count
    /// mismatch on redraw is an error the host must surface.
    pub fn update_instance<C: EndpointClient>(
        &mut self,
        index: usize,
        client: &C,
    ) -> DashResult<UpdateOutcome> {
        if self.instances.get(index).is_none() {
            debug!(index, "update requested for unknown instance");
            return Ok(UpdateOutcome::NoSuchInstance);
        }

        self.ensure_graph_def(index, client)?;
        let has_def = self
            .instances
            .get(index)
            .is_some_and(|instance| instance.def.is_some());
        if !has_def {
            return Ok(UpdateOutcome::NothingToRender);
        }

        let Some((ticket, params)) = self.begin_data_fetch(index) else {
            return Ok(UpdateOutcome::NoSuchInstance);
        };
        let data_list = client.fetch_instance_data(&params)?;
        let outcome = self.apply_series_data(ticket, &data_list)?;
        Ok(outcome.unwrap_or(UpdateOutcome::NothingToRender))
    }

    /// Updates every registered instance in order, stopping at the first
    /// error.
    pub fn update_all<C: EndpointClient>(&mut self, client: &C) -> DashResult<()> {
        for index in 0..self.instances.len() {
            self.update_instance(index, client)?;
        }
        Ok(())
    }
}

fn render_instance(
    instance: &mut Instance,
    index: usize,
    data_list: &[SeriesData],
) -> DashResult<UpdateOutcome> {
    let Some(def) = instance.def.as_ref() else {
        return Ok(UpdateOutcome::NothingToRender);
    };
    if data_list.is_empty() {
        debug!(index, "no data series; nothing to render");
        return Ok(UpdateOutcome::NothingToRender);
    }

    let container = instance
        .container
        .get_or_insert_with(|| format!("c4-graph{index}"));
    let model = build_chart_model(container, def, data_list);

    match instance.chart.as_mut() {
        Some(chart) => {
            chart.redraw(model)?;
            Ok(UpdateOutcome::Redrawn)
        }
        None => {
            instance.chart = Some(ChartView::new(model));
            Ok(UpdateOutcome::Drawn)
        }
    }
}
