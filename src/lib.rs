//! graphdash-rs: client-side models for collection4-style metrics dashboards.
//!
//! This crate reimplements the browser-side presentation layer of the
//! collectd web frontend as plain Rust state machines: selector
//! reconciliation, chart model building, zoom/pan windows and search
//! suggest, all decoupled from any particular DOM or chart library.

pub mod api;
pub mod client;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{Dashboard, Instance};
pub use error::{DashError, DashResult};
