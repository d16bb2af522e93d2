pub mod format;
pub mod graph_def;
pub mod ident;
pub mod series;
pub mod window;

pub use format::format_value;
pub use graph_def::{GraphDef, SeriesDef};
pub use ident::{Ident, IdentField, Selector};
pub use series::SeriesData;
pub use window::{TimeWindow, ZoomAction, ZoomPreset};
