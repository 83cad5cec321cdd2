//! Converter entry points, one per visual.
//!
//! Each converter is a pure function over the DataView: no input mutation,
//! structurally equal output for equal input, and an empty-but-valid result
//! for well-formed-but-empty data.

pub mod boxplot;
pub mod funnel;
pub mod legend;
pub mod scatter;

pub use boxplot::{BoxGeometry, BoxWhiskerData, BoxWhiskerDataPoint};
pub use funnel::{FunnelData, FunnelDataPoint};
pub use legend::{LegendData, LegendItem};
pub use scatter::{ScatterData, ScatterDataPoint};
