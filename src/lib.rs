//! visuals-rs: data-to-model conversion engine for BI custom visuals.
//!
//! This crate turns a host-supplied tabular data description (`DataView`)
//! into deterministic, typed data-point collections for three visuals:
//! funnel chart, scatter chart, and box-and-whisker diagram. Rendering is a
//! black-box consumer of the converted model; everything here is pure,
//! synchronous, and rebuilt from scratch on every data change.

pub mod core;
pub mod dataview;
pub mod error;
pub mod host;
pub mod settings;
pub mod telemetry;
pub mod visuals;

pub use dataview::{ColumnMetadata, DataView, Role, RoleSet, SelectionKey};
pub use error::{VisualError, VisualResult};
pub use host::{ColorPalette, HostCapabilities, VisualHost};
pub use visuals::{BoxWhiskerData, FunnelData, ScatterData};
