//! Interfaces consumed from the visualization host: color palette, warning
//! and interaction services, locale-aware value formatting.

pub mod format;
pub mod palette;
pub mod services;

pub use format::{DisplayUnits, LocaleSettings, ValueFormatter};
pub use palette::ColorPalette;
pub use services::{HostCapabilities, RecordingHost, VisualHost, surface_warning};
