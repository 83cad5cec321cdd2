pub mod bubble;
pub mod color;
pub mod extract;
pub mod numeric;
pub mod percent;
pub mod sanitize;
pub mod scale;
pub mod stats;
pub mod tooltip;
pub mod types;

pub use bubble::{DataRange, PixelSizeRange};
pub use color::{ColorResolver, GradientScale};
pub use extract::{CategorySlot, Extraction, MeasureRow};
pub use numeric::DataWarning;
pub use sanitize::{SanitizedPair, SanitizedSeries, SignPolicy};
pub use scale::{LinearScale, Orientation};
pub use stats::{CategoryStats, QuartileSummary};
pub use tooltip::{TooltipBuilder, TooltipItem};
pub use types::Viewport;
