use serde::{Deserialize, Serialize};

use crate::dataview::objects::DataViewObjects;
use crate::dataview::role::RoleSet;

/// Host-supplied numeric bounds for consistent cross-frame scaling.
///
/// `min`/`max` apply to the whole column; `min_local`/`max_local` to the
/// currently loaded segment. Either pair may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_local: Option<f64>,
    pub max_local: Option<f64>,
}

/// Metadata describing one column of the DataView.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub display_name: String,
    /// Stable query key used for measure-keyed color lookups and identities.
    pub query_name: Option<String>,
    pub format_string: Option<String>,
    pub roles: RoleSet,
    pub bounds: NumericBounds,
    pub objects: Option<DataViewObjects>,
}

impl ColumnMetadata {
    #[must_use]
    pub fn new(display_name: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            display_name: display_name.into(),
            roles,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.query_name = Some(query_name.into());
        self
    }

    #[must_use]
    pub fn with_format_string(mut self, format_string: impl Into<String>) -> Self {
        self.format_string = Some(format_string.into());
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: NumericBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: DataViewObjects) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Key used to identify the measure across frames: the query name when
    /// present, the display name otherwise.
    #[must_use]
    pub fn measure_key(&self) -> &str {
        self.query_name.as_deref().unwrap_or(&self.display_name)
    }
}
