//! Host DataView contract: column metadata, semantic roles, object/property
//! bags, selection identities, and the categorical view shape.

pub mod categorical;
pub mod column;
pub mod identity;
pub mod objects;
pub mod role;

pub use categorical::{CategoryColumn, DataView, ValueColumn, ValueGroup, ValueLayout};
pub use column::{ColumnMetadata, NumericBounds};
pub use identity::SelectionKey;
pub use objects::{DataViewObjects, Fill, ObjectValue, PropertyId};
pub use role::{Role, RoleSet};
