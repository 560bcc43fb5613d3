//! Wire contract for fragment reloads.

use serde::{Deserialize, Serialize};

/// The three-part JSON body used for in-place updates.
///
/// Serialized by the server on the `ajax` path, deserialized by the
/// client after a successful fetch. Exactly these three string fields
/// and nothing else; extra top-level fields are a contract violation
/// and fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentResponse {
    /// Rendered item-list fragment.
    pub content: String,
    /// Rendered sorting-control fragment.
    pub sorting: String,
    /// Rendered pagination-control fragment.
    pub pagination: String,
}
