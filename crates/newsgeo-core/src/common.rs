// crates/newsgeo-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Feature counts of a loaded [`GeographyCatalog`](crate::GeographyCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub provinces: usize,
    pub counties: usize,
    pub places: usize,
}

/// Sequential palette used for the choropleth fill, lowest bucket first.
pub const PALETTE: [&str; 5] = ["#addd8e", "#78c679", "#41ab5d", "#238443", "#005a32"];

/// Labels of the five legend buckets, aligned with [`PALETTE`].
pub const LEGEND_LABELS: [&str; 5] = ["very low", "low", "medium", "high", "very high"];

/// Display name used when a hovered or clicked feature has no name.
pub const UNKNOWN_REGION: &str = "unknown region";

/// Placeholder title for articles without one.
pub const NO_TITLE: &str = "(no title)";
