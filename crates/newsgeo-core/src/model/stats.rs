// crates/newsgeo-core/src/model/stats.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// Mention count of one region (or place) at the current level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

impl RegionStat {
    /// `"{count} articles ({pct:.2}%)"`, as shown in the panel and tooltip.
    pub fn label(&self) -> String {
        format!("{} articles ({:.2}%)", self.count, self.percentage)
    }
}

impl NameMatch for RegionStat {
    fn name_str(&self) -> &str {
        &self.name
    }
}
