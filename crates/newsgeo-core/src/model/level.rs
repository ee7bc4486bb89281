// crates/newsgeo-core/src/model/level.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity currently displayed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Top tier, shown when nothing is selected.
    #[default]
    Province,
    /// Counties of the selected province.
    County,
    /// Gazetteer places of the selected county. Terminal.
    Point,
}

impl Level {
    /// Level for a drill-down stack of the given depth.
    ///
    /// Depths above 2 cannot be produced by the navigator and are clamped.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => Level::Province,
            1 => Level::County,
            _ => Level::Point,
        }
    }

    /// The level reached by selecting a region at this level.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Province => Some(Level::County),
            Level::County => Some(Level::Point),
            Level::Point => None,
        }
    }

    /// Whether regions at this level are drawn as polygons (fill + outline).
    #[inline]
    pub fn is_choropleth(self) -> bool {
        self != Level::Point
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Province => "province",
            Level::County => "county",
            Level::Point => "point",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_maps_to_level() {
        assert_eq!(Level::from_depth(0), Level::Province);
        assert_eq!(Level::from_depth(1), Level::County);
        assert_eq!(Level::from_depth(2), Level::Point);
    }

    #[test]
    fn point_has_no_child() {
        assert_eq!(Level::Province.child(), Some(Level::County));
        assert_eq!(Level::Point.child(), None);
    }
}
