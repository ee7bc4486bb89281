// crates/newsgeo-core/src/navigator.rs

//! # Drill-Down Navigator
//!
//! A stack of chosen regions. Its depth alone decides the displayed level:
//! empty → province, one frame → county, two frames → point (terminal).

use crate::loader::PropertyKeys;
use crate::model::geography::string_property;
use crate::model::Level;
use geojson::{Feature, Geometry};
use log::debug;
use serde::{Deserialize, Serialize};

/// A region chosen while drilling down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFrame {
    /// Level the region was selected at (province or county).
    pub level: Level,
    pub name: String,
    /// Geometry of the selected region, used to frame its children.
    pub bounds: Option<Geometry>,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    stack: Vec<FilterFrame>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        Level::from_depth(self.stack.len())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn frames(&self) -> &[FilterFrame] {
        &self.stack
    }

    pub fn top(&self) -> Option<&FilterFrame> {
        self.stack.last()
    }

    /// Drills into `feature`.
    ///
    /// Only valid at province and county level, and only if the feature
    /// carries the name property of the current level. Returns whether a
    /// frame was pushed.
    pub fn select_region(&mut self, feature: &Feature, keys: &PropertyKeys) -> bool {
        let level = self.level();
        if level.child().is_none() {
            return false;
        }
        let Some(name) = string_property(feature, keys.name_key(level)) else {
            debug!("select ignored: feature has no `{}`", keys.name_key(level));
            return false;
        };
        self.push(FilterFrame {
            level,
            name: name.to_string(),
            bounds: feature.geometry.clone(),
        });
        true
    }

    fn push(&mut self, frame: FilterFrame) {
        debug!("drill {} → {} ({})", frame.level, frame.name, self.stack.len() + 1);
        self.stack.push(frame);
    }

    /// Goes up one level. Returns `false` (and stays at province) if the
    /// stack was already empty.
    pub fn back(&mut self) -> bool {
        let popped = self.stack.pop();
        if let Some(f) = &popped {
            debug!("back from {} ({})", f.name, self.stack.len());
        }
        popped.is_some()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Selected names joined with ` > `.
    pub fn breadcrumb(&self) -> String {
        self.stack
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
