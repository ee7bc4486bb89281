// crates/newsgeo-core/src/lib.rs

//! # newsgeo-core
//!
//! Drill-down navigation and regional article statistics for an
//! administrative map (province → county → named place).
//!
//! The crate turns three static GeoJSON layers and a per-year article corpus
//! into everything a map front end needs to draw: per-region mention counts,
//! a place → article index for popups, and a [`RenderPlan`] of paint rules,
//! layer visibility and viewport framing for an external map renderer.
//!
//! ```no_run
//! use newsgeo_core::prelude::*;
//!
//! let config = SourceConfig::with_base_dir("public");
//! let mut session = MapSession::new(config.clone());
//! session.load_geography(load_catalog(&config));
//!
//! session.params_mut().set_year(Some(2020));
//! session.params_mut().set_quarter(Some(2));
//! session.search()?;
//!
//! for stat in session.region_stats() {
//!     println!("{} {} ({:.2}%)", stat.name, stat.count, stat.percentage);
//! }
//! # Ok::<(), newsgeo_core::MapError>(())
//! ```

pub mod aggregate;
pub mod catalog;
pub mod common;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod navigator;
pub mod popup;
pub mod render;
pub mod session;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::error::{MapError, Result};
pub use crate::model::{ArticleRecord, ArticleSummary, GeographyFeature, Level, RegionStat};
pub use crate::catalog::GeographyCatalog;
pub use crate::common::CatalogStats;
pub use crate::render::RenderPlan;
pub use crate::session::MapSession;

pub mod prelude {
    pub use crate::aggregate::{place_stats, region_stats, PlaceArticleIndex};
    pub use crate::catalog::GeographyCatalog;
    pub use crate::common::CatalogStats;
    pub use crate::error::{MapError, Result};
    pub use crate::filter::{custom_week, SearchParams, TimeWindow};
    pub use crate::loader::{load_catalog, CorpusLoader, DataSource, PropertyKeys, SourceConfig};
    pub use crate::model::{ArticleRecord, ArticleSummary, GeographyFeature, Level, RegionStat};
    pub use crate::navigator::{FilterFrame, Navigator};
    pub use crate::popup::{PopupPage, PopupView, PAGE_SIZE};
    pub use crate::render::{apply_plan, MapEvent, MapRenderer, RenderPlan};
    pub use crate::session::{EventOutcome, GeographyStatus, MapSession, SharedSession, Tooltip};
    pub use crate::traits::NameMatch;
}
