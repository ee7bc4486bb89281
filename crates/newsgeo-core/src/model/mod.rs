// crates/newsgeo-core/src/model/mod.rs
pub mod article;
pub mod geography;
pub mod level;
pub mod stats;

pub use article::{ArticleRecord, ArticleSummary};
pub use geography::{BBox, GeographyFeature, LayerKind};
pub use level::Level;
pub use stats::RegionStat;
