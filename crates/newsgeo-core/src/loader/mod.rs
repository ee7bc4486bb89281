// crates/newsgeo-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (filesystem or HTTP, optional gzip) and
//! delegates to the GeoJSON layer parser and the corpus parser.

use crate::catalog::GeographyCatalog;
use crate::error::{MapError, Result};
use crate::model::{LayerKind, Level};
use geojson::FeatureCollection;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

mod corpus;

pub use corpus::{parse_corpus, CorpusLoader, CorpusRequest};

/// Where a layer or corpus is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` strings become [`DataSource::Url`], anything
    /// else a filesystem path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::Path(PathBuf::from(s))
        }
    }

    fn is_gzip(&self) -> bool {
        match self {
            DataSource::Url(u) => u.ends_with(".gz"),
            DataSource::Path(p) => p.extension().is_some_and(|e| e == "gz"),
        }
    }

    pub fn display(&self) -> String {
        match self {
            DataSource::Url(u) => u.clone(),
            DataSource::Path(p) => p.display().to_string(),
        }
    }
}

impl From<String> for DataSource {
    fn from(s: String) -> Self {
        DataSource::parse(&s)
    }
}

impl From<DataSource> for String {
    fn from(s: DataSource) -> Self {
        s.display()
    }
}

/// Property names used to read identity fields from the layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyKeys {
    /// Province name on the province layer.
    pub province: String,
    /// County name on the county layer.
    pub county: String,
    /// Parent-province name on the county layer.
    pub county_province: String,
    /// Place name on the gazetteer layer.
    pub place: String,
    /// Parent-county name on the gazetteer layer.
    pub place_county: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        PropertyKeys {
            province: "NL_NAME_1".into(),
            county: "NL_NAME_2".into(),
            county_province: "NL_NAME_1".into(),
            place: "name".into(),
            place_county: "NL_NAME_2".into(),
        }
    }
}

impl PropertyKeys {
    /// Name property for features shown at `level`.
    pub fn name_key(&self, level: Level) -> &str {
        match level {
            Level::Province => &self.province,
            Level::County => &self.county,
            Level::Point => &self.place,
        }
    }
}

/// Locations of every input plus the property schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub province_layer: DataSource,
    pub county_layer: DataSource,
    pub gazetteer_layer: DataSource,
    /// Corpus path or URL; `{year}` is replaced by the selected year.
    pub corpus_template: String,
    #[serde(default)]
    pub property_keys: PropertyKeys,
    #[serde(default = "default_years")]
    pub years: RangeInclusive<i32>,
}

fn default_years() -> RangeInclusive<i32> {
    2016..=2025
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

impl SourceConfig {
    pub const PROVINCE_FILE: &'static str = "main_geo_data/dprk_si_do.geojson";
    pub const COUNTY_FILE: &'static str = "main_geo_data/dprk_si_gun.geojson";
    pub const GAZETTEER_FILE: &'static str = "main_geo_data/gazetter_with_si_gun.geojson";
    pub const CORPUS_TEMPLATE: &'static str =
        "article_geo_data/combined_data_{year}_with_coordinates_extracted.json";

    /// Standard asset layout below `base`.
    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        SourceConfig {
            province_layer: DataSource::Path(base.join(Self::PROVINCE_FILE)),
            county_layer: DataSource::Path(base.join(Self::COUNTY_FILE)),
            gazetteer_layer: DataSource::Path(base.join(Self::GAZETTEER_FILE)),
            corpus_template: base.join(Self::CORPUS_TEMPLATE).to_string_lossy().into_owned(),
            property_keys: PropertyKeys::default(),
            years: default_years(),
        }
    }

    /// Standard asset layout below a base URL (requires the `fetch` feature
    /// to actually read it).
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        SourceConfig {
            province_layer: DataSource::Url(format!("{base}/{}", Self::PROVINCE_FILE)),
            county_layer: DataSource::Url(format!("{base}/{}", Self::COUNTY_FILE)),
            gazetteer_layer: DataSource::Url(format!("{base}/{}", Self::GAZETTEER_FILE)),
            corpus_template: format!("{base}/{}", Self::CORPUS_TEMPLATE),
            property_keys: PropertyKeys::default(),
            years: default_years(),
        }
    }

    /// Reads a config previously written as JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_stream(&DataSource::Path(path.as_ref().to_path_buf()))?;
        Ok(serde_json::from_reader(reader)?)
    }

    /// Corpus source for `year`.
    pub fn corpus_source(&self, year: i32) -> DataSource {
        DataSource::parse(&self.corpus_template.replace("{year}", &year.to_string()))
    }
}

// -----------------------------------------------------------------------
// TRANSPORT
// -----------------------------------------------------------------------

/// Opens a source, buffers it, and wraps `.gz` sources in a Gzip decoder.
/// Returns a generic reader so callers don't care about transport or
/// compression.
pub fn open_stream(source: &DataSource) -> Result<Box<dyn Read + Send>> {
    let raw: Box<dyn Read + Send> = match source {
        DataSource::Path(path) => {
            let file = File::open(path).map_err(|e| {
                MapError::NotFound(format!("source not found at {}: {}", path.display(), e))
            })?;
            Box::new(BufReader::new(file))
        }
        DataSource::Url(url) => open_url(url)?,
    };

    if source.is_gzip() {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(raw)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(MapError::NotFound(format!(
                "{} is gzip-compressed but the `compact` feature is disabled",
                source.display()
            )));
        }
    }
    Ok(raw)
}

#[cfg(feature = "fetch")]
fn open_url(url: &str) -> Result<Box<dyn Read + Send>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(Box::new(resp))
}

#[cfg(not(feature = "fetch"))]
fn open_url(url: &str) -> Result<Box<dyn Read + Send>> {
    Err(MapError::NotFound(format!(
        "cannot read {url}: built without the `fetch` feature"
    )))
}

/// Reads one GeoJSON `FeatureCollection`.
pub fn load_layer(source: &DataSource, kind: LayerKind) -> Result<FeatureCollection> {
    let reader = open_stream(source)?;
    let collection: FeatureCollection =
        serde_json::from_reader(reader).map_err(|e| MapError::MalformedLayer {
            layer: kind.as_str(),
            reason: e.to_string(),
        })?;
    info!(
        "loaded {} layer from {} ({} features)",
        kind.as_str(),
        source.display(),
        collection.features.len()
    );
    Ok(collection)
}

/// Loads the three layers concurrently and joins them; fails if any fails.
pub fn load_catalog(config: &SourceConfig) -> Result<GeographyCatalog> {
    let (provinces, (counties, places)) = rayon::join(
        || load_layer(&config.province_layer, LayerKind::Province),
        || {
            rayon::join(
                || load_layer(&config.county_layer, LayerKind::County),
                || load_layer(&config.gazetteer_layer, LayerKind::Gazetteer),
            )
        },
    );
    GeographyCatalog::from_layers(provinces?, counties?, places?, &config.property_keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_source_substitutes_year() {
        let cfg = SourceConfig::with_base_dir("/srv/data");
        assert_eq!(
            cfg.corpus_source(2019),
            DataSource::Path(PathBuf::from(
                "/srv/data/article_geo_data/combined_data_2019_with_coordinates_extracted.json"
            ))
        );
        let web = SourceConfig::with_base_url("https://maps.example.org/");
        assert_eq!(
            web.corpus_source(2020),
            DataSource::Url(
                "https://maps.example.org/article_geo_data/combined_data_2020_with_coordinates_extracted.json"
                    .into()
            )
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(&DataSource::parse("/definitely/not/here.geojson")).err().expect("expected an error");
        assert!(matches!(err, MapError::NotFound(_)));
    }
}
