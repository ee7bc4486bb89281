// crates/newsgeo-core/src/catalog.rs

//! # Geography Catalog
//!
//! The three static layers (provinces, counties, gazetteer places), loaded
//! once per session and never mutated afterwards.

use crate::common::CatalogStats;
use crate::error::{MapError, Result};
use crate::loader::PropertyKeys;
use crate::model::geography::string_property;
use crate::model::{GeographyFeature, LayerKind};
use crate::text::{normalize_name, normalized_overlap};
use geojson::FeatureCollection;
use log::{info, warn};

#[derive(Clone, Debug)]
pub struct GeographyCatalog {
    provinces: Vec<GeographyFeature>,
    counties: Vec<GeographyFeature>,
    places: Vec<GeographyFeature>,
}

impl GeographyCatalog {
    /// Builds the catalog from the three raw layers.
    ///
    /// Features that lack the layer's name property are kept (they are still
    /// drawn) with an empty name, which matches nothing. A layer without any
    /// feature is rejected as malformed.
    pub fn from_layers(
        provinces: FeatureCollection,
        counties: FeatureCollection,
        places: FeatureCollection,
        keys: &PropertyKeys,
    ) -> Result<Self> {
        let provinces = read_layer(LayerKind::Province, provinces, &keys.province, None)?;
        let counties = read_layer(
            LayerKind::County,
            counties,
            &keys.county,
            Some(&keys.county_province),
        )?;
        let places = read_layer(
            LayerKind::Gazetteer,
            places,
            &keys.place,
            Some(&keys.place_county),
        )?;

        let catalog = GeographyCatalog {
            provinces,
            counties,
            places,
        };
        let stats = catalog.stats();
        info!(
            "geography catalog ready: {} provinces, {} counties, {} places",
            stats.provinces, stats.counties, stats.places
        );
        Ok(catalog)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            provinces: self.provinces.len(),
            counties: self.counties.len(),
            places: self.places.len(),
        }
    }

    pub fn provinces(&self) -> &[GeographyFeature] {
        &self.provinces
    }

    pub fn counties(&self) -> &[GeographyFeature] {
        &self.counties
    }

    pub fn places(&self) -> &[GeographyFeature] {
        &self.places
    }

    /// Counties whose parent-province name overlaps `province`
    /// (symmetric containment, whitespace-insensitive).
    pub fn counties_in(&self, province: &str) -> Vec<&GeographyFeature> {
        let wanted = normalize_name(province);
        self.counties
            .iter()
            .filter(|c| {
                c.parent
                    .as_deref()
                    .is_some_and(|p| normalized_overlap(&normalize_name(p), &wanted))
            })
            .collect()
    }

    /// Gazetteer places whose parent-county name equals `county` after
    /// normalization.
    pub fn places_in(&self, county: &str) -> Vec<&GeographyFeature> {
        let wanted = normalize_name(county);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.places
            .iter()
            .filter(|p| p.parent.as_deref().map(normalize_name).as_deref() == Some(wanted.as_str()))
            .collect()
    }
}

fn read_layer(
    kind: LayerKind,
    collection: FeatureCollection,
    name_key: &str,
    parent_key: Option<&str>,
) -> Result<Vec<GeographyFeature>> {
    if collection.features.is_empty() {
        return Err(MapError::MalformedLayer {
            layer: kind.as_str(),
            reason: "layer has no features".to_string(),
        });
    }

    let mut unnamed = 0usize;
    let out: Vec<GeographyFeature> = collection
        .features
        .into_iter()
        .map(|feature| {
            let name = string_property(&feature, name_key).map(str::to_string);
            if name.is_none() {
                unnamed += 1;
            }
            let parent = parent_key
                .and_then(|k| string_property(&feature, k))
                .map(str::to_string);
            GeographyFeature {
                name: name.unwrap_or_default(),
                parent,
                feature,
            }
        })
        .collect();

    if unnamed > 0 {
        warn!(
            "{} layer: {unnamed} of {} features lack `{name_key}`",
            kind.as_str(),
            out.len()
        );
    }
    Ok(out)
}
