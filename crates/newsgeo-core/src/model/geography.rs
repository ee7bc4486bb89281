// crates/newsgeo-core/src/model/geography.rs
use geojson::{Feature, Geometry, JsonValue, Value};
use serde::{Deserialize, Serialize};

/// Which of the three static layers a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Province,
    County,
    Gazetteer,
}

impl LayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Province => "province",
            LayerKind::County => "county",
            LayerKind::Gazetteer => "gazetteer",
        }
    }
}

/// A region or place from one of the catalog layers.
///
/// `name` is the identity field for the layer (province name, county name or
/// place name) and `parent` the owning province/county, both read through
/// [`PropertyKeys`](crate::loader::PropertyKeys) at load time. The source
/// GeoJSON feature is kept so it can be handed back to the renderer.
#[derive(Clone, Debug)]
pub struct GeographyFeature {
    pub name: String,
    pub parent: Option<String>,
    pub feature: Feature,
}

impl GeographyFeature {
    pub fn geometry(&self) -> Option<&Geometry> {
        self.feature.geometry.as_ref()
    }

    /// Copy of the underlying feature with `article_count` set.
    pub fn with_article_count(&self, count: usize) -> Feature {
        let mut f = self.feature.clone();
        f.set_property(ARTICLE_COUNT, JsonValue::from(count as u64));
        f
    }
}

/// Property carrying the per-feature mention count in rendered collections.
pub const ARTICLE_COUNT: &str = "article_count";

/// Reads a string property, treating non-strings as absent.
pub fn string_property<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.property(key).and_then(JsonValue::as_str)
}

/// Reads `article_count` from a rendered feature (0 when absent).
pub fn article_count(feature: &Feature) -> u64 {
    feature
        .property(ARTICLE_COUNT)
        .and_then(JsonValue::as_u64)
        .unwrap_or(0)
}

/// Axis-aligned bounding box `[min_x, min_y, max_x, max_y]` in lon/lat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    fn point(x: f64, y: f64) -> Self {
        BBox { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    fn extend_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn union(self, other: BBox) -> BBox {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Bounding box of a geometry; `None` if it has no coordinates.
    pub fn of_geometry(geometry: &Geometry) -> Option<BBox> {
        let mut acc: Option<BBox> = None;
        visit_positions(&geometry.value, &mut |p: &[f64]| {
            if p.len() < 2 {
                return;
            }
            match acc.as_mut() {
                Some(b) => b.extend_point(p[0], p[1]),
                None => acc = Some(BBox::point(p[0], p[1])),
            }
        });
        acc
    }

    /// Bounding box over every feature that has geometry.
    pub fn of_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Option<BBox> {
        features
            .into_iter()
            .filter_map(|f| f.geometry.as_ref())
            .filter_map(BBox::of_geometry)
            .reduce(BBox::union)
    }
}

fn visit_positions(value: &Value, f: &mut dyn FnMut(&[f64])) {
    match value {
        Value::Point(p) => f(p),
        Value::MultiPoint(ps) | Value::LineString(ps) => ps.iter().for_each(|p| f(p)),
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            lines.iter().flatten().for_each(|p| f(p))
        }
        Value::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(|p| f(p)),
        Value::GeometryCollection(geoms) => {
            for g in geoms {
                visit_positions(&g.value, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_covers_multipolygon() {
        let g = Geometry::new(Value::MultiPolygon(vec![
            vec![vec![vec![125.0, 38.0], vec![126.0, 38.5], vec![125.5, 39.0], vec![125.0, 38.0]]],
            vec![vec![vec![127.0, 40.0], vec![127.5, 40.2], vec![127.0, 40.0]]],
        ]));
        let b = BBox::of_geometry(&g).unwrap();
        assert_eq!(b.to_array(), [125.0, 38.0, 127.5, 40.2]);
    }

    #[test]
    fn empty_geometry_has_no_bbox() {
        let g = Geometry::new(Value::MultiPoint(vec![]));
        assert!(BBox::of_geometry(&g).is_none());
    }
}
