// crates/newsgeo-core/src/render.rs

//! # Map Render Adapter
//!
//! Translates an annotated feature collection and the current level into a
//! [`RenderPlan`]: one GeoJSON source, three layers with paint rules and
//! visibility, and optional viewport framing. Paint rules serialize to
//! MapLibre style expressions.
//!
//! A plan always replaces the previous one as a whole; [`apply_plan`] removes
//! every layer and the source before adding anything back.

use crate::common::{LEGEND_LABELS, PALETTE};
use crate::model::geography::article_count;
use crate::model::{BBox, Level};
use geojson::{Feature, FeatureCollection, Geometry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SOURCE_ID: &str = "geojson-data";
pub const FILL_LAYER: &str = "fill-layer";
pub const OUTLINE_LAYER: &str = "outline-layer";
pub const POINT_LAYER: &str = "point-layer";

/// Radius of a mentioned point outside the point level.
pub const DEFAULT_POINT_RADIUS: f64 = 5.0;
/// Radius range used at point level.
pub const POINT_RADIUS_RANGE: (f64, f64) = (5.0, 20.0);
pub const FIT_PADDING: u32 = 50;
pub const FIT_DURATION_MS: u32 = 1000;

/// Fill color of regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorRule {
    /// Same color everywhere (max count 0).
    Uniform { color: String },
    /// Linear interpolation on `article_count` over `(count, color)` stops.
    Interpolate { stops: Vec<(f64, String)> },
}

impl ColorRule {
    /// Five-stop ramp over `[0, .2, .4, .6, 1] * max`.
    pub fn for_max(max: u64) -> Self {
        if max == 0 {
            return ColorRule::Uniform {
                color: PALETTE[0].to_string(),
            };
        }
        let max = max as f64;
        let stops = [0.0, 0.2, 0.4, 0.6, 1.0]
            .iter()
            .zip(PALETTE)
            .map(|(f, c)| (max * f, c.to_string()))
            .collect();
        ColorRule::Interpolate { stops }
    }

    pub fn to_expression(&self) -> Value {
        match self {
            ColorRule::Uniform { color } => json!(color),
            ColorRule::Interpolate { stops } => {
                let mut expr = vec![
                    json!("interpolate"),
                    json!(["linear"]),
                    json!(["get", "article_count"]),
                ];
                for (at, color) in stops {
                    expr.push(json!(at));
                    expr.push(json!(color));
                }
                Value::Array(expr)
            }
        }
    }

    /// Color a feature with `count` mentions receives (nearest lower stop).
    pub fn bucket_color(&self, count: u64) -> &str {
        match self {
            ColorRule::Uniform { color } => color.as_str(),
            ColorRule::Interpolate { stops } => stops
                .iter()
                .rev()
                .find(|(at, _)| count as f64 >= *at)
                .map(|(_, c)| c.as_str())
                .unwrap_or(PALETTE[0]),
        }
    }
}

/// Circle radius of gazetteer points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusRule {
    /// 0 below one mention, `radius` otherwise.
    Step { radius: f64 },
    /// Linear from `min` at 0 mentions to `max` at `max_count`.
    Interpolate { max_count: u64, min: f64, max: f64 },
}

impl RadiusRule {
    pub fn for_level(level: Level, max_count: u64) -> Self {
        if level == Level::Point && max_count > 0 {
            RadiusRule::Interpolate {
                max_count,
                min: POINT_RADIUS_RANGE.0,
                max: POINT_RADIUS_RANGE.1,
            }
        } else {
            RadiusRule::Step {
                radius: DEFAULT_POINT_RADIUS,
            }
        }
    }

    pub fn radius(&self, count: u64) -> f64 {
        match *self {
            RadiusRule::Step { radius } => {
                if count < 1 {
                    0.0
                } else {
                    radius
                }
            }
            RadiusRule::Interpolate {
                max_count,
                min,
                max,
            } => {
                let t = (count.min(max_count) as f64) / max_count as f64;
                min + (max - min) * t
            }
        }
    }

    pub fn to_expression(&self) -> Value {
        match self {
            RadiusRule::Step { radius } => {
                json!(["case", ["<", ["get", "article_count"], 1], 0, radius])
            }
            RadiusRule::Interpolate {
                max_count,
                min,
                max,
            } => json!([
                "interpolate",
                ["linear"],
                ["get", "article_count"],
                0,
                min,
                max_count,
                max
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Fill,
    Line,
    Circle,
}

/// One renderer layer bound to [`SOURCE_ID`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub source: &'static str,
    pub visible: bool,
    pub paint: Value,
}

impl LayerSpec {
    /// Layer object in MapLibre style-spec shape.
    pub fn to_style(&self) -> Value {
        json!({
            "id": self.id,
            "type": self.layer_type,
            "source": self.source,
            "layout": { "visibility": if self.visible { "visible" } else { "none" } },
            "paint": self.paint,
        })
    }
}

/// Animated fit of the viewport to a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFit {
    pub bbox: [f64; 4],
    pub padding: u32,
    pub duration_ms: u32,
}

impl ViewportFit {
    fn to(bbox: BBox) -> Self {
        ViewportFit {
            bbox: bbox.to_array(),
            padding: FIT_PADDING,
            duration_ms: FIT_DURATION_MS,
        }
    }
}

/// Everything the renderer needs to draw one state of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub level: Level,
    pub source_id: &'static str,
    pub collection: FeatureCollection,
    pub fill_color: ColorRule,
    pub point_radius: RadiusRule,
    pub layers: Vec<LayerSpec>,
    pub fit: Option<ViewportFit>,
}

impl RenderPlan {
    /// Builds the plan for a collection whose features carry `article_count`.
    ///
    /// `bounds` is the geometry of the parent region that was selected to
    /// reach `level`; without it the viewport fits the collection itself
    /// (or stays put if the collection is empty).
    pub fn build(collection: FeatureCollection, level: Level, bounds: Option<&Geometry>) -> Self {
        let max = collection.features.iter().map(article_count).max().unwrap_or(0);
        let fill_color = ColorRule::for_max(if level.is_choropleth() { max } else { 0 });
        let point_radius = RadiusRule::for_level(level, max);

        let choropleth = level.is_choropleth();
        let layers = vec![
            LayerSpec {
                id: FILL_LAYER,
                layer_type: LayerType::Fill,
                source: SOURCE_ID,
                visible: choropleth,
                paint: json!({ "fill-color": fill_color.to_expression(), "fill-opacity": 0.7 }),
            },
            LayerSpec {
                id: OUTLINE_LAYER,
                layer_type: LayerType::Line,
                source: SOURCE_ID,
                visible: choropleth,
                paint: json!({ "line-color": "rgba(255, 255, 255, 0.5)", "line-width": 1 }),
            },
            LayerSpec {
                id: POINT_LAYER,
                layer_type: LayerType::Circle,
                source: SOURCE_ID,
                visible: !choropleth,
                paint: json!({
                    "circle-radius": point_radius.to_expression(),
                    "circle-color": "#2e0efcf2",
                    "circle-stroke-color": "#fff",
                    "circle-stroke-width": 1,
                    "circle-opacity": 0.8,
                }),
            },
        ];

        let fit = match bounds {
            Some(g) => BBox::of_geometry(g),
            None => BBox::of_features(&collection.features),
        }
        .map(ViewportFit::to);

        RenderPlan {
            level,
            source_id: SOURCE_ID,
            collection,
            fill_color,
            point_radius,
            layers,
            fit,
        }
    }

    /// How a feature with `count` mentions is drawn: its fill color at the
    /// choropleth levels, its circle radius at point level.
    pub fn swatch(&self, count: u64) -> String {
        if self.level.is_choropleth() {
            self.fill_color.bucket_color(count).to_string()
        } else {
            format!("r={:.1}", self.point_radius.radius(count))
        }
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().filter(|l| l.visible)
    }

    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }
}

/// One legend bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// The five-bucket color legend.
pub fn legend() -> [LegendEntry; 5] {
    std::array::from_fn(|i| LegendEntry {
        color: PALETTE[i],
        label: LEGEND_LABELS[i],
    })
}

/// Imperative surface of a map renderer (MapLibre, a native widget, a test
/// recorder...).
pub trait MapRenderer {
    fn has_source(&self, id: &str) -> bool;
    fn remove_layer(&mut self, id: &str);
    fn remove_source(&mut self, id: &str);
    fn add_source(&mut self, id: &str, data: &FeatureCollection);
    fn add_layer(&mut self, layer: &LayerSpec);
    fn fit_bounds(&mut self, fit: &ViewportFit);
}

/// Replaces whatever the renderer shows with `plan`.
///
/// All previous layers and the source are removed before the new ones are
/// added, so no mix of old and new layers is ever drawn.
pub fn apply_plan<R: MapRenderer + ?Sized>(renderer: &mut R, plan: &RenderPlan) {
    if renderer.has_source(plan.source_id) {
        for id in [FILL_LAYER, OUTLINE_LAYER, POINT_LAYER] {
            renderer.remove_layer(id);
        }
        renderer.remove_source(plan.source_id);
    }
    renderer.add_source(plan.source_id, &plan.collection);
    for layer in &plan.layers {
        renderer.add_layer(layer);
    }
    if let Some(fit) = &plan.fit {
        renderer.fit_bounds(fit);
    }
}

/// Interaction reported back by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pointer over a feature of the fill (or point) layer.
    Hover(Feature),
    /// Pointer left the features.
    Leave,
    /// Click on a region (province/county) or a point (point level).
    Click(Feature),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geography::ARTICLE_COUNT;
    use geojson::{JsonObject, JsonValue, Value as GeoValue};

    fn point(x: f64, y: f64, count: u64) -> Feature {
        let mut props = JsonObject::new();
        props.insert(ARTICLE_COUNT.to_string(), JsonValue::from(count));
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoValue::Point(vec![x, y]))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        }
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    #[test]
    fn fill_ramp_uses_five_stops() {
        let rule = ColorRule::for_max(50);
        let ColorRule::Interpolate { stops } = &rule else {
            panic!("expected interpolation");
        };
        let expected = [0.0, 10.0, 20.0, 30.0, 50.0];
        assert_eq!(stops.len(), expected.len());
        for ((at, _), want) in stops.iter().zip(expected) {
            assert!((at - want).abs() < 1e-9, "{at} != {want}");
        }
        assert_eq!(rule.bucket_color(0), PALETTE[0]);
        assert_eq!(rule.bucket_color(25), PALETTE[2]);
        assert_eq!(rule.bucket_color(50), PALETTE[4]);
        assert_eq!(rule.to_expression()[0], json!("interpolate"));
    }

    #[test]
    fn zero_max_is_uniform_lowest_color() {
        assert_eq!(
            ColorRule::for_max(0),
            ColorRule::Uniform {
                color: PALETTE[0].into()
            }
        );
    }

    #[test]
    fn radius_step_and_interpolation() {
        let step = RadiusRule::for_level(Level::County, 9);
        assert_eq!(step.radius(0), 0.0);
        assert_eq!(step.radius(3), DEFAULT_POINT_RADIUS);

        let lerp = RadiusRule::for_level(Level::Point, 4);
        assert_eq!(lerp.radius(0), 5.0);
        assert_eq!(lerp.radius(2), 12.5);
        assert_eq!(lerp.radius(4), 20.0);

        // No mentions at all: keep the step rule.
        assert!(matches!(
            RadiusRule::for_level(Level::Point, 0),
            RadiusRule::Step { .. }
        ));
    }

    #[test]
    fn swatch_follows_level_rule() {
        let counts = vec![point(1.0, 1.0, 0), point(2.0, 2.0, 50)];
        let county = RenderPlan::build(collection(counts.clone()), Level::County, None);
        assert_eq!(county.swatch(0), PALETTE[0]);
        assert_eq!(county.swatch(50), PALETTE[4]);

        let places = RenderPlan::build(collection(counts), Level::Point, None);
        assert_eq!(places.swatch(0), "r=5.0");
        assert_eq!(places.swatch(50), "r=20.0");
    }

    #[test]
    fn exactly_one_layer_group_visible() {
        for level in [Level::Province, Level::County, Level::Point] {
            let plan = RenderPlan::build(collection(vec![point(1.0, 1.0, 1)]), level, None);
            let fill = plan.layer(FILL_LAYER).unwrap().visible;
            let outline = plan.layer(OUTLINE_LAYER).unwrap().visible;
            let points = plan.layer(POINT_LAYER).unwrap().visible;
            assert_eq!(fill, outline);
            assert_ne!(fill, points);
            assert_eq!(points, level == Level::Point);
        }
    }

    #[test]
    fn viewport_prefers_bounds_feature() {
        let features = vec![point(125.0, 38.0, 1), point(126.0, 39.0, 3)];
        let plan = RenderPlan::build(collection(features.clone()), Level::County, None);
        assert_eq!(plan.fit.unwrap().bbox, [125.0, 38.0, 126.0, 39.0]);

        let parent = Geometry::new(GeoValue::Polygon(vec![vec![
            vec![124.0, 37.0],
            vec![128.0, 37.0],
            vec![128.0, 41.0],
            vec![124.0, 37.0],
        ]]));
        let plan = RenderPlan::build(collection(features), Level::County, Some(&parent));
        let fit = plan.fit.unwrap();
        assert_eq!(fit.bbox, [124.0, 37.0, 128.0, 41.0]);
        assert_eq!((fit.padding, fit.duration_ms), (FIT_PADDING, FIT_DURATION_MS));

        let empty = RenderPlan::build(collection(vec![]), Level::Point, None);
        assert!(empty.fit.is_none());
    }

    #[derive(Default)]
    struct Recorder {
        source: bool,
        ops: Vec<String>,
    }

    impl MapRenderer for Recorder {
        fn has_source(&self, _id: &str) -> bool {
            self.source
        }
        fn remove_layer(&mut self, id: &str) {
            self.ops.push(format!("-{id}"));
        }
        fn remove_source(&mut self, id: &str) {
            self.source = false;
            self.ops.push(format!("-{id}"));
        }
        fn add_source(&mut self, id: &str, _data: &FeatureCollection) {
            self.source = true;
            self.ops.push(format!("+{id}"));
        }
        fn add_layer(&mut self, layer: &LayerSpec) {
            self.ops.push(format!("+{}", layer.id));
        }
        fn fit_bounds(&mut self, _fit: &ViewportFit) {
            self.ops.push("fit".into());
        }
    }

    #[test]
    fn apply_removes_everything_before_adding() {
        let mut r = Recorder::default();
        let plan = RenderPlan::build(collection(vec![point(1.0, 2.0, 1)]), Level::Province, None);
        apply_plan(&mut r, &plan);
        assert_eq!(r.ops.first().map(String::as_str), Some("+geojson-data"));
        let mark = r.ops.len();
        apply_plan(&mut r, &plan);

        let second = &r.ops[mark..];
        let first_add = second.iter().position(|op| op.starts_with('+')).unwrap();
        assert!(second[..first_add].iter().all(|op| op.starts_with('-')));
        assert_eq!(second[..first_add].len(), 4);
        assert_eq!(second.last().map(String::as_str), Some("fit"));
    }

    #[test]
    fn legend_matches_palette() {
        let l = legend();
        assert_eq!(l[0].color, PALETTE[0]);
        assert_eq!(l[4].label, "very high");
    }
}
