//! Drill-down example for newsgeo-rs
//!
//! Builds a tiny in-memory map, searches one quarter, drills from a province
//! to a county, opens a place popup and pages through it. A recording
//! renderer prints the calls a real map widget would receive.

use geojson::FeatureCollection;
use newsgeo_core::prelude::*;
use newsgeo_core::render::{LayerSpec, ViewportFit};
use serde_json::json;

struct PrintRenderer {
    sources: Vec<String>,
}

impl MapRenderer for PrintRenderer {
    fn has_source(&self, id: &str) -> bool {
        self.sources.iter().any(|s| s == id)
    }

    fn remove_layer(&mut self, id: &str) {
        println!("    removeLayer({id})");
    }

    fn remove_source(&mut self, id: &str) {
        println!("    removeSource({id})");
        self.sources.retain(|s| s != id);
    }

    fn add_source(&mut self, id: &str, data: &FeatureCollection) {
        println!("    addSource({id}, {} features)", data.features.len());
        self.sources.push(id.to_string());
    }

    fn add_layer(&mut self, layer: &LayerSpec) {
        println!("    addLayer({}, visible={})", layer.id, layer.visible);
    }

    fn fit_bounds(&mut self, fit: &ViewportFit) {
        println!("    fitBounds({:?}, padding={})", fit.bbox, fit.padding);
    }
}

fn square(x: f64, y: f64) -> serde_json::Value {
    json!({ "type": "Polygon", "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]] })
}

fn sample_catalog() -> Result<GeographyCatalog> {
    let provinces = serde_json::from_value(json!({ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "NL_NAME_1": "평안남도" }, "geometry": square(125.0, 39.0) },
        { "type": "Feature", "properties": { "NL_NAME_1": "강원도" }, "geometry": square(127.0, 38.5) }
    ]}))?;
    let counties = serde_json::from_value(json!({ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "NL_NAME_1": "평안남도", "NL_NAME_2": "평성시" }, "geometry": square(125.5, 39.2) },
        { "type": "Feature", "properties": { "NL_NAME_1": "강원도", "NL_NAME_2": "원산시" }, "geometry": square(127.3, 39.0) }
    ]}))?;
    let places = serde_json::from_value(json!({ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "name": "부흥동", "NL_NAME_2": "평성시" }, "geometry": { "type": "Point", "coordinates": [125.9, 39.25] } },
        { "type": "Feature", "properties": { "name": "역전동", "NL_NAME_2": "평성시" }, "geometry": { "type": "Point", "coordinates": [125.8, 39.3] } }
    ]}))?;
    GeographyCatalog::from_layers(provinces, counties, places, &PropertyKeys::default())
}

fn sample_corpus() -> Result<Vec<ArticleRecord>> {
    let mut articles = Vec::new();
    for i in 0..7 {
        articles.push(json!({
            "title": format!("평성 시장 소식 {}", i + 1),
            "url": format!("https://news.example/{i}"),
            "pubDate": format!("2020-0{}-1{}T08:00:00", 1 + i % 3, i),
            "locations": ["평안남도", "평성시", "부흥동"]
        }));
    }
    articles.push(json!({ "title": "원산 항구", "pubDate": "2020-02-02T08:00:00", "locations": ["원산"] }));
    Ok(serde_json::from_value(serde_json::Value::Array(articles))?)
}

fn main() -> Result<()> {
    println!("=== newsgeo-rs Drill-down Example ===\n");

    let mut session = MapSession::new(SourceConfig::default());
    session.load_geography(sample_catalog());

    // The corpus is in memory, so drive the request lifecycle by hand.
    session.params_mut().set_year(Some(2020));
    session.params_mut().set_quarter(Some(1));
    let request = session.begin_search()?;
    session.complete_search(request.ticket, sample_corpus());

    let mut map = PrintRenderer { sources: Vec::new() };
    for target in ["평안남도", "평성시"] {
        println!("--- {} level ---", session.level());
        for stat in session.region_stats() {
            println!("  {:<8} {}", stat.name, stat.label());
        }
        if let Some(plan) = session.render_plan() {
            apply_plan(&mut map, plan);
        }
        println!("  drilling into {target}\n");
        session.select_region_named(target);
    }

    println!("--- {} level ({}) ---", session.level(), session.breadcrumb());
    for stat in session.region_stats() {
        println!("  {:<8} {}", stat.name, stat.label());
    }
    if let Some(plan) = session.render_plan() {
        apply_plan(&mut map, plan);
    }

    println!("\n--- Popup ---");
    let mut page = session.open_popup("부흥동");
    loop {
        println!("  {} [{}]", page.place, page.pager);
        for line in &page.lines {
            println!("    {} ({})", line.title, line.date);
        }
        if !page.next_enabled {
            break;
        }
        match session.popup_next() {
            Some(next) => page = next,
            None => break,
        }
    }

    session.back();
    println!("\nBack at {} level: {}", session.level(), session.breadcrumb());
    Ok(())
}
