#![allow(dead_code)]

use geojson::FeatureCollection;
use newsgeo_core::prelude::*;
use serde_json::{json, Value};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]]
    })
}

fn collection(features: Vec<Value>) -> FeatureCollection {
    serde_json::from_value(json!({ "type": "FeatureCollection", "features": features })).unwrap()
}

pub fn provinces() -> FeatureCollection {
    collection(vec![
        json!({ "type": "Feature", "properties": { "NL_NAME_1": "평안남도" }, "geometry": rect(125.0, 38.7, 127.0, 40.0) }),
        json!({ "type": "Feature", "properties": { "NL_NAME_1": "황해북도" }, "geometry": rect(125.5, 37.7, 127.0, 38.7) }),
    ])
}

pub fn counties() -> FeatureCollection {
    collection(vec![
        json!({ "type": "Feature", "properties": { "NL_NAME_1": "평안남도", "NL_NAME_2": "평성시" }, "geometry": rect(125.8, 39.2, 126.0, 39.4) }),
        json!({ "type": "Feature", "properties": { "NL_NAME_1": "평안 남도", "NL_NAME_2": "순천시" }, "geometry": rect(125.9, 39.4, 126.1, 39.6) }),
        json!({ "type": "Feature", "properties": { "NL_NAME_1": "황해북도", "NL_NAME_2": "개성시" }, "geometry": rect(126.4, 37.9, 126.7, 38.1) }),
    ])
}

pub fn gazetteer() -> FeatureCollection {
    collection(vec![
        json!({ "type": "Feature", "properties": { "name": "부흥동", "NL_NAME_2": "평성시" }, "geometry": { "type": "Point", "coordinates": [125.90, 39.25] } }),
        json!({ "type": "Feature", "properties": { "name": "역전동", "NL_NAME_2": "평성 시" }, "geometry": { "type": "Point", "coordinates": [125.92, 39.30] } }),
        json!({ "type": "Feature", "properties": { "name": "자산리", "NL_NAME_2": "순천시" }, "geometry": { "type": "Point", "coordinates": [126.00, 39.50] } }),
        json!({ "type": "Feature", "properties": { "name": "선죽동", "NL_NAME_2": "개성시" }, "geometry": { "type": "Point", "coordinates": [126.55, 38.00] } }),
    ])
}

pub fn catalog() -> GeographyCatalog {
    GeographyCatalog::from_layers(provinces(), counties(), gazetteer(), &PropertyKeys::default())
        .unwrap()
}

pub fn corpus_json() -> Value {
    json!([
        { "title": "A", "url": "https://news.example/a", "pubDate": "2020-01-05T00:00:00", "locations": ["평안남도", "평성"] },
        { "title": "B", "url": "https://news.example/b", "pubDate": "2020-02-10T00:00:00", "locations": ["평성시", "부흥동"] },
        { "title": "C", "url": "", "pubDate": "2020-04-20T00:00:00", "locations": ["개성", "선죽동"] },
        { "title": "D", "pubDate": "2020-06-25T00:00:00", "locations": ["순천시", "자산리", "역전동"] },
        { "title": "E", "pubDate": "2020-07-01T00:00:00", "locations": ["부흥동"] },
        { "title": null, "pubDate": "2020-08-03 12:00:00", "locations": ["평성", "부흥동", "부흥 동"] }
    ])
}

pub fn corpus() -> Vec<ArticleRecord> {
    serde_json::from_value(corpus_json()).unwrap()
}

/// Session with geography loaded and a search for `year` applied.
pub fn searched_session(year: i32, quarter: Option<u32>) -> MapSession {
    let mut session = MapSession::new(SourceConfig::default());
    assert!(session.load_geography(Ok(catalog())));
    session.params_mut().set_year(Some(year));
    session.params_mut().set_quarter(quarter);
    let req = session.begin_search().unwrap();
    assert!(session.complete_search(req.ticket, Ok(corpus())));
    session
}

pub fn stat<'a>(stats: &'a [RegionStat], name: &str) -> &'a RegionStat {
    stats
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no stat for {name}"))
}
