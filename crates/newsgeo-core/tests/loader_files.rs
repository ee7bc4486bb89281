mod common;

use common::*;
use newsgeo_core::loader::{load_layer, open_stream};
use newsgeo_core::model::LayerKind;
use newsgeo_core::prelude::*;
use std::fs;
use std::path::Path;

fn write_layers(base: &Path) {
    let dir = base.join("main_geo_data");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        base.join(SourceConfig::PROVINCE_FILE),
        serde_json::to_string(&provinces()).unwrap(),
    )
    .unwrap();
    fs::write(
        base.join(SourceConfig::COUNTY_FILE),
        serde_json::to_string(&counties()).unwrap(),
    )
    .unwrap();
    fs::write(
        base.join(SourceConfig::GAZETTEER_FILE),
        serde_json::to_string(&gazetteer()).unwrap(),
    )
    .unwrap();
}

fn write_corpus(base: &Path, year: i32) {
    let cfg = SourceConfig::with_base_dir(base);
    let DataSource::Path(path) = cfg.corpus_source(year) else {
        panic!("expected a filesystem source");
    };
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, corpus_json().to_string()).unwrap();
}

#[test]
fn loads_catalog_from_standard_layout() {
    let tmp = tempfile::tempdir().unwrap();
    write_layers(tmp.path());

    let catalog = load_catalog(&SourceConfig::with_base_dir(tmp.path())).unwrap();
    assert_eq!(
        catalog.stats(),
        CatalogStats {
            provinces: 2,
            counties: 3,
            places: 4
        }
    );
    assert_eq!(catalog.counties_in("평안남도").len(), 2);
    assert_eq!(catalog.places_in("평성시").len(), 2);
}

#[test]
fn missing_layer_fails_the_join() {
    let tmp = tempfile::tempdir().unwrap();
    write_layers(tmp.path());
    fs::remove_file(tmp.path().join(SourceConfig::GAZETTEER_FILE)).unwrap();

    let err = load_catalog(&SourceConfig::with_base_dir(tmp.path())).unwrap_err();
    assert!(matches!(err, MapError::NotFound(_)));
}

#[test]
fn non_collection_is_malformed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.geojson");
    fs::write(&path, r#"{"type":"Point","coordinates":[1,2]}"#).unwrap();

    let err = load_layer(&DataSource::Path(path), LayerKind::County).unwrap_err();
    assert!(matches!(err, MapError::MalformedLayer { layer: "county", .. }));
}

#[test]
fn empty_layer_is_malformed() {
    let empty: geojson::FeatureCollection =
        serde_json::from_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
    let err = GeographyCatalog::from_layers(empty, counties(), gazetteer(), &PropertyKeys::default())
        .unwrap_err();
    assert!(matches!(err, MapError::MalformedLayer { layer: "province", .. }));
}

#[test]
fn session_search_reads_corpus_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_layers(tmp.path());
    write_corpus(tmp.path(), 2020);

    let config = SourceConfig::with_base_dir(tmp.path());
    let mut session = MapSession::new(config.clone());
    session.load_geography(load_catalog(&config));
    session.params_mut().set_year(Some(2020));
    session.params_mut().set_month(Some(2));
    session.search().unwrap();

    assert_eq!(session.filtered_articles().len(), 1);
    assert!(!session.no_results());

    // A year without a corpus file degrades to "no results".
    session.params_mut().set_year(Some(2016));
    session.search().unwrap();
    assert!(session.no_results());
}

#[test]
fn config_round_trips_through_json_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = SourceConfig::with_base_dir("/data");
    config.property_keys.place = "place_name".into();
    let path = tmp.path().join("newsgeo.json");
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = SourceConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[cfg(feature = "compact")]
#[test]
fn gzip_sources_are_decompressed() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("provinces.geojson.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(serde_json::to_string(&provinces()).unwrap().as_bytes())
        .unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let source = DataSource::Path(path);
    let mut text = String::new();
    open_stream(&source).unwrap().read_to_string(&mut text).unwrap();
    assert!(text.contains("평안남도"));

    let layer = load_layer(&source, LayerKind::Province).unwrap();
    assert_eq!(layer.features.len(), 2);
}
