mod common;

use common::*;
use newsgeo_core::prelude::*;

#[test]
fn search_without_year_is_rejected_before_fetch() {
    let mut session = MapSession::new(SourceConfig::default());
    session.load_geography(Ok(catalog()));
    let err = session.begin_search().unwrap_err();
    assert!(matches!(err, MapError::Validation(_)));
    assert!(!session.is_loading());
    assert!(session.search().is_err());
}

#[test]
fn year_outside_configured_range_is_rejected() {
    let mut config = SourceConfig::default();
    config.years = 2018..=2020;
    let mut session = MapSession::new(config);
    session.load_geography(Ok(catalog()));
    session.params_mut().set_year(Some(2021));
    assert!(matches!(session.begin_search(), Err(MapError::Validation(_))));
    session.params_mut().set_year(Some(2018));
    assert!(session.begin_search().is_ok());
}

#[test]
fn stale_response_is_discarded() {
    let mut session = MapSession::new(SourceConfig::default());
    session.load_geography(Ok(catalog()));

    session.params_mut().set_year(Some(2019));
    let old = session.begin_search().unwrap();
    session.params_mut().set_year(Some(2020));
    let new = session.begin_search().unwrap();
    assert!(session.is_loading());

    assert!(session.complete_search(new.ticket, Ok(corpus())));
    assert!(!session.is_loading());
    // The 2019 response resolves last and must not win.
    assert!(!session.complete_search(old.ticket, Ok(Vec::new())));
    assert_eq!(session.filtered_articles().len(), 6);
}

#[test]
fn failed_fetch_surfaces_no_results() {
    let mut session = searched_session(2020, None);
    assert!(!session.no_results());

    session.params_mut().set_year(Some(2021));
    let req = session.begin_search().unwrap();
    let applied = session.complete_search(req.ticket, Err(MapError::NotFound("gone".into())));
    assert!(applied);
    assert!(session.no_results());
    assert!(session.region_stats().is_empty());
    assert!(session.articles().is_none());
}

#[test]
fn search_resets_drill_stack() {
    let mut session = searched_session(2020, None);
    session.select_region_named("평안남도");
    assert_eq!(session.level(), Level::County);

    let req = session.begin_search().unwrap();
    session.complete_search(req.ticket, Ok(corpus()));
    assert_eq!(session.level(), Level::Province);
}

#[test]
fn empty_window_yields_empty_stats_at_every_level() {
    let mut session = searched_session(2020, None);
    session.params_mut().set_month(Some(12));
    let req = session.begin_search().unwrap();
    session.complete_search(req.ticket, Ok(corpus()));
    assert!(session.no_results());
    assert!(session.region_stats().is_empty());

    session.select_region_named("평안남도");
    assert!(session.region_stats().is_empty());
    session.select_region_named("평성시");
    assert!(session.region_stats().is_empty());
    assert!(session.place_index().is_empty());
}

#[test]
fn unavailable_geography_disables_interaction() {
    let mut session = MapSession::new(SourceConfig::default());
    let ok = session.load_geography(Err(MapError::MalformedLayer {
        layer: "county",
        reason: "truncated".into(),
    }));
    assert!(!ok);
    assert!(matches!(
        session.geography_status(),
        GeographyStatus::Unavailable(_)
    ));

    let feature = provinces().features[0].clone();
    assert_eq!(session.handle(MapEvent::Click(feature.clone())), EventOutcome::Ignored);
    assert!(!session.select_region(&feature));
    assert!(session.render_plan().is_none());

    // Retry succeeds.
    assert!(session.load_geography(Ok(catalog())));
    assert_eq!(session.geography_status(), &GeographyStatus::Ready);
    assert!(matches!(
        session.handle(MapEvent::Click(feature)),
        EventOutcome::Drilled { level: Level::County }
    ));
}

#[test]
fn shared_session_reads_live_state() {
    let shared = MapSession::new(SourceConfig::default()).shared();
    shared.borrow_mut().load_geography(Ok(catalog()));

    let handler_view = shared.clone();
    shared.borrow_mut().select_region_named("황해북도");
    assert_eq!(handler_view.borrow().level(), Level::County);
}
