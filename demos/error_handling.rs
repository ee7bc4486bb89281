//! Error handling example for newsgeo-rs
//!
//! Shows how each failure surfaces: missing layers, form validation, a
//! corpus that cannot be fetched, and responses that arrive too late.

use newsgeo_core::prelude::*;

fn main() -> Result<()> {
    println!("=== newsgeo-rs Error Handling Example ===\n");

    // Example 1: geography that cannot be loaded
    println!("--- Example 1: Loading layers from a missing directory ---");
    let config = SourceConfig::with_base_dir("/nonexistent/newsgeo");
    let mut session = MapSession::new(config);
    let loaded = load_catalog(session.config());
    match loaded {
        Ok(catalog) => println!("✓ Loaded {:?}", catalog.stats()),
        Err(e) => {
            println!("✗ {e}");
            session.load_geography(Err(e));
        }
    }
    println!("  Status: {:?}", session.geography_status());
    println!("  Drill accepted: {}\n", session.select_region_named("평안남도"));

    // Example 2: form validation
    println!("--- Example 2: Invalid search forms ---");
    let forms: [(Option<i32>, Option<u32>, Option<u32>); 4] = [
        (None, None, None),
        (Some(2020), None, Some(13)),
        (Some(2020), Some(5), None),
        (Some(2020), Some(1), Some(4)),
    ];
    for (year, quarter, month) in forms {
        let params = session.params_mut();
        params.set_year(year);
        params.set_quarter(quarter);
        params.set_month(month);
        match session.params().to_window() {
            Ok(window) => println!("  {year:?}/{quarter:?}/{month:?}: ok {window:?}"),
            Err(e) => println!("  {year:?}/{quarter:?}/{month:?}: {e}"),
        }
    }
    println!();

    // Example 3: corpus fetch failure degrades to "no results"
    println!("--- Example 3: Missing corpus ---");
    session.params_mut().set_year(Some(2020));
    session.params_mut().set_quarter(None);
    session.search()?;
    println!("  No results: {}\n", session.no_results());

    // Example 4: out-of-order responses
    println!("--- Example 4: Stale responses are discarded ---");
    let first = session.begin_search()?;
    session.params_mut().set_year(Some(2021));
    let second = session.begin_search()?;
    println!(
        "  Late response for ticket {} applied: {}",
        first.ticket,
        session.complete_search(first.ticket, Ok(Vec::new()))
    );
    println!(
        "  Current response for ticket {} applied: {}",
        second.ticket,
        session.complete_search(second.ticket, Ok(Vec::new()))
    );

    Ok(())
}
