//! Basic usage example for newsgeo-rs
//!
//! Loads the three geography layers and one year of articles from a data
//! directory laid out as
//!
//! ```text
//! <dir>/main_geo_data/dprk_si_do.geojson
//! <dir>/main_geo_data/dprk_si_gun.geojson
//! <dir>/main_geo_data/gazetter_with_si_gun.geojson
//! <dir>/article_geo_data/combined_data_<year>_with_coordinates_extracted.json
//! ```
//!
//! Run with `cargo run --example basic_usage -- <dir> <year>`.

use newsgeo_core::prelude::*;

fn main() -> Result<()> {
    println!("=== newsgeo-rs Basic Usage Example ===\n");

    let mut argv = std::env::args().skip(1);
    let dir = argv.next().unwrap_or_else(|| ".".to_string());
    let year: i32 = argv.next().and_then(|y| y.parse().ok()).unwrap_or(2020);

    let config = SourceConfig::with_base_dir(&dir);
    println!("Loading geography from {dir}...");
    let catalog = load_catalog(&config)?;
    let stats = catalog.stats();
    println!(
        "✓ {} provinces, {} counties, {} places\n",
        stats.provinces, stats.counties, stats.places
    );

    let mut session = MapSession::new(config);
    session.load_geography(Ok(catalog));

    println!("--- Searching {year} ---");
    session.params_mut().set_year(Some(year));
    session.search()?;
    if session.no_results() {
        println!("No articles for {year}.");
        return Ok(());
    }
    println!("{} articles in window\n", session.filtered_articles().len());

    println!("--- Top provinces ---");
    for stat in session.region_stats().iter().take(5) {
        println!("  {:<12} {}", stat.name, stat.label());
    }
    println!();

    println!("--- Legend ---");
    for entry in session.legend() {
        println!("  {} {}", entry.color, entry.label);
    }

    Ok(())
}
