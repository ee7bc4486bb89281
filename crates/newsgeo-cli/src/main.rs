//! newsgeo-cli: terminal front end for newsgeo-core
//!
//! Loads the three geography layers, runs one search for the requested time
//! window, drills into the regions given with `--drill`, and prints what a
//! map would show at that level.
//!
//! Usage examples
//! --------------
//!
//! - Layer summary
//!   $ newsgeo catalog
//!
//! - Province shares for 2020
//!   $ newsgeo --year 2020 stats
//!
//! - County shares inside one province, first quarter only
//!   $ newsgeo --year 2020 --quarter 1 --drill 평안남도 stats
//!
//! - Article popup for a place, second page
//!   $ newsgeo --year 2020 --drill 평안남도 --drill 평성시 popup 부흥동 --page 2
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use newsgeo_core::prelude::*;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => SourceConfig::from_json_file(path)
            .with_context(|| format!("reading source config {path}"))?,
        None => match args.data_dir.as_deref() {
            Some(base) if base.starts_with("http://") || base.starts_with("https://") => {
                SourceConfig::with_base_url(base)
            }
            base => SourceConfig::with_base_dir(base.unwrap_or(".")),
        },
    };

    let mut session = MapSession::new(config.clone());
    if !session.load_geography(load_catalog(&config)) {
        if let GeographyStatus::Unavailable(reason) = session.geography_status() {
            bail!("geography unavailable: {reason}");
        }
    }

    if let Commands::Catalog = args.command {
        let catalog = session.catalog().context("catalog not loaded")?;
        let stats = catalog.stats();
        println!("Geography layers:");
        println!("  Provinces: {}", stats.provinces);
        println!("  Counties: {}", stats.counties);
        println!("  Places: {}", stats.places);
        return Ok(());
    }

    if let Commands::Legend = args.command {
        for entry in session.legend() {
            println!("{}  {}", entry.color, entry.label);
        }
        return Ok(());
    }

    match args.year {
        Some(_) => {
            let params = session.params_mut();
            params.set_year(args.year);
            params.set_quarter(args.quarter);
            params.set_month(args.month);
            params.set_week(args.week);
            session.search()?;
            info!("{} articles in window", session.filtered_articles().len());
        }
        None => warn!("no --year given; every region will show zero articles"),
    }

    for name in &args.drill {
        if !session.select_region_named(name) {
            bail!("no region matching {name} at {} level", session.level());
        }
    }

    match args.command {
        Commands::Stats => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(session.region_stats())?);
            } else if session.no_results() {
                println!("No articles for the selected period.");
            } else {
                let crumb = session.breadcrumb();
                if !crumb.is_empty() {
                    println!("{crumb}");
                }
                println!("{} statistics:", session.level());
                let plan = session.render_plan();
                for stat in session.region_stats() {
                    match plan {
                        Some(plan) => println!(
                            "  {}: {}  {}",
                            stat.name,
                            stat.label(),
                            plan.swatch(stat.count as u64)
                        ),
                        None => println!("  {}: {}", stat.name, stat.label()),
                    }
                }
            }
        }

        Commands::Plan => {
            let plan = session.render_plan().context("no render plan")?;
            println!("{}", serde_json::to_string_pretty(plan)?);
        }

        Commands::Popup { place, page } => {
            if session.level() != Level::Point {
                bail!("popups need two --drill levels (province and county)");
            }
            session.open_popup(&place);
            let page = session.popup_go_to(page_index(page)).context("popup not open")?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                println!("{} [{}]", page.place, page.pager);
                if let Some(text) = page.empty_text {
                    println!("  {text}");
                }
                for line in &page.lines {
                    match &line.link {
                        Some(url) => println!("  {} ({}) <{}>", line.title, line.date, url),
                        None => println!("  {} ({})", line.title, line.date),
                    }
                }
            }
        }

        Commands::Catalog | Commands::Legend => {}
    }

    Ok(())
}

/// 0-based popup page for a 1-based `--page` value.
fn page_index(page: i64) -> i64 {
    page.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::page_index;

    #[test]
    fn page_index_saturates() {
        assert_eq!(page_index(1), 0);
        assert_eq!(page_index(3), 2);
        assert_eq!(page_index(i64::MIN), i64::MIN);
    }
}
