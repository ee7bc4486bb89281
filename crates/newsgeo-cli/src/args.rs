use clap::{Parser, Subcommand};

/// CLI arguments for newsgeo-cli
#[derive(Debug, Parser)]
#[command(
    name = "newsgeo",
    version,
    about = "CLI for exploring regional news-mention statistics on a province/county/place map"
)]
pub struct CliArgs {
    /// Directory or http(s) base URL holding main_geo_data/ and article_geo_data/
    /// (default: current directory; URLs need the `fetch` feature)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Optional JSON source config; overrides --data-dir
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Publication year to search (required for article statistics)
    #[arg(short = 'y', long = "year", global = true)]
    pub year: Option<i32>,

    /// Quarter 1-4
    #[arg(short = 'q', long = "quarter", global = true)]
    pub quarter: Option<u32>,

    /// Month 1-12 (ignored when --quarter is set)
    #[arg(short = 'm', long = "month", global = true)]
    pub month: Option<u32>,

    /// Custom week of month 1-4: days 1-8, 9-15, 16-22, 23-31 (needs --month)
    #[arg(short = 'w', long = "week", global = true)]
    pub week: Option<u32>,

    /// Region to drill into; repeat for province then county (e.g. --drill 평안남도 --drill 평성시)
    #[arg(long = "drill", global = true)]
    pub drill: Vec<String>,

    /// Emit JSON instead of text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded geography layers
    Catalog,

    /// Article counts and shares for the regions at the current level
    Stats,

    /// Print the renderer plan (source, layers, viewport) as JSON
    Plan,

    /// Show the five-bucket color legend
    Legend,

    /// Show one page of articles mentioning a place (requires two --drill levels)
    Popup {
        /// Place name as it appears in the gazetteer
        place: String,

        /// Page number, 1-based
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: i64,
    },
}
