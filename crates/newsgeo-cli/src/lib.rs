//! newsgeo-cli
//! ===========
//!
//! Command-line interface for the `newsgeo-core` drill-down map engine.
//!
//! This crate primarily provides a binary (`newsgeo-cli`). We include a small
//! library target so that docs render an overview page. See the README for
//! full usage examples.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! newsgeo-cli --help
//! newsgeo-cli --data-dir ./public catalog
//! newsgeo-cli --data-dir ./public --year 2020 stats
//! newsgeo-cli --data-dir ./public --year 2020 --quarter 1 --drill 평안남도 stats
//! newsgeo-cli --data-dir ./public --year 2020 --drill 평안남도 --drill 평성시 popup 부흥동
//! ```
//!
//! For programmatic access use the [`newsgeo-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// The binary is the deliverable; this target only carries documentation.
