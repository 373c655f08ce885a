#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Embedded reference dataset: Kazakhstan passenger car statistics.
//!
//! Two tables back the dashboards: a 17-region snapshot for the latest
//! survey year and the 2011-2023 national fuel mix series. Both are
//! compiled in; the process never reads them from disk or the network.

mod regions;
mod series;

pub use regions::{SNAPSHOT_YEAR, region_table};
pub use series::{FIRST_YEAR, FleetSummary, LAST_YEAR, filter_years, fleet_summary, national_series};
