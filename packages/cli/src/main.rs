#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the fleet map toolkit.
//!
//! Renders dashboard scenes, prints the embedded dataset, and starts the
//! API server. Scene output is the same JSON the `/api/scene` endpoint
//! returns, so the full fallback chain can be exercised from a terminal.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use fleet_map_encoding::Palette;
use fleet_map_geometry::{
    DEFAULT_GEOMETRY_URL, DEFAULT_JOIN_PROPERTY, DEFAULT_TIMEOUT, GeometryCache, GeometrySource,
    GeometrySourceRef,
};
use fleet_map_metrics::{Metric, resolve_metric};
use fleet_map_render::{RenderPipeline, RenderRequest};

#[derive(Parser)]
#[command(name = "fleet_map_cli", about = "Vehicle fleet statistics toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a dashboard scene and print it as JSON
    Scene {
        /// Metric id (e.g. `per-capita-rate`, `fuel-count:electric`)
        #[arg(long, default_value = "per-capita-rate")]
        metric: String,
        /// Palette name for the choropleth scale
        #[arg(long, default_value = "ylorrd")]
        palette: String,
        /// Override the boundary geometry endpoint
        #[arg(long)]
        geometry_url: Option<String>,
        /// Feature property holding the join key
        #[arg(long)]
        join_property: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the national fleet summary
    Summary,
    /// Print the region table with per-capita rates
    Regions,
    /// Start the API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scene {
            metric,
            palette,
            geometry_url,
            join_property,
            pretty,
        } => {
            let metric: Metric = metric.parse()?;
            let palette: Palette = palette.parse()?;

            let source = GeometrySourceRef::new(
                geometry_url.unwrap_or_else(|| DEFAULT_GEOMETRY_URL.to_string()),
                join_property.unwrap_or_else(|| DEFAULT_JOIN_PROPERTY.to_string()),
            );

            let cache = Arc::new(GeometryCache::new());
            let fetcher = GeometrySource::with_timeout(DEFAULT_TIMEOUT, cache)?;
            let pipeline = RenderPipeline::new(Arc::new(fetcher));

            let table = fleet_map_dataset::region_table();
            let request = RenderRequest {
                metric,
                palette,
                source,
            };
            let scene = pipeline.render(&table, &request).await?;

            if pretty {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                println!("{}", serde_json::to_string(&scene)?);
            }
        }
        Commands::Summary => {
            let series = fleet_map_dataset::national_series();
            let summary =
                fleet_map_dataset::fleet_summary(&series).ok_or("no yearly data available")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Regions => {
            let table = fleet_map_dataset::region_table();
            let rates = resolve_metric(&table, Metric::PerCapitaRate);

            println!(
                "{:<8} {:<22} {:>12} {:>12} {:>10}",
                "ID", "NAME", "POPULATION", "VEHICLES", "PER 1000"
            );
            println!("{}", "-".repeat(68));
            for record in table.records() {
                let rate = rates
                    .get(&record.region_id)
                    .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
                println!(
                    "{:<8} {:<22} {:>12} {:>12} {:>10}",
                    record.region_id,
                    record.display_name,
                    record.population,
                    record.vehicle_count,
                    rate
                );
            }
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so run it in a blocking
            // task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(fleet_map_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}
