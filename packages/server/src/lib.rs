#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the fleet map application.
//!
//! Serves the REST API behind the statistics dashboard: the rendered map
//! scene, the regional table, the national yearly series, and the metric
//! and palette options for the sidebar. All statistics are embedded in the
//! binary; only boundary geometry is fetched over HTTP, through the render
//! pipeline's session cache.

mod handlers;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use fleet_map_fleet_models::{RegionTable, YearlyRecord};
use fleet_map_geometry::{
    DEFAULT_GEOMETRY_URL, DEFAULT_JOIN_PROPERTY, DEFAULT_TIMEOUT, GeometryCache, GeometrySource,
    GeometrySourceRef,
};
use fleet_map_render::RenderPipeline;

/// Shared application state.
pub struct AppState {
    /// Validated regional snapshot served by every endpoint.
    pub table: Arc<RegionTable>,
    /// National yearly series for the fleet endpoints.
    pub series: Arc<Vec<YearlyRecord>>,
    /// Geometry endpoint the scene handler renders against.
    pub source: GeometrySourceRef,
    /// Render pipeline; owns the metric memo and the geometry cache handle.
    pub pipeline: Arc<RenderPipeline>,
}

/// Starts the fleet map API server.
///
/// Builds the embedded region table and national series, wires the render
/// pipeline to the configured geometry source, and starts the Actix-Web
/// HTTP server. This is a regular async function; the caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the geometry HTTP client cannot be constructed.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Building embedded dataset...");
    let table = Arc::new(fleet_map_dataset::region_table());
    let series = Arc::new(fleet_map_dataset::national_series());

    let source = geometry_source_from_env();
    log::info!(
        "Geometry source: {} (join property: {})",
        source.url,
        source.join_property
    );

    let cache = Arc::new(GeometryCache::new());
    let fetcher = GeometrySource::with_timeout(geometry_timeout_from_env(), cache)
        .expect("Failed to build geometry HTTP client");

    let state = web::Data::new(AppState {
        table,
        series,
        source,
        pipeline: Arc::new(RenderPipeline::new(Arc::new(fetcher))),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/scene", web::get().to(handlers::scene))
                    .route("/regions", web::get().to(handlers::regions))
                    .route("/fleet", web::get().to(handlers::fleet))
                    .route("/fleet/summary", web::get().to(handlers::fleet_summary))
                    .route("/options", web::get().to(handlers::options)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

/// Geometry endpoint configuration from `GEOMETRY_URL` and
/// `GEOMETRY_JOIN_PROPERTY`, falling back to the bundled defaults.
fn geometry_source_from_env() -> GeometrySourceRef {
    let url = std::env::var("GEOMETRY_URL").unwrap_or_else(|_| DEFAULT_GEOMETRY_URL.to_string());
    let join_property = std::env::var("GEOMETRY_JOIN_PROPERTY")
        .unwrap_or_else(|_| DEFAULT_JOIN_PROPERTY.to_string());
    GeometrySourceRef::new(url, join_property)
}

/// Per-fetch timeout from `GEOMETRY_TIMEOUT_SECS`.
fn geometry_timeout_from_env() -> Duration {
    std::env::var("GEOMETRY_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
}
