//! HTTP handler functions for the fleet map API.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use fleet_map_encoding::Palette;
use fleet_map_fleet_models::{FuelCategory, YearlyRecord};
use fleet_map_metrics::{Metric, resolve_metric};
use fleet_map_render::RenderRequest;
use fleet_map_server_models::{
    ApiHealth, ApiMetricOption, ApiOptions, ApiRegion, ApiYearEntry, FleetQueryParams,
    SceneQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/scene`
///
/// Runs the render pipeline for the requested metric and palette. Geometry
/// failures never surface here; the pipeline falls back to a point map or
/// bar chart instead.
pub async fn scene(
    state: web::Data<AppState>,
    params: web::Query<SceneQueryParams>,
) -> HttpResponse {
    let metric = match params.metric.as_deref() {
        None => Metric::PerCapitaRate,
        Some(raw) => match raw.parse::<Metric>() {
            Ok(metric) => metric,
            Err(e) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": e.to_string()
                }));
            }
        },
    };

    let palette = match params.palette.as_deref() {
        None => Palette::YlOrRd,
        Some(raw) => match raw.parse::<Palette>() {
            Ok(palette) => palette,
            Err(e) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": e.to_string()
                }));
            }
        },
    };

    let request = RenderRequest {
        metric,
        palette,
        source: state.source.clone(),
    };

    match state.pipeline.render(&state.table, &request).await {
        Ok(scene) => HttpResponse::Ok().json(scene),
        Err(e) => {
            log::error!("Failed to render scene: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Dataset contains no regions"
            }))
        }
    }
}

/// `GET /api/regions`
///
/// Returns the regional snapshot with derived per-capita rates.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    let rates = resolve_metric(&state.table, Metric::PerCapitaRate);

    let rows: Vec<ApiRegion> = state
        .table
        .records()
        .iter()
        .map(|record| ApiRegion {
            region_id: record.region_id.clone(),
            name: record.display_name.clone(),
            population: record.population,
            vehicle_count: record.vehicle_count,
            per_capita_rate: rates.get(&record.region_id).copied(),
            fuel_counts: record.fuel_counts.clone(),
            coordinates: record.coordinates,
        })
        .collect();

    HttpResponse::Ok().json(rows)
}

/// `GET /api/fleet`
///
/// Returns the national yearly series, optionally restricted to an
/// inclusive year range.
pub async fn fleet(
    state: web::Data<AppState>,
    params: web::Query<FleetQueryParams>,
) -> HttpResponse {
    let years = fleet_map_dataset::filter_years(&state.series, params.from, params.to);
    let entries: Vec<ApiYearEntry> = years.iter().map(year_entry).collect();

    HttpResponse::Ok().json(entries)
}

/// `GET /api/fleet/summary`
///
/// Returns the metric-card numbers: latest total, growth across the
/// series, latest hybrid and electric counts.
pub async fn fleet_summary(state: web::Data<AppState>) -> HttpResponse {
    match fleet_map_dataset::fleet_summary(&state.series) {
        Some(summary) => HttpResponse::Ok().json(summary),
        None => {
            log::error!("Fleet summary requested with an empty series");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No yearly data available"
            }))
        }
    }
}

/// `GET /api/options`
///
/// Lists the metric and palette selections the scene endpoint accepts.
pub async fn options() -> HttpResponse {
    let metrics: Vec<ApiMetricOption> = Metric::all()
        .into_iter()
        .map(|metric| ApiMetricOption {
            id: metric.to_string(),
            label: metric.label(),
        })
        .collect();

    let palettes: Vec<String> = Palette::all().iter().map(|p| p.name().to_string()).collect();

    HttpResponse::Ok().json(ApiOptions { metrics, palettes })
}

/// Builds the API view of one series year, with derived category shares.
fn year_entry(record: &YearlyRecord) -> ApiYearEntry {
    let shares: BTreeMap<FuelCategory, f64> = record
        .fuel_counts
        .keys()
        .filter_map(|category| record.share(*category).map(|share| (*category, share)))
        .collect();

    ApiYearEntry {
        year: record.year,
        total: record.total,
        fuel_counts: record.fuel_counts.clone(),
        shares,
    }
}
