#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the fleet map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain row types to allow independent evolution of the API
//! contract.

use std::collections::BTreeMap;

use fleet_map_fleet_models::{Coordinates, FuelCategory};
use serde::{Deserialize, Serialize};

/// A region statistics row as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegion {
    /// Stable region identifier.
    pub region_id: String,
    /// Human-readable region name.
    pub name: String,
    /// Resident population.
    pub population: u64,
    /// Total registered passenger cars.
    pub vehicle_count: u64,
    /// Cars per 1,000 residents. Absent when the population is zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_capita_rate: Option<f64>,
    /// Known per-category counts. Sparse: unsurveyed categories are absent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fuel_counts: BTreeMap<FuelCategory, u64>,
    /// Administrative center coordinates, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Query parameters for the scene endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneQueryParams {
    /// Metric id (e.g. `per-capita-rate`, `fuel-count:electric`).
    pub metric: Option<String>,
    /// Palette name (e.g. `ylorrd`, `viridis`).
    pub palette: Option<String>,
}

/// Query parameters for the yearly fleet endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetQueryParams {
    /// First year to include (inclusive).
    pub from: Option<u16>,
    /// Last year to include (inclusive).
    pub to: Option<u16>,
}

/// One national-series year as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiYearEntry {
    /// Survey year.
    pub year: u16,
    /// Total registered passenger cars.
    pub total: u64,
    /// Per-category counts.
    pub fuel_counts: BTreeMap<FuelCategory, u64>,
    /// Per-category shares of the total, in percent. Empty for a zero
    /// total.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shares: BTreeMap<FuelCategory, f64>,
}

/// A selectable metric in the options response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetricOption {
    /// Canonical metric id, accepted by the scene endpoint.
    pub id: String,
    /// Human-readable label for the sidebar.
    pub label: String,
}

/// Supported metric and palette selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    /// Metrics the scene endpoint accepts.
    pub metrics: Vec<ApiMetricOption>,
    /// Palette names the scene endpoint accepts.
    pub palettes: Vec<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
