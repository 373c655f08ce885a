#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Scene descriptions produced by the rendering pipeline.
//!
//! A scene is the complete, already-encoded description of one rendering:
//! every color, radius, and rank is final. The presentation layer draws a
//! scene without touching the statistics tables, so these types are the
//! whole contract between the pipeline and any frontend.

use fleet_map_fleet_models::Coordinates;
use serde::Serialize;

/// Default map center: the geographic center of Kazakhstan.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    latitude: 48.0196,
    longitude: 66.9237,
};

/// Default map zoom level.
pub const DEFAULT_MAP_ZOOM: u8 = 5;

/// A renderable scene, tagged by the strategy that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Scene {
    /// Region boundaries filled by metric value.
    Choropleth(ChoroplethScene),
    /// Sized, classified circle per region.
    PointMap(PointMapScene),
    /// Regions ranked by metric value.
    BarChart(BarChartScene),
}

impl Scene {
    /// Short name of the strategy that produced the scene.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Choropleth(_) => "choropleth",
            Self::PointMap(_) => "pointMap",
            Self::BarChart(_) => "barChart",
        }
    }
}

/// A choropleth map: filled region boundaries on a continuous color scale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethScene {
    /// Canonical metric selection that produced the scene.
    pub metric: String,
    /// Human-readable metric label for the legend.
    pub metric_label: String,
    /// Palette name used by the scale.
    pub palette: String,
    /// Map center.
    pub center: Coordinates,
    /// Initial zoom level.
    pub zoom: u8,
    /// Continuous scale legend.
    pub legend: ScaleLegend,
    /// One entry per bound region.
    pub regions: Vec<ChoroplethRegion>,
}

/// One filled region of a choropleth.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethRegion {
    /// Stable region identifier.
    pub region_id: String,
    /// Display name for tooltips.
    pub name: String,
    /// Resolved metric value.
    pub value: f64,
    /// Fill color as `#rrggbb`.
    pub color: String,
    /// Boundary geometry (GeoJSON Polygon or `MultiPolygon`), passed
    /// through from the geometry source untouched.
    pub geometry: geojson::Geometry,
}

/// Continuous scale legend: value bounds plus the ramp used between them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLegend {
    /// Smallest resolved value.
    pub min: f64,
    /// Largest resolved value.
    pub max: f64,
    /// Ramp stops as `#rrggbb`, low to high.
    pub stops: Vec<String>,
}

/// A point map: one sized, classified circle per region.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMapScene {
    /// Canonical metric selection that sized the circles.
    pub metric: String,
    /// Human-readable metric label.
    pub metric_label: String,
    /// Map center.
    pub center: Coordinates,
    /// Initial zoom level.
    pub zoom: u8,
    /// Classification legend for the circle colors.
    pub legend: BinLegend,
    /// One circle per region.
    pub points: Vec<MapPoint>,
}

/// One circle on a point map.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Stable region identifier.
    pub region_id: String,
    /// Display name for tooltips.
    pub name: String,
    /// Circle center latitude.
    pub latitude: f64,
    /// Circle center longitude.
    pub longitude: f64,
    /// Resolved metric value the radius encodes.
    pub value: f64,
    /// Circle radius in meters.
    pub radius_meters: f64,
    /// Classification color as `#rrggbb`.
    pub color: String,
}

/// Discrete classification legend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLegend {
    /// Label of the metric the classification is computed from. May differ
    /// from the sized metric: point maps always classify by the per-capita
    /// rate.
    pub metric_label: String,
    /// Ascending bin thresholds.
    pub thresholds: Vec<f64>,
    /// One color per bin, `thresholds.len() + 1` entries.
    pub colors: Vec<String>,
}

/// A bar chart: regions ranked by metric value, descending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartScene {
    /// Canonical metric selection.
    pub metric: String,
    /// Human-readable metric label for the value axis.
    pub metric_label: String,
    /// Ranked bars, largest value first.
    pub bars: Vec<Bar>,
}

/// One ranked bar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Stable region identifier.
    pub region_id: String,
    /// Display name for the category axis.
    pub label: String,
    /// Resolved metric value.
    pub value: f64,
}
