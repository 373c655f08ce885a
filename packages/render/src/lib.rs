#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Rendering strategy selection.
//!
//! A render cycle walks a fixed fallback chain (choropleth, then point
//! map, then bar chart) and settles on the first strategy whose
//! preconditions hold. The choropleth needs boundary geometry and gets one
//! bounded fetch attempt; the point map needs region coordinates; the bar
//! chart needs nothing beyond a non-empty table, so every cycle over real
//! data produces a scene. The only hard error is an empty table.

mod bar_chart;
mod choropleth;
mod point_map;

use std::sync::Arc;

use fleet_map_encoding::Palette;
use fleet_map_fleet_models::{Coordinates, RegionTable};
use fleet_map_geometry::{GeometryFetcher, GeometrySourceRef};
use fleet_map_metrics::{Metric, MetricResolver, MetricValues};
use fleet_map_render_models::{DEFAULT_MAP_CENTER, Scene};
use thiserror::Error;

/// Classification thresholds for the per-capita rate, in cars per 1,000
/// residents.
pub const PER_CAPITA_THRESHOLDS: [f64; 3] = [150.0, 200.0, 250.0];

/// Circle radius floor in meters. Keeps low-value regions visible at the
/// national zoom level.
pub const MIN_CIRCLE_RADIUS_M: f64 = 5_000.0;

/// Circle radius ceiling in meters.
pub const MAX_CIRCLE_RADIUS_M: f64 = 50_000.0;

/// Palette for point map classification: blue means low, red means high.
pub const CLASSIFICATION_PALETTE: Palette = Palette::RdYlBu;

/// Parameters of one render cycle.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Metric to resolve per region.
    pub metric: Metric,
    /// Palette for the continuous choropleth scale.
    pub palette: Palette,
    /// Where boundary geometry comes from.
    pub source: GeometrySourceRef,
}

/// The region table has no rows; there is nothing to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dataset contains no regions")]
pub struct EmptyDatasetError;

/// Fallback chain, in attempt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Choropleth,
    PointMap,
    BarChart,
}

impl Strategy {
    const fn next(self) -> Option<Self> {
        match self {
            Self::Choropleth => Some(Self::PointMap),
            Self::PointMap => Some(Self::BarChart),
            Self::BarChart => None,
        }
    }
}

/// Runs render cycles: resolves the metric once, then walks the fallback
/// chain until a strategy yields a scene.
pub struct RenderPipeline {
    resolver: MetricResolver,
    geometry: Arc<dyn GeometryFetcher>,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(geometry: Arc<dyn GeometryFetcher>) -> Self {
        Self {
            resolver: MetricResolver::new(),
            geometry,
        }
    }

    /// Renders one scene for `request` over `table`.
    ///
    /// Geometry failures never surface to the caller: the choropleth gets
    /// a single fetch attempt per cycle, and every later strategy works
    /// from the table alone.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] when the table has no regions. No
    /// strategy (and no geometry fetch) is attempted in that case.
    pub async fn render(
        &self,
        table: &RegionTable,
        request: &RenderRequest,
    ) -> Result<Scene, EmptyDatasetError> {
        if table.is_empty() {
            return Err(EmptyDatasetError);
        }

        let values = self.resolver.resolve(table, request.metric);

        let mut strategy = Strategy::Choropleth;
        loop {
            if let Some(scene) = self.attempt(strategy, table, request, &values).await {
                log::debug!("Render cycle settled on {}", scene.kind());
                return Ok(scene);
            }
            match strategy.next() {
                Some(next) => {
                    log::debug!("{strategy:?} unavailable, falling back to {next:?}");
                    strategy = next;
                }
                None => unreachable!("bar chart always renders a non-empty table"),
            }
        }
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        table: &RegionTable,
        request: &RenderRequest,
        values: &MetricValues,
    ) -> Option<Scene> {
        match strategy {
            Strategy::Choropleth => {
                let features = match self.geometry.fetch(&request.source).await {
                    Ok(features) => features,
                    Err(e) => {
                        log::warn!("Geometry unavailable, skipping choropleth: {e}");
                        return None;
                    }
                };
                choropleth::build(&features, table, request, values)
            }
            Strategy::PointMap => {
                // Circles are always classified by the per-capita rate,
                // whatever metric sizes them.
                let rates = self.resolver.resolve(table, Metric::PerCapitaRate);
                point_map::build(table, request, values, &rates)
            }
            Strategy::BarChart => Some(bar_chart::build(table, request.metric, values)),
        }
    }
}

/// Mean of the given coordinates, or the default map center for an empty
/// iterator.
pub(crate) fn mean_center(coords: impl Iterator<Item = Coordinates>) -> Coordinates {
    let mut count = 0_u32;
    let (mut lat_sum, mut lon_sum) = (0.0, 0.0);
    for c in coords {
        lat_sum += c.latitude;
        lon_sum += c.longitude;
        count += 1;
    }
    if count == 0 {
        return DEFAULT_MAP_CENTER;
    }
    Coordinates::new(lat_sum / f64::from(count), lon_sum / f64::from(count))
}
