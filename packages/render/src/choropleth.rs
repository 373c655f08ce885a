//! Choropleth scene assembly.

use fleet_map_encoding::continuous_color;
use fleet_map_fleet_models::RegionTable;
use fleet_map_geometry::{BoundRegion, FeatureSet, bind_regions};
use fleet_map_metrics::MetricValues;
use fleet_map_render_models::{
    ChoroplethRegion, ChoroplethScene, DEFAULT_MAP_ZOOM, ScaleLegend, Scene,
};

use crate::{RenderRequest, mean_center};

/// Builds a choropleth over the regions that both bound to a boundary
/// feature and resolved a metric value. `None` when no region qualifies.
pub(crate) fn build(
    features: &FeatureSet,
    table: &RegionTable,
    request: &RenderRequest,
    values: &MetricValues,
) -> Option<Scene> {
    let bound: Vec<(BoundRegion<'_>, f64)> = bind_regions(features, table)
        .into_iter()
        .filter_map(|region| {
            let value = values.get(&region.record.region_id).copied()?;
            Some((region, value))
        })
        .collect();

    if bound.is_empty() {
        log::debug!("No bound region carries a resolved value");
        return None;
    }

    let min = bound.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = bound
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    let regions = bound
        .iter()
        .map(|(region, value)| ChoroplethRegion {
            region_id: region.record.region_id.clone(),
            name: region.record.display_name.clone(),
            value: *value,
            color: continuous_color(*value, min, max, request.palette).to_hex(),
            geometry: region.feature.geometry.clone(),
        })
        .collect();

    let center = mean_center(bound.iter().map(|(region, _)| region.feature.centroid));

    Some(Scene::Choropleth(ChoroplethScene {
        metric: request.metric.to_string(),
        metric_label: request.metric.label(),
        palette: request.palette.name().to_string(),
        center,
        zoom: DEFAULT_MAP_ZOOM,
        legend: ScaleLegend {
            min,
            max,
            stops: request
                .palette
                .stops()
                .iter()
                .map(|stop| stop.to_hex())
                .collect(),
        },
        regions,
    }))
}
