//! Point map scene assembly.

use fleet_map_encoding::{discrete_bin, discrete_colors, proportional_size};
use fleet_map_fleet_models::{Coordinates, RegionRecord, RegionTable};
use fleet_map_metrics::{Metric, MetricValues};
use fleet_map_render_models::{BinLegend, DEFAULT_MAP_ZOOM, MapPoint, PointMapScene, Scene};

use crate::{
    CLASSIFICATION_PALETTE, MAX_CIRCLE_RADIUS_M, MIN_CIRCLE_RADIUS_M, PER_CAPITA_THRESHOLDS,
    RenderRequest, mean_center,
};

/// Builds a point map over the regions that carry coordinates, a resolved
/// metric value, and a per-capita rate to classify by. `None` when no
/// region qualifies.
pub(crate) fn build(
    table: &RegionTable,
    request: &RenderRequest,
    values: &MetricValues,
    rates: &MetricValues,
) -> Option<Scene> {
    let candidates: Vec<(&RegionRecord, Coordinates, f64, f64)> = table
        .records()
        .iter()
        .filter_map(|record| {
            let coordinates = record.coordinates?;
            let value = values.get(&record.region_id).copied()?;
            let rate = rates.get(&record.region_id).copied()?;
            Some((record, coordinates, value, rate))
        })
        .collect();

    if candidates.is_empty() {
        log::debug!("No region qualifies for a point map");
        return None;
    }

    let max_value = candidates
        .iter()
        .map(|(_, _, value, _)| *value)
        .fold(f64::NEG_INFINITY, f64::max);
    let colors = discrete_colors(CLASSIFICATION_PALETTE, PER_CAPITA_THRESHOLDS.len() + 1);

    let points = candidates
        .iter()
        .map(|(record, coordinates, value, rate)| {
            let bin = discrete_bin(*rate, &PER_CAPITA_THRESHOLDS);
            MapPoint {
                region_id: record.region_id.clone(),
                name: record.display_name.clone(),
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
                value: *value,
                radius_meters: proportional_size(
                    *value,
                    max_value,
                    MIN_CIRCLE_RADIUS_M,
                    MAX_CIRCLE_RADIUS_M,
                ),
                color: colors[bin].to_hex(),
            }
        })
        .collect();

    let center = mean_center(candidates.iter().map(|(_, coordinates, _, _)| *coordinates));

    Some(Scene::PointMap(PointMapScene {
        metric: request.metric.to_string(),
        metric_label: request.metric.label(),
        center,
        zoom: DEFAULT_MAP_ZOOM,
        legend: BinLegend {
            metric_label: Metric::PerCapitaRate.label(),
            thresholds: PER_CAPITA_THRESHOLDS.to_vec(),
            colors: colors.iter().map(|color| color.to_hex()).collect(),
        },
        points,
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fleet_map_encoding::Palette;
    use fleet_map_geometry::GeometrySourceRef;

    use super::*;

    fn row(region_id: &str, coordinates: Option<Coordinates>) -> RegionRecord {
        RegionRecord {
            region_id: region_id.to_string(),
            display_name: format!("Region {region_id}"),
            population: 1_000,
            vehicle_count: 100,
            fuel_counts: BTreeMap::new(),
            coordinates,
        }
    }

    fn request() -> RenderRequest {
        RenderRequest {
            metric: Metric::VehicleCount,
            palette: Palette::YlOrRd,
            source: GeometrySourceRef::default(),
        }
    }

    fn values(pairs: &[(&str, f64)]) -> MetricValues {
        pairs
            .iter()
            .map(|(id, value)| ((*id).to_string(), *value))
            .collect()
    }

    #[test]
    fn radii_scale_between_floor_and_ceiling() {
        let table = RegionTable::new(vec![
            row("KZ-A", Some(Coordinates::new(43.0, 76.0))),
            row("KZ-B", Some(Coordinates::new(51.0, 71.0))),
        ])
        .unwrap();
        let sized = values(&[("KZ-A", 100.0), ("KZ-B", 0.0)]);
        let rates = values(&[("KZ-A", 225.0), ("KZ-B", 120.0)]);

        let scene = build(&table, &request(), &sized, &rates).unwrap();
        let Scene::PointMap(map) = scene else {
            panic!("expected a point map");
        };

        let largest = map.points.iter().find(|p| p.region_id == "KZ-A").unwrap();
        let smallest = map.points.iter().find(|p| p.region_id == "KZ-B").unwrap();
        assert_eq!(largest.radius_meters, MAX_CIRCLE_RADIUS_M);
        assert_eq!(smallest.radius_meters, MIN_CIRCLE_RADIUS_M);
    }

    #[test]
    fn circles_classify_by_per_capita_rate() {
        let table = RegionTable::new(vec![
            row("KZ-LOW", Some(Coordinates::new(43.0, 76.0))),
            row("KZ-HIGH", Some(Coordinates::new(51.0, 71.0))),
        ])
        .unwrap();
        let sized = values(&[("KZ-LOW", 10.0), ("KZ-HIGH", 10.0)]);
        let rates = values(&[("KZ-LOW", 120.0), ("KZ-HIGH", 260.0)]);

        let scene = build(&table, &request(), &sized, &rates).unwrap();
        let Scene::PointMap(map) = scene else {
            panic!("expected a point map");
        };

        let ramp = discrete_colors(CLASSIFICATION_PALETTE, 4);
        let low = map.points.iter().find(|p| p.region_id == "KZ-LOW").unwrap();
        let high = map.points.iter().find(|p| p.region_id == "KZ-HIGH").unwrap();
        assert_eq!(low.color, ramp[0].to_hex());
        assert_eq!(high.color, ramp[3].to_hex());
        assert_eq!(map.legend.thresholds, vec![150.0, 200.0, 250.0]);
        assert_eq!(map.legend.colors.len(), 4);
    }

    #[test]
    fn equal_values_all_get_the_ceiling_radius() {
        let table = RegionTable::new(vec![
            row("KZ-A", Some(Coordinates::new(43.0, 76.0))),
            row("KZ-B", Some(Coordinates::new(51.0, 71.0))),
        ])
        .unwrap();
        let sized = values(&[("KZ-A", 40.0), ("KZ-B", 40.0)]);
        let rates = values(&[("KZ-A", 100.0), ("KZ-B", 100.0)]);

        let scene = build(&table, &request(), &sized, &rates).unwrap();
        let Scene::PointMap(map) = scene else {
            panic!("expected a point map");
        };
        assert!(map.points.iter().all(|p| p.radius_meters == MAX_CIRCLE_RADIUS_M));
    }

    #[test]
    fn all_zero_values_keep_the_floor_radius() {
        let table =
            RegionTable::new(vec![row("KZ-A", Some(Coordinates::new(43.0, 76.0)))]).unwrap();
        let sized = values(&[("KZ-A", 0.0)]);
        let rates = values(&[("KZ-A", 0.0)]);

        let scene = build(&table, &request(), &sized, &rates).unwrap();
        let Scene::PointMap(map) = scene else {
            panic!("expected a point map");
        };
        assert_eq!(map.points[0].radius_meters, MIN_CIRCLE_RADIUS_M);
    }

    #[test]
    fn regions_without_coordinates_or_values_are_left_out() {
        let table = RegionTable::new(vec![
            row("KZ-A", Some(Coordinates::new(43.0, 76.0))),
            row("KZ-B", None),
            row("KZ-C", Some(Coordinates::new(51.0, 71.0))),
        ])
        .unwrap();
        let sized = values(&[("KZ-A", 10.0), ("KZ-B", 10.0)]);
        let rates = values(&[("KZ-A", 100.0), ("KZ-B", 100.0), ("KZ-C", 100.0)]);

        let scene = build(&table, &request(), &sized, &rates).unwrap();
        let Scene::PointMap(map) = scene else {
            panic!("expected a point map");
        };
        assert_eq!(map.points.len(), 1);
        assert_eq!(map.points[0].region_id, "KZ-A");
    }

    #[test]
    fn no_qualifying_region_yields_none() {
        let table = RegionTable::new(vec![row("KZ-A", None)]).unwrap();
        let sized = values(&[("KZ-A", 10.0)]);
        let rates = values(&[("KZ-A", 100.0)]);

        assert!(build(&table, &request(), &sized, &rates).is_none());
    }
}
