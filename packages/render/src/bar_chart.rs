//! Bar chart scene assembly: the terminal fallback.

use fleet_map_fleet_models::RegionTable;
use fleet_map_metrics::{Metric, MetricValues};
use fleet_map_render_models::{Bar, BarChartScene, Scene};

/// Builds a bar chart of every region with a resolved value, ranked
/// descending. Always succeeds; a table whose values all resolved to
/// nothing yields an empty chart rather than a failure.
pub(crate) fn build(table: &RegionTable, metric: Metric, values: &MetricValues) -> Scene {
    let mut bars: Vec<Bar> = table
        .records()
        .iter()
        .filter_map(|record| {
            values.get(&record.region_id).copied().map(|value| Bar {
                region_id: record.region_id.clone(),
                label: record.display_name.clone(),
                value,
            })
        })
        .collect();

    // Ties resolve by region id to keep the ranking stable.
    bars.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.region_id.cmp(&b.region_id))
    });

    Scene::BarChart(BarChartScene {
        metric: metric.to_string(),
        metric_label: metric.label(),
        bars,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fleet_map_fleet_models::RegionRecord;

    use super::*;

    fn row(region_id: &str) -> RegionRecord {
        RegionRecord {
            region_id: region_id.to_string(),
            display_name: format!("Region {region_id}"),
            population: 1_000,
            vehicle_count: 100,
            fuel_counts: BTreeMap::new(),
            coordinates: None,
        }
    }

    fn values(pairs: &[(&str, f64)]) -> MetricValues {
        pairs
            .iter()
            .map(|(id, value)| ((*id).to_string(), *value))
            .collect()
    }

    #[test]
    fn bars_rank_descending_by_value() {
        let table = RegionTable::new(vec![row("KZ-A"), row("KZ-B"), row("KZ-C")]).unwrap();
        let values = values(&[("KZ-A", 25.0), ("KZ-B", 100.0), ("KZ-C", 50.0)]);

        let Scene::BarChart(chart) = build(&table, Metric::VehicleCount, &values) else {
            panic!("expected a bar chart");
        };

        let order: Vec<&str> = chart.bars.iter().map(|b| b.region_id.as_str()).collect();
        assert_eq!(order, vec!["KZ-B", "KZ-C", "KZ-A"]);
        assert_eq!(chart.metric, "vehicle-count");
    }

    #[test]
    fn ties_order_by_region_id() {
        let table = RegionTable::new(vec![row("KZ-B"), row("KZ-A"), row("KZ-C")]).unwrap();
        let values = values(&[("KZ-A", 50.0), ("KZ-B", 50.0), ("KZ-C", 50.0)]);

        let Scene::BarChart(chart) = build(&table, Metric::VehicleCount, &values) else {
            panic!("expected a bar chart");
        };

        let order: Vec<&str> = chart.bars.iter().map(|b| b.region_id.as_str()).collect();
        assert_eq!(order, vec!["KZ-A", "KZ-B", "KZ-C"]);
    }

    #[test]
    fn regions_without_values_are_left_out() {
        let table = RegionTable::new(vec![row("KZ-A"), row("KZ-B")]).unwrap();
        let values = values(&[("KZ-B", 10.0)]);

        let Scene::BarChart(chart) = build(&table, Metric::PerCapitaRate, &values) else {
            panic!("expected a bar chart");
        };
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].region_id, "KZ-B");
    }

    #[test]
    fn fully_unresolved_metric_yields_an_empty_chart() {
        let table = RegionTable::new(vec![row("KZ-A")]).unwrap();

        let Scene::BarChart(chart) = build(&table, Metric::PerCapitaRate, &MetricValues::new())
        else {
            panic!("expected a bar chart");
        };
        assert!(chart.bars.is_empty());
    }
}
