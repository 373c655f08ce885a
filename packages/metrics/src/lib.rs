#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Derived per-region metrics.
//!
//! A [`Metric`] names one derivable column over a [`RegionTable`];
//! [`resolve_metric`] computes it for every region in a single pass.
//! Regions for which the metric is undefined are absent from the result,
//! never zero-filled: a missing breakdown and a zero count must stay
//! distinguishable downstream.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use fleet_map_fleet_models::{FuelCategory, RegionRecord, RegionTable};
use thiserror::Error;

/// A selectable per-region metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total registered passenger cars.
    VehicleCount,
    /// Cars of one fuel category.
    FuelCount(FuelCategory),
    /// Resident population.
    Population,
    /// Cars per 1,000 residents, rounded to one decimal.
    PerCapitaRate,
    /// One category's share of the regional fleet, in percent rounded to
    /// two decimals.
    FuelShare(FuelCategory),
}

impl Metric {
    /// Every selectable metric, in sidebar display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut metrics = vec![Self::VehicleCount, Self::PerCapitaRate, Self::Population];
        metrics.extend(FuelCategory::all().iter().map(|&c| Self::FuelCount(c)));
        metrics.extend(FuelCategory::all().iter().map(|&c| Self::FuelShare(c)));
        metrics
    }

    /// Human-readable label for legends and chart axes.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::VehicleCount => "Total cars".to_string(),
            Self::Population => "Population".to_string(),
            Self::PerCapitaRate => "Cars per 1,000 residents".to_string(),
            Self::FuelCount(category) => format!("{} cars", category.label()),
            Self::FuelShare(category) => format!("{} share (%)", category.label()),
        }
    }
}

/// Lowercase kebab slug for a category (`NOT_SPECIFIED` becomes
/// `not-specified`).
fn category_slug(category: FuelCategory) -> String {
    category.as_ref().to_ascii_lowercase().replace('_', "-")
}

fn parse_category(input: &str, slug: &str) -> Result<FuelCategory, InvalidMetricError> {
    slug.replace('-', "_")
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| InvalidMetricError {
            input: input.to_string(),
        })
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VehicleCount => f.write_str("vehicle-count"),
            Self::Population => f.write_str("population"),
            Self::PerCapitaRate => f.write_str("per-capita-rate"),
            Self::FuelCount(category) => write!(f, "fuel-count:{}", category_slug(*category)),
            Self::FuelShare(category) => write!(f, "fuel-share:{}", category_slug(*category)),
        }
    }
}

impl FromStr for Metric {
    type Err = InvalidMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        if let Some(slug) = normalized.strip_prefix("fuel-count:") {
            return parse_category(s, slug).map(Self::FuelCount);
        }
        if let Some(slug) = normalized.strip_prefix("fuel-share:") {
            return parse_category(s, slug).map(Self::FuelShare);
        }

        match normalized.as_str() {
            "vehicle-count" => Ok(Self::VehicleCount),
            "population" => Ok(Self::Population),
            "per-capita-rate" => Ok(Self::PerCapitaRate),
            _ => Err(InvalidMetricError {
                input: s.to_string(),
            }),
        }
    }
}

/// Error returned for an unrecognized metric selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric selection: {input:?}")]
pub struct InvalidMetricError {
    /// The selection string that failed to parse.
    pub input: String,
}

/// Resolved per-region values, keyed by region id.
pub type MetricValues = BTreeMap<String, f64>;

/// Computes `metric` for every region in `table`.
///
/// Regions where the metric is undefined are omitted from the result:
/// zero population for [`Metric::PerCapitaRate`], an unsurveyed category
/// for [`Metric::FuelCount`], zero vehicles or an unsurveyed category for
/// [`Metric::FuelShare`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn resolve_metric(table: &RegionTable, metric: Metric) -> MetricValues {
    let mut values = MetricValues::new();
    for record in table.records() {
        let value = match metric {
            Metric::VehicleCount => Some(record.vehicle_count as f64),
            Metric::Population => Some(record.population as f64),
            Metric::FuelCount(category) => record.fuel_count(category).map(|count| count as f64),
            Metric::PerCapitaRate => per_capita_rate(record),
            Metric::FuelShare(category) => fuel_share(record, category),
        };
        if let Some(value) = value {
            values.insert(record.region_id.clone(), value);
        }
    }
    values
}

/// Cars per 1,000 residents, one decimal. `None` for zero population.
#[allow(clippy::cast_precision_loss)]
fn per_capita_rate(record: &RegionRecord) -> Option<f64> {
    if record.population == 0 {
        return None;
    }
    let rate = record.vehicle_count as f64 / record.population as f64 * 1000.0;
    Some((rate * 10.0).round() / 10.0)
}

/// The category's share of the region's fleet, two decimals. `None` for a
/// zero fleet or an unsurveyed category.
#[allow(clippy::cast_precision_loss)]
fn fuel_share(record: &RegionRecord, category: FuelCategory) -> Option<f64> {
    if record.vehicle_count == 0 {
        return None;
    }
    let count = record.fuel_count(category)?;
    let share = count as f64 / record.vehicle_count as f64 * 100.0;
    Some((share * 100.0).round() / 100.0)
}

/// Metric resolution with a single-slot memo keyed by table version and
/// metric.
///
/// One render cycle consults the same mapping from more than one rendering
/// strategy; the memo hands back the shared [`Arc`] instead of recomputing.
/// A different table version or metric recomputes from scratch, so stale
/// mappings never leak across selections.
#[derive(Debug, Default)]
pub struct MetricResolver {
    memo: Mutex<Option<MemoSlot>>,
}

#[derive(Debug)]
struct MemoSlot {
    table_version: u64,
    metric: Metric,
    values: Arc<MetricValues>,
}

impl MetricResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved values for `metric` over `table`, memoized.
    pub fn resolve(&self, table: &RegionTable, metric: Metric) -> Arc<MetricValues> {
        let mut memo = match self.memo.lock() {
            Ok(guard) => guard,
            // The slot is only ever overwritten whole, so a poisoned lock
            // still holds a usable value.
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(slot) = memo.as_ref() {
            if slot.table_version == table.version() && slot.metric == metric {
                return Arc::clone(&slot.values);
            }
        }

        let values = Arc::new(resolve_metric(table, metric));
        *memo = Some(MemoSlot {
            table_version: table.version(),
            metric,
            values: Arc::clone(&values),
        });
        values
    }
}
