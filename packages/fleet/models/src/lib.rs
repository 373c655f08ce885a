#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical domain types for the vehicle fleet map.
//!
//! Defines the fuel category taxonomy, per-region statistics rows, and the
//! validated [`RegionTable`] snapshot that every downstream stage (metric
//! resolution, encoding, rendering) consumes. Validation happens once at
//! construction; consumers rely on the invariants without re-checking.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Fuel type categories for registered passenger cars.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelCategory {
    Petrol,
    Diesel,
    Gas,
    Hybrid,
    Electric,
    NotSpecified,
}

impl FuelCategory {
    /// Returns all fuel categories in canonical display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Petrol,
            Self::Diesel,
            Self::Gas,
            Self::Hybrid,
            Self::Electric,
            Self::NotSpecified,
        ]
    }

    /// Human-readable label for chart legends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Gas => "Gas",
            Self::Hybrid => "Hybrid",
            Self::Electric => "Electric",
            Self::NotSpecified => "Not specified",
        }
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are inside valid WGS84 ranges.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One region's statistics row for a survey year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Stable region identifier (ISO 3166-2 style, e.g. `KZ-ALA`).
    pub region_id: String,
    /// Human-readable region name.
    pub display_name: String,
    /// Resident population.
    pub population: u64,
    /// Total registered passenger cars.
    pub vehicle_count: u64,
    /// Known per-category counts. Sparse: categories not surveyed for a
    /// region are absent, never zero-filled.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fuel_counts: BTreeMap<FuelCategory, u64>,
    /// Administrative center coordinates, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl RegionRecord {
    /// Count for one fuel category, if it was surveyed for this region.
    #[must_use]
    pub fn fuel_count(&self, category: FuelCategory) -> Option<u64> {
        self.fuel_counts.get(&category).copied()
    }

    /// Sum of all surveyed category counts.
    #[must_use]
    pub fn fuel_total(&self) -> u64 {
        self.fuel_counts.values().sum()
    }
}

/// Slack allowed between a region's summed fuel counts and its total
/// vehicle count. Source tables are rounded upstream, so the breakdown may
/// overshoot the total by one.
pub const FUEL_SUM_TOLERANCE: u64 = 1;

static NEXT_TABLE_VERSION: AtomicU64 = AtomicU64::new(1);

/// An immutable, validated snapshot of region statistics.
///
/// Each snapshot carries a process-unique `version`, used downstream as a
/// memoization key: two tables with different versions never share derived
/// results.
#[derive(Debug, Clone)]
pub struct RegionTable {
    version: u64,
    records: Vec<RegionRecord>,
}

impl RegionTable {
    /// Validates `records` and wraps them in a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if two rows share a region id, a fuel
    /// breakdown sums past the vehicle count tolerance, or a row carries
    /// out-of-range coordinates.
    pub fn new(records: Vec<RegionRecord>) -> Result<Self, TableError> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.region_id.as_str()) {
                return Err(TableError::DuplicateRegionId {
                    region_id: record.region_id.clone(),
                });
            }

            let fuel_total = record.fuel_total();
            if fuel_total > record.vehicle_count + FUEL_SUM_TOLERANCE {
                return Err(TableError::FuelBreakdownOverflow {
                    region_id: record.region_id.clone(),
                    fuel_total,
                    vehicle_count: record.vehicle_count,
                });
            }

            if let Some(coordinates) = record.coordinates {
                if !coordinates.is_valid() {
                    return Err(TableError::InvalidCoordinates {
                        region_id: record.region_id.clone(),
                        latitude: coordinates.latitude,
                        longitude: coordinates.longitude,
                    });
                }
            }
        }

        Ok(Self {
            version: NEXT_TABLE_VERSION.fetch_add(1, Ordering::Relaxed),
            records,
        })
    }

    /// Process-unique snapshot version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of regions in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The validated rows, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    /// Looks up one region by id.
    #[must_use]
    pub fn get(&self, region_id: &str) -> Option<&RegionRecord> {
        self.records.iter().find(|r| r.region_id == region_id)
    }
}

/// One year of the national fuel mix series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    /// Calendar year.
    pub year: u16,
    /// Total registered passenger cars nationwide.
    pub total: u64,
    /// Per-category counts; sums to `total` within the source tolerance.
    pub fuel_counts: BTreeMap<FuelCategory, u64>,
}

impl YearlyRecord {
    /// Count for one category, zero when absent.
    #[must_use]
    pub fn count(&self, category: FuelCategory) -> u64 {
        self.fuel_counts.get(&category).copied().unwrap_or(0)
    }

    /// The category's share of the year's fleet, in percent rounded to two
    /// decimals. `None` when the year's total is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, category: FuelCategory) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let share = self.count(category) as f64 / self.total as f64 * 100.0;
        Some((share * 100.0).round() / 100.0)
    }
}

/// Errors raised when a table snapshot violates its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Two rows share the same region identifier.
    #[error("duplicate region id: {region_id}")]
    DuplicateRegionId {
        /// The colliding identifier.
        region_id: String,
    },
    /// A region's fuel counts sum past its total vehicle count.
    #[error(
        "fuel counts for {region_id} sum to {fuel_total}, exceeding vehicle count {vehicle_count}"
    )]
    FuelBreakdownOverflow {
        /// The offending region.
        region_id: String,
        /// Sum of the surveyed category counts.
        fuel_total: u64,
        /// The region's total vehicle count.
        vehicle_count: u64,
    },
    /// A region's coordinates are outside valid WGS84 ranges.
    #[error("region {region_id} has out-of-range coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// The offending region.
        region_id: String,
        /// Latitude as given.
        latitude: f64,
        /// Longitude as given.
        longitude: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region_id: &str) -> RegionRecord {
        RegionRecord {
            region_id: region_id.to_string(),
            display_name: format!("Region {region_id}"),
            population: 1_000_000,
            vehicle_count: 200_000,
            fuel_counts: BTreeMap::new(),
            coordinates: Some(Coordinates::new(48.0, 67.0)),
        }
    }

    #[test]
    fn category_parses_canonical_names() {
        assert_eq!(
            "ELECTRIC".parse::<FuelCategory>().unwrap(),
            FuelCategory::Electric
        );
        assert_eq!(
            "NOT_SPECIFIED".parse::<FuelCategory>().unwrap(),
            FuelCategory::NotSpecified
        );
        assert!("PLUTONIUM".parse::<FuelCategory>().is_err());
    }

    #[test]
    fn category_display_round_trips() {
        for category in FuelCategory::all() {
            let parsed: FuelCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn category_labels_are_human_readable() {
        assert_eq!(FuelCategory::NotSpecified.label(), "Not specified");
        assert_eq!(FuelCategory::Petrol.label(), "Petrol");
    }

    #[test]
    fn coordinates_validity_checks_wgs84_ranges() {
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(Coordinates::new(-90.0, -180.0).is_valid());
        assert!(!Coordinates::new(90.5, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.1).is_valid());
    }

    #[test]
    fn table_rejects_duplicate_region_ids() {
        let result = RegionTable::new(vec![record("KZ-ALA"), record("KZ-ALA")]);
        assert!(matches!(
            result,
            Err(TableError::DuplicateRegionId { region_id }) if region_id == "KZ-ALA"
        ));
    }

    #[test]
    fn table_allows_fuel_sum_at_tolerance() {
        let mut row = record("KZ-AST");
        row.vehicle_count = 100;
        row.fuel_counts.insert(FuelCategory::Petrol, 60);
        row.fuel_counts.insert(FuelCategory::Diesel, 41);

        assert!(RegionTable::new(vec![row]).is_ok());
    }

    #[test]
    fn table_rejects_fuel_sum_beyond_tolerance() {
        let mut row = record("KZ-AST");
        row.vehicle_count = 100;
        row.fuel_counts.insert(FuelCategory::Petrol, 60);
        row.fuel_counts.insert(FuelCategory::Diesel, 42);

        assert!(matches!(
            RegionTable::new(vec![row]),
            Err(TableError::FuelBreakdownOverflow {
                fuel_total: 102,
                vehicle_count: 100,
                ..
            })
        ));
    }

    #[test]
    fn table_rejects_out_of_range_coordinates() {
        let mut row = record("KZ-SHY");
        row.coordinates = Some(Coordinates::new(123.0, 69.6));

        assert!(matches!(
            RegionTable::new(vec![row]),
            Err(TableError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn table_versions_are_process_unique() {
        let a = RegionTable::new(vec![record("KZ-ALA")]).unwrap();
        let b = RegionTable::new(vec![record("KZ-ALA")]).unwrap();
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn table_lookup_by_id() {
        let table = RegionTable::new(vec![record("KZ-ALA"), record("KZ-AST")]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("KZ-AST").is_some());
        assert!(table.get("KZ-XXX").is_none());
    }

    #[test]
    fn fuel_total_sums_surveyed_categories() {
        let mut row = record("KZ-ALA");
        row.fuel_counts.insert(FuelCategory::Electric, 5_000);
        row.fuel_counts.insert(FuelCategory::Hybrid, 12_000);
        assert_eq!(row.fuel_total(), 17_000);
        assert_eq!(row.fuel_count(FuelCategory::Electric), Some(5_000));
        assert_eq!(row.fuel_count(FuelCategory::Diesel), None);
    }

    #[test]
    fn yearly_share_rounds_to_two_decimals() {
        let mut fuel_counts = BTreeMap::new();
        fuel_counts.insert(FuelCategory::Petrol, 3_513_098);
        let year = YearlyRecord {
            year: 2011,
            total: 3_553_814,
            fuel_counts,
        };

        assert_eq!(year.share(FuelCategory::Petrol), Some(98.85));
        assert_eq!(year.share(FuelCategory::Diesel), Some(0.0));
    }

    #[test]
    fn yearly_share_is_none_for_zero_total() {
        let year = YearlyRecord {
            year: 2011,
            total: 0,
            fuel_counts: BTreeMap::new(),
        };
        assert_eq!(year.share(FuelCategory::Petrol), None);
    }
}
