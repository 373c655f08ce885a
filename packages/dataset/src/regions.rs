//! Regional snapshot: cars, fuel breakdown, population, and administrative
//! center coordinates for all 17 first-level regions.

use std::collections::BTreeMap;

use fleet_map_fleet_models::{Coordinates, FuelCategory, RegionRecord, RegionTable};

/// Survey year of the regional snapshot.
pub const SNAPSHOT_YEAR: u16 = 2023;

/// Raw region row: id, name, total cars, electric, hybrid, population,
/// latitude, longitude. Only the electric and hybrid breakdowns were
/// surveyed per region; the remaining categories exist nationally only.
type RawRegion = (&'static str, &'static str, u64, u64, u64, u64, f64, f64);

const REGIONS: &[RawRegion] = &[
    ("KZ-ALA", "Almaty City", 450_000, 5_000, 12_000, 2_000_000, 43.2220, 76.8512),
    ("KZ-AST", "Astana", 280_000, 3_500, 8_000, 1_200_000, 51.1694, 71.4491),
    ("KZ-SHY", "Shymkent", 240_000, 2_000, 5_000, 1_100_000, 42.3000, 69.6000),
    ("KZ-ALM", "Almaty Region", 480_000, 4_000, 10_000, 2_100_000, 43.2567, 76.9286),
    ("KZ-AKM", "Akmola", 180_000, 1_500, 3_000, 750_000, 51.1801, 71.4460),
    ("KZ-AKT", "Aktobe", 210_000, 1_800, 4_000, 900_000, 50.2839, 57.1670),
    ("KZ-ATY", "Atyrau", 150_000, 1_200, 2_500, 650_000, 47.1164, 51.8830),
    ("KZ-VOS", "East Kazakhstan", 320_000, 2_800, 7_000, 1_400_000, 49.9481, 82.6278),
    ("KZ-ZAP", "West Kazakhstan", 160_000, 1_400, 3_200, 680_000, 51.2145, 51.3572),
    ("KZ-KAR", "Karaganda", 310_000, 2_600, 6_500, 1_380_000, 49.8047, 73.1094),
    ("KZ-KUS", "Kostanay", 200_000, 1_700, 4_200, 880_000, 53.2144, 63.6246),
    ("KZ-KZY", "Kyzylorda", 190_000, 1_600, 3_800, 820_000, 44.8528, 65.5089),
    ("KZ-MAN", "Mangystau", 170_000, 1_500, 3_500, 720_000, 44.5167, 54.0167),
    ("KZ-PAV", "Pavlodar", 180_000, 1_550, 3_700, 750_000, 52.2873, 76.9674),
    ("KZ-SEV", "North Kazakhstan", 130_000, 1_100, 2_600, 550_000, 54.8667, 69.1667),
    ("KZ-YUZ", "Turkestan", 450_000, 3_800, 9_500, 2_000_000, 43.3000, 68.2500),
    ("KZ-ZHA", "Zhambyl", 260_000, 2_200, 5_500, 1_150_000, 42.9000, 71.3667),
];

/// Builds the validated regional snapshot.
///
/// # Panics
///
/// Panics if the embedded rows violate table invariants, which would be a
/// data bug caught by the tests below.
#[must_use]
pub fn region_table() -> RegionTable {
    let records = REGIONS
        .iter()
        .map(
            |&(region_id, display_name, vehicle_count, electric, hybrid, population, lat, lon)| {
                let mut fuel_counts = BTreeMap::new();
                fuel_counts.insert(FuelCategory::Electric, electric);
                fuel_counts.insert(FuelCategory::Hybrid, hybrid);

                RegionRecord {
                    region_id: region_id.to_string(),
                    display_name: display_name.to_string(),
                    population,
                    vehicle_count,
                    fuel_counts,
                    coordinates: Some(Coordinates::new(lat, lon)),
                }
            },
        )
        .collect();

    RegionTable::new(records).expect("embedded region data is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_has_all_seventeen_regions() {
        let table = region_table();
        assert_eq!(table.len(), 17);
    }

    #[test]
    fn every_region_has_coordinates_and_breakdowns() {
        let table = region_table();
        for record in table.records() {
            assert!(record.coordinates.is_some(), "{} lacks coordinates", record.region_id);
            assert!(record.fuel_count(FuelCategory::Electric).is_some());
            assert!(record.fuel_count(FuelCategory::Hybrid).is_some());
            assert!(record.fuel_total() < record.vehicle_count);
        }
    }

    #[test]
    fn spot_rows_match_the_source_table() {
        let table = region_table();
        let almaty = table.get("KZ-ALA").unwrap();
        assert_eq!(almaty.display_name, "Almaty City");
        assert_eq!(almaty.vehicle_count, 450_000);
        assert_eq!(almaty.population, 2_000_000);
        assert_eq!(almaty.fuel_count(FuelCategory::Electric), Some(5_000));

        let akmola = table.get("KZ-AKM").unwrap();
        assert_eq!(akmola.display_name, "Akmola");
        assert_eq!(akmola.vehicle_count, 180_000);
        assert_eq!(akmola.population, 750_000);
    }
}
