//! National fuel mix series, 2011-2023.

use std::collections::BTreeMap;

use fleet_map_fleet_models::{FuelCategory, YearlyRecord};
use serde::{Deserialize, Serialize};

/// First year of the national series.
pub const FIRST_YEAR: u16 = 2011;

/// Last year of the national series.
pub const LAST_YEAR: u16 = 2023;

/// Raw yearly row: year, total, petrol, diesel, gas, hybrid, electric,
/// not specified.
type RawYear = (u16, u64, u64, u64, u64, u64, u64, u64);

const YEARS: &[RawYear] = &[
    (2011, 3_553_814, 3_513_098, 24_559, 2_127, 13_876, 154, 0),
    (2012, 3_642_826, 3_580_756, 31_277, 2_753, 27_908, 132, 0),
    (2013, 3_678_282, 3_613_651, 32_245, 2_781, 29_473, 132, 0),
    (2014, 4_000_109, 3_846_116, 45_945, 2_868, 46_429, 134, 58_617),
    (2015, 3_856_505, 3_667_017, 49_257, 3_474, 67_761, 785, 68_211),
    (2016, 3_845_301, 3_603_175, 53_148, 3_716, 117_298, 725, 67_239),
    (2017, 3_851_583, 3_555_485, 58_273, 3_639, 169_221, 723, 64_242),
    (2018, 3_847_981, 3_455_517, 86_840, 3_751, 236_101, 703, 65_069),
    (2019, 3_776_893, 3_362_957, 74_226, 3_623, 276_273, 613, 59_201),
    (2020, 3_870_318, 3_426_786, 75_758, 3_951, 292_437, 550, 70_836),
    (2021, 3_798_071, 3_343_736, 73_867, 3_886, 297_120, 491, 78_971),
    (2022, 3_909_559, 3_451_775, 75_982, 4_160, 322_350, 812, 54_480),
    (2023, 4_690_900, 4_107_974, 86_772, 6_782, 385_847, 7_997, 95_526),
];

/// Builds the full national series in chronological order.
#[must_use]
pub fn national_series() -> Vec<YearlyRecord> {
    YEARS
        .iter()
        .map(
            |&(year, total, petrol, diesel, gas, hybrid, electric, not_specified)| {
                let mut fuel_counts = BTreeMap::new();
                fuel_counts.insert(FuelCategory::Petrol, petrol);
                fuel_counts.insert(FuelCategory::Diesel, diesel);
                fuel_counts.insert(FuelCategory::Gas, gas);
                fuel_counts.insert(FuelCategory::Hybrid, hybrid);
                fuel_counts.insert(FuelCategory::Electric, electric);
                fuel_counts.insert(FuelCategory::NotSpecified, not_specified);

                YearlyRecord {
                    year,
                    total,
                    fuel_counts,
                }
            },
        )
        .collect()
}

/// Years of `series` within the inclusive `[from, to]` range. Either bound
/// may be omitted to leave that side open.
#[must_use]
pub fn filter_years(
    series: &[YearlyRecord],
    from: Option<u16>,
    to: Option<u16>,
) -> Vec<YearlyRecord> {
    series
        .iter()
        .filter(|record| {
            from.is_none_or(|y| record.year >= y) && to.is_none_or(|y| record.year <= y)
        })
        .cloned()
        .collect()
}

/// Headline numbers for the dashboard metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    /// First year the growth figure is measured from.
    pub first_year: u16,
    /// Year the remaining figures describe.
    pub latest_year: u16,
    /// Total registered cars in the latest year.
    pub total: u64,
    /// Fleet growth since `first_year`, in percent rounded to one decimal.
    pub growth_percent: f64,
    /// Hybrid cars in the latest year.
    pub hybrid: u64,
    /// Electric cars in the latest year.
    pub electric: u64,
}

/// Computes the headline summary over `series`. `None` when the series is
/// empty or starts from a zero total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fleet_summary(series: &[YearlyRecord]) -> Option<FleetSummary> {
    let first = series.first()?;
    let last = series.last()?;
    if first.total == 0 {
        return None;
    }

    let growth = (last.total as f64 - first.total as f64) / first.total as f64 * 100.0;

    Some(FleetSummary {
        first_year: first.year,
        latest_year: last.year,
        total: last.total,
        growth_percent: (growth * 10.0).round() / 10.0,
        hybrid: last.count(FuelCategory::Hybrid),
        electric: last.count(FuelCategory::Electric),
    })
}
