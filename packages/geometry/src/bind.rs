//! Join-key binding of table regions to boundary features.

use fleet_map_fleet_models::{RegionRecord, RegionTable};

use crate::features::{BoundaryFeature, FeatureSet};

/// A table region joined to its boundary feature.
#[derive(Debug, Clone)]
pub struct BoundRegion<'a> {
    /// The table row.
    pub record: &'a RegionRecord,
    /// The matched boundary feature.
    pub feature: &'a BoundaryFeature,
}

/// Binds table regions to features by exact join-key match, trying the
/// region id first and the display name second.
///
/// Binding is best-effort: unmatched regions are dropped from the result
/// with a debug log. An empty result tells the caller to fall back rather
/// than fail.
#[must_use]
pub fn bind_regions<'a>(features: &'a FeatureSet, table: &'a RegionTable) -> Vec<BoundRegion<'a>> {
    let mut bound = Vec::new();
    for record in table.records() {
        let feature = features
            .find(&record.region_id)
            .or_else(|| features.find(&record.display_name));

        match feature {
            Some(feature) => bound.push(BoundRegion { record, feature }),
            None => log::debug!(
                "No boundary feature for region {} ({})",
                record.region_id,
                record.display_name
            ),
        }
    }
    bound
}
