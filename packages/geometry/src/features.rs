//! GeoJSON feature collection parsing.

use fleet_map_fleet_models::Coordinates;
use geo::{Centroid, MultiPolygon};
use geojson::GeoJson;

use crate::GeometryUnavailableError;

/// One usable boundary feature: its join key, the area geometry as it
/// arrived (inlined into choropleth scenes untouched), and a precomputed
/// centroid.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// Join key read from the configured feature property.
    pub join_key: String,
    /// Polygon or `MultiPolygon` geometry.
    pub geometry: geojson::Geometry,
    /// Centroid of the area.
    pub centroid: Coordinates,
}

/// Parsed boundary features from one source payload.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: Vec<BoundaryFeature>,
}

impl FeatureSet {
    /// Wraps already-parsed features.
    #[must_use]
    pub const fn new(features: Vec<BoundaryFeature>) -> Self {
        Self { features }
    }

    /// All usable features, in payload order.
    #[must_use]
    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    /// Number of usable features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the set holds no usable features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Finds a feature by exact join key.
    #[must_use]
    pub fn find(&self, join_key: &str) -> Option<&BoundaryFeature> {
        self.features.iter().find(|f| f.join_key == join_key)
    }
}

/// Parses a GeoJSON payload into usable boundary features.
///
/// Parsing is best-effort per feature: entries missing a string
/// `join_property` or carrying non-area geometry are skipped with a debug
/// log. An empty result is valid; binding fails downstream and the render
/// falls back.
///
/// # Errors
///
/// Returns [`GeometryUnavailableError`] when the payload is not valid
/// GeoJSON or not a `FeatureCollection`.
pub fn parse_feature_collection(
    body: &str,
    join_property: &str,
) -> Result<FeatureSet, GeometryUnavailableError> {
    let geojson: GeoJson = body.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeometryUnavailableError::new(
            "payload is not a FeatureCollection",
        ));
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let join_key = feature
            .property(join_property)
            .and_then(|value| value.as_str())
            .map(str::to_string);
        let Some(join_key) = join_key else {
            log::debug!("Skipping feature without string property {join_property:?}");
            continue;
        };

        let Some(geometry) = feature.geometry else {
            log::debug!("Skipping feature {join_key:?} without geometry");
            continue;
        };

        let Some(centroid) = area_centroid(&geometry) else {
            log::debug!("Skipping feature {join_key:?}: geometry is not an area");
            continue;
        };

        features.push(BoundaryFeature {
            join_key,
            geometry,
            centroid,
        });
    }

    Ok(FeatureSet::new(features))
}

/// Centroid of a Polygon or `MultiPolygon` geometry; `None` for any other
/// geometry type or an empty area.
fn area_centroid(geometry: &geojson::Geometry) -> Option<Coordinates> {
    let geo_geometry: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    let area = match geo_geometry {
        geo::Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
        geo::Geometry::MultiPolygon(multi) => multi,
        _ => return None,
    };
    let centroid = area.centroid()?;
    Some(Coordinates::new(centroid.y(), centroid.x()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"shapeName": "Almaty City", "shapeISO": "KZ-ALA"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[66.0, 47.0], [68.0, 47.0], [68.0, 49.0], [66.0, 49.0], [66.0, 47.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"population": 123},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"shapeName": "Not An Area"},
                "geometry": {"type": "Point", "coordinates": [66.0, 47.0]}
            }
        ]
    }"#;

    #[test]
    fn parses_area_features_with_join_keys() {
        let set = parse_feature_collection(COLLECTION, "shapeName").unwrap();
        assert_eq!(set.len(), 1);

        let feature = set.find("Almaty City").unwrap();
        assert_eq!(feature.centroid, Coordinates::new(48.0, 67.0));
        assert!(set.find("Not An Area").is_none());
    }

    #[test]
    fn join_property_is_configurable() {
        let set = parse_feature_collection(COLLECTION, "shapeISO").unwrap();
        assert!(set.find("KZ-ALA").is_some());
    }

    #[test]
    fn multipolygon_features_are_kept() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"shapeName": "Two Islands"},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]],
                            [[[10.0, 0.0], [12.0, 0.0], [12.0, 2.0], [10.0, 2.0], [10.0, 0.0]]]
                        ]
                    }
                }
            ]
        }"#;

        let set = parse_feature_collection(payload, "shapeName").unwrap();
        let feature = set.find("Two Islands").unwrap();
        assert_eq!(feature.centroid, Coordinates::new(1.0, 6.0));
    }

    #[test]
    fn rejects_payloads_that_are_not_collections() {
        let err = parse_feature_collection(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#, "x")
            .unwrap_err();
        assert!(err.to_string().contains("FeatureCollection"));
    }

    #[test]
    fn rejects_invalid_geojson() {
        assert!(parse_feature_collection("not geojson at all", "shapeName").is_err());
        assert!(parse_feature_collection(r#"{"items": []}"#, "shapeName").is_err());
    }

    #[test]
    fn empty_collection_is_valid() {
        let set =
            parse_feature_collection(r#"{"type": "FeatureCollection", "features": []}"#, "x")
                .unwrap();
        assert!(set.is_empty());
    }
}
