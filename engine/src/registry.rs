//! Authoritative division feature store.
//!
//! The engine owns the boundary features and pushes snapshots to the
//! map surface, instead of reading feature data back out of the
//! rendering engine's source internals.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wardmap_shared::{Bounds, DivisionId, LngLat};

use crate::error::EngineError;
use crate::surface::MapSurface;

/// One division boundary: a single outer ring plus the derived count.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionFeature {
    pub id: DivisionId,
    pub ring: Vec<LngLat>,
    pub count: u64,
}

/// All division boundaries for the session, indexed by identifier.
/// Built once from the static boundary dataset; counts are refreshed
/// whenever new aggregate data arrives.
#[derive(Debug, Clone, Default)]
pub struct DivisionRegistry {
    features: BTreeMap<DivisionId, DivisionFeature>,
}

impl DivisionRegistry {
    /// Parse the boundary dataset: a GeoJSON-subset FeatureCollection
    /// with one Polygon feature per division, identified by a compact
    /// `DIVISION_NUM` property. Features with a malformed identifier
    /// or without a usable polygon ring are skipped with a warning.
    pub fn from_geojson(raw: &str) -> Result<Self, EngineError> {
        let collection: RawCollection =
            serde_json::from_str(raw).map_err(|e| EngineError::InvalidBoundary(e.to_string()))?;

        let mut features = BTreeMap::new();
        for feature in collection.features {
            let Some(raw_id) = feature.properties.division_num.as_deref() else {
                warn!("skipping boundary feature without an identifier");
                continue;
            };
            let id = match DivisionId::parse(raw_id) {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "skipping boundary feature");
                    continue;
                }
            };
            let Some(ring) = feature.geometry.as_ref().and_then(RawGeometry::outer_ring) else {
                warn!(division = %id, "skipping boundary feature without a polygon ring");
                continue;
            };
            features.insert(id, DivisionFeature { id, ring, count: 0 });
        }
        Ok(Self { features })
    }

    /// Load the boundary dataset from its static resource path.
    pub fn from_geojson_path(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidBoundary(format!("{}: {e}", path.display())))?;
        Self::from_geojson(&raw)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: DivisionId) -> Option<&DivisionFeature> {
        self.features.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DivisionFeature> {
        self.features.values()
    }

    /// Refresh the derived counts. Divisions absent from `stats` are
    /// zeroed, not left stale.
    pub fn apply_counts(&mut self, stats: &HashMap<DivisionId, u64>) {
        for feature in self.features.values_mut() {
            feature.count = stats.get(&feature.id).copied().unwrap_or(0);
        }
    }

    /// Union of the vertex bounds of the named divisions. `None` when
    /// none of them is registered.
    pub fn bounds_of(&self, ids: &[DivisionId]) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for id in ids {
            let Some(feature) = self.features.get(id) else {
                continue;
            };
            for &point in &feature.ring {
                match bounds.as_mut() {
                    Some(b) => b.extend(point),
                    None => bounds = Some(Bounds::of(point)),
                }
            }
        }
        bounds
    }

    /// Snapshot in the wire shape the map surface consumes.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: self
                .features
                .values()
                .map(|feature| Feature {
                    kind: "Feature".to_string(),
                    properties: FeatureProperties {
                        division_num: feature.id.compact(),
                        count: feature.count,
                    },
                    geometry: Geometry {
                        kind: "Polygon".to_string(),
                        coordinates: vec![feature.ring.clone()],
                    },
                })
                .collect(),
        }
    }

    /// Push the current snapshot to the surface.
    pub fn push_to<S: MapSurface>(&self, surface: &mut S) {
        surface.set_division_data(&self.feature_collection());
    }
}

/// GeoJSON-like FeatureCollection pushed to the map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    #[serde(rename = "DIVISION_NUM")]
    pub division_num: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<LngLat>>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: RawProperties,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Default, Deserialize)]
struct RawProperties {
    #[serde(rename = "DIVISION_NUM", default)]
    division_num: Option<String>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

impl RawGeometry {
    fn outer_ring(&self) -> Option<Vec<LngLat>> {
        if self.kind != "Polygon" {
            return None;
        }
        let rings: Vec<Vec<LngLat>> = serde_json::from_value(self.coordinates.clone()).ok()?;
        rings.into_iter().next().filter(|ring| ring.len() >= 3)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::DivisionRegistry;
    use wardmap_shared::DivisionId;

    const SAMPLE_BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"DIVISION_NUM": "0102"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"DIVISION_NUM": "0205"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"DIVISION_NUM": "bogus!"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[9.0, 9.0], [9.5, 9.0], [9.5, 9.5], [9.0, 9.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"DIVISION_NUM": "0301"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]]
                }
            }
        ]
    }"#;

    fn division(id: &str) -> DivisionId {
        DivisionId::parse(id).expect("test division should parse")
    }

    #[test]
    fn parses_polygons_and_skips_unusable_features() {
        let registry =
            DivisionRegistry::from_geojson(SAMPLE_BOUNDARIES).expect("sample should parse");
        assert_eq!(registry.len(), 2);
        assert!(registry.get(division("0102")).is_some());
        assert!(registry.get(division("0205")).is_some());
        assert!(registry.get(division("0301")).is_none());
    }

    #[test]
    fn rejects_non_geojson_input() {
        assert!(DivisionRegistry::from_geojson("not json").is_err());
    }

    #[test]
    fn missing_boundary_file_is_an_invalid_boundary_error() {
        let result = DivisionRegistry::from_geojson_path(std::path::Path::new(
            "/nonexistent/divisions.geojson",
        ));
        assert!(matches!(
            result,
            Err(crate::error::EngineError::InvalidBoundary(_))
        ));
    }

    #[test]
    fn counts_default_to_zero_and_refresh_in_lockstep() {
        let mut registry =
            DivisionRegistry::from_geojson(SAMPLE_BOUNDARIES).expect("sample should parse");
        assert_eq!(registry.get(division("0102")).expect("registered").count, 0);

        let stats: HashMap<DivisionId, u64> = [(division("0102"), 7)].into_iter().collect();
        registry.apply_counts(&stats);
        assert_eq!(registry.get(division("0102")).expect("registered").count, 7);
        // Absent from the new stats: zeroed, not stale.
        assert_eq!(registry.get(division("0205")).expect("registered").count, 0);

        registry.apply_counts(&HashMap::new());
        assert_eq!(registry.get(division("0102")).expect("registered").count, 0);
    }

    #[test]
    fn bounds_union_spans_all_requested_divisions() {
        let registry =
            DivisionRegistry::from_geojson(SAMPLE_BOUNDARIES).expect("sample should parse");
        let bounds = registry
            .bounds_of(&[division("0102"), division("0205"), division("99-99")])
            .expect("two registered divisions should produce bounds");
        assert_eq!(
            (bounds.west, bounds.south, bounds.east, bounds.north),
            (0.0, 0.0, 3.0, 3.0)
        );

        assert!(registry.bounds_of(&[division("99-99")]).is_none());
        assert!(registry.bounds_of(&[]).is_none());
    }

    #[test]
    fn feature_collection_carries_compact_ids_and_counts() {
        let mut registry =
            DivisionRegistry::from_geojson(SAMPLE_BOUNDARIES).expect("sample should parse");
        let stats: HashMap<DivisionId, u64> = [(division("0205"), 12)].into_iter().collect();
        registry.apply_counts(&stats);

        let json =
            serde_json::to_value(registry.feature_collection()).expect("snapshot should serialize");
        assert_eq!(json["type"], "FeatureCollection");
        let features = json["features"].as_array().expect("features array");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["DIVISION_NUM"], "0102");
        assert_eq!(features[0]["properties"]["count"], 0);
        assert_eq!(features[1]["properties"]["DIVISION_NUM"], "0205");
        assert_eq!(features[1]["properties"]["count"], 12);
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
    }
}
