use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AreaCollection, AreaPolygon, NtracsTrack};
use crate::geometry::{VertexMap, WorldPoint};

const AREA_ID_PREFIX: &str = "Area_";

/// Fully assembled project handed over by the loader for `hydrate-project`.
///
/// `vehicles` and `swtracks` come from addon/tile parsing and are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSnapshot {
    pub vertexes: VertexMap,
    pub areas: IndexMap<String, AreaPolygon>,
    pub tile_assign: VertexMap,
    pub addon_list: Vec<String>,
    pub origin: WorldPoint,
    pub vehicles: Vec<Value>,
    pub swtracks: Vec<Value>,
    pub nttracks: IndexMap<String, NtracsTrack>,
}

/// Save-side view of the editor state, consumed by the project encoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectExport {
    pub vertexes: VertexMap,
    pub areas: IndexMap<String, AreaPolygon>,
    pub addons: Vec<String>,
    pub tile_assign: VertexMap,
    pub nttracks: IndexMap<String, NtracsTrack>,
    pub origin: WorldPoint,
}

impl ProjectExport {
    /// Other areas sharing at least one vertex with `area_id`, first seen first.
    pub fn related_areas(&self, area_id: &str) -> Vec<String> {
        let Some(area) = self.areas.get(area_id) else {
            return Vec::new();
        };

        let mut related = IndexSet::new();
        for vertex_id in &area.vertexes {
            for (other_id, other) in &self.areas {
                if other_id != area_id && other.has_vertex(vertex_id) {
                    related.insert(other_id.clone());
                }
            }
        }
        related.into_iter().collect()
    }

    /// Drops vertices no area uses, and uparea links or track entries that
    /// point at areas which no longer exist.
    pub fn cleaned(&self) -> Self {
        let used_vertices = self
            .areas
            .values()
            .flat_map(|area| area.vertexes.iter())
            .collect::<IndexSet<_>>();

        let vertexes = self
            .vertexes
            .iter()
            .filter(|(id, _)| used_vertices.contains(id))
            .map(|(id, point)| (id.clone(), *point))
            .collect();

        let areas = self
            .areas
            .iter()
            .map(|(id, area)| {
                let uparea = area
                    .uparea
                    .iter()
                    .filter(|target| self.areas.contains_key(*target))
                    .cloned()
                    .collect();
                (id.clone(), AreaPolygon { uparea, ..area.clone() })
            })
            .collect();

        let nttracks = self
            .nttracks
            .iter()
            .map(|(id, track)| {
                let areas = track
                    .areas
                    .iter()
                    .filter(|entry| self.areas.contains_key(&entry.area_name))
                    .cloned()
                    .collect();
                (id.clone(), NtracsTrack { areas })
            })
            .collect();

        Self {
            vertexes,
            areas,
            nttracks,
            ..self.clone()
        }
    }

    /// Renames areas to `Area_0..Area_{n-1}` in map order and rewrites every
    /// reference. References to unknown areas are dropped.
    pub fn renumbered(&self) -> Self {
        let id_map = self
            .areas
            .keys()
            .enumerate()
            .map(|(index, id)| (id.as_str(), format!("{AREA_ID_PREFIX}{index}")))
            .collect::<IndexMap<_, _>>();

        let areas = self
            .areas
            .iter()
            .map(|(id, area)| {
                let uparea = area
                    .uparea
                    .iter()
                    .filter_map(|target| id_map.get(target.as_str()).cloned())
                    .collect();
                (id_map[id.as_str()].clone(), AreaPolygon { uparea, ..area.clone() })
            })
            .collect();

        let nttracks = self
            .nttracks
            .iter()
            .map(|(id, track)| {
                let areas = track
                    .areas
                    .iter()
                    .filter_map(|entry| id_map.get(entry.area_name.as_str()))
                    .map(AreaCollection::new)
                    .collect();
                (id.clone(), NtracsTrack { areas })
            })
            .collect();

        Self {
            areas,
            nttracks,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::AxleMode;

    fn area(vertexes: &[&str], uparea: &[&str]) -> AreaPolygon {
        AreaPolygon {
            vertexes: vertexes.iter().map(|id| (*id).to_string()).collect(),
            uparea: uparea.iter().map(|id| (*id).to_string()).collect(),
            ..AreaPolygon::default()
        }
    }

    fn track(areas: &[&str]) -> NtracsTrack {
        NtracsTrack {
            areas: areas.iter().copied().map(AreaCollection::new).collect(),
        }
    }

    fn sample_export() -> ProjectExport {
        let mut export = ProjectExport::default();
        for (id, x) in [("v0", 0.0), ("v1", 1.0), ("v2", 2.0), ("v3", 3.0), ("orphan", 9.0)] {
            export.vertexes.insert(id.to_string(), WorldPoint::new(x, 0.0));
        }
        export
            .areas
            .insert("Area_3".into(), area(&["v0", "v1", "v2"], &["Area_7", "gone"]));
        export
            .areas
            .insert("Area_7".into(), area(&["v2", "v3", "v0"], &[]));
        export
            .areas
            .insert("lonely".into(), area(&["v3"], &[]));
        export
            .nttracks
            .insert("main".into(), track(&["Area_7", "gone", "Area_3"]));
        export
    }

    #[test]
    fn related_areas_collects_vertex_sharing_neighbours() {
        let export = sample_export();
        assert_eq!(export.related_areas("Area_3"), vec!["Area_7".to_string()]);
        assert_eq!(
            export.related_areas("Area_7"),
            vec!["Area_3".to_string(), "lonely".to_string()]
        );
        assert!(export.related_areas("missing").is_empty());
    }

    #[test]
    fn cleaned_drops_orphans_and_dangling_links() {
        let cleaned = sample_export().cleaned();

        assert!(!cleaned.vertexes.contains_key("orphan"));
        assert_eq!(cleaned.vertexes.len(), 4);
        assert_eq!(cleaned.areas["Area_3"].uparea, vec!["Area_7".to_string()]);
        assert_eq!(cleaned.nttracks["main"], track(&["Area_7", "Area_3"]));
    }

    #[test]
    fn renumbered_rewrites_area_references() {
        let renumbered = sample_export().renumbered();

        let keys = renumbered.areas.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec!["Area_0", "Area_1", "Area_2"]);
        assert_eq!(renumbered.areas["Area_0"].uparea, vec!["Area_1".to_string()]);
        assert_eq!(renumbered.nttracks["main"], track(&["Area_1", "Area_0"]));
        assert_eq!(renumbered.vertexes, sample_export().vertexes);
    }

    #[test]
    fn snapshot_deserializes_with_missing_fields() {
        let snapshot: ProjectSnapshot = serde_json::from_str(
            r#"{"vertexes":{"v0":{"x":1.0,"z":2.0}},"areas":{"Area_0":{"vertexes":["v0"]}}}"#,
        )
        .expect("snapshot should parse");

        assert_eq!(snapshot.vertexes["v0"], WorldPoint::new(1.0, 2.0));
        assert_eq!(snapshot.areas["Area_0"].axle_mode, AxleMode::NoChange);
        assert!(snapshot.nttracks.is_empty());
        assert_eq!(snapshot.origin, WorldPoint::default());
    }
}
