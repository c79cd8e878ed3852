//! Pure constructors for area and track values.
//!
//! Each function builds a new value reflecting exactly one change. Where a
//! command can be a no-op it returns `Cow::Borrowed` with the input so the
//! caller can skip the write.

mod area;
mod track;

use indexmap::IndexMap;

pub use area::{
    create_area_with_callback, create_area_with_left_vertex, create_area_with_up_areas,
    create_area_with_vertexes, create_empty_area_polygon,
};
pub use track::{create_empty_track, create_track_with_areas, move_track_area_entry};

const AREA_NAME_PREFIX: &str = "Area_";
const VERTEX_NAME_PREFIX: &str = "v";

fn next_free_name<V>(existing: &IndexMap<String, V>, prefix: &str) -> String {
    let mut index = existing.len();
    loop {
        let candidate = format!("{prefix}{index}");
        if !existing.contains_key(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Probes `Area_{n}` upward from the current area count.
pub fn next_area_name<V>(areas: &IndexMap<String, V>) -> String {
    next_free_name(areas, AREA_NAME_PREFIX)
}

/// Probes `v{n}` upward from the current vertex count.
pub fn next_vertex_name<V>(vertices: &IndexMap<String, V>) -> String {
    next_free_name(vertices, VERTEX_NAME_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_vertex_name_starts_from_collection_size() {
        let mut vertices = IndexMap::new();
        assert_eq!(next_vertex_name(&vertices), "v0");
        vertices.insert("a".to_string(), ());
        vertices.insert("b".to_string(), ());
        assert_eq!(next_vertex_name(&vertices), "v2");
    }

    #[test]
    fn next_area_name_skips_occupied_ids() {
        let mut areas = IndexMap::new();
        areas.insert("Area_1".to_string(), ());
        areas.insert("Area_2".to_string(), ());
        assert_eq!(next_area_name(&areas), "Area_3");
    }

    #[test]
    fn repeated_allocation_never_collides() {
        let mut areas = IndexMap::new();
        areas.insert("Area_0".to_string(), ());
        areas.insert("Area_4".to_string(), ());
        areas.insert("Area_3".to_string(), ());
        let mut vertices = IndexMap::new();
        vertices.insert("v1".to_string(), ());
        vertices.insert("v2".to_string(), ());

        for _ in 0..16 {
            let area = next_area_name(&areas);
            assert!(!areas.contains_key(&area), "{area} reused");
            areas.insert(area, ());

            let vertex = next_vertex_name(&vertices);
            assert!(!vertices.contains_key(&vertex), "{vertex} reused");
            vertices.insert(vertex, ());
        }
        assert_eq!(areas.len(), 19);
        assert_eq!(vertices.len(), 18);
    }
}
