use std::borrow::Cow;

use crate::project::{AreaPolygon, AxleMode};

pub fn create_empty_area_polygon() -> AreaPolygon {
    AreaPolygon {
        vertexes: Vec::new(),
        left_vertex_inner_id: 0,
        axle_mode: AxleMode::NoChange,
        callback: String::new(),
        uparea: Vec::new(),
    }
}

/// Replaces the vertex sequence. A left vertex index that no longer fits
/// falls back to 0.
pub fn create_area_with_vertexes(area: &AreaPolygon, vertexes: Vec<String>) -> AreaPolygon {
    let left_vertex_inner_id = if area.left_vertex_inner_id < vertexes.len() {
        area.left_vertex_inner_id
    } else {
        0
    };

    AreaPolygon {
        vertexes,
        left_vertex_inner_id,
        axle_mode: area.axle_mode,
        callback: area.callback.clone(),
        uparea: area.uparea.clone(),
    }
}

pub fn create_area_with_callback(area: &AreaPolygon, callback: impl Into<String>) -> AreaPolygon {
    AreaPolygon {
        callback: callback.into(),
        ..area.clone()
    }
}

pub fn create_area_with_up_areas(area: &AreaPolygon, uparea: Vec<String>) -> AreaPolygon {
    AreaPolygon {
        uparea,
        ..area.clone()
    }
}

/// Points the left vertex at `vertex_id`. Returns the input untouched when
/// the polygon does not contain that vertex.
pub fn create_area_with_left_vertex<'a>(
    area: &'a AreaPolygon,
    vertex_id: &str,
) -> Cow<'a, AreaPolygon> {
    match area.vertexes.iter().position(|id| id == vertex_id) {
        Some(index) => Cow::Owned(AreaPolygon {
            left_vertex_inner_id: index,
            ..area.clone()
        }),
        None => Cow::Borrowed(area),
    }
}
