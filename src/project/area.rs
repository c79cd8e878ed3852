use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{self, VertexMap, WorldPoint};

/// Axle direction change applied when a vehicle enters the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxleMode {
    #[default]
    NoChange,
    Up,
    Down,
}

impl AxleMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoChange => "none",
            Self::Up => "upbound",
            Self::Down => "downbound",
        }
    }

    /// Unknown tags normalize to [`AxleMode::NoChange`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "upbound" => Self::Up,
            "downbound" => Self::Down,
            _ => Self::NoChange,
        }
    }
}

impl From<String> for AxleMode {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<AxleMode> for String {
    fn from(value: AxleMode) -> Self {
        value.as_str().to_string()
    }
}

/// A named polygon over shared vertices plus its track metadata.
///
/// Values are treated as immutable once stored; edits build a new polygon
/// through `editor::commands` and replace the map entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaPolygon {
    pub vertexes: Vec<String>,
    pub left_vertex_inner_id: usize,
    pub axle_mode: AxleMode,
    /// User script text. Never interpreted here.
    pub callback: String,
    pub uparea: Vec<String>,
}

impl AreaPolygon {
    pub fn contains(&self, vertices: &VertexMap, point: WorldPoint) -> bool {
        geometry::is_in_area(vertices, &self.vertexes, point.x, point.z)
    }

    pub fn first_vertex(&self) -> Option<&str> {
        self.vertexes.first().map(String::as_str)
    }

    pub fn left_vertex(&self) -> Option<&str> {
        self.vertexes
            .get(self.left_vertex_inner_id)
            .map(String::as_str)
    }

    pub fn has_vertex(&self, vertex_id: &str) -> bool {
        self.vertexes.iter().any(|id| id == vertex_id)
    }

    pub fn has_uparea(&self, area_id: &str) -> bool {
        self.uparea.iter().any(|id| id == area_id)
    }
}

pub type AreaMap = IndexMap<String, Rc<AreaPolygon>>;
