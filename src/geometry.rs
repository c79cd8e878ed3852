//! Shared geometric primitives and spatial queries used by the editor reducer.
//!
//! Everything here is pure: lookups that hit a missing vertex id degrade to
//! "absent" instead of failing, so stale project data never breaks hit-testing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::project::AreaMap;

/// Default pick radius for hover targeting and vertex merging, in world units.
pub const DEFAULT_PICK_THRESHOLD: f64 = 1.0;

/// A position on the stage plane. The game world uses `x`/`z` for the ground.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.z + other.z) / 2.0)
    }

    /// Floors each axis onto a grid of `1 / subdivisions` world units.
    pub fn snapped(self, subdivisions: u32) -> Self {
        Self::new(
            snap_to_grid(self.x, subdivisions),
            snap_to_grid(self.z, subdivisions),
        )
    }
}

/// Vertex id to coordinate map. Iteration order is insertion order.
pub type VertexMap = IndexMap<String, WorldPoint>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    const ONE: Self = Self { re: 1.0, im: 0.0 };

    const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    /// Principal square root, which halves the argument. Written with
    /// explicit components so there is no `atan2` branch cut involved.
    fn half_arg(self) -> Self {
        let r = (self.re * self.re + self.im * self.im).sqrt();
        Self::new(
            ((self.re + r) / 2.0).max(0.0).sqrt(),
            sign(self.im) * ((-self.re + r) / 2.0).max(0.0).sqrt(),
        )
    }
}

// Unlike `f64::signum`, zero maps to zero.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn snap_to_grid(value: f64, subdivisions: u32) -> f64 {
    let steps = f64::from(subdivisions.max(1));
    (value * steps).floor() / steps
}

pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2)).sqrt()
}

/// Point-in-polygon test over the polygon described by `area_vertex_ids`.
///
/// Ids without a coordinate are dropped before edges are formed. The point
/// must first have vertices strictly on every side of it; after that each
/// edge contributes half of its subtended angle to a running complex
/// product, and the point is inside when the accumulated rotation is near
/// pi (negative real part).
pub fn is_in_area(vertices: &VertexMap, area_vertex_ids: &[String], x: f64, z: f64) -> bool {
    let resolved = area_vertex_ids
        .iter()
        .filter_map(|id| vertices.get(id))
        .copied()
        .collect::<Vec<_>>();

    let (mut left, mut below, mut right, mut above) = (false, false, false, false);
    for vertex in &resolved {
        left |= vertex.x < x;
        below |= vertex.z < z;
        right |= vertex.x > x;
        above |= vertex.z > z;
    }
    if !(left && below && right && above) {
        return false;
    }

    let count = resolved.len();
    let mut prod = Complex::ONE;
    for (index, v0) in resolved.iter().enumerate() {
        let v1 = resolved[(index + 1) % count];
        let to_next = Complex::new(v1.x - x, v1.z - z);
        let to_current_conj = Complex::new(v0.x - x, -(v0.z - z));
        prod = prod.mul(to_next.mul(to_current_conj).half_arg());
    }

    prod.re < 0.0
}

/// Returns the vertex closest to `point` strictly within `threshold`.
/// Exact ties keep the first vertex in map order.
pub fn find_nearest_vertex<'a>(
    vertices: &'a VertexMap,
    point: WorldPoint,
    threshold: f64,
) -> Option<&'a str> {
    let mut nearest = None;
    let mut nearest_distance = threshold;
    for (id, vertex) in vertices {
        let len = distance(point.x, point.z, vertex.x, vertex.z);
        if len < nearest_distance {
            nearest_distance = len;
            nearest = Some(id.as_str());
        }
    }
    nearest
}

/// Like [`find_nearest_vertex`], measured from `source_id` itself and
/// never returning it.
pub fn find_merge_target_vertex<'a>(
    vertices: &'a VertexMap,
    source_id: &str,
    threshold: f64,
) -> Option<&'a str> {
    let source = vertices.get(source_id)?;

    let mut nearest = None;
    let mut nearest_distance = threshold;
    for (id, vertex) in vertices {
        if id == source_id {
            continue;
        }
        let len = distance(source.x, source.z, vertex.x, vertex.z);
        if len < nearest_distance {
            nearest_distance = len;
            nearest = Some(id.as_str());
        }
    }
    nearest
}

/// First area in map order whose polygon contains `point`.
pub fn hit_test_area<'a>(
    areas: &'a AreaMap,
    vertices: &VertexMap,
    point: WorldPoint,
) -> Option<&'a str> {
    areas
        .iter()
        .find(|(_, area)| area.contains(vertices, point))
        .map(|(id, _)| id.as_str())
}
