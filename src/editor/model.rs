use std::rc::Rc;

use serde_json::Value;

use crate::config::EditorConfig;
use crate::geometry::{VertexMap, WorldPoint, DEFAULT_PICK_THRESHOLD};
use crate::project::{AreaMap, AreaPolygon, NtracsTrack, ProjectExport, TrackMap};
use crate::state::EditMode;

const DEFAULT_SNAP_SUBDIVISIONS: u32 = 10;

/// Pointer tuning the reducer reads for stage interactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSettings {
    pub hover_threshold: f64,
    pub merge_threshold: f64,
    /// Drag snapping grid is `1 / snap_subdivisions` world units.
    pub snap_subdivisions: u32,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            hover_threshold: DEFAULT_PICK_THRESHOLD,
            merge_threshold: DEFAULT_PICK_THRESHOLD,
            snap_subdivisions: DEFAULT_SNAP_SUBDIVISIONS,
        }
    }
}

impl From<&EditorConfig> for StageSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            hover_threshold: config.hover_threshold,
            merge_threshold: config.merge_threshold,
            snap_subdivisions: config.snap_subdivisions,
        }
    }
}

/// Complete editor state tree.
///
/// Collections sit behind `Rc` so a reducer step only copies what it
/// touches; see [`EditorState::same_as`].
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub(crate) vertexes: Rc<VertexMap>,
    pub(crate) areas: Rc<AreaMap>,
    pub(crate) tile_assign: Rc<VertexMap>,
    pub(crate) addon_list: Rc<Vec<String>>,
    pub(crate) origin: WorldPoint,
    pub(crate) vehicles: Rc<Vec<Value>>,
    pub(crate) swtracks: Rc<Vec<Value>>,
    pub(crate) nttracks: Rc<TrackMap>,
    pub(crate) nearest_vertex: Option<String>,
    pub(crate) selected_area: Option<String>,
    pub(crate) selected_track: Option<String>,
    pub(crate) track_chain_select_enabled: bool,
    pub(crate) preview_area_id: Option<String>,
    pub(crate) preview_track_id: Option<String>,
    pub(crate) edit_mode: EditMode,
}

fn same_rc<T: PartialEq>(left: &Rc<T>, right: &Rc<T>) -> bool {
    Rc::ptr_eq(left, right) || left == right
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertexes(&self) -> &VertexMap {
        &self.vertexes
    }

    pub fn areas(&self) -> &AreaMap {
        &self.areas
    }

    pub fn nttracks(&self) -> &TrackMap {
        &self.nttracks
    }

    pub fn tile_assign(&self) -> &VertexMap {
        &self.tile_assign
    }

    pub fn addon_list(&self) -> &[String] {
        &self.addon_list
    }

    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    pub fn vehicles(&self) -> &[Value] {
        &self.vehicles
    }

    pub fn swtracks(&self) -> &[Value] {
        &self.swtracks
    }

    pub fn nearest_vertex(&self) -> Option<&str> {
        self.nearest_vertex.as_deref()
    }

    pub fn selected_area(&self) -> Option<&str> {
        self.selected_area.as_deref()
    }

    pub fn selected_track(&self) -> Option<&str> {
        self.selected_track.as_deref()
    }

    pub fn track_chain_select_enabled(&self) -> bool {
        self.track_chain_select_enabled
    }

    pub fn preview_area_id(&self) -> Option<&str> {
        self.preview_area_id.as_deref()
    }

    pub fn preview_track_id(&self) -> Option<&str> {
        self.preview_track_id.as_deref()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn area(&self, area_id: &str) -> Option<&AreaPolygon> {
        self.areas.get(area_id).map(Rc::as_ref)
    }

    pub fn track(&self, track_id: &str) -> Option<&NtracsTrack> {
        self.nttracks.get(track_id).map(Rc::as_ref)
    }

    /// The selected polygon, if the selection still resolves.
    pub fn selected_area_polygon(&self) -> Option<&AreaPolygon> {
        self.selected_area().and_then(|id| self.area(id))
    }

    pub fn selected_ntracs_track(&self) -> Option<&NtracsTrack> {
        self.selected_track().and_then(|id| self.track(id))
    }

    /// Detached copy of the collections the project encoder writes out.
    pub fn export(&self) -> ProjectExport {
        ProjectExport {
            vertexes: VertexMap::clone(&self.vertexes),
            areas: self
                .areas
                .iter()
                .map(|(id, area)| (id.clone(), AreaPolygon::clone(area)))
                .collect(),
            addons: self.addon_list.to_vec(),
            tile_assign: VertexMap::clone(&self.tile_assign),
            nttracks: self
                .nttracks
                .iter()
                .map(|(id, track)| (id.clone(), NtracsTrack::clone(track)))
                .collect(),
            origin: self.origin,
        }
    }

    /// Value equality that short-circuits on shared collections.
    pub fn same_as(&self, other: &Self) -> bool {
        same_rc(&self.vertexes, &other.vertexes)
            && same_rc(&self.areas, &other.areas)
            && same_rc(&self.tile_assign, &other.tile_assign)
            && same_rc(&self.addon_list, &other.addon_list)
            && self.origin == other.origin
            && same_rc(&self.vehicles, &other.vehicles)
            && same_rc(&self.swtracks, &other.swtracks)
            && same_rc(&self.nttracks, &other.nttracks)
            && self.nearest_vertex == other.nearest_vertex
            && self.selected_area == other.selected_area
            && self.selected_track == other.selected_track
            && self.track_chain_select_enabled == other.track_chain_select_enabled
            && self.preview_area_id == other.preview_area_id
            && self.preview_track_id == other.preview_track_id
            && self.edit_mode == other.edit_mode
    }

    pub(crate) fn vertexes_mut(&mut self) -> &mut VertexMap {
        Rc::make_mut(&mut self.vertexes)
    }

    pub(crate) fn areas_mut(&mut self) -> &mut AreaMap {
        Rc::make_mut(&mut self.areas)
    }

    pub(crate) fn nttracks_mut(&mut self) -> &mut TrackMap {
        Rc::make_mut(&mut self.nttracks)
    }

    /// Selected id plus a shared handle to its polygon.
    pub(crate) fn selected_area_entry(&self) -> Option<(String, Rc<AreaPolygon>)> {
        let id = self.selected_area.as_ref()?;
        let area = self.areas.get(id)?;
        Some((id.clone(), Rc::clone(area)))
    }

    pub(crate) fn selected_track_entry(&self) -> Option<(String, Rc<NtracsTrack>)> {
        let id = self.selected_track.as_ref()?;
        let track = self.nttracks.get(id)?;
        Some((id.clone(), Rc::clone(track)))
    }
}
