use std::borrow::Cow;
use std::rc::Rc;

use super::commands::{
    create_area_with_callback, create_area_with_left_vertex, create_area_with_up_areas,
    create_area_with_vertexes, create_empty_area_polygon, create_empty_track,
    create_track_with_areas, move_track_area_entry, next_area_name, next_vertex_name,
};
use super::{EditorAction, EditorState, StageSettings};
use crate::project::{AreaCollection, AreaPolygon, ProjectSnapshot};
use crate::state::{transition_edit_mode, EditMode, EditModeEvent};

/// Reduces with the default stage settings.
pub fn editor_reducer(state: &Rc<EditorState>, action: EditorAction) -> Rc<EditorState> {
    reduce_with(state, action, &StageSettings::default())
}

/// Applies `action` to a draft of `state`.
///
/// When the draft ends up equal to the input, the input `Rc` itself is
/// returned, so callers can detect "nothing changed" with `Rc::ptr_eq`.
pub fn reduce_with(
    state: &Rc<EditorState>,
    action: EditorAction,
    settings: &StageSettings,
) -> Rc<EditorState> {
    let name = action.name();
    let pointer_traffic = action.is_pointer_traffic();

    let mut draft = EditorState::clone(state);
    draft.apply(action, settings);

    let changed = !draft.same_as(state);
    if pointer_traffic {
        tracing::trace!(action = name, changed, "editor action");
    } else {
        tracing::debug!(
            action = name,
            changed,
            mode = draft.edit_mode.label(),
            "editor action"
        );
    }

    if changed {
        Rc::new(draft)
    } else {
        Rc::clone(state)
    }
}

impl EditorState {
    fn apply(&mut self, action: EditorAction, settings: &StageSettings) {
        match action {
            EditorAction::HydrateProject(snapshot) => self.hydrate(*snapshot),
            EditorAction::SetNearestVertex(vertex_id) => self.nearest_vertex = vertex_id,
            EditorAction::SetSelectedArea(area_id) => self.set_selected_area(area_id),
            EditorAction::SetSelectedTrack(track_id) => self.set_selected_track(track_id),
            EditorAction::SetTrackChainSelectEnabled(enabled) => {
                self.track_chain_select_enabled = enabled
                    && self.edit_mode == EditMode::EditTrack
                    && self.selected_track.is_some();
            }
            EditorAction::SetPreviewArea(area_id) => self.preview_area_id = area_id,
            EditorAction::SetPreviewTrack(track_id) => self.preview_track_id = track_id,
            EditorAction::SendModeEvent(event) => self.send_mode_event(event),
            EditorAction::CreateArea => self.create_area(),
            EditorAction::InsertVertexBetween { index } => self.insert_vertex_between(index),
            EditorAction::RemoveVertexFromSelectedArea { index } => {
                self.remove_vertex_from_selected_area(index)
            }
            EditorAction::DeleteSelectedArea => self.delete_selected_area(),
            EditorAction::UpdateSelectedAreaLua { callback } => {
                self.update_selected_area(|area| Some(create_area_with_callback(area, callback)))
            }
            EditorAction::AddSelectedAreaUparea { uparea } => {
                self.add_selected_area_uparea(uparea.trim())
            }
            EditorAction::RemoveSelectedAreaUparea { uparea } => {
                self.update_selected_area(|area| {
                    if !area.has_uparea(&uparea) {
                        return None;
                    }
                    let remaining = area
                        .uparea
                        .iter()
                        .filter(|target| **target != uparea)
                        .cloned()
                        .collect();
                    Some(create_area_with_up_areas(area, remaining))
                })
            }
            EditorAction::SetSelectedAreaLeftVertex { vertex_id } => {
                self.update_selected_area(|area| {
                    match create_area_with_left_vertex(area, &vertex_id) {
                        Cow::Owned(next) => Some(next),
                        Cow::Borrowed(_) => None,
                    }
                })
            }
            EditorAction::CreateTrack { track_id } => self.create_track(track_id.trim()),
            EditorAction::DeleteSelectedTrack => self.delete_selected_track(),
            EditorAction::AddSelectedAreaToTrack => {
                if let Some(area_id) = self.selected_area.clone() {
                    self.append_area_to_selected_track(&area_id);
                }
            }
            EditorAction::AppendAreaToSelectedTrackById { area_id } => {
                if !area_id.is_empty() {
                    self.append_area_to_selected_track(&area_id);
                }
            }
            EditorAction::ClearSelectedTrack => {
                if let Some((track_id, track)) = self.selected_track_entry() {
                    if !track.areas.is_empty() {
                        self.nttracks_mut()
                            .insert(track_id, Rc::new(create_empty_track()));
                    }
                }
            }
            EditorAction::RemoveTrackArea { index } => self.remove_track_area(index),
            EditorAction::MoveTrackArea {
                from_index,
                to_index,
            } => self.move_track_area(from_index, to_index),
            EditorAction::StagePointerMove { point, dragging } => {
                self.stage_pointer_move(point, dragging, settings)
            }
            EditorAction::StagePrimaryDown { point, shift_key } => {
                self.stage_primary_down(point, shift_key)
            }
            EditorAction::StageSecondaryDown => self.stage_secondary_down(),
            EditorAction::StagePrimaryUp { ctrl_key } => {
                if ctrl_key {
                    self.merge_nearest_vertex(settings.merge_threshold);
                }
            }
        }
    }

    fn hydrate(&mut self, snapshot: ProjectSnapshot) {
        let ProjectSnapshot {
            vertexes,
            areas,
            tile_assign,
            addon_list,
            origin,
            vehicles,
            swtracks,
            nttracks,
        } = snapshot;

        *self = Self {
            vertexes: Rc::new(vertexes),
            areas: Rc::new(
                areas
                    .into_iter()
                    .map(|(id, area)| (id, Rc::new(area)))
                    .collect(),
            ),
            tile_assign: Rc::new(tile_assign),
            addon_list: Rc::new(addon_list),
            origin,
            vehicles: Rc::new(vehicles),
            swtracks: Rc::new(swtracks),
            nttracks: Rc::new(
                nttracks
                    .into_iter()
                    .map(|(id, track)| (id, Rc::new(track)))
                    .collect(),
            ),
            ..Self::default()
        };
        tracing::debug!(
            vertices = self.vertexes.len(),
            areas = self.areas.len(),
            tracks = self.nttracks.len(),
            "project hydrated"
        );
    }

    fn set_selected_area(&mut self, area_id: Option<String>) {
        let accepted = match &area_id {
            Some(id) => self.areas.contains_key(id),
            None => true,
        };
        if accepted {
            self.selected_area = area_id;
        }
        self.preview_area_id = None;
    }

    fn set_selected_track(&mut self, track_id: Option<String>) {
        let accepted = match &track_id {
            Some(id) => self.nttracks.contains_key(id),
            None => true,
        };
        if accepted {
            self.selected_track = track_id;
        }
        if self.selected_track.is_none() {
            self.track_chain_select_enabled = false;
        }
    }

    pub(super) fn apply_mode_event(&mut self, event: EditModeEvent) {
        self.edit_mode = transition_edit_mode(self.edit_mode, event);
    }

    fn send_mode_event(&mut self, event: EditModeEvent) {
        self.apply_mode_event(event);
        self.preview_area_id = None;
        self.preview_track_id = None;
        if event == EditModeEvent::OpenTrackEditor || self.edit_mode != EditMode::EditTrack {
            self.track_chain_select_enabled = false;
        }
    }

    fn create_area(&mut self) {
        let area_id = next_area_name(&self.areas);
        self.areas_mut()
            .insert(area_id.clone(), Rc::new(create_empty_area_polygon()));
        self.selected_area = Some(area_id);
        self.apply_mode_event(EditModeEvent::StartAddArea);
    }

    /// Rebuilds the selected area through `build`; `None` from `build` means
    /// nothing to write.
    fn update_selected_area(
        &mut self,
        build: impl FnOnce(&AreaPolygon) -> Option<AreaPolygon>,
    ) {
        let Some((area_id, area)) = self.selected_area_entry() else {
            return;
        };
        if let Some(next) = build(&area) {
            self.areas_mut().insert(area_id, Rc::new(next));
        }
    }

    fn insert_vertex_between(&mut self, index: usize) {
        let Some((area_id, area)) = self.selected_area_entry() else {
            return;
        };
        let Some(current_id) = area.vertexes.get(index) else {
            return;
        };
        let next_id = &area.vertexes[(index + 1) % area.vertexes.len()];

        let current = self.vertexes.get(current_id);
        let next = self.vertexes.get(next_id);
        let (Some(current), Some(next)) = (current.copied(), next.copied()) else {
            return;
        };

        let vertex_id = next_vertex_name(&self.vertexes);
        self.vertexes_mut()
            .insert(vertex_id.clone(), current.midpoint(next));

        let mut vertexes = area.vertexes.clone();
        vertexes.insert(index + 1, vertex_id);
        self.areas_mut()
            .insert(area_id, Rc::new(create_area_with_vertexes(&area, vertexes)));
    }

    fn remove_vertex_from_selected_area(&mut self, index: usize) {
        self.update_selected_area(|area| {
            // Removal may never produce a polygon below three vertices.
            if area.vertexes.len() <= 3 || index >= area.vertexes.len() {
                return None;
            }
            let mut vertexes = area.vertexes.clone();
            vertexes.remove(index);
            Some(create_area_with_vertexes(area, vertexes))
        });
    }

    fn delete_selected_area(&mut self) {
        let Some(area_id) = self.selected_area.take() else {
            return;
        };

        self.areas_mut().shift_remove(&area_id);
        self.remove_area_from_uparea_links(&area_id);
        self.remove_area_from_tracks(&area_id);
        if self.preview_area_id.as_deref() == Some(area_id.as_str()) {
            self.preview_area_id = None;
        }
        tracing::debug!(area = %area_id, "area deleted");
    }

    fn remove_area_from_uparea_links(&mut self, area_id: &str) {
        let updates = self
            .areas
            .iter()
            .filter(|(_, area)| area.has_uparea(area_id))
            .map(|(key, area)| {
                let remaining = area
                    .uparea
                    .iter()
                    .filter(|target| target.as_str() != area_id)
                    .cloned()
                    .collect();
                (key.clone(), create_area_with_up_areas(area, remaining))
            })
            .collect::<Vec<_>>();
        if updates.is_empty() {
            return;
        }

        let areas = self.areas_mut();
        for (key, area) in updates {
            areas.insert(key, Rc::new(area));
        }
    }

    fn remove_area_from_tracks(&mut self, area_id: &str) {
        let updates = self
            .nttracks
            .iter()
            .filter(|(_, track)| track.contains_area(area_id))
            .map(|(key, track)| {
                let remaining = track
                    .areas
                    .iter()
                    .filter(|entry| entry.area_name != area_id)
                    .cloned()
                    .collect();
                (key.clone(), create_track_with_areas(remaining))
            })
            .collect::<Vec<_>>();
        if updates.is_empty() {
            return;
        }

        let tracks = self.nttracks_mut();
        for (key, track) in updates {
            tracks.insert(key, Rc::new(track));
        }
    }

    fn add_selected_area_uparea(&mut self, uparea: &str) {
        let Some(area_id) = self.selected_area.as_deref() else {
            return;
        };
        if uparea.is_empty() || uparea == area_id || !self.areas.contains_key(uparea) {
            tracing::debug!(area = area_id, uparea, "uparea link rejected");
            return;
        }

        self.update_selected_area(|area| {
            if area.has_uparea(uparea) {
                return None;
            }
            let mut links = area.uparea.clone();
            links.push(uparea.to_string());
            Some(create_area_with_up_areas(area, links))
        });
    }

    fn create_track(&mut self, track_id: &str) {
        if track_id.is_empty() {
            return;
        }
        if !self.nttracks.contains_key(track_id) {
            self.nttracks_mut()
                .insert(track_id.to_string(), Rc::new(create_empty_track()));
        }
        self.selected_track = Some(track_id.to_string());
    }

    fn delete_selected_track(&mut self) {
        let Some(track_id) = self.selected_track.take() else {
            return;
        };
        self.nttracks_mut().shift_remove(&track_id);
        self.track_chain_select_enabled = false;
        if self.preview_track_id.as_deref() == Some(track_id.as_str()) {
            self.preview_track_id = None;
        }
    }

    /// Appends `area_id` to the selected track unless the track or area is
    /// missing or the track already lists it.
    pub(super) fn append_area_to_selected_track(&mut self, area_id: &str) {
        if !self.areas.contains_key(area_id) {
            return;
        }
        let Some((track_id, track)) = self.selected_track_entry() else {
            return;
        };
        if track.contains_area(area_id) {
            return;
        }

        let mut entries = track.areas.clone();
        entries.push(AreaCollection::new(area_id));
        self.nttracks_mut()
            .insert(track_id, Rc::new(create_track_with_areas(entries)));
    }

    fn remove_track_area(&mut self, index: usize) {
        let Some((track_id, track)) = self.selected_track_entry() else {
            return;
        };
        if index >= track.areas.len() {
            return;
        }

        let mut entries = track.areas.clone();
        entries.remove(index);
        self.nttracks_mut()
            .insert(track_id, Rc::new(create_track_with_areas(entries)));
    }

    fn move_track_area(&mut self, from_index: usize, to_index: usize) {
        let Some((track_id, track)) = self.selected_track_entry() else {
            return;
        };
        if let Cow::Owned(entries) = move_track_area_entry(&track.areas, from_index, to_index) {
            self.nttracks_mut()
                .insert(track_id, Rc::new(create_track_with_areas(entries)));
        }
    }
}
