//! Pointer handling on the stage: hover, drag, click-to-draw and merge.

use std::rc::Rc;

use super::commands::{create_area_with_vertexes, next_vertex_name};
use super::{EditorState, StageSettings};
use crate::geometry::{find_merge_target_vertex, find_nearest_vertex, hit_test_area, WorldPoint};
use crate::input::{
    resolve_stage_primary_down, resolve_stage_secondary_down, StagePrimaryAction,
    StagePrimaryDownContext, StageSecondaryAction,
};
use crate::state::{EditMode, EditModeEvent};

impl EditorState {
    pub(super) fn stage_pointer_move(
        &mut self,
        point: WorldPoint,
        dragging: bool,
        settings: &StageSettings,
    ) {
        if dragging {
            self.move_nearest_vertex(point, settings.snap_subdivisions);
        } else {
            self.nearest_vertex =
                find_nearest_vertex(&self.vertexes, point, settings.hover_threshold)
                    .map(str::to_owned);
        }
    }

    fn move_nearest_vertex(&mut self, point: WorldPoint, snap_subdivisions: u32) {
        let Some(vertex_id) = self.nearest_vertex.clone() else {
            return;
        };
        if !self.vertexes.contains_key(&vertex_id) {
            return;
        }
        self.vertexes_mut()
            .insert(vertex_id, point.snapped(snap_subdivisions));
    }

    pub(super) fn stage_primary_down(&mut self, point: WorldPoint, shift_key: bool) {
        if self.edit_mode == EditMode::EditTrack
            && self.track_chain_select_enabled
            && self.selected_track.is_some()
        {
            self.chain_select_at(point);
            return;
        }

        let action = resolve_stage_primary_down(StagePrimaryDownContext {
            mode: self.edit_mode,
            nearest_vertex: self.nearest_vertex.as_deref(),
            selected_area_first_vertex: self
                .selected_area_polygon()
                .and_then(|area| area.first_vertex()),
            shift_key,
        });

        match action {
            StagePrimaryAction::AppendNewVertex => self.append_new_vertex_to_selected_area(point),
            StagePrimaryAction::AppendExistingVertex(vertex_id) => {
                self.append_existing_vertex_to_selected_area(vertex_id)
            }
            StagePrimaryAction::FinishAddArea => {
                self.apply_mode_event(EditModeEvent::FinishAddArea)
            }
            StagePrimaryAction::SelectArea => self.select_area_from_point(point),
            StagePrimaryAction::NoAction => {}
        }
    }

    fn chain_select_at(&mut self, point: WorldPoint) {
        match hit_test_area(&self.areas, &self.vertexes, point).map(str::to_owned) {
            Some(area_id) => {
                self.selected_area = Some(area_id.clone());
                self.append_area_to_selected_track(&area_id);
            }
            None => {
                if self.nearest_vertex.is_none() {
                    self.selected_area = None;
                }
            }
        }
    }

    fn append_new_vertex_to_selected_area(&mut self, point: WorldPoint) {
        let Some((area_id, area)) = self.selected_area_entry() else {
            return;
        };

        let vertex_id = next_vertex_name(&self.vertexes);
        self.vertexes_mut().insert(vertex_id.clone(), point);

        let mut vertexes = area.vertexes.clone();
        vertexes.push(vertex_id.clone());
        self.areas_mut()
            .insert(area_id, Rc::new(create_area_with_vertexes(&area, vertexes)));
        self.nearest_vertex = Some(vertex_id);
    }

    /// Re-picking the polygon's first vertex closes it instead of appending.
    fn append_existing_vertex_to_selected_area(&mut self, vertex_id: String) {
        let Some((area_id, area)) = self.selected_area_entry() else {
            return;
        };

        if area.first_vertex() == Some(vertex_id.as_str()) {
            self.apply_mode_event(EditModeEvent::FinishAddArea);
            return;
        }

        let mut vertexes = area.vertexes.clone();
        vertexes.push(vertex_id);
        self.areas_mut()
            .insert(area_id, Rc::new(create_area_with_vertexes(&area, vertexes)));
    }

    fn select_area_from_point(&mut self, point: WorldPoint) {
        // Grabbing a vertex of the current polygon keeps it selected.
        let nearest_in_selected =
            match (self.nearest_vertex.as_deref(), self.selected_area_polygon()) {
                (Some(nearest), Some(area)) => area.has_vertex(nearest),
                _ => false,
            };
        if nearest_in_selected {
            return;
        }

        if let Some(area_id) = hit_test_area(&self.areas, &self.vertexes, point) {
            self.selected_area = Some(area_id.to_owned());
            return;
        }

        if self.nearest_vertex.is_none() {
            self.selected_area = None;
        }
    }

    pub(super) fn stage_secondary_down(&mut self) {
        if resolve_stage_secondary_down(self.edit_mode) == StageSecondaryAction::FinishAddArea {
            self.apply_mode_event(EditModeEvent::CancelAddArea);
        }
    }

    /// Folds the nearest vertex into its closest neighbour and rewires every
    /// polygon that referenced it.
    pub(super) fn merge_nearest_vertex(&mut self, threshold: f64) {
        let Some(source) = self.nearest_vertex.clone() else {
            return;
        };
        let Some(target) =
            find_merge_target_vertex(&self.vertexes, &source, threshold).map(str::to_owned)
        else {
            return;
        };

        let updates = self
            .areas
            .iter()
            .filter(|(_, area)| area.has_vertex(&source))
            .map(|(key, area)| {
                let vertexes = area
                    .vertexes
                    .iter()
                    .map(|id| if *id == source { target.clone() } else { id.clone() })
                    .collect();
                (key.clone(), create_area_with_vertexes(area, vertexes))
            })
            .collect::<Vec<_>>();

        if !updates.is_empty() {
            let areas = self.areas_mut();
            for (key, area) in updates {
                areas.insert(key, Rc::new(area));
            }
        }
        self.vertexes_mut().shift_remove(&source);
        tracing::debug!(%source, %target, "vertex merged");
        self.nearest_vertex = Some(target);
    }
}
