use std::cell::RefCell;
use std::rc::Rc;

use super::{reduce_with, EditorAction, EditorState, StageSettings};
use crate::geometry::WorldPoint;
use crate::project::{ProjectExport, ProjectSnapshot};
use crate::state::EditModeEvent;

pub type EditorSubscriber = Rc<dyn Fn(&EditorState)>;

/// Single-writer owner of the editor state.
///
/// Listeners run synchronously after every dispatch that produced a new
/// state, and never for no-op actions.
pub struct EditorStore {
    state: RefCell<Rc<EditorState>>,
    settings: StageSettings,
    subscribers: Rc<RefCell<Vec<EditorSubscriber>>>,
}

/// Keeps a listener registered until dropped or [`unsubscribe`d](Self::unsubscribe).
#[must_use = "dropping the subscription unregisters the listener"]
pub struct EditorSubscription {
    subscriber: EditorSubscriber,
    subscribers: Rc<RefCell<Vec<EditorSubscriber>>>,
}

impl EditorSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for EditorSubscription {
    fn drop(&mut self) {
        self.subscribers
            .borrow_mut()
            .retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorStore")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl EditorStore {
    pub fn new() -> Self {
        Self::with_settings(StageSettings::default())
    }

    pub fn with_settings(settings: StageSettings) -> Self {
        Self {
            state: RefCell::new(Rc::new(EditorState::new())),
            settings,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Current snapshot. Holding it never blocks later dispatches.
    pub fn state(&self) -> Rc<EditorState> {
        Rc::clone(&self.state.borrow())
    }

    pub fn settings(&self) -> StageSettings {
        self.settings
    }

    pub fn subscribe(&self, listener: impl Fn(&EditorState) + 'static) -> EditorSubscription {
        let subscriber: EditorSubscriber = Rc::new(listener);
        self.subscribers.borrow_mut().push(Rc::clone(&subscriber));
        EditorSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    /// Runs `action` through the reducer. Returns whether the state changed.
    pub fn dispatch(&self, action: EditorAction) -> bool {
        let current = self.state();
        let next = reduce_with(&current, action, &self.settings);
        if Rc::ptr_eq(&current, &next) {
            return false;
        }

        *self.state.borrow_mut() = Rc::clone(&next);
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&next);
        }
        true
    }

    /// Loads a project. The store keeps its own copy of `data`.
    pub fn hydrate_project(&self, data: &ProjectSnapshot) -> bool {
        self.dispatch(EditorAction::HydrateProject(Box::new(data.clone())))
    }

    pub fn export_project(&self) -> ProjectExport {
        self.state.borrow().export()
    }

    pub fn send_mode_event(&self, event: EditModeEvent) -> bool {
        self.dispatch(EditorAction::SendModeEvent(event))
    }

    pub fn set_nearest_vertex(&self, vertex_id: Option<&str>) -> bool {
        self.dispatch(EditorAction::SetNearestVertex(vertex_id.map(str::to_owned)))
    }

    pub fn set_selected_area(&self, area_id: Option<&str>) -> bool {
        self.dispatch(EditorAction::SetSelectedArea(area_id.map(str::to_owned)))
    }

    pub fn set_selected_track(&self, track_id: Option<&str>) -> bool {
        self.dispatch(EditorAction::SetSelectedTrack(track_id.map(str::to_owned)))
    }

    pub fn set_track_chain_select_enabled(&self, enabled: bool) -> bool {
        self.dispatch(EditorAction::SetTrackChainSelectEnabled(enabled))
    }

    pub fn set_preview_area(&self, area_id: Option<&str>) -> bool {
        self.dispatch(EditorAction::SetPreviewArea(area_id.map(str::to_owned)))
    }

    pub fn set_preview_track(&self, track_id: Option<&str>) -> bool {
        self.dispatch(EditorAction::SetPreviewTrack(track_id.map(str::to_owned)))
    }

    pub fn create_area(&self) -> bool {
        self.dispatch(EditorAction::CreateArea)
    }

    pub fn insert_vertex_between(&self, index: usize) -> bool {
        self.dispatch(EditorAction::InsertVertexBetween { index })
    }

    pub fn remove_vertex_from_selected_area(&self, index: usize) -> bool {
        self.dispatch(EditorAction::RemoveVertexFromSelectedArea { index })
    }

    pub fn delete_selected_area(&self) -> bool {
        self.dispatch(EditorAction::DeleteSelectedArea)
    }

    pub fn update_selected_area_lua(&self, callback: impl Into<String>) -> bool {
        self.dispatch(EditorAction::UpdateSelectedAreaLua {
            callback: callback.into(),
        })
    }

    pub fn add_selected_area_uparea(&self, uparea: impl Into<String>) -> bool {
        self.dispatch(EditorAction::AddSelectedAreaUparea {
            uparea: uparea.into(),
        })
    }

    pub fn remove_selected_area_uparea(&self, uparea: impl Into<String>) -> bool {
        self.dispatch(EditorAction::RemoveSelectedAreaUparea {
            uparea: uparea.into(),
        })
    }

    pub fn set_selected_area_left_vertex(&self, vertex_id: impl Into<String>) -> bool {
        self.dispatch(EditorAction::SetSelectedAreaLeftVertex {
            vertex_id: vertex_id.into(),
        })
    }

    pub fn create_track(&self, track_id: impl Into<String>) -> bool {
        self.dispatch(EditorAction::CreateTrack {
            track_id: track_id.into(),
        })
    }

    pub fn delete_selected_track(&self) -> bool {
        self.dispatch(EditorAction::DeleteSelectedTrack)
    }

    pub fn add_selected_area_to_track(&self) -> bool {
        self.dispatch(EditorAction::AddSelectedAreaToTrack)
    }

    pub fn append_area_to_selected_track(&self, area_id: impl Into<String>) -> bool {
        self.dispatch(EditorAction::AppendAreaToSelectedTrackById {
            area_id: area_id.into(),
        })
    }

    pub fn clear_selected_track(&self) -> bool {
        self.dispatch(EditorAction::ClearSelectedTrack)
    }

    pub fn remove_track_area(&self, index: usize) -> bool {
        self.dispatch(EditorAction::RemoveTrackArea { index })
    }

    pub fn move_track_area(&self, from_index: usize, to_index: usize) -> bool {
        self.dispatch(EditorAction::MoveTrackArea {
            from_index,
            to_index,
        })
    }

    pub fn stage_pointer_move(&self, point: WorldPoint, dragging: bool) -> bool {
        self.dispatch(EditorAction::StagePointerMove { point, dragging })
    }

    pub fn stage_primary_down(&self, point: WorldPoint, shift_key: bool) -> bool {
        self.dispatch(EditorAction::StagePrimaryDown { point, shift_key })
    }

    pub fn stage_secondary_down(&self) -> bool {
        self.dispatch(EditorAction::StageSecondaryDown)
    }

    pub fn stage_primary_up(&self, ctrl_key: bool) -> bool {
        self.dispatch(EditorAction::StagePrimaryUp { ctrl_key })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::project::AreaPolygon;
    use crate::state::EditMode;

    fn hover_and_click(store: &EditorStore, x: f64, z: f64) {
        let point = WorldPoint::new(x, z);
        store.stage_pointer_move(point, false);
        store.stage_primary_down(point, false);
    }

    #[test]
    fn drawing_a_triangle_closes_on_first_vertex() {
        let store = EditorStore::new();
        assert!(store.create_area());

        let state = store.state();
        assert_eq!(state.areas().len(), 1);
        assert_eq!(state.selected_area(), Some("Area_0"));
        assert_eq!(state.edit_mode(), EditMode::AddArea);
        assert!(state.area("Area_0").expect("area exists").vertexes.is_empty());

        hover_and_click(&store, 0.0, 0.0);
        hover_and_click(&store, 10.0, 0.0);
        hover_and_click(&store, 10.0, 10.0);
        assert_eq!(store.state().edit_mode(), EditMode::AddArea);
        assert_eq!(store.state().vertexes().len(), 3);

        hover_and_click(&store, 0.0, 0.0);

        let state = store.state();
        assert_eq!(state.edit_mode(), EditMode::EditArea);
        assert_eq!(state.vertexes().len(), 3);
        assert_eq!(
            state.area("Area_0").expect("area exists").vertexes,
            vec!["v0".to_string(), "v1".to_string(), "v2".to_string()]
        );
        assert_eq!(state.selected_area(), Some("Area_0"));
    }

    #[test]
    fn shift_click_near_vertex_adds_fresh_vertex() {
        let store = EditorStore::new();
        store.create_area();
        hover_and_click(&store, 0.0, 0.0);

        let point = WorldPoint::new(0.2, 0.0);
        store.stage_pointer_move(point, false);
        assert_eq!(store.state().nearest_vertex(), Some("v0"));
        store.stage_primary_down(point, true);

        let state = store.state();
        assert_eq!(state.vertexes().len(), 2);
        assert_eq!(state.edit_mode(), EditMode::AddArea);
        assert_eq!(state.nearest_vertex(), Some("v1"));
    }

    #[test]
    fn right_click_cancels_drawing() {
        let store = EditorStore::new();
        store.create_area();
        hover_and_click(&store, 0.0, 0.0);

        assert!(store.stage_secondary_down());
        assert_eq!(store.state().edit_mode(), EditMode::EditArea);
        assert!(!store.stage_secondary_down());
    }

    #[test]
    fn deleting_one_of_two_areas_keeps_shared_vertex() {
        let mut snapshot = ProjectSnapshot::default();
        for (id, x, z) in [
            ("v0", 0.0, 0.0),
            ("v1", 4.0, 0.0),
            ("v2", 0.0, 4.0),
            ("v3", -4.0, 0.0),
        ] {
            snapshot.vertexes.insert(id.to_string(), WorldPoint::new(x, z));
        }
        snapshot.areas.insert(
            "Area_0".to_string(),
            AreaPolygon {
                vertexes: vec!["v0".into(), "v1".into(), "v2".into()],
                ..AreaPolygon::default()
            },
        );
        snapshot.areas.insert(
            "Area_1".to_string(),
            AreaPolygon {
                vertexes: vec!["v0".into(), "v2".into(), "v3".into()],
                uparea: vec!["Area_0".into()],
                ..AreaPolygon::default()
            },
        );

        let store = EditorStore::new();
        store.hydrate_project(&snapshot);
        store.set_selected_area(Some("Area_0"));
        assert!(store.delete_selected_area());

        let state = store.state();
        assert!(state.area("Area_0").is_none());
        assert!(state.vertexes().contains_key("v0"));
        assert_eq!(state.vertexes().len(), 4);
        let remaining = state.area("Area_1").expect("other area survives");
        assert_eq!(remaining.vertexes[0], "v0");
        assert!(remaining.uparea.is_empty());
        assert!(!store.delete_selected_area());
    }

    #[test]
    fn ctrl_release_merges_nearest_vertex_into_neighbour() {
        let mut snapshot = ProjectSnapshot::default();
        for (id, x, z) in [
            ("v5", 2.0, 2.0),
            ("v9", 2.3, 2.0),
            ("v1", 8.0, 2.0),
            ("v2", 8.0, 8.0),
        ] {
            snapshot.vertexes.insert(id.to_string(), WorldPoint::new(x, z));
        }
        snapshot.areas.insert(
            "Area_0".to_string(),
            AreaPolygon {
                vertexes: vec!["v1".into(), "v5".into(), "v2".into()],
                ..AreaPolygon::default()
            },
        );

        let store = EditorStore::new();
        store.hydrate_project(&snapshot);
        store.set_nearest_vertex(Some("v5"));
        assert!(store.stage_primary_up(true));

        let state = store.state();
        assert_eq!(state.nearest_vertex(), Some("v9"));
        assert!(!state.vertexes().contains_key("v5"));
        assert_eq!(
            state.area("Area_0").expect("area exists").vertexes,
            vec!["v1".to_string(), "v9".to_string(), "v2".to_string()]
        );
    }

    #[test]
    fn release_without_ctrl_or_target_changes_nothing() {
        let store = EditorStore::new();
        store.create_area();
        hover_and_click(&store, 0.0, 0.0);
        hover_and_click(&store, 5.0, 0.0);

        let before = store.state();
        assert!(!store.stage_primary_up(false));
        assert!(!store.stage_primary_up(true));
        assert!(Rc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn subscribers_only_hear_real_changes() {
        let store = EditorStore::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let subscription = store.subscribe(move |state| {
            assert_eq!(state.edit_mode(), EditMode::EditTrack);
            seen.set(seen.get() + 1);
        });

        assert!(store.send_mode_event(EditModeEvent::OpenTrackEditor));
        assert!(!store.send_mode_event(EditModeEvent::OpenTrackEditor));
        assert!(!store.set_selected_area(Some("missing")));
        assert_eq!(calls.get(), 1);

        subscription.unsubscribe();
        store.send_mode_event(EditModeEvent::OpenAreaEditor);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listener_may_read_store_during_notification() {
        let store = Rc::new(EditorStore::new());
        let observed = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&observed);
        let weak = Rc::downgrade(&store);
        let _subscription = store.subscribe(move |_| {
            if let Some(store) = weak.upgrade() {
                *sink.borrow_mut() = store.state().selected_area().map(str::to_owned);
            }
        });

        store.create_area();
        assert_eq!(observed.borrow().as_deref(), Some("Area_0"));
    }

    #[test]
    fn export_reflects_current_collections() {
        let store = EditorStore::new();
        store.create_area();
        hover_and_click(&store, 1.0, 1.0);
        store.create_track("main");

        let export = store.export_project();
        assert_eq!(export.vertexes.len(), 1);
        assert_eq!(export.areas["Area_0"].vertexes, vec!["v0".to_string()]);
        assert!(export.nttracks.contains_key("main"));
    }

    #[test]
    fn custom_settings_widen_hover_radius() {
        let store = EditorStore::with_settings(StageSettings {
            hover_threshold: 5.0,
            ..StageSettings::default()
        });
        store.create_area();
        hover_and_click(&store, 0.0, 0.0);
        store.stage_pointer_move(WorldPoint::new(3.0, 0.0), false);
        assert_eq!(store.state().nearest_vertex(), Some("v0"));
    }
}
