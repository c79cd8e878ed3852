use crate::geometry::WorldPoint;
use crate::project::ProjectSnapshot;
use crate::state::EditModeEvent;

/// Every state change the editor accepts. Actions whose preconditions do
/// not hold are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    HydrateProject(Box<ProjectSnapshot>),
    SetNearestVertex(Option<String>),
    SetSelectedArea(Option<String>),
    SetSelectedTrack(Option<String>),
    SetTrackChainSelectEnabled(bool),
    SetPreviewArea(Option<String>),
    SetPreviewTrack(Option<String>),
    SendModeEvent(EditModeEvent),
    CreateArea,
    InsertVertexBetween { index: usize },
    RemoveVertexFromSelectedArea { index: usize },
    DeleteSelectedArea,
    UpdateSelectedAreaLua { callback: String },
    AddSelectedAreaUparea { uparea: String },
    RemoveSelectedAreaUparea { uparea: String },
    SetSelectedAreaLeftVertex { vertex_id: String },
    CreateTrack { track_id: String },
    DeleteSelectedTrack,
    AddSelectedAreaToTrack,
    AppendAreaToSelectedTrackById { area_id: String },
    ClearSelectedTrack,
    RemoveTrackArea { index: usize },
    MoveTrackArea { from_index: usize, to_index: usize },
    StagePointerMove { point: WorldPoint, dragging: bool },
    StagePrimaryDown { point: WorldPoint, shift_key: bool },
    StageSecondaryDown,
    StagePrimaryUp { ctrl_key: bool },
}

impl EditorAction {
    /// Stable tag used in log output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HydrateProject(_) => "hydrate-project",
            Self::SetNearestVertex(_) => "set-nearest-vertex",
            Self::SetSelectedArea(_) => "set-selected-area",
            Self::SetSelectedTrack(_) => "set-selected-track",
            Self::SetTrackChainSelectEnabled(_) => "set-track-chain-select-enabled",
            Self::SetPreviewArea(_) => "set-preview-area",
            Self::SetPreviewTrack(_) => "set-preview-track",
            Self::SendModeEvent(_) => "send-mode-event",
            Self::CreateArea => "create-area",
            Self::InsertVertexBetween { .. } => "insert-vertex-between",
            Self::RemoveVertexFromSelectedArea { .. } => "remove-vertex-from-selected-area",
            Self::DeleteSelectedArea => "delete-selected-area",
            Self::UpdateSelectedAreaLua { .. } => "update-selected-area-lua",
            Self::AddSelectedAreaUparea { .. } => "add-selected-area-uparea",
            Self::RemoveSelectedAreaUparea { .. } => "remove-selected-area-uparea",
            Self::SetSelectedAreaLeftVertex { .. } => "set-selected-area-left-vertex",
            Self::CreateTrack { .. } => "create-track",
            Self::DeleteSelectedTrack => "delete-selected-track",
            Self::AddSelectedAreaToTrack => "add-selected-area-to-track",
            Self::AppendAreaToSelectedTrackById { .. } => "append-area-to-selected-track-by-id",
            Self::ClearSelectedTrack => "clear-selected-track",
            Self::RemoveTrackArea { .. } => "remove-track-area",
            Self::MoveTrackArea { .. } => "move-track-area",
            Self::StagePointerMove { .. } => "stage-pointer-move",
            Self::StagePrimaryDown { .. } => "stage-primary-down",
            Self::StageSecondaryDown => "stage-secondary-down",
            Self::StagePrimaryUp { .. } => "stage-primary-up",
        }
    }

    pub(crate) const fn is_pointer_traffic(&self) -> bool {
        matches!(self, Self::StagePointerMove { .. } | Self::SetNearestVertex(_))
    }
}
