#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditModeEvent {
    OpenAreaEditor,
    OpenTrackEditor,
    StartAddArea,
    FinishAddArea,
    CancelAddArea,
}

impl EditModeEvent {
    pub const ALL: [Self; 5] = [
        Self::OpenAreaEditor,
        Self::OpenTrackEditor,
        Self::StartAddArea,
        Self::FinishAddArea,
        Self::CancelAddArea,
    ];
}
