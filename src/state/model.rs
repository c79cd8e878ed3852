/// What a stage click currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    EditArea,
    AddArea,
    EditTrack,
}

impl EditMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EditArea => "edit-area",
            Self::AddArea => "add-area",
            Self::EditTrack => "edit-track",
        }
    }
}
