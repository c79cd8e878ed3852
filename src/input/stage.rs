use crate::state::EditMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePrimaryDownContext<'a> {
    pub mode: EditMode,
    pub nearest_vertex: Option<&'a str>,
    pub selected_area_first_vertex: Option<&'a str>,
    pub shift_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagePrimaryAction {
    AppendNewVertex,
    AppendExistingVertex(String),
    FinishAddArea,
    SelectArea,
    NoAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSecondaryAction {
    FinishAddArea,
    NoAction,
}

fn resolve_add_area_primary(context: StagePrimaryDownContext<'_>) -> StagePrimaryAction {
    let nearest = match context.nearest_vertex {
        Some(nearest) if !context.shift_key => nearest,
        _ => return StagePrimaryAction::AppendNewVertex,
    };

    if context.selected_area_first_vertex == Some(nearest) {
        return StagePrimaryAction::FinishAddArea;
    }

    StagePrimaryAction::AppendExistingVertex(nearest.to_string())
}

/// Classifies a primary click. Nothing is mutated here; the reducer acts on
/// the returned intent.
pub fn resolve_stage_primary_down(context: StagePrimaryDownContext<'_>) -> StagePrimaryAction {
    match context.mode {
        EditMode::EditArea | EditMode::EditTrack => StagePrimaryAction::SelectArea,
        EditMode::AddArea => resolve_add_area_primary(context),
    }
}

pub fn resolve_stage_secondary_down(mode: EditMode) -> StageSecondaryAction {
    match mode {
        EditMode::AddArea => StageSecondaryAction::FinishAddArea,
        EditMode::EditArea | EditMode::EditTrack => StageSecondaryAction::NoAction,
    }
}
