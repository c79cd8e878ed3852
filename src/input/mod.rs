mod stage;

pub use stage::{
    resolve_stage_primary_down, resolve_stage_secondary_down, StagePrimaryAction,
    StagePrimaryDownContext, StageSecondaryAction,
};
