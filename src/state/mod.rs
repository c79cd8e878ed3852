pub mod event;
pub mod machine;
pub mod model;

pub use event::EditModeEvent;
pub use machine::{can_transition, next_mode, transition_edit_mode};
pub use model::EditMode;
