//! Editor state tree, the reducer that evolves it, and the observable store.

pub mod commands;

mod action;
mod interaction;
mod model;
mod reducer;
mod store;

pub use action::EditorAction;
pub use model::{EditorState, StageSettings};
pub use reducer::{editor_reducer, reduce_with};
pub use store::{EditorStore, EditorSubscriber, EditorSubscription};
