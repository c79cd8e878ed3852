pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod project;
pub mod state;

use std::path::Path;

pub use config::{load_editor_config, EditorConfig};
pub use editor::{EditorAction, EditorState, EditorStore, StageSettings};
pub use error::{AppError, AppResult};
pub use geometry::WorldPoint;
pub use project::{ProjectExport, ProjectSnapshot};

/// Reads a JSON-encoded [`ProjectSnapshot`] from disk.
pub fn read_project_snapshot(path: &Path) -> AppResult<ProjectSnapshot> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::ReadSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AppError::ParseSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Entrypoint used by the CLI binding.
///
/// With a snapshot path the project is hydrated into a fresh store and its
/// cleaned export is written to stdout as JSON.
pub fn run(project_path: Option<&Path>) -> AppResult<()> {
    logging::init();
    tracing::info!("starting ntracs-editor");

    let config = load_editor_config();
    let store = EditorStore::with_settings(StageSettings::from(&config));
    tracing::debug!(?config, "editor config loaded");

    let Some(path) = project_path else {
        tracing::info!("no project snapshot given; nothing to load");
        return Ok(());
    };

    let snapshot = read_project_snapshot(path)?;
    store.hydrate_project(&snapshot);

    let state = store.state();
    tracing::info!(
        path = %path.display(),
        vertices = state.vertexes().len(),
        areas = state.areas().len(),
        tracks = state.nttracks().len(),
        "project loaded"
    );

    let export = store.export_project().cleaned();
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
