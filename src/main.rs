use std::path::PathBuf;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let project_path = std::env::args_os().nth(1).map(PathBuf::from);
    ntracs_editor::run(project_path.as_deref()).context("ntracs-editor failed")
}
