use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::StageSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "ntracs-editor";
const APP_CONFIG_FILE: &str = "config.json";

/// Stage tuning read from `config.json`. Missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hover_threshold: f64,
    pub merge_threshold: f64,
    pub snap_subdivisions: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let settings = StageSettings::default();
        Self {
            hover_threshold: settings.hover_threshold,
            merge_threshold: settings.merge_threshold,
            snap_subdivisions: settings.snap_subdivisions,
        }
    }
}

impl EditorConfig {
    /// Replaces thresholds that would disable picking, and a zero grid.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                tracing::warn!(value, fallback, "ignoring invalid threshold in config.json");
                fallback
            }
        };

        Self {
            hover_threshold: positive(self.hover_threshold, defaults.hover_threshold),
            merge_threshold: positive(self.merge_threshold, defaults.merge_threshold),
            snap_subdivisions: if self.snap_subdivisions == 0 {
                defaults.snap_subdivisions
            } else {
                self.snap_subdivisions
            },
        }
    }
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EditorConfig::default(),
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str::<EditorConfig>(&contents)
            .map(EditorConfig::sanitized)
            .unwrap_or_else(|err| {
                tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
                EditorConfig::default()
            }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EditorConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ntracs-editor-config-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join(APP_DIR)).expect("scratch dir should be creatable");
        dir
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "ntracs-editor",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/ntracs-editor/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "ntracs-editor",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/ntracs-editor/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("ntracs-editor", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_editor_config_with(Some(Path::new("/nonexistent/ntracs")), None);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = scratch_dir("partial");
        std::fs::write(
            dir.join(APP_DIR).join(APP_CONFIG_FILE),
            r#"{ "hover_threshold": 2.5 }"#,
        )
        .expect("config should be writable");

        let config = load_editor_config_with(Some(&dir), None);
        assert_eq!(config.hover_threshold, 2.5);
        assert_eq!(config.merge_threshold, 1.0);
        assert_eq!(config.snap_subdivisions, 10);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_values_fall_back_per_field() {
        let dir = scratch_dir("invalid");
        std::fs::write(
            dir.join(APP_DIR).join(APP_CONFIG_FILE),
            r#"{ "hover_threshold": -1.0, "merge_threshold": 0.5, "snap_subdivisions": 0 }"#,
        )
        .expect("config should be writable");

        let config = load_editor_config_with(Some(&dir), None);
        assert_eq!(config.hover_threshold, 1.0);
        assert_eq!(config.merge_threshold, 0.5);
        assert_eq!(config.snap_subdivisions, 10);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn unparsable_file_yields_defaults() {
        let dir = scratch_dir("garbage");
        std::fs::write(dir.join(APP_DIR).join(APP_CONFIG_FILE), "not json")
            .expect("config should be writable");

        let config = load_editor_config_with(Some(&dir), None);
        assert_eq!(config, EditorConfig::default());
        let _ = std::fs::remove_dir_all(dir);
    }
}
