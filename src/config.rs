//! Editor configuration persisted between runs
//!
//! Stored as RON in the user's config directory. Loading is best-effort:
//! a missing or unreadable file falls back to defaults, and save failures
//! are silently ignored (losing a preference is not worth an error path).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Most recently opened projects kept in the config
pub const MAX_RECENT_PROJECTS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Base directory scanned for project folders
    pub projects_dir: PathBuf,
    pub recent_projects: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("."),
            recent_projects: Vec::new(),
        }
    }
}

impl EditorConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pixelstrip").join("config.ron"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|text| ron::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(text) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new()) {
            let _ = std::fs::write(&path, text);
        }
    }

    /// Move a project name to the front of the recent list
    pub fn add_recent(&mut self, name: &str) {
        self.recent_projects.retain(|p| p != name);
        self.recent_projects.insert(0, name.to_string());
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }
}
