//! Application state
//!
//! Aggregates the edit session, the discovered project list, the view
//! transform and the transient status message. Owned by the main loop and
//! passed by reference to each panel.

use crate::config::EditorConfig;
use crate::editor::ViewState;
use crate::project::ProjectFolder;
use crate::sheet::EditSession;

pub struct AppState {
    pub session: EditSession,
    pub config: EditorConfig,
    pub projects: Vec<ProjectFolder>,
    pub selected_project: Option<usize>,
    /// Palette index used by the paint tool
    pub selected_index: u32,
    pub view: ViewState,
    status_message: Option<(String, f64)>,
}

impl AppState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            session: EditSession::new(),
            config,
            projects: Vec::new(),
            selected_project: None,
            selected_index: 1,
            view: ViewState::new(),
            status_message: None,
        }
    }

    /// Set a status message that will be displayed for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = macroquad::time::get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if macroquad::time::get_time() < *expiry {
                return Some(msg);
            }
        }
        None
    }

    /// Open a project folder: its first sheet image plus its first
    /// metadata file
    ///
    /// A failed image load keeps the previous sheet untouched. A failed
    /// metadata load keeps the sheet and falls back to whole-sheet mode.
    pub fn open_project(&mut self, index: usize) {
        let Some(folder) = self.projects.get(index).cloned() else {
            return;
        };
        self.selected_project = Some(index);

        if let Some(image) = folder.primary_image() {
            match self.session.load_image(&image) {
                Ok(()) => {
                    println!(
                        "Loaded sheet {} ({}x{}, {} colors)",
                        image.display(),
                        self.session.store.width,
                        self.session.store.height,
                        self.session.palette.len()
                    );
                    // The previous project's animations do not describe
                    // this sheet
                    self.session.clear_animations();
                    self.view.reset();
                    self.selected_index = if self.session.palette.len() > 1 { 1 } else { 0 };
                }
                Err(e) => {
                    eprintln!("Failed to load image {}: {}", image.display(), e);
                    self.set_status(&format!("Failed to load image: {}", e), 5.0);
                    return;
                }
            }
        }

        if let Some(meta) = folder.primary_metadata() {
            match std::fs::read_to_string(&meta) {
                Ok(text) => match self.session.load_metadata(&text) {
                    Ok(count) => {
                        println!("Parsed {} animations from {}", count, meta.display());
                    }
                    Err(e) => {
                        eprintln!("Failed to parse {}: {}", meta.display(), e);
                        self.set_status(&format!("Bad animation file: {}", e), 5.0);
                    }
                },
                Err(e) => {
                    eprintln!("Failed to read {}: {}", meta.display(), e);
                    self.set_status(&format!("Failed to read metadata: {}", e), 5.0);
                }
            }
        }

        self.config.add_recent(&folder.name);
        self.config.save();
        self.set_status(&format!("Opened {}", folder.name), 3.0);
    }
}
