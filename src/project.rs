//! Project folder discovery
//!
//! A project is an immediate subdirectory of the projects base directory
//! that contains at least one sheet image or one metadata file. The listing
//! is read once at startup (and again on explicit refresh); the editor
//! never re-scans on its own.

use std::path::{Path, PathBuf};

/// Raster image extensions the editor can open (case-insensitive)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg"];

/// Animation metadata extensions (case-insensitive)
pub const METADATA_EXTENSIONS: &[&str] = &["xml"];

/// One discovered project folder
#[derive(Debug, Clone)]
pub struct ProjectFolder {
    pub name: String,
    pub path: PathBuf,
    /// Sheet image filenames, sorted
    pub images: Vec<String>,
    /// Metadata filenames, sorted
    pub metadata: Vec<String>,
}

impl ProjectFolder {
    /// Full path of the sheet image the editor opens for this project
    pub fn primary_image(&self) -> Option<PathBuf> {
        self.images.first().map(|f| self.path.join(f))
    }

    /// Full path of the metadata file the editor opens for this project
    pub fn primary_metadata(&self) -> Option<PathBuf> {
        self.metadata.first().map(|f| self.path.join(f))
    }
}

/// Scan `base` for project folders, sorted by name
pub fn discover_projects(base: &Path) -> Vec<ProjectFolder> {
    let entries = match std::fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to scan projects dir {:?}: {}", base, e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut projects = Vec::new();
    for dir in dirs {
        let images = list_by_extension(&dir, IMAGE_EXTENSIONS);
        let metadata = list_by_extension(&dir, METADATA_EXTENSIONS);
        if images.is_empty() && metadata.is_empty() {
            continue;
        }
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        projects.push(ProjectFolder {
            name,
            path: dir,
            images,
            metadata,
        });
    }
    projects
}

/// Sorted filenames in `dir` whose extension matches one of `extensions`
fn list_by_extension(dir: &Path, extensions: &[&str]) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to read project folder {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_ascii_lowercase();
                    extensions.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_discovers_folders_with_images_or_metadata() {
        let base = TempDir::new().unwrap();

        let hero = base.path().join("hero");
        std::fs::create_dir(&hero).unwrap();
        touch(&hero.join("hero.png"));
        touch(&hero.join("hero.xml"));

        let notes = base.path().join("notes");
        std::fs::create_dir(&notes).unwrap();
        touch(&notes.join("readme.txt"));

        let slime = base.path().join("slime");
        std::fs::create_dir(&slime).unwrap();
        touch(&slime.join("slime.xml"));

        let projects = discover_projects(base.path());
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["hero", "slime"]);

        assert_eq!(projects[0].images, vec!["hero.png"]);
        assert_eq!(projects[0].metadata, vec!["hero.xml"]);
        assert!(projects[1].images.is_empty());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("caps");
        std::fs::create_dir(&dir).unwrap();
        touch(&dir.join("SHEET.PNG"));
        touch(&dir.join("Anim.Xml"));

        let projects = discover_projects(base.path());
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].images, vec!["SHEET.PNG"]);
        assert_eq!(projects[0].metadata, vec!["Anim.Xml"]);
    }

    #[test]
    fn test_file_lists_are_sorted() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("multi");
        std::fs::create_dir(&dir).unwrap();
        touch(&dir.join("b.png"));
        touch(&dir.join("a.png"));

        let projects = discover_projects(base.path());
        assert_eq!(projects[0].images, vec!["a.png", "b.png"]);
        assert_eq!(
            projects[0].primary_image(),
            Some(dir.join("a.png"))
        );
    }

    #[test]
    fn test_missing_base_dir_yields_empty() {
        let base = TempDir::new().unwrap();
        let gone = base.path().join("nope");
        assert!(discover_projects(&gone).is_empty());
    }

    #[test]
    fn test_plain_files_in_base_are_ignored() {
        let base = TempDir::new().unwrap();
        touch(&base.path().join("stray.png"));
        assert!(discover_projects(base.path()).is_empty());
    }
}
