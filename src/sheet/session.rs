//! The editing session
//!
//! One [`EditSession`] owns everything a loaded sheet needs: the palette,
//! the full-sheet store, the live canvas, the animation list and selection,
//! the undo history, and playback state. The shell's tick loop owns the
//! session and drives it; nothing here touches globals.
//!
//! Synchronization invariant: the canvas is committed back into the store
//! before every animation switch, frame change (manual or playback-driven),
//! undo and redo, so edits are never silently lost. Each of those triggers
//! also writes the sheet image back to disk (`sync_frame_to_disk`), which
//! keeps the on-disk file continuously up to date for external tooling.
//! Disk failures are reported to the caller but never block navigation or
//! playback; the in-memory state is kept so the user can retry.

use std::path::{Path, PathBuf};

use crate::nxml::{self, NxmlError};

use super::animation::SheetAnimation;
use super::codec::{self, SheetError};
use super::history::EditHistory;
use super::palette::Palette;
use super::store::IndexGrid;

/// Sheet dimensions before any image is loaded
pub const DEFAULT_SHEET_WIDTH: usize = 32;
pub const DEFAULT_SHEET_HEIGHT: usize = 32;

pub struct EditSession {
    pub palette: Palette,
    /// Full-resolution sheet of palette indices
    pub store: IndexGrid,
    /// The editable grid: the active frame's window, or the whole sheet
    /// when no animations are loaded
    pub canvas: IndexGrid,
    pub animations: Vec<SheetAnimation>,
    pub current_animation: usize,
    pub current_frame: usize,
    pub history: EditHistory,
    pub is_playing: bool,
    /// Wall-clock time of the last playback advance, in seconds
    last_advance: f64,
    /// A paint/erase stroke is in progress
    painting: bool,
    /// The in-progress stroke already recorded its undo snapshot
    stroke_recorded: bool,
    pub image_path: Option<PathBuf>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            palette: Palette::default(),
            store: IndexGrid::new(DEFAULT_SHEET_WIDTH, DEFAULT_SHEET_HEIGHT),
            canvas: IndexGrid::new(DEFAULT_SHEET_WIDTH, DEFAULT_SHEET_HEIGHT),
            animations: Vec::new(),
            current_animation: 0,
            current_frame: 0,
            history: EditHistory::new(),
            is_playing: false,
            last_advance: 0.0,
            painting: false,
            stroke_recorded: false,
            image_path: None,
        }
    }

    /// The selected animation, None while the animation list is empty
    pub fn active_animation(&self) -> Option<&SheetAnimation> {
        self.animations.get(self.current_animation)
    }

    /// Load a sheet image, rebuilding the palette and store
    ///
    /// Everything is decoded and indexed before any session state changes,
    /// so a failed load leaves the previous sheet fully intact.
    pub fn load_image(&mut self, path: &Path) -> Result<(), SheetError> {
        let (palette, store) = codec::load_sheet(path)?;
        self.palette = palette;
        self.store = store;
        self.image_path = Some(path.to_path_buf());
        self.history.clear();
        self.refresh_canvas();
        Ok(())
    }

    /// Parse animation metadata and replace the animation list
    ///
    /// A parse failure leaves the current animations untouched. A
    /// successful parse may legitimately yield zero animations, which puts
    /// the editor in whole-sheet mode.
    pub fn load_metadata(&mut self, text: &str) -> Result<usize, NxmlError> {
        let root = nxml::parse(text)?;
        self.animations = SheetAnimation::parse_all(&root);
        self.current_animation = 0;
        self.current_frame = 0;
        self.history.clear();
        self.refresh_canvas();
        Ok(self.animations.len())
    }

    /// Drop all animations and return to whole-sheet editing
    pub fn clear_animations(&mut self) {
        self.animations.clear();
        self.current_animation = 0;
        self.current_frame = 0;
        self.refresh_canvas();
    }

    /// Rebuild the canvas from the store for the current selection
    pub fn refresh_canvas(&mut self) {
        match self.active_animation().cloned() {
            Some(anim) => self.canvas = self.store.extract_frame(&anim, self.current_frame),
            None => self.canvas = self.store.clone(),
        }
    }

    /// Write the canvas back into the store at the current window
    pub fn commit_canvas(&mut self) {
        match self.active_animation().cloned() {
            Some(anim) => self
                .store
                .commit_frame(&anim, self.current_frame, &self.canvas),
            None => self.store = self.canvas.clone(),
        }
    }

    /// Save the full store back to the loaded image path
    ///
    /// A no-op while no image is loaded.
    pub fn save_image(&self) -> Result<(), SheetError> {
        match &self.image_path {
            Some(path) => codec::save_sheet(path, &self.store, &self.palette),
            None => Ok(()),
        }
    }

    /// Commit the canvas and write the sheet to disk
    ///
    /// This is the single save trigger named by the editing contract: it
    /// runs after stroke release, frame navigation, animation switches,
    /// undo and redo.
    pub fn sync_frame_to_disk(&mut self) -> Result<(), SheetError> {
        self.commit_canvas();
        self.save_image()
    }

    /// Start a paint/erase stroke at a canvas cell
    pub fn begin_stroke(&mut self, x: i32, y: i32, index: u32) {
        self.painting = true;
        self.stroke_recorded = false;
        self.apply_stroke(x, y, index);
    }

    /// Extend the in-progress stroke to another cell
    pub fn stroke_to(&mut self, x: i32, y: i32, index: u32) {
        if self.painting {
            self.apply_stroke(x, y, index);
        }
    }

    /// Finish the stroke; syncs to disk when it changed anything
    pub fn end_stroke(&mut self) -> Result<(), SheetError> {
        if !self.painting {
            return Ok(());
        }
        self.painting = false;
        if self.stroke_recorded {
            self.sync_frame_to_disk()
        } else {
            Ok(())
        }
    }

    /// Set one canvas cell, recording the undo snapshot before the first
    /// actual change of the stroke
    ///
    /// Cells outside the canvas and writes of the already-present value are
    /// ignored, so dragging over painted area does not pile up snapshots.
    fn apply_stroke(&mut self, x: i32, y: i32, index: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.canvas.width || y >= self.canvas.height {
            return;
        }
        if self.canvas.get(x, y) == index {
            return;
        }
        if !self.stroke_recorded {
            self.history.record(&self.canvas);
            self.stroke_recorded = true;
        }
        self.canvas.set(x, y, index);
    }

    /// Undo the last edit; returns false when there is nothing to undo
    pub fn undo(&mut self) -> Result<bool, SheetError> {
        if self.history.undo(&mut self.canvas) {
            self.sync_frame_to_disk()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Redo the last undone edit; returns false when there is nothing to redo
    pub fn redo(&mut self) -> Result<bool, SheetError> {
        if self.history.redo(&mut self.canvas) {
            self.sync_frame_to_disk()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Switch to another animation, committing the outgoing frame first
    pub fn select_animation(&mut self, index: usize) -> Result<(), SheetError> {
        if index >= self.animations.len() || index == self.current_animation {
            return Ok(());
        }
        let saved = self.sync_frame_to_disk();
        self.current_animation = index;
        self.current_frame = 0;
        self.refresh_canvas();
        saved
    }

    /// Step the frame index by `delta`, clamped to the sequence ends
    pub fn step_frame(&mut self, delta: i32) -> Result<(), SheetError> {
        let Some(anim) = self.active_animation().cloned() else {
            return Ok(());
        };
        let last = anim.frame_count as i64 - 1;
        let target = (self.current_frame as i64 + delta as i64).clamp(0, last) as usize;
        if target == self.current_frame {
            return Ok(());
        }
        let saved = self.sync_frame_to_disk();
        self.current_frame = target;
        self.refresh_canvas();
        saved
    }

    /// Toggle playback; starting resets the advance clock to `now`
    pub fn toggle_playback(&mut self, now: f64) {
        self.is_playing = !self.is_playing;
        if self.is_playing {
            self.last_advance = now;
        }
    }

    /// Advance playback if the active animation's frame_wait has elapsed
    ///
    /// Pure wall-clock polling: the caller ticks this once per rendered
    /// frame with the current time. Returns true when a frame advanced.
    pub fn tick_playback(&mut self, now: f64) -> Result<bool, SheetError> {
        if !self.is_playing {
            return Ok(false);
        }
        let Some(anim) = self.active_animation().cloned() else {
            return Ok(false);
        };
        if now - self.last_advance < anim.frame_wait as f64 {
            return Ok(false);
        }
        let saved = self.sync_frame_to_disk();
        self.current_frame = (self.current_frame + 1) % anim.frame_count;
        self.refresh_canvas();
        self.last_advance = now;
        saved.map(|()| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::palette::Rgba;
    use image::RgbaImage;
    use tempfile::TempDir;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn write_png(path: &Path, width: u32, height: u32, pixels: &[[u8; 4]]) {
        let mut img = RgbaImage::new(width, height);
        for (i, px) in pixels.iter().enumerate() {
            img.put_pixel(i as u32 % width, i as u32 / width, image::Rgba(*px));
        }
        img.save(path).expect("write test image");
    }

    fn walk_animation(frame_count: usize) -> SheetAnimation {
        SheetAnimation {
            name: "Walk".to_string(),
            pos_x: 0,
            pos_y: 0,
            frame_width: 2,
            frame_height: 2,
            frame_count,
            frame_wait: 0.2,
        }
    }

    #[test]
    fn test_end_to_end_load_paint_undo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.png");
        // 4x4 all black with one transparent pixel at (0,0)
        let mut pixels = vec![BLACK; 16];
        pixels[0] = CLEAR;
        write_png(&path, 4, 4, &pixels);

        let mut session = EditSession::new();
        session.load_image(&path).expect("load");

        assert_eq!(session.palette.len(), 2);
        assert_eq!(session.palette.color_of(0), Rgba::TRANSPARENT);
        let original = session.store.clone();

        // One discrete edit of a previously-different value
        session.begin_stroke(1, 1, 0);
        session.end_stroke().expect("sync");
        assert!(session.history.can_undo());
        assert_eq!(session.canvas.get(1, 1), 0);

        assert!(session.undo().expect("undo"));
        assert!(!session.history.can_undo());
        assert_eq!(session.store, original);

        // The restored store windows back to the untouched corner
        let corner = session.store.extract_frame(&walk_animation(1), 0);
        assert_eq!(corner.get(0, 0), 0);
        assert_eq!(corner.get(1, 1), original.get(1, 1));
    }

    #[test]
    fn test_stroke_dirty_check_skips_noop_edits() {
        let mut session = EditSession::new();

        // Canvas starts all zero; painting zero changes nothing
        session.begin_stroke(1, 1, 0);
        session.end_stroke().expect("sync");
        assert!(!session.history.can_undo());

        // A drag across already-correct cells records exactly one snapshot
        session.begin_stroke(0, 0, 3);
        session.stroke_to(0, 0, 3);
        session.stroke_to(1, 0, 3);
        session.end_stroke().expect("sync");
        assert!(session.history.can_undo());
        assert!(session.undo().expect("undo"));
        assert!(!session.history.can_undo());
        assert_eq!(session.canvas.get(1, 0), 0);
    }

    #[test]
    fn test_redo_invalidated_by_new_edit() {
        let mut session = EditSession::new();

        session.begin_stroke(0, 0, 2);
        session.end_stroke().expect("sync");
        session.undo().expect("undo");
        assert!(session.history.can_redo());

        session.begin_stroke(1, 1, 4);
        session.end_stroke().expect("sync");
        assert!(!session.redo().expect("redo"));
        assert_eq!(session.canvas.get(1, 1), 4);
    }

    #[test]
    fn test_strokes_outside_canvas_are_ignored() {
        let mut session = EditSession::new();
        session.begin_stroke(-3, 5, 1);
        session.stroke_to(1000, 0, 1);
        session.end_stroke().expect("sync");
        assert!(!session.history.can_undo());
    }

    #[test]
    fn test_frame_navigation_commits_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("walk.png");
        // Two 2x2 frames side by side: transparent strip then red strip
        let pixels = vec![
            CLEAR, CLEAR, RED, RED, //
            CLEAR, CLEAR, RED, RED,
        ];
        write_png(&path, 4, 2, &pixels);

        let mut session = EditSession::new();
        session.load_image(&path).expect("load");
        session.animations = vec![walk_animation(2)];
        session.refresh_canvas();

        let red = session.palette.index_of(Rgba::new(255, 0, 0, 255));
        session.begin_stroke(0, 0, red);
        session.end_stroke().expect("sync");

        session.step_frame(1).expect("step");
        assert_eq!(session.current_frame, 1);
        // Canvas now shows the red frame
        assert_eq!(session.canvas.get(0, 0), red);

        // The painted pixel reached the file on disk
        let (_, reloaded) = codec::load_sheet(&path).expect("reload");
        assert_eq!(reloaded.get(0, 0), session.palette.index_of(Rgba::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_manual_step_clamps_at_sequence_ends() {
        let mut session = EditSession::new();
        session.animations = vec![walk_animation(3)];
        session.refresh_canvas();

        session.step_frame(-1).expect("step");
        assert_eq!(session.current_frame, 0);
        session.step_frame(10).expect("step");
        assert_eq!(session.current_frame, 2);
    }

    #[test]
    fn test_select_animation_commits_outgoing_frame() {
        let mut session = EditSession::new();
        let mut idle = walk_animation(1);
        idle.name = "Idle".to_string();
        idle.pos_y = 2;
        session.animations = vec![walk_animation(1), idle];
        session.refresh_canvas();

        session.begin_stroke(0, 0, 7);
        session.select_animation(1).expect("switch");

        assert_eq!(session.current_animation, 1);
        assert_eq!(session.current_frame, 0);
        // The stroke landed in the store before the window moved
        assert_eq!(session.store.get(0, 0), 7);
        assert_eq!(session.canvas.get(0, 0), 0);
    }

    #[test]
    fn test_playback_cadence() {
        let mut session = EditSession::new();
        session.animations = vec![walk_animation(4)];
        session.refresh_canvas();

        session.toggle_playback(0.0);
        assert!(session.is_playing);

        // frame_wait 0.2 ticked every 0.05: one advance per 4 ticks
        let mut advances = Vec::new();
        for tick in 1..=20 {
            let now = tick as f64 * 0.05;
            if session.tick_playback(now).expect("tick") {
                advances.push(tick);
            }
        }
        assert_eq!(advances, vec![4, 8, 12, 16, 20]);
        // 5 advances over a 4-frame loop wraps back past the start
        assert_eq!(session.current_frame, 1);
    }

    #[test]
    fn test_playback_noop_without_animation() {
        let mut session = EditSession::new();
        session.toggle_playback(0.0);
        assert!(!session.tick_playback(10.0).expect("tick"));
        assert_eq!(session.current_frame, 0);
    }

    #[test]
    fn test_failed_load_preserves_previous_sheet() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.png");
        write_png(&good, 2, 2, &[RED, RED, RED, BLACK]);

        let mut session = EditSession::new();
        session.load_image(&good).expect("load");
        let palette_before = session.palette.colors().to_vec();
        let store_before = session.store.clone();

        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"garbage").unwrap();
        assert!(session.load_image(&broken).is_err());

        assert_eq!(session.palette.colors(), &palette_before[..]);
        assert_eq!(session.store, store_before);
        assert_eq!(session.image_path.as_deref(), Some(good.as_path()));
    }

    #[test]
    fn test_metadata_load_resets_selection_and_failure_keeps_old() {
        let mut session = EditSession::new();
        let count = session
            .load_metadata(
                r#"<Sprite>
                     <RectAnimation name="Walk" frame_width="2" frame_height="2" frame_count="4"/>
                   </Sprite>"#,
            )
            .expect("metadata");
        assert_eq!(count, 1);
        assert_eq!(session.canvas.width, 2);

        session.current_frame = 2;
        assert!(session.load_metadata("<Broken").is_err());
        // Prior animations survive a parse failure
        assert_eq!(session.animations.len(), 1);
        assert_eq!(session.current_frame, 2);
    }
}
