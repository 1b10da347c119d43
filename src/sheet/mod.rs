//! Palette-indexed spritesheet model
//!
//! The heart of the editor: a loaded sheet image becomes a [`Palette`]
//! plus a full-sheet [`IndexGrid`] store; the editable [`EditSession`]
//! canvas is a window into that store (one animation frame, or the whole
//! sheet), kept in sync by committing before every window move.
//!
//! ## Overview
//!
//! - **Palette**: deterministic index <-> RGBA mapping, rebuilt per load
//! - **IndexGrid**: index grid with clipped frame-window extract/commit
//! - **SheetAnimation**: per-animation geometry and timing from metadata
//! - **EditHistory**: bounded undo/redo of canvas snapshots
//! - **EditSession**: the session object the tick loop owns and drives

mod animation;
mod codec;
mod history;
mod palette;
mod session;
mod store;

pub use animation::{SheetAnimation, DEFAULT_FRAME_WAIT};
pub use codec::{load_sheet, save_sheet, SheetError};
pub use history::{EditHistory, HISTORY_CAPACITY};
pub use palette::{Palette, Rgba};
pub use session::EditSession;
pub use store::IndexGrid;
