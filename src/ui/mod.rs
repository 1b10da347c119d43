//! Immediate-mode UI plumbing for the editor shell
//!
//! Rebuilt each frame from macroquad input: a mouse snapshot, rectangle
//! layout math, and the shared theme colors. Panels draw themselves and
//! report clicks back as actions; there is no retained widget state.
//!
//! Note: some helpers are kept for panels that do not use them yet.

#![allow(dead_code)]

mod rect;

pub use rect::Rect;

use macroquad::prelude::*;

// Theme colors shared by every panel
pub const BACKGROUND: Color = Color::new(0.08, 0.08, 0.09, 1.0);
pub const PANEL_BG: Color = Color::new(0.18, 0.18, 0.20, 1.0);
pub const PANEL_DARK: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const BUTTON_BG: Color = Color::new(0.24, 0.24, 0.27, 1.0);
pub const TEXT_COLOR: Color = Color::new(0.85, 0.85, 0.85, 1.0);
pub const TEXT_DIM: Color = Color::new(0.55, 0.55, 0.55, 1.0);
pub const ACCENT_COLOR: Color = Color::new(0.28, 0.51, 0.71, 1.0);
pub const WARN_COLOR: Color = Color::new(0.85, 0.45, 0.40, 1.0);
pub const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.1);

/// Mouse state sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,
    pub left_released: bool,
    pub right_down: bool,
    pub right_pressed: bool,
    pub right_released: bool,
    pub middle_down: bool,
    pub middle_pressed: bool,
    /// Scroll wheel delta
    pub scroll: f32,
}

impl MouseState {
    /// Sample macroquad's event-based mouse input for this frame
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            right_released: is_mouse_button_released(MouseButton::Right),
            middle_down: is_mouse_button_down(MouseButton::Middle),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Draw a labeled button, returning true when it was clicked this frame
pub fn button(rect: Rect, label: &str, mouse: &MouseState) -> bool {
    let hovered = mouse.inside(&rect);
    let bg = if hovered { ACCENT_COLOR } else { BUTTON_BG };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);

    let dims = measure_text(label, None, 16, 1.0);
    draw_text(
        label,
        rect.center_x() - dims.width * 0.5,
        rect.center_y() + dims.height * 0.5,
        16.0,
        TEXT_COLOR,
    );

    mouse.clicked(&rect)
}
