//! Canvas view and editor panels
//!
//! Immediate-mode drawing plus input handling for the editable canvas:
//! checkerboard under transparency, per-cell rectangles, a pixel grid at
//! high zoom, zoom-toward-cursor and middle-drag panning, and paint/erase
//! strokes fed into the session.

mod panels;

pub use panels::{draw_animation_panel, draw_palette_bar, draw_sidebar, PanelAction, SidebarAction};

use macroquad::prelude::*;

use crate::app::AppState;
use crate::ui::{self, MouseState, Rect};

/// Screen pixels per sheet cell at zoom 1.0
pub const CELL_SIZE: f32 = 20.0;

const ZOOM_MIN: f32 = 0.05;
const ZOOM_MAX: f32 = 32.0;

/// Pan/zoom transform and in-progress interaction state for the canvas
pub struct ViewState {
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    panning: bool,
    pan_start: (f32, f32),
    pan_start_offset: (f32, f32),
    /// Palette index of the active stroke (paint or erase)
    stroke_index: Option<u32>,
    last_cell: Option<(i32, i32)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 20.0,
            offset_y: 20.0,
            panning: false,
            pan_start: (0.0, 0.0),
            pan_start_offset: (0.0, 0.0),
            stroke_index: None,
            last_cell: None,
        }
    }

    /// Back to the default transform (used when a new sheet is opened)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Convert a screen position to canvas cell coordinates
fn screen_to_cell(x: f32, y: f32, rect: &Rect, view: &ViewState) -> (i32, i32) {
    let cell = CELL_SIZE * view.zoom;
    let cx = ((x - rect.x - view.offset_x) / cell).floor() as i32;
    let cy = ((y - rect.y - view.offset_y) / cell).floor() as i32;
    (cx, cy)
}

/// Draw the canvas and handle paint/erase/pan/zoom input inside `rect`
pub fn draw_canvas_view(rect: Rect, app: &mut AppState, mouse: &MouseState) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, ui::PANEL_DARK);

    let cell = CELL_SIZE * app.view.zoom;
    let origin_x = rect.x + app.view.offset_x;
    let origin_y = rect.y + app.view.offset_y;
    let canvas_w = app.session.canvas.width as f32 * cell;
    let canvas_h = app.session.canvas.height as f32 * cell;

    draw_checkerboard(&rect, origin_x, origin_y, canvas_w, canvas_h, cell);

    // Canvas pixels; transparent cells leave the checkerboard visible
    for y in 0..app.session.canvas.height {
        for x in 0..app.session.canvas.width {
            let sx = origin_x + x as f32 * cell;
            let sy = origin_y + y as f32 * cell;
            if sx + cell < rect.x || sx > rect.right() || sy + cell < rect.y || sy > rect.bottom() {
                continue;
            }
            let color = app.session.palette.color_of(app.session.canvas.get(x, y));
            if !color.is_transparent() {
                draw_rectangle(
                    sx,
                    sy,
                    cell,
                    cell,
                    Color::from_rgba(color.r, color.g, color.b, color.a),
                );
            }
        }
    }

    // Pixel grid at high zoom
    if cell >= 4.0 {
        for x in 0..=app.session.canvas.width {
            let sx = origin_x + x as f32 * cell;
            if sx >= rect.x && sx <= rect.right() {
                let y0 = origin_y.max(rect.y);
                let y1 = (origin_y + canvas_h).min(rect.bottom());
                draw_line(sx, y0, sx, y1, 1.0, ui::GRID_LINE);
            }
        }
        for y in 0..=app.session.canvas.height {
            let sy = origin_y + y as f32 * cell;
            if sy >= rect.y && sy <= rect.bottom() {
                let x0 = origin_x.max(rect.x);
                let x1 = (origin_x + canvas_w).min(rect.right());
                draw_line(x0, sy, x1, sy, 1.0, ui::GRID_LINE);
            }
        }
    }

    draw_rectangle_lines(origin_x, origin_y, canvas_w, canvas_h, 1.0, ui::TEXT_DIM);

    handle_canvas_input(rect, app, mouse);
}

fn draw_checkerboard(rect: &Rect, x: f32, y: f32, w: f32, h: f32, cell: f32) {
    let check = (cell * 2.0).max(4.0);
    let clip_x = x.max(rect.x);
    let clip_y = y.max(rect.y);
    let end_x = (x + w).min(rect.right());
    let end_y = (y + h).min(rect.bottom());

    let first_row = ((clip_y - y) / check).floor() as i32;
    let first_col = ((clip_x - x) / check).floor() as i32;

    let mut row = first_row;
    let mut cy = y + first_row as f32 * check;
    while cy < end_y {
        let mut col = first_col;
        let mut cx = x + first_col as f32 * check;
        while cx < end_x {
            let c = if (row + col) % 2 == 0 {
                Color::new(0.25, 0.25, 0.28, 1.0)
            } else {
                Color::new(0.18, 0.18, 0.20, 1.0)
            };
            let draw_x = cx.max(clip_x);
            let draw_y = cy.max(clip_y);
            let draw_w = (cx + check).min(end_x) - draw_x;
            let draw_h = (cy + check).min(end_y) - draw_y;
            if draw_w > 0.0 && draw_h > 0.0 {
                draw_rectangle(draw_x, draw_y, draw_w, draw_h, c);
            }
            cx += check;
            col += 1;
        }
        cy += check;
        row += 1;
    }
}

fn handle_canvas_input(rect: Rect, app: &mut AppState, mouse: &MouseState) {
    let inside = mouse.inside(&rect);

    // Panning with the middle mouse button
    if inside && mouse.middle_pressed {
        app.view.panning = true;
        app.view.pan_start = (mouse.x, mouse.y);
        app.view.pan_start_offset = (app.view.offset_x, app.view.offset_y);
    }
    if app.view.panning {
        if mouse.middle_down {
            app.view.offset_x = app.view.pan_start_offset.0 + (mouse.x - app.view.pan_start.0);
            app.view.offset_y = app.view.pan_start_offset.1 + (mouse.y - app.view.pan_start.1);
        } else {
            app.view.panning = false;
        }
    }

    // Zoom toward the cursor
    if inside && mouse.scroll != 0.0 {
        let old_zoom = app.view.zoom;
        let factor = 1.08f32;
        app.view.zoom = if mouse.scroll > 0.0 {
            (app.view.zoom * factor).min(ZOOM_MAX)
        } else {
            (app.view.zoom / factor).max(ZOOM_MIN)
        };
        if app.view.zoom != old_zoom {
            let scale = app.view.zoom / old_zoom;
            let rel_x = mouse.x - rect.x;
            let rel_y = mouse.y - rect.y;
            app.view.offset_x = rel_x - (rel_x - app.view.offset_x) * scale;
            app.view.offset_y = rel_y - (rel_y - app.view.offset_y) * scale;
        }
    }

    if inside && !app.view.panning {
        let (cx, cy) = screen_to_cell(mouse.x, mouse.y, &rect, &app.view);

        // Cursor preview over the hovered cell
        let canvas = &app.session.canvas;
        if cx >= 0 && cy >= 0 && (cx as usize) < canvas.width && (cy as usize) < canvas.height {
            let cell = CELL_SIZE * app.view.zoom;
            draw_rectangle_lines(
                rect.x + app.view.offset_x + cx as f32 * cell,
                rect.y + app.view.offset_y + cy as f32 * cell,
                cell,
                cell,
                1.0,
                Color::new(1.0, 1.0, 1.0, 0.5),
            );
        }

        // Stroke start: left paints the selected color, right erases
        if mouse.left_pressed {
            app.view.stroke_index = Some(app.selected_index);
            app.view.last_cell = Some((cx, cy));
            app.session.begin_stroke(cx, cy, app.selected_index);
        } else if mouse.right_pressed {
            app.view.stroke_index = Some(0);
            app.view.last_cell = Some((cx, cy));
            app.session.begin_stroke(cx, cy, 0);
        }

        // Stroke continuation, interpolated so fast drags leave no gaps
        if let Some(index) = app.view.stroke_index {
            if mouse.left_down || mouse.right_down {
                if let Some((lx, ly)) = app.view.last_cell {
                    if (cx, cy) != (lx, ly) {
                        let steps = (cx - lx).abs().max((cy - ly).abs());
                        for i in 1..=steps {
                            let t = i as f32 / steps as f32;
                            let ix = lx + ((cx - lx) as f32 * t).round() as i32;
                            let iy = ly + ((cy - ly) as f32 * t).round() as i32;
                            app.session.stroke_to(ix, iy, index);
                        }
                        app.view.last_cell = Some((cx, cy));
                    }
                }
            }
        }
    }

    // Stroke release syncs the edit to disk, wherever the cursor ended up
    if app.view.stroke_index.is_some() && !mouse.left_down && !mouse.right_down {
        app.view.stroke_index = None;
        app.view.last_cell = None;
        if let Err(e) = app.session.end_stroke() {
            eprintln!("Save failed: {}", e);
            app.set_status(&format!("Save failed: {}", e), 5.0);
        }
    }
}
