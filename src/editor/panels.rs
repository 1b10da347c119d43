//! Sidebar, palette bar and animation panel
//!
//! Each panel draws itself and reports clicks back to the main loop as an
//! action; the loop mutates the session so panels never need `&mut`.

use macroquad::prelude::*;

use crate::app::AppState;
use crate::ui::{self, button, MouseState, Rect};

const ROW_HEIGHT: f32 = 22.0;
const SWATCH_SIZE: f32 = 26.0;
const SWATCH_GAP: f32 = 4.0;

/// Clicks reported by the project sidebar
pub enum SidebarAction {
    None,
    SelectProject(usize),
    PickFolder,
    Refresh,
}

/// Clicks reported by the animation panel
pub enum PanelAction {
    None,
    SelectAnimation(usize),
    PrevFrame,
    NextFrame,
    TogglePlay,
}

/// Draw the project list; bottom buttons change or rescan the base folder
pub fn draw_sidebar(rect: Rect, app: &AppState, mouse: &MouseState) -> SidebarAction {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, ui::PANEL_BG);

    draw_text("Projects", rect.x + 10.0, rect.y + 24.0, 18.0, ui::TEXT_COLOR);

    let mut action = SidebarAction::None;
    let list_top = rect.y + 38.0;
    let list_bottom = rect.bottom() - 70.0;

    if app.projects.is_empty() {
        draw_text(
            "No project folders",
            rect.x + 10.0,
            list_top + 14.0,
            14.0,
            ui::TEXT_DIM,
        );
    }

    for (i, project) in app.projects.iter().enumerate() {
        let row = Rect::new(rect.x, list_top + i as f32 * ROW_HEIGHT, rect.w, ROW_HEIGHT);
        if row.bottom() > list_bottom {
            break;
        }
        let selected = app.selected_project == Some(i);
        if selected {
            draw_rectangle(row.x, row.y, row.w, row.h, ui::ACCENT_COLOR);
        } else if mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, ui::BUTTON_BG);
        }
        draw_text(
            &project.name,
            row.x + 10.0,
            row.y + 16.0,
            14.0,
            if selected { ui::TEXT_COLOR } else { ui::TEXT_DIM },
        );
        if mouse.clicked(&row) {
            action = SidebarAction::SelectProject(i);
        }
    }

    let pick = Rect::new(rect.x + 8.0, rect.bottom() - 62.0, rect.w - 16.0, 24.0);
    if button(pick, "Open folder...", mouse) {
        action = SidebarAction::PickFolder;
    }
    let refresh = Rect::new(rect.x + 8.0, rect.bottom() - 32.0, rect.w - 16.0, 24.0);
    if button(refresh, "Refresh", mouse) {
        action = SidebarAction::Refresh;
    }

    action
}

/// Draw the palette swatch row; returns the clicked palette index
pub fn draw_palette_bar(rect: Rect, app: &AppState, mouse: &MouseState) -> Option<u32> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, ui::PANEL_DARK);

    let palette = &app.session.palette;
    if palette.is_empty() {
        draw_text(
            "No sheet loaded",
            rect.x + 10.0,
            rect.center_y() + 5.0,
            14.0,
            ui::TEXT_DIM,
        );
        return None;
    }

    let mut picked = None;
    let y = rect.center_y() - SWATCH_SIZE * 0.5;
    for (i, color) in palette.colors().iter().enumerate() {
        let x = rect.x + 10.0 + i as f32 * (SWATCH_SIZE + SWATCH_GAP);
        if x + SWATCH_SIZE > rect.right() - 10.0 {
            break;
        }
        let swatch = Rect::new(x, y, SWATCH_SIZE, SWATCH_SIZE);

        // Dark base so transparent and translucent entries stay visible
        draw_rectangle(swatch.x, swatch.y, swatch.w, swatch.h, ui::BUTTON_BG);
        draw_rectangle(
            swatch.x,
            swatch.y,
            swatch.w,
            swatch.h,
            Color::from_rgba(color.r, color.g, color.b, color.a),
        );
        if i as u32 == app.selected_index {
            draw_rectangle_lines(swatch.x, swatch.y, swatch.w, swatch.h, 2.0, WHITE);
        }
        if mouse.clicked(&swatch) {
            picked = Some(i as u32);
        }
    }
    picked
}

/// Draw the animation list, frame controls and playback info
pub fn draw_animation_panel(rect: Rect, app: &AppState, mouse: &MouseState) -> PanelAction {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, ui::PANEL_BG);

    draw_text("Animations", rect.x + 10.0, rect.y + 24.0, 18.0, ui::TEXT_COLOR);

    let session = &app.session;
    if session.animations.is_empty() {
        draw_text(
            "No animations loaded",
            rect.x + 10.0,
            rect.y + 50.0,
            14.0,
            ui::WARN_COLOR,
        );
        return PanelAction::None;
    }

    let mut action = PanelAction::None;
    let list_top = rect.y + 38.0;
    for (i, anim) in session.animations.iter().enumerate() {
        let row = Rect::new(rect.x, list_top + i as f32 * ROW_HEIGHT, rect.w, ROW_HEIGHT);
        let selected = i == session.current_animation;
        if selected {
            draw_rectangle(row.x, row.y, row.w, row.h, ui::ACCENT_COLOR);
        } else if mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, ui::BUTTON_BG);
        }
        draw_text(
            &format!("{}: {}", i, anim.name),
            row.x + 10.0,
            row.y + 16.0,
            14.0,
            if selected { ui::TEXT_COLOR } else { ui::TEXT_DIM },
        );
        if mouse.clicked(&row) {
            action = PanelAction::SelectAnimation(i);
        }
    }

    let Some(anim) = session.active_animation() else {
        return action;
    };

    let mut y = list_top + session.animations.len() as f32 * ROW_HEIGHT + 16.0;
    draw_text("Frame controls", rect.x + 10.0, y + 12.0, 16.0, ui::TEXT_COLOR);
    y += 22.0;
    draw_text(
        &format!("Frame {}/{}", session.current_frame + 1, anim.frame_count),
        rect.x + 10.0,
        y + 12.0,
        14.0,
        ui::TEXT_COLOR,
    );
    y += 22.0;

    if button(Rect::new(rect.x + 10.0, y, 32.0, 22.0), "<", mouse) {
        action = PanelAction::PrevFrame;
    }
    if button(Rect::new(rect.x + 50.0, y, 32.0, 22.0), ">", mouse) {
        action = PanelAction::NextFrame;
    }
    y += 30.0;

    let play_label = if session.is_playing { "Pause" } else { "Play" };
    if button(Rect::new(rect.x + 10.0, y, 72.0, 24.0), play_label, mouse) {
        action = PanelAction::TogglePlay;
    }
    y += 36.0;

    draw_text(
        &format!("Speed: {:.3}s", anim.frame_wait),
        rect.x + 10.0,
        y + 10.0,
        13.0,
        ui::TEXT_DIM,
    );
    y += 16.0;
    draw_text(
        &format!("Size: {}x{}", anim.frame_width, anim.frame_height),
        rect.x + 10.0,
        y + 10.0,
        13.0,
        ui::TEXT_DIM,
    );
    y += 16.0;
    draw_text(
        &format!("Pos: ({}, {})", anim.pos_x, anim.pos_y),
        rect.x + 10.0,
        y + 10.0,
        13.0,
        ui::TEXT_DIM,
    );

    action
}
