//! PIXELSTRIP: a pixel art spritesheet editor with animation preview
//!
//! Spritesheets are edited through a palette derived from the image itself:
//! every distinct RGBA color gets a small index, the sheet becomes a grid
//! of indices, and painting swaps indices. Animation metadata partitions
//! the sheet into named frame strips; the editor windows one frame at a
//! time into the canvas and plays sequences back on a wall-clock cadence.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod editor;
mod nxml;
mod project;
mod sheet;
mod ui;

use macroquad::prelude::*;

use app::AppState;
use config::EditorConfig;
use editor::{
    draw_animation_panel, draw_canvas_view, draw_palette_bar, draw_sidebar, PanelAction,
    SidebarAction,
};
use sheet::SheetError;
use ui::{MouseState, Rect};

const SIDEBAR_WIDTH: f32 = 180.0;
const ANIMATION_PANEL_WIDTH: f32 = 220.0;
const PALETTE_BAR_HEIGHT: f32 = 48.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("PIXELSTRIP v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Disk failures are reported but never block editing; the in-memory
/// state is kept so the user can retry
fn report_save_error(app: &mut AppState, e: SheetError) {
    eprintln!("Save failed: {}", e);
    app.set_status(&format!("Save failed: {}", e), 5.0);
}

fn rescan_projects(app: &mut AppState) {
    app.projects = project::discover_projects(&app.config.projects_dir);
    app.selected_project = None;
    println!(
        "Found {} project folders in {}",
        app.projects.len(),
        app.config.projects_dir.display()
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging before any other code
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = EditorConfig::load();
    let mut app = AppState::new(config);
    rescan_projects(&mut app);

    loop {
        let now = get_time();

        // Playback first, then input, then drawing
        if let Err(e) = app.session.tick_playback(now) {
            report_save_error(&mut app, e);
        }

        let mouse = MouseState::poll();
        let screen_w = screen_width();
        let screen_h = screen_height();

        clear_background(ui::BACKGROUND);

        let sidebar_rect = Rect::new(0.0, 0.0, SIDEBAR_WIDTH, screen_h);
        let panel_rect = Rect::new(
            screen_w - ANIMATION_PANEL_WIDTH,
            0.0,
            ANIMATION_PANEL_WIDTH,
            screen_h,
        );
        let palette_rect = Rect::new(
            SIDEBAR_WIDTH,
            screen_h - PALETTE_BAR_HEIGHT,
            screen_w - SIDEBAR_WIDTH - ANIMATION_PANEL_WIDTH,
            PALETTE_BAR_HEIGHT,
        );
        let canvas_rect = Rect::new(
            SIDEBAR_WIDTH,
            0.0,
            screen_w - SIDEBAR_WIDTH - ANIMATION_PANEL_WIDTH,
            screen_h - PALETTE_BAR_HEIGHT,
        );

        // Canvas first so the side panels cover any overflow
        draw_canvas_view(canvas_rect, &mut app, &mouse);

        match draw_sidebar(sidebar_rect, &app, &mouse) {
            SidebarAction::SelectProject(i) => app.open_project(i),
            SidebarAction::PickFolder => {
                if let Some(dir) = rfd::FileDialog::new()
                    .set_title("Choose projects folder")
                    .pick_folder()
                {
                    app.config.projects_dir = dir;
                    app.config.save();
                    rescan_projects(&mut app);
                }
            }
            SidebarAction::Refresh => rescan_projects(&mut app),
            SidebarAction::None => {}
        }

        if let Some(index) = draw_palette_bar(palette_rect, &app, &mouse) {
            app.selected_index = index;
        }

        match draw_animation_panel(panel_rect, &app, &mouse) {
            PanelAction::SelectAnimation(i) => {
                if let Err(e) = app.session.select_animation(i) {
                    report_save_error(&mut app, e);
                }
            }
            PanelAction::PrevFrame => {
                if let Err(e) = app.session.step_frame(-1) {
                    report_save_error(&mut app, e);
                }
            }
            PanelAction::NextFrame => {
                if let Err(e) = app.session.step_frame(1) {
                    report_save_error(&mut app, e);
                }
            }
            PanelAction::TogglePlay => app.session.toggle_playback(now),
            PanelAction::None => {}
        }

        // Keyboard shortcuts
        let ctrl = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        if ctrl && is_key_pressed(KeyCode::Z) {
            if let Err(e) = app.session.undo() {
                report_save_error(&mut app, e);
            }
        }
        if ctrl && is_key_pressed(KeyCode::Y) {
            if let Err(e) = app.session.redo() {
                report_save_error(&mut app, e);
            }
        }
        if is_key_pressed(KeyCode::Space) {
            app.session.toggle_playback(now);
        }
        if is_key_pressed(KeyCode::Left) {
            if let Err(e) = app.session.step_frame(-1) {
                report_save_error(&mut app, e);
            }
        }
        if is_key_pressed(KeyCode::Right) {
            if let Err(e) = app.session.step_frame(1) {
                report_save_error(&mut app, e);
            }
        }

        if let Some(msg) = app.get_status() {
            draw_text(
                msg,
                canvas_rect.x + 10.0,
                canvas_rect.bottom() - 10.0,
                16.0,
                ui::TEXT_COLOR,
            );
        }

        next_frame().await;
    }
}
