//! Input handling: maps key/mouse events to scroll and state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::idle::FloatBob;
use crate::core::mapper::progress_for_index;
use crate::ui::layout::AppLayout;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Stage => {
            if let Some(action) = state.config.match_key(key) {
                perform(state, action);
            }
        }
        ActiveView::Controls => {
            // Any key closes the popup; the quit binding still quits.
            if state.config.match_key(key) == Some(Action::Quit) && key.code != KeyCode::Esc {
                state.should_quit = true;
            }
            state.active_view = ActiveView::Stage;
        }
    }
}

/// Process a mouse event.  The wheel scrolls the hero region.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let rows = state.config.display.wheel_rows;
    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_rows(state, rows),
        MouseEventKind::ScrollUp => scroll_rows(state, -rows),
        _ => {}
    }
}

/// Terminal resized: keep progress, adopt the new stage height.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    let layout = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, width, height));
    state.track.resize(layout.stage_area.height);
    state.sync_scroll();
    tracing::debug!(
        rows = layout.stage_area.height,
        offset = state.track.offset(),
        "stage resized"
    );
}

/// Execute a bound action.
pub fn perform(state: &mut AppState, action: Action) {
    state.status_message = None;
    match action {
        Action::ScrollDown => scroll_rows(state, 1.0),
        Action::ScrollUp => scroll_rows(state, -1.0),
        Action::PageDown => {
            let page = state.track.viewport_rows();
            scroll_rows(state, page);
        }
        Action::PageUp => {
            let page = state.track.viewport_rows();
            scroll_rows(state, -page);
        }
        Action::NextItem => step_item(state, 1.0),
        Action::PrevItem => step_item(state, -1.0),
        // Whole turns are dropped so the spring only travels the remainder.
        Action::JumpStart => {
            state.track.scroll_to_start();
            state.sync_scroll();
            state.carousel.shorten_travel();
        }
        Action::JumpEnd => {
            state.track.scroll_to_end();
            state.sync_scroll();
            state.carousel.shorten_travel();
        }
        Action::ToggleSmoothing => {
            let enabled = !state.carousel.smoothing();
            state.carousel.set_smoothing(enabled);
            state.status_message = Some(format!(
                "Smoothing: {}",
                if enabled { "spring" } else { "off" }
            ));
        }
        Action::ToggleFloat => {
            state.float = match state.float {
                Some(_) => None,
                None => Some(FloatBob::default()),
            };
            state.status_message = Some(format!(
                "Float: {}",
                if state.float.is_some() { "on" } else { "off" }
            ));
        }
        Action::OpenControls => state.active_view = ActiveView::Controls,
        Action::Quit => state.should_quit = true,
    }
}

fn scroll_rows(state: &mut AppState, rows: f64) {
    state.track.scroll_by(rows);
    state.sync_scroll();
}

/// Scroll so the virtual index lands on the next whole slide in `direction`.
fn step_item(state: &mut AppState, direction: f64) {
    let current = state.carousel.virtual_index();
    // Step off the current slot first so a slide that is already centred
    // still advances by a full position.
    let target = if direction > 0.0 {
        (current + 1e-6).floor() + 1.0
    } else {
        (current - 1e-6).ceil() - 1.0
    };
    let progress = progress_for_index(
        target,
        state.carousel.count(),
        state.carousel.loop_factor(),
    );
    state.track.set_progress(progress);
    state.sync_scroll();
    tracing::debug!(target, progress, "stepped to slide");
}
