// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application event distribution.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Input and poll readings arrive as [`AppEvent`]s over a
//!    single channel, from the input thread and the progress poller.
//! 2. **Process**: [`handle_event`] updates the [`App`] on the UI thread,
//!    which is the only thread allowed to do so.
//! 3. **Render**: After each event the UI is re-drawn.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::{
    App,
    actions::handlers::{
        apply_progress, nudge_slider, on_pause, on_play, on_resume, on_slider_moved, on_stop,
        refresh_tracks,
    },
    render::draw,
    util::term::Tui,
};

/// Slider movement per arrow key press.
const SLIDER_STEP: i32 = 5;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,

    /// A playback clock reading from the poller, in milliseconds.
    Progress {
        current: Option<u64>,
        duration: Option<u64>,
    },

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(terminal: &mut Tui, app: &mut App) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) if key.kind == KeyEventKind::Press => process_key_event(app, key)?,
        AppEvent::Key(_) => {}
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse),
        AppEvent::Progress { current, duration } => apply_progress(app, current, duration),
        AppEvent::Resize | AppEvent::ExitApplication => {}
    }

    Ok(())
}

/// Maps keyboard input to player actions and navigation.
///
/// An open dialog captures all keys until it is dismissed.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.view.dialog.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.view.dialog = None;
        }
        return Ok(());
    }

    let track_count = app.tracks.len();

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Navigation
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => app.view.select_next(track_count),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => app.view.select_previous(track_count),
        (KeyCode::Home, _) => app.view.reset_selection(track_count),
        (KeyCode::End, _) => app.view.select_last(track_count),

        // Transport
        (KeyCode::Enter, _) | (KeyCode::Char('p'), _) => on_play(app),
        (KeyCode::Char(' '), _) => on_pause(app),
        (KeyCode::Char('r'), _) => on_resume(app),
        (KeyCode::Char('s'), _) => on_stop(app),

        // Slider
        (KeyCode::Left, _) | (KeyCode::Char(','), _) => nudge_slider(app, -SLIDER_STEP),
        (KeyCode::Right, _) | (KeyCode::Char('.'), _) => nudge_slider(app, SLIDER_STEP),

        (KeyCode::Char('R'), _) => refresh_tracks(app),

        _ => {}
    }

    Ok(())
}

/// Handles slider presses and drags.
///
/// A drag starts with a left press on the slider and ends on release. The
/// release is honoured even while a dialog is open so a drag can never be
/// left dangling.
fn process_mouse_event(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Up(MouseButton::Left) = mouse.kind {
        app.view.dragging = false;
        return;
    }

    if app.view.dialog.is_some() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(value) = app.view.slider_hit(mouse.column, mouse.row) {
                app.view.dragging = true;
                on_slider_moved(app, value);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.view.dragging => {
            if let Some(value) = app.view.slider_drag(mouse.column) {
                on_slider_moved(app, value);
            }
        }
        _ => {}
    }
}
