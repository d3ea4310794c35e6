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

//! User interface rendering logic.
//!
//! This module translates the [`App`] state into `ratatui` widgets. The
//! primary entry point is [`draw`], which is called after every processed
//! event.

mod dialog;
mod icons;
mod player;
mod tracks;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    App,
    render::{dialog::draw_dialog, player::draw_player, tracks::draw_tracks},
};

const HELP: &[(&str, &str)] = &[
    ("p", "play"),
    ("space", "pause"),
    ("r", "resume"),
    ("s", "stop"),
    ("\u{2190}/\u{2192}", "seek"),
    ("R", "rescan"),
    ("q", "quit"),
];

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the track list, the player panel and a one-line
/// key help footer. An open dialog is drawn on top of everything.
///
/// Takes the app mutably because drawing records view details (list scroll
/// offset, slider area) needed for later input handling.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tracks(f, outer[0], app);
    draw_player(f, outer[1], app);

    let help: Vec<Span> = HELP
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!(" {} ", key), Style::default().fg(app.theme.accent_colour)),
                Span::styled(format!("{} ", action), Style::default().fg(app.theme.muted_colour)),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(help)), outer[2]);

    if let Some(dialog) = &app.view.dialog {
        draw_dialog(f, area, dialog, &app.theme);
    }
}
