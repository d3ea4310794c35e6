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

//! Render the player panel.
//!
//! This module renders the status label, the transport buttons, the time
//! readout and the progress slider.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    model::SLIDER_MAX,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_RESUME, ICON_STOP},
    theme::Theme,
};

/// Renders the player widget and records where the slider was drawn.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(15)])
        .split(chunks[0]);

    let icon = if app.player.is_playing() {
        ICON_PLAY
    } else if app.player.is_paused() {
        ICON_PAUSE
    } else {
        ICON_STOP
    };

    let status_line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().add_modifier(Modifier::BOLD))
            .fg(theme.text_colour),
        Span::styled(app.view.status.as_str(), Style::default().add_modifier(Modifier::BOLD))
            .fg(theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(status_line), info_chunks[0]);

    let time = Paragraph::new(app.view.time_label.as_str())
        .alignment(Alignment::Right)
        .fg(theme.accent_colour)
        .bold();
    f.render_widget(time, info_chunks[1]);

    f.render_widget(Paragraph::new(transport_line(&theme)), chunks[2]);

    let slider = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
        .ratio(f64::from(app.view.slider.min(SLIDER_MAX)) / f64::from(SLIDER_MAX))
        .label("")
        .use_unicode(true);
    f.render_widget(slider, chunks[4]);

    app.view.slider_area = Some(chunks[4]);
}

fn transport_line(theme: &Theme) -> Line<'static> {
    let buttons = [
        (ICON_PLAY, "Play", "p"),
        (ICON_PAUSE, "Pause", "space"),
        (ICON_RESUME, "Resume", "r"),
        (ICON_STOP, "Stop", "s"),
    ];

    let spans: Vec<Span> = buttons
        .iter()
        .flat_map(|(icon, label, key)| {
            [
                Span::styled(format!("[{} {}]", icon, label), Style::default().fg(theme.text_colour)),
                Span::styled(format!(" {}   ", key), Style::default().fg(theme.muted_colour)),
            ]
        })
        .collect();

    Line::from(spans)
}
