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

//! Render a modal dialog over the rest of the interface.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::{
    model::{Dialog, DialogKind},
    theme::Theme,
};

pub(crate) fn draw_dialog(f: &mut Frame, area: Rect, dialog: &Dialog, theme: &Theme) {
    let popup = centred(area, 50, 7);

    let colour = match dialog.kind {
        DialogKind::Info => theme.accent_colour,
        DialogKind::Error => theme.error_colour,
    };

    let block = Block::default()
        .title(dialog.title())
        .title_style(Style::default().fg(colour).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colour))
        .style(Style::default().bg(theme.gauge_track_colour))
        .padding(Padding::uniform(1));

    let text = vec![
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from("Press Enter to close").style(Style::default().fg(theme.muted_colour)),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme.text_colour))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

/// A rectangle of at most `width` x `height` centred within `area`.
fn centred(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
