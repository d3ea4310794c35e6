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

//! Render the track list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::App;

pub(crate) fn draw_tracks(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;

    let block = Block::default()
        .title(" Playlist ")
        .title_style(Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    if app.tracks.is_empty() {
        let message = format!("No tracks found in {}", app.config.music_dir);
        f.render_widget(
            Paragraph::new(Line::from(message))
                .style(Style::default().fg(theme.muted_colour))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .tracks
        .iter()
        .map(|track| {
            ListItem::new(Line::from(vec![
                Span::raw(track.name.as_str()),
                Span::styled(
                    format!("  {}", track.extension.to_uppercase()),
                    Style::default().fg(theme.muted_colour),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(theme.text_colour))
        .highlight_style(
            Style::default()
                .fg(theme.background_colour)
                .bg(theme.selection_colour)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.view.list_state);
}
