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

//! UI view state.
//!
//! Everything shown on screen that is not a straight copy of the track list
//! lives here. It is owned by the [`App`](crate::App) and only ever mutated
//! on the UI thread.

use ratatui::{
    layout::{Position, Rect},
    widgets::ListState,
};

pub(crate) const SLIDER_MAX: u16 = 100;

pub(crate) const NO_TRACK_STATUS: &str = "Now Playing: None";
pub(crate) const PAUSED_STATUS: &str = "Paused";
pub(crate) const STOPPED_STATUS: &str = "Stopped";
pub(crate) const ZERO_PROGRESS: &str = "00:00 / 00:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogKind {
    Info,
    Error,
}

/// A modal message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dialog {
    pub(crate) kind: DialogKind,
    pub(crate) message: String,
}

impl Dialog {
    pub(crate) fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Info => " Info ",
            DialogKind::Error => " Error ",
        }
    }
}

pub(crate) struct ViewState {
    pub(crate) list_state: ListState,
    pub(crate) status: String,
    /// Slider position, 0 to [`SLIDER_MAX`].
    pub(crate) slider: u16,
    pub(crate) time_label: String,
    pub(crate) dialog: Option<Dialog>,
    /// Set while the user is dragging the slider with the mouse.
    pub(crate) dragging: bool,
    /// Where the slider was last drawn, for mouse hit testing.
    pub(crate) slider_area: Option<Rect>,
}

impl ViewState {
    pub(crate) fn new(track_count: usize) -> Self {
        let mut view = Self {
            list_state: ListState::default(),
            status: NO_TRACK_STATUS.to_string(),
            slider: 0,
            time_label: ZERO_PROGRESS.to_string(),
            dialog: None,
            dragging: false,
            slider_area: None,
        };
        view.reset_selection(track_count);
        view
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Selects the first track, or nothing if there are none.
    pub(crate) fn reset_selection(&mut self, track_count: usize) {
        self.list_state
            .select(if track_count > 0 { Some(0) } else { None });
    }

    pub(crate) fn select_next(&mut self, track_count: usize) {
        if track_count == 0 {
            return;
        }
        let next = match self.selected() {
            Some(i) if i + 1 < track_count => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub(crate) fn select_previous(&mut self, track_count: usize) {
        if track_count == 0 {
            return;
        }
        let previous = match self.selected() {
            Some(0) | None => track_count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(previous));
    }

    pub(crate) fn select_last(&mut self, track_count: usize) {
        if track_count > 0 {
            self.list_state.select(Some(track_count - 1));
        }
    }

    pub(crate) fn set_now_playing(&mut self, name: &str) {
        self.status = format!("Now Playing: {}", name);
    }

    pub(crate) fn reset_progress(&mut self) {
        self.slider = 0;
        self.time_label = ZERO_PROGRESS.to_string();
    }

    pub(crate) fn show_info(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog {
            kind: DialogKind::Info,
            message: message.into(),
        });
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog {
            kind: DialogKind::Error,
            message: message.into(),
        });
    }

    /// The slider value under a mouse press, if the press hit the slider.
    pub(crate) fn slider_hit(&self, column: u16, row: u16) -> Option<u16> {
        let area = self.slider_area?;
        area.contains(Position::new(column, row))
            .then(|| column_to_slider(area, column))
    }

    /// The slider value for a drag, which may wander outside the slider.
    pub(crate) fn slider_drag(&self, column: u16) -> Option<u16> {
        self.slider_area.map(|area| column_to_slider(area, column))
    }
}

fn column_to_slider(area: Rect, column: u16) -> u16 {
    if area.width <= 1 {
        return 0;
    }
    let span = u32::from(area.width - 1);
    let offset = u32::from(column.saturating_sub(area.x)).min(span);
    (offset * u32::from(SLIDER_MAX) / span) as u16
}
