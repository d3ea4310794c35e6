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

//! Terminal lifecycle and styling utilities.
//!
//! Setup and restore bracket the whole UI session. The background colour is
//! changed with OSC (Operating System Command) escape sequences, which most
//! modern terminals (XTerm, iTerm2, Alacritty, Kitty) support.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::theme::Theme;

pub(crate) type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Sets the terminal background colour (OSC 11).
fn set_terminal_bg(hex_colour: &str) {
    print!("\x1b]11;{}\x07", hex_colour);
    let _ = io::stdout().flush();
}

/// Reverts the background to the user's own configuration (OSC 111).
fn reset_terminal_bg() {
    print!("\x1b]111\x07");
    let _ = io::stdout().flush();
}

/// Prepares the terminal for the TUI.
///
/// Paints the theme background, enables raw mode and mouse capture, and
/// switches to the alternate screen.
///
/// # Errors
///
/// Returns an error if raw mode or the alternate screen cannot be entered.
pub(crate) fn setup_terminal(theme: &Theme) -> Result<Tui> {
    // Without this the frame gets a thin outline in the default colour.
    if let Some(hex) = Theme::to_hex(theme.background_colour) {
        set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Restores the terminal to its original state.
///
/// Best-effort: it runs during teardown, so failures are ignored.
pub(crate) fn restore_terminal(terminal: &mut Tui) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    reset_terminal_bg();
    terminal.show_cursor().ok();
}
