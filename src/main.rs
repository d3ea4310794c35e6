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

//! # tinyplay
//!
//! A minimal terminal audio player. It lists the audio files in a folder and
//! plays, pauses, resumes and stops the selected one while showing elapsed
//! and total time on a seekable slider.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns the [`App`], runs the event loop and is the only
//!   thread that mutates UI state.
//! * The **Engine Worker** owns the native MPV handle; the [`Player`] façade
//!   talks to it over channels.
//! * The **Progress Poller** reads the playback clock and posts readings to
//!   the main thread as events.
//! * The **Input Thread** forwards key and mouse events.
//!
//! The application follows a strict setup-run-teardown pattern. On exit the
//! poller is stopped and joined before the engine is released, so no clock
//! query can race with engine teardown.

mod actions;
mod config;
mod library;
mod model;
mod player;
mod render;
mod tasks;
mod theme;
mod util;

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use crate::{
    actions::{
        events::{AppEvent, process_events},
        handlers::refresh_tracks,
    },
    config::AppConfig,
    library::Track,
    model::ViewState,
    player::{Player, mpv::MpvEngine},
    theme::Theme,
    util::term::{Tui, restore_terminal, setup_terminal},
};

/// Application state.
pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) theme: Theme,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) player: Player,
    pub(crate) tracks: Vec<Track>,
    pub(crate) view: ViewState,
}

impl App {
    /// Creates the application state around an initialised player and scans
    /// the configured music folder.
    pub(crate) fn new(config: AppConfig, player: Player) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let mut app = Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            player,
            tracks: vec![],
            view: ViewState::new(0),
        };
        refresh_tracks(&mut app);

        app
    }

    /// Stops playback and releases the engine.
    fn shutdown(&mut self) {
        if let Err(e) = self.player.stop() {
            log::warn!("Stop on shutdown failed: {}", e);
        }
        self.player.cleanup();
    }
}

/// The entry point of the application.
///
/// The playback engine is initialised before anything is drawn; if that
/// fails the error is reported on the terminal and the process exits.
fn main() -> Result<()> {
    let config = config::load_config();

    if let Err(e) = util::logging::init_logging(&config) {
        eprintln!("Logging disabled: {:#}", e);
    }

    log::info!("Starting tinyplay");

    let mut player = Player::new();
    player
        .initialize(MpvEngine::new)
        .context("Failed to initialise the playback engine")?;

    let mut app = App::new(config, player);

    let mut terminal = setup_terminal(&app.theme)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    log::info!("Exiting");

    res.context("Application error occurred")
}

/// Starts the background threads and enters the main event loop.
///
/// This function spawns:
/// * An input thread to forward terminal events.
/// * The progress poller that feeds the time display.
///
/// When the event loop ends the poller is stopped and joined, then the
/// player is stopped and released.
fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // Translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("Terminal input failed: {}", e);
                    break;
                }
            };

            if tx_input.send(event).is_err() {
                break;
            }
        }
    });

    let poller = app.player.clock().map(|clock| {
        tasks::spawn_progress_poller(clock, app.event_tx.clone(), app.config.poll_interval())
    });

    let res = process_events(terminal, app);

    if let Some(poller) = poller {
        poller.stop();
    }
    app.shutdown();

    res
}
