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

//! Audio playback control and state management.
//!
//! This module provides the [`Player`] façade used by the UI to control
//! playback. The façade owns the session state (the loaded track and the
//! playback state) and normalises every engine outcome into a
//! [`PlayerResult`]. It never panics and never aborts; failures are returned
//! to the caller and logged.
//!
//! The native engine lives on a background worker thread (see [`commands`]),
//! so a slow engine call cannot corrupt the façade's state, and the handle is
//! only ever touched from one thread.

mod commands;
pub(crate) mod engine;
pub(crate) mod mpv;

#[cfg(test)]
pub(crate) mod fake;

use std::{fmt, thread::JoinHandle};

use thiserror::Error;

use crate::{
    library::Track,
    player::{
        commands::{EngineClient, spawn_engine_worker},
        engine::{EngineError, MediaEngine},
    },
};

pub(crate) use commands::PlaybackClock;

/// The playback state of a [`Player`].
///
/// `Loaded` is both "loaded but never played" and "stopped": either way a
/// track is held and `play` starts it from the beginning. `Released` is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Uninitialized,
    Idle,
    Loaded,
    Playing,
    Paused,
    Released,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerState::Uninitialized => "uninitialised",
            PlayerState::Idle => "idle",
            PlayerState::Loaded => "stopped",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Released => "released",
        };
        f.write_str(name)
    }
}

/// Why a [`Player`] operation was refused or failed.
///
/// The `Display` text is the diagnostic shown to the user.
#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    /// `initialize` has not succeeded yet.
    #[error("player is not initialised")]
    NotInitialised,

    /// `cleanup` has run; the engine is gone.
    #[error("player has been released")]
    Released,

    #[error("no track is loaded")]
    NoTrackLoaded,

    /// The operation is not valid from the current state, e.g. pausing while
    /// already paused.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: PlayerState,
    },

    #[error("invalid seek position {0}")]
    InvalidPosition(f64),

    /// The engine rejected the request.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub(crate) type PlayerResult<T> = Result<T, PlayerError>;

/// The playback façade.
///
/// This struct acts as a command proxy onto the engine worker thread and
/// holds the session state: the loaded track and the [`PlayerState`]. All
/// calls are made from the UI thread; the poller reads time through a
/// [`PlaybackClock`] instead.
pub(crate) struct Player {
    state: PlayerState,
    current: Option<Track>,
    client: Option<EngineClient>,
    worker: Option<JoinHandle<()>>,
}

impl Player {
    /// Creates an uninitialised player. No engine exists until
    /// [`initialize`](Self::initialize) succeeds.
    pub(crate) fn new() -> Self {
        Self {
            state: PlayerState::Uninitialized,
            current: None,
            client: None,
            worker: None,
        }
    }

    /// Starts the engine worker, building the engine with `factory`.
    ///
    /// # Arguments
    ///
    /// * `factory` - Builds the engine. It runs on the worker thread, which
    ///   then owns the engine for its whole life.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidState`] if called more than once, or
    /// [`PlayerError::Engine`] if the engine cannot be built. On failure the
    /// player stays [`PlayerState::Uninitialized`].
    pub(crate) fn initialize<E, F>(&mut self, factory: F) -> PlayerResult<()>
    where
        E: MediaEngine + 'static,
        F: FnOnce() -> Result<E, EngineError> + Send + 'static,
    {
        if self.state != PlayerState::Uninitialized {
            return Err(PlayerError::InvalidState {
                operation: "initialise",
                state: self.state,
            });
        }

        let (client, worker) = spawn_engine_worker(factory).inspect_err(|e| {
            log::error!("Engine initialisation failed: {}", e);
        })?;

        self.client = Some(client);
        self.worker = Some(worker);
        self.state = PlayerState::Idle;

        Ok(())
    }

    /// The current playback state.
    pub(crate) fn state(&self) -> PlayerState {
        self.state
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state == PlayerState::Paused
    }

    /// The loaded track, if any.
    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// A read-only clock for polling from another thread.
    pub(crate) fn clock(&self) -> Option<PlaybackClock> {
        self.client.as_ref().map(|client| client.clock().clone())
    }

    fn engine(&self) -> PlayerResult<&EngineClient> {
        match self.state {
            PlayerState::Uninitialized => Err(PlayerError::NotInitialised),
            PlayerState::Released => Err(PlayerError::Released),
            _ => self.client.as_ref().ok_or(PlayerError::NotInitialised),
        }
    }

    fn require(&self, operation: &'static str, expected: PlayerState) -> PlayerResult<&EngineClient> {
        let engine = self.engine()?;
        if self.state != expected {
            return Err(PlayerError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(engine)
    }

    /// Loads `track` without starting playback, discarding any previous
    /// playback position.
    ///
    /// # Arguments
    ///
    /// * `track` - The track to load. It replaces any current track.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::Engine`] if the file is missing or the engine
    /// rejects it; the previous track and state are then left unchanged.
    pub(crate) fn load_track(&mut self, track: &Track) -> PlayerResult<()> {
        self.engine()?.load(&track.path).inspect_err(|e| {
            log::warn!("Failed to load {}: {}", track.path.display(), e);
        })?;

        log::info!("Loaded {}", track.path.display());
        self.current = Some(track.clone());
        self.state = PlayerState::Loaded;

        Ok(())
    }

    /// Starts playback of the loaded track, or resumes it if paused.
    pub(crate) fn play(&mut self) -> PlayerResult<()> {
        let engine = self.engine()?;
        if self.current.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }

        engine.play().inspect_err(|e| log::warn!("Play failed: {}", e))?;
        self.state = PlayerState::Playing;

        Ok(())
    }

    /// Pauses playback. Only valid while playing.
    pub(crate) fn pause(&mut self) -> PlayerResult<()> {
        self.require("pause", PlayerState::Playing)?
            .pause()
            .inspect_err(|e| log::warn!("Pause failed: {}", e))?;
        self.state = PlayerState::Paused;

        Ok(())
    }

    /// Continues playback from the paused offset. Only valid while paused.
    pub(crate) fn resume(&mut self) -> PlayerResult<()> {
        self.require("resume", PlayerState::Paused)?
            .play()
            .inspect_err(|e| log::warn!("Resume failed: {}", e))?;
        self.state = PlayerState::Playing;

        Ok(())
    }

    /// Halts playback, keeping the loaded track.
    pub(crate) fn stop(&mut self) -> PlayerResult<()> {
        self.engine()?
            .stop()
            .inspect_err(|e| log::warn!("Stop failed: {}", e))?;

        self.state = if self.current.is_some() {
            PlayerState::Loaded
        } else {
            PlayerState::Idle
        };

        Ok(())
    }

    /// Seeks to `fraction` of the loaded track.
    ///
    /// While stopped the position is kept and used by the next `play`.
    ///
    /// # Arguments
    ///
    /// * `fraction` - Position from `0.0` (start) to `1.0` (end). Values
    ///   outside that range are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidPosition`] for NaN and
    /// [`PlayerError::NoTrackLoaded`] if nothing is loaded.
    pub(crate) fn set_position(&mut self, fraction: f64) -> PlayerResult<()> {
        let engine = self.engine()?;
        if fraction.is_nan() {
            return Err(PlayerError::InvalidPosition(fraction));
        }
        if self.current.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }

        engine
            .seek(fraction.clamp(0.0, 1.0))
            .inspect_err(|e| log::warn!("Seek failed: {}", e))?;

        Ok(())
    }

    /// Duration of the loaded track in milliseconds, `None` if not yet known.
    pub(crate) fn duration(&self) -> Option<u64> {
        self.engine().ok()?.clock().duration()
    }

    /// Elapsed playback time in milliseconds, `None` if not known.
    pub(crate) fn current_time(&self) -> Option<u64> {
        self.engine().ok()?.clock().current_time()
    }

    /// Stops playback and releases the engine.
    ///
    /// Safe to call more than once. Afterwards every operation fails with
    /// [`PlayerError::Released`].
    pub(crate) fn cleanup(&mut self) {
        if self.state == PlayerState::Released {
            return;
        }

        if let Some(client) = self.client.take() {
            if matches!(self.state, PlayerState::Playing | PlayerState::Paused) {
                if let Err(e) = client.stop() {
                    log::warn!("Stop during cleanup failed: {}", e);
                }
            }
            client.release();
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Engine worker panicked");
            }
        }

        self.current = None;
        self.state = PlayerState::Released;
        log::info!("Player released");
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.cleanup();
    }
}
