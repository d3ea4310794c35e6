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

//! The boundary between the player and the native media engine.
//!
//! Engines are driven from a single worker thread (see
//! [`commands`](super::commands)), so implementations need not be `Send` or
//! `Sync` themselves.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reported by a [`MediaEngine`] or the worker that drives it.
#[derive(Debug, Error)]
pub(crate) enum EngineError {
    /// The engine could not be created, e.g. no audio output is available.
    #[error("failed to initialise playback engine: {0}")]
    Init(String),

    /// A native command failed. `reason` is the engine's own description.
    #[error("engine rejected {command}: {reason}")]
    Command { command: &'static str, reason: String },

    #[error("media not found: {}", .0.display())]
    MediaNotFound(PathBuf),

    #[error("no media loaded")]
    NoMedia,

    /// The worker thread has exited, so no request can be served.
    #[error("playback engine is not running")]
    Disconnected,
}

/// Operations a media engine must provide.
///
/// Times are in milliseconds. `None` means the value is not known yet, for
/// example because the media has not been parsed.
pub(crate) trait MediaEngine {
    /// Loads media without starting playback.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Starts playback, or continues it from the current offset if paused.
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self) -> Result<(), EngineError>;

    fn stop(&mut self) -> Result<(), EngineError>;

    /// Seeks to `fraction` (0.0 to 1.0) of the media duration. While stopped
    /// the position takes effect when playback next starts.
    fn seek(&mut self, fraction: f64) -> Result<(), EngineError>;

    fn duration_ms(&mut self) -> Option<u64>;

    fn time_ms(&mut self) -> Option<u64>;

    /// Gives the engine a chance to process pending native events.
    fn pump_events(&mut self) {}

    /// Releases native resources. No other method is called afterwards.
    fn release(&mut self);
}
