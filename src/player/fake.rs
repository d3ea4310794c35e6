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

//! A deterministic in-process engine for tests.
//!
//! The clock only moves when a test calls [`FakeControl::advance`]. Duration
//! stays unknown after loading until playback starts, mimicking an engine
//! that parses metadata lazily. Stopping unloads the media the way MPV does:
//! the clock reads unknown until playback reloads it, and a seek made while
//! stopped takes effect on the next play.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::player::engine::{EngineError, MediaEngine};

pub(crate) const TRACK_LENGTH_MS: u64 = 180_000;

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub(crate) media: Option<PathBuf>,
    pub(crate) playing: bool,
    pub(crate) paused: bool,
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: Option<u64>,
    pub(crate) unloaded: bool,
    pub(crate) reject_loads: bool,
    pub(crate) released: bool,
}

/// Test-side handle onto a [`FakeEngine`]'s state.
#[derive(Clone, Default)]
pub(crate) struct FakeControl {
    state: Arc<Mutex<FakeState>>,
}

impl FakeControl {
    pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Moves the clock forward if playing.
    pub(crate) fn advance(&self, ms: u64) {
        let mut state = self.state();
        if state.playing && !state.paused {
            state.position_ms = (state.position_ms + ms).min(TRACK_LENGTH_MS);
        }
    }

    pub(crate) fn engine(&self) -> FakeEngine {
        FakeEngine {
            state: self.state.clone(),
        }
    }
}

pub(crate) struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEngine {
    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

impl MediaEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        if !path.is_file() {
            return Err(EngineError::MediaNotFound(path.to_path_buf()));
        }

        let mut state = self.state();
        if state.reject_loads {
            return Err(EngineError::Command {
                command: "loadfile",
                reason: "unsupported format".to_string(),
            });
        }

        state.media = Some(path.to_path_buf());
        state.playing = false;
        state.paused = false;
        state.position_ms = 0;
        state.duration_ms = None;
        state.unloaded = false;

        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let mut state = self.state();
        if state.media.is_none() {
            return Err(EngineError::NoMedia);
        }

        state.playing = true;
        state.paused = false;
        state.unloaded = false;
        state.duration_ms = Some(TRACK_LENGTH_MS);

        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.state().paused = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        let mut state = self.state();
        state.playing = false;
        state.paused = false;
        state.position_ms = 0;
        state.duration_ms = None;
        state.unloaded = true;

        Ok(())
    }

    fn seek(&mut self, fraction: f64) -> Result<(), EngineError> {
        let mut state = self.state();
        if state.media.is_none() {
            return Err(EngineError::NoMedia);
        }

        state.position_ms = (fraction * TRACK_LENGTH_MS as f64) as u64;

        Ok(())
    }

    fn duration_ms(&mut self) -> Option<u64> {
        self.state().duration_ms
    }

    fn time_ms(&mut self) -> Option<u64> {
        let state = self.state();
        if state.unloaded {
            return None;
        }
        state.media.as_ref().map(|_| state.position_ms)
    }

    fn release(&mut self) {
        let mut state = self.state();
        state.media = None;
        state.playing = false;
        state.released = true;
    }
}
