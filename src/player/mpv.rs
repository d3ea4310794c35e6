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

//! libmpv-backed media engine.
//!
//! MPV plays the role of the opaque native engine. Media is loaded paused so
//! that loading and starting playback remain separate steps, and `keep-open`
//! holds the last frame at end of file so the clock stays readable. MPV
//! unloads the file on stop, so a seek made while stopped is kept and applied
//! through the `start` option when playback reloads the file.

use std::path::{Path, PathBuf};

use crate::player::engine::{EngineError, MediaEngine};

pub(crate) struct MpvEngine {
    handler: mpv::MpvHandler,
    media: Option<PathBuf>,
    stopped: bool,
    pending_seek: Option<f64>,
}

fn command_error(command: &'static str) -> impl FnOnce(mpv::Error) -> EngineError {
    move |e| EngineError::Command {
        command,
        reason: format!("{:?}", e),
    }
}

impl MpvEngine {
    /// Creates and initialises a headless MPV instance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Init`] if libmpv cannot be initialised.
    pub(crate) fn new() -> Result<Self, EngineError> {
        let init_error = |e: mpv::Error| EngineError::Init(format!("{:?}", e));

        let mut builder = mpv::MpvHandlerBuilder::new().map_err(init_error)?;
        builder.set_option("vo", "null").map_err(init_error)?;
        builder.set_option("keep-open", "yes").map_err(init_error)?;
        let handler = builder.build().map_err(init_error)?;

        log::info!("MPV engine initialised");

        Ok(Self {
            handler,
            media: None,
            stopped: true,
            pending_seek: None,
        })
    }

    /// Replaces the current file, starting at `start` (0.0 to 1.0) if given.
    fn load_file(&mut self, path: &Path, start: Option<f64>) -> Result<(), EngineError> {
        let start = match start {
            Some(fraction) => format!("{:.3}%", fraction * 100.0),
            None => "none".to_string(),
        };
        self.handler
            .set_property("start", start.as_str())
            .map_err(command_error("start"))?;

        let filename = path.to_string_lossy();
        self.handler
            .command(&["loadfile", &*filename, "replace"])
            .map_err(command_error("loadfile"))
    }

    fn set_paused(&mut self, paused: bool) -> Result<(), EngineError> {
        self.handler
            .set_property("pause", paused)
            .map_err(command_error("pause"))
    }

    fn seconds_property(&mut self, name: &str) -> Option<u64> {
        self.handler
            .get_property::<f64>(name)
            .ok()
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .map(|seconds| (seconds * 1000.0) as u64)
    }
}

impl MediaEngine for MpvEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        if !path.is_file() {
            return Err(EngineError::MediaNotFound(path.to_path_buf()));
        }

        let was_paused = self.handler.get_property::<bool>("pause").unwrap_or(true);

        self.set_paused(true)?;
        if let Err(e) = self.load_file(path, None) {
            if let Err(restore) = self.set_paused(was_paused) {
                log::debug!("Could not restore pause after failed load: {}", restore);
            }
            return Err(e);
        }

        self.media = Some(path.to_path_buf());
        self.stopped = false;
        self.pending_seek = None;

        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let media = self.media.clone().ok_or(EngineError::NoMedia)?;

        self.set_paused(false)?;

        if self.stopped {
            self.load_file(&media, self.pending_seek)?;
            self.stopped = false;
            self.pending_seek = None;
        }

        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.set_paused(true)
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.handler
            .command(&["stop"])
            .map_err(command_error("stop"))?;
        self.stopped = true;
        self.pending_seek = None;

        Ok(())
    }

    fn seek(&mut self, fraction: f64) -> Result<(), EngineError> {
        if self.media.is_none() {
            return Err(EngineError::NoMedia);
        }

        if self.stopped {
            self.pending_seek = Some(fraction);
            return Ok(());
        }

        let percent = format!("{:.3}", fraction * 100.0);
        self.handler
            .command(&["seek", percent.as_str(), "absolute-percent"])
            .map_err(command_error("seek"))
    }

    fn duration_ms(&mut self) -> Option<u64> {
        self.seconds_property("duration")
    }

    fn time_ms(&mut self) -> Option<u64> {
        self.seconds_property("time-pos")
    }

    fn pump_events(&mut self) {
        // Nothing is observed, drain so the native queue does not fill up.
        while self.handler.wait_event(0.0).is_some() {}
    }

    fn release(&mut self) {
        if let Err(e) = self.handler.command(&["stop"]) {
            log::debug!("Ignoring stop failure during release: {:?}", e);
        }
        self.media = None;
        self.stopped = true;
        self.pending_seek = None;
    }
}
