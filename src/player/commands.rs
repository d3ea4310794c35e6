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

//! Engine worker thread and its client handles.
//!
//! The native engine is created on, and only ever touched from, a dedicated
//! worker thread. Callers talk to it through request/reply channels, which
//! makes every call synchronous from the caller's point of view.
//!
//! # Architecture
//!
//! 1. **Command Channel**: carries [`EngineCommand`]s, each with its own reply
//!    sender, from the [`EngineClient`] and any [`PlaybackClock`]s.
//! 2. **Event Pump**: while no command is pending the worker lets the engine
//!    drain its native events every [`EVENT_PUMP_INTERVAL`].
//!
//! Once the engine has been released the worker exits and drops the command
//! receiver, so later requests fail fast instead of reaching a dead handle.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::player::engine::{EngineError, MediaEngine};

const EVENT_PUMP_INTERVAL: Duration = Duration::from_millis(50);

type Reply<T> = Sender<Result<T, EngineError>>;

#[derive(Debug)]
pub(crate) enum EngineCommand {
    Load(PathBuf, Reply<()>),
    Play(Reply<()>),
    Pause(Reply<()>),
    Stop(Reply<()>),
    Seek(f64, Reply<()>),
    Duration(Sender<Option<u64>>),
    Time(Sender<Option<u64>>),
    Release(Sender<()>),
}

/// Spawns the engine worker thread and waits for the engine to be built.
///
/// The engine is constructed by `factory` on the worker thread itself.
///
/// # Errors
///
/// Returns the factory's error if the engine could not be created, or
/// [`EngineError::Init`] if the thread could not be started.
pub(crate) fn spawn_engine_worker<E, F>(
    factory: F,
) -> Result<(EngineClient, JoinHandle<()>), EngineError>
where
    E: MediaEngine + 'static,
    F: FnOnce() -> Result<E, EngineError> + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<EngineCommand>();
    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), EngineError>>();

    let handle = thread::Builder::new()
        .name("engine".to_string())
        .spawn(move || {
            let mut engine = match factory() {
                Ok(engine) => {
                    let _ = ready_tx.send(Ok(()));
                    engine
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            engine_worker(&mut engine, command_rx);
        })
        .map_err(|e| EngineError::Init(e.to_string()))?;

    let started = ready_rx
        .recv()
        .unwrap_or_else(|_| Err(EngineError::Init("engine worker exited during start-up".to_string())));

    match started {
        Ok(()) => Ok((EngineClient::new(command_tx), handle)),
        Err(e) => {
            let _ = handle.join();
            Err(e)
        }
    }
}

/// Serves commands until the engine is released or every client is gone.
fn engine_worker<E: MediaEngine>(engine: &mut E, command_rx: Receiver<EngineCommand>) {
    loop {
        match command_rx.recv_timeout(EVENT_PUMP_INTERVAL) {
            Ok(EngineCommand::Release(done)) => {
                engine.release();
                let _ = done.send(());
                log::debug!("Engine released");
                return;
            }
            Ok(command) => process_command(engine, command),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                engine.release();
                return;
            }
        }

        engine.pump_events();
    }
}

fn process_command<E: MediaEngine>(engine: &mut E, command: EngineCommand) {
    // Replies are dropped silently if the caller has gone away.
    match command {
        EngineCommand::Load(path, reply) => {
            let _ = reply.send(engine.load(&path));
        }
        EngineCommand::Play(reply) => {
            let _ = reply.send(engine.play());
        }
        EngineCommand::Pause(reply) => {
            let _ = reply.send(engine.pause());
        }
        EngineCommand::Stop(reply) => {
            let _ = reply.send(engine.stop());
        }
        EngineCommand::Seek(fraction, reply) => {
            let _ = reply.send(engine.seek(fraction));
        }
        EngineCommand::Duration(reply) => {
            let _ = reply.send(engine.duration_ms());
        }
        EngineCommand::Time(reply) => {
            let _ = reply.send(engine.time_ms());
        }
        EngineCommand::Release(done) => {
            let _ = done.send(());
        }
    }
}

/// The controlling handle to the engine worker.
///
/// There is exactly one of these per worker and it is owned by the
/// [`Player`](super::Player).
pub(crate) struct EngineClient {
    command_tx: Sender<EngineCommand>,
    clock: PlaybackClock,
}

impl EngineClient {
    fn new(command_tx: Sender<EngineCommand>) -> Self {
        let clock = PlaybackClock {
            command_tx: command_tx.clone(),
        };

        Self { command_tx, clock }
    }

    fn call(&self, command: impl FnOnce(Reply<()>) -> EngineCommand) -> Result<(), EngineError> {
        let (reply_tx, reply_rx) = mpsc::channel();

        self.command_tx
            .send(command(reply_tx))
            .map_err(|_| EngineError::Disconnected)?;

        reply_rx.recv().map_err(|_| EngineError::Disconnected)?
    }

    pub(crate) fn load(&self, path: &Path) -> Result<(), EngineError> {
        self.call(|reply| EngineCommand::Load(path.to_path_buf(), reply))
    }

    pub(crate) fn play(&self) -> Result<(), EngineError> {
        self.call(EngineCommand::Play)
    }

    pub(crate) fn pause(&self) -> Result<(), EngineError> {
        self.call(EngineCommand::Pause)
    }

    pub(crate) fn stop(&self) -> Result<(), EngineError> {
        self.call(EngineCommand::Stop)
    }

    pub(crate) fn seek(&self, fraction: f64) -> Result<(), EngineError> {
        self.call(|reply| EngineCommand::Seek(fraction, reply))
    }

    pub(crate) fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Asks the worker to release the engine and waits for it to do so.
    pub(crate) fn release(&self) {
        let (done_tx, done_rx) = mpsc::channel();

        if self.command_tx.send(EngineCommand::Release(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }
}

/// A read-only view of the engine's playback clock.
///
/// Clocks can be cloned and handed to other threads. They can only query time
/// and duration, and report `None` once the engine is gone.
#[derive(Clone)]
pub(crate) struct PlaybackClock {
    command_tx: Sender<EngineCommand>,
}

impl PlaybackClock {
    fn query(&self, command: impl FnOnce(Sender<Option<u64>>) -> EngineCommand) -> Option<u64> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.command_tx.send(command(reply_tx)).ok()?;
        reply_rx.recv().ok().flatten()
    }

    pub(crate) fn duration(&self) -> Option<u64> {
        self.query(EngineCommand::Duration)
    }

    pub(crate) fn current_time(&self) -> Option<u64> {
        self.query(EngineCommand::Time)
    }
}
