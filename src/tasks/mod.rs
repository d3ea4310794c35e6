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

//! Background polling of the playback clock.
//!
//! The poller runs on its own thread and only reads from a
//! [`PlaybackClock`]. Each reading is posted to the UI thread as an
//! [`AppEvent::Progress`]; the poller never touches UI state itself.
//!
//! Stopping is explicit: [`ProgressPoller::stop`] signals the thread and
//! joins it, which must happen before the engine is released.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{actions::events::AppEvent, player::PlaybackClock};

pub(crate) struct ProgressPoller {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Spawns a thread that reports the playback clock every `interval`.
pub(crate) fn spawn_progress_poller(
    clock: PlaybackClock,
    event_tx: Sender<AppEvent>,
    interval: Duration,
) -> ProgressPoller {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        loop {
            let duration = clock.duration();
            let current = clock.current_time();

            if event_tx
                .send(AppEvent::Progress { current, duration })
                .is_err()
            {
                break;
            }

            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        log::debug!("Progress poller stopped");
    });

    ProgressPoller { stop_tx, handle }
}

impl ProgressPoller {
    /// Signals the poller and waits for it to exit.
    pub(crate) fn stop(self) {
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            log::error!("Progress poller panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc, time::Duration};

    use super::spawn_progress_poller;
    use crate::{
        actions::events::AppEvent,
        library::Track,
        player::{Player, fake::{FakeControl, TRACK_LENGTH_MS}},
    };

    #[test]
    fn posts_clock_readings_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, b"").unwrap();

        let control = FakeControl::default();
        let engine = control.engine();
        let mut player = Player::new();
        player.initialize(move || Ok(engine)).unwrap();
        player.load_track(&Track::from_path(&path).unwrap()).unwrap();
        player.play().unwrap();
        control.advance(3_000);

        let (event_tx, event_rx) = mpsc::channel();
        let poller = spawn_progress_poller(
            player.clock().unwrap(),
            event_tx,
            Duration::from_millis(10),
        );

        let event = event_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            event,
            AppEvent::Progress {
                current: Some(3_000),
                duration: Some(TRACK_LENGTH_MS)
            }
        ));

        poller.stop();
        player.cleanup();

        // Drain whatever was sent before the stop, then the channel closes.
        while event_rx.recv_timeout(Duration::from_millis(100)).is_ok() {}
        assert!(event_rx.recv().is_err());
    }
}
