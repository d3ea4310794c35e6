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

//! User action handlers.
//!
//! Each handler makes the matching [`Player`](crate::player::Player) call and
//! reflects the outcome in the view. Failures become an error dialog and
//! leave the rest of the view untouched.

use crate::{
    App,
    library::list_tracks,
    model::{NO_TRACK_STATUS, PAUSED_STATUS, SLIDER_MAX, STOPPED_STATUS},
    player::PlayerState,
    util::format::{format_progress, progress_percent},
};

pub(crate) const UNREADABLE_STATUS: &str = "Could not read music folder";

/// Rescans the music folder, replacing the track list.
///
/// An unreadable folder is shown as an empty list. A later successful scan
/// clears the warning but keeps any "Now Playing" status.
pub(crate) fn refresh_tracks(app: &mut App) {
    let folder = app.config.music_dir();

    app.tracks = match list_tracks(&folder) {
        Ok(tracks) => {
            if app.view.status == UNREADABLE_STATUS {
                app.view.status = NO_TRACK_STATUS.to_string();
            }
            tracks
        }
        Err(e) => {
            log::warn!("{}", e);
            app.view.status = UNREADABLE_STATUS.to_string();
            vec![]
        }
    };

    app.view.reset_selection(app.tracks.len());
    log::info!("{} tracks in {}", app.tracks.len(), folder.display());
}

pub(crate) fn on_play(app: &mut App) {
    let Some(track) = app
        .view
        .selected()
        .and_then(|index| app.tracks.get(index))
        .cloned()
    else {
        app.view.show_info("Please select a track to play.");
        return;
    };

    if let Err(e) = app.player.load_track(&track) {
        app.view
            .show_error(format!("Failed to load track {}: {}", track.name, e));
        return;
    }

    if let Err(e) = app.player.play() {
        app.view.show_error(format!("Failed to start playback: {}", e));
        return;
    }

    app.view.set_now_playing(&track.name);
    app.view.reset_progress();
}

pub(crate) fn on_pause(app: &mut App) {
    match app.player.pause() {
        Ok(()) => app.view.status = PAUSED_STATUS.to_string(),
        Err(e) => app.view.show_error(format!("Failed to pause playback: {}", e)),
    }
}

pub(crate) fn on_resume(app: &mut App) {
    if let Err(e) = app.player.resume() {
        app.view.show_error(format!("Failed to resume playback: {}", e));
        return;
    }

    if let Some(track) = app.player.current_track() {
        app.view.set_now_playing(&track.name);
    }
}

pub(crate) fn on_stop(app: &mut App) {
    if let Err(e) = app.player.stop() {
        app.view.show_error(format!("Failed to stop playback: {}", e));
        return;
    }

    app.view.status = STOPPED_STATUS.to_string();
    app.view.reset_progress();
}

/// Seeks to a user-chosen slider value (0 to [`SLIDER_MAX`]).
pub(crate) fn on_slider_moved(app: &mut App, value: u16) {
    let value = value.min(SLIDER_MAX);
    let fraction = f64::from(value) / f64::from(SLIDER_MAX);

    match app.player.set_position(fraction) {
        Ok(()) => {
            app.view.slider = value;
            if app.player.is_playing() || app.player.is_paused() {
                app.view.time_label =
                    format_progress(app.player.current_time(), app.player.duration());
            }
        }
        Err(e) => {
            app.view.dragging = false;
            app.view.show_error(format!("Failed to seek: {}", e));
        }
    }
}

pub(crate) fn nudge_slider(app: &mut App, delta: i32) {
    let value = (i32::from(app.view.slider) + delta).clamp(0, i32::from(SLIDER_MAX));
    on_slider_moved(app, value as u16);
}

/// Applies a poller reading to the slider and time label.
///
/// Readings only matter while a track is playing or paused. The slider is
/// left alone during a drag so the user's hand wins over the poller.
pub(crate) fn apply_progress(app: &mut App, current: Option<u64>, duration: Option<u64>) {
    if !matches!(app.player.state(), PlayerState::Playing | PlayerState::Paused) {
        return;
    }

    let (slider, label) = match progress_percent(current, duration) {
        Some(percent) => (percent, format_progress(current, duration)),
        None => (0, format_progress(None, None)),
    };

    if !app.view.dragging {
        app.view.slider = slider;
    }
    app.view.time_label = label;
}
