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

use std::fs;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::{
    App,
    actions::{
        events::{AppEvent, handle_event},
        handlers::{UNREADABLE_STATUS, refresh_tracks},
    },
    config::AppConfig,
    model::{DialogKind, NO_TRACK_STATUS, ZERO_PROGRESS},
    player::{
        Player, PlayerState,
        fake::{FakeControl, TRACK_LENGTH_MS},
    },
};

fn test_app(files: &[&str]) -> (App, FakeControl, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let config = AppConfig {
        music_dir: dir.path().to_string_lossy().into_owned(),
        ..AppConfig::default()
    };

    let control = FakeControl::default();
    let engine = control.engine();
    let mut player = Player::new();
    player.initialize(move || Ok(engine)).unwrap();

    (App::new(config, player), control, dir)
}

fn press(app: &mut App, code: KeyCode) {
    handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
}

fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
    let event = MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    handle_event(app, AppEvent::Mouse(event)).unwrap();
}

fn progress(app: &mut App, current: Option<u64>, duration: Option<u64>) {
    handle_event(app, AppEvent::Progress { current, duration }).unwrap();
}

#[test]
fn startup_lists_playable_tracks_and_selects_first() {
    let (app, _control, _dir) = test_app(&["b.wav", "a.mp3", "notes.txt"]);

    let names: Vec<&str> = app.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a.mp3", "b.wav"]);
    assert_eq!(app.view.selected(), Some(0));
    assert_eq!(app.view.status, NO_TRACK_STATUS);
    assert!(app.view.dialog.is_none());
}

#[test]
fn empty_folder_is_silent_until_play() {
    let (mut app, _control, _dir) = test_app(&[]);

    assert!(app.tracks.is_empty());
    assert!(app.view.dialog.is_none());

    press(&mut app, KeyCode::Char('p'));

    let dialog = app.view.dialog.as_ref().unwrap();
    assert_eq!(dialog.kind, DialogKind::Info);
    assert_eq!(app.player.state(), PlayerState::Idle);
}

#[test]
fn play_shows_now_playing() {
    let (mut app, control, _dir) = test_app(&["a.mp3", "b.wav"]);
    app.view.slider = 40;

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.view.status, "Now Playing: b.wav");
    assert_eq!(app.view.slider, 0);
    assert_eq!(app.view.time_label, ZERO_PROGRESS);
    assert!(app.player.is_playing());
    assert!(control.state().playing);
}

#[test]
fn failed_load_shows_error_and_keeps_view() {
    let (mut app, _control, dir) = test_app(&["a.mp3"]);
    fs::remove_file(dir.path().join("a.mp3")).unwrap();

    press(&mut app, KeyCode::Char('p'));

    let dialog = app.view.dialog.as_ref().unwrap();
    assert_eq!(dialog.kind, DialogKind::Error);
    assert!(dialog.message.starts_with("Failed to load track a.mp3"));
    assert_eq!(app.view.status, NO_TRACK_STATUS);
    assert!(!app.player.is_playing());
}

#[test]
fn pause_resume_stop_update_status() {
    let (mut app, control, _dir) = test_app(&["a.mp3"]);

    press(&mut app, KeyCode::Char('p'));
    control.advance(10_000);

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.view.status, "Paused");
    assert!(app.player.is_paused());

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.view.status, "Now Playing: a.mp3");
    assert_eq!(app.player.current_time(), Some(10_000));

    progress(&mut app, Some(10_000), Some(TRACK_LENGTH_MS));
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.view.status, "Stopped");
    assert_eq!(app.view.slider, 0);
    assert_eq!(app.view.time_label, ZERO_PROGRESS);
    assert!(!app.player.is_playing() && !app.player.is_paused());
}

#[test]
fn second_pause_shows_error_dialog() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);

    press(&mut app, KeyCode::Char('p'));
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char(' '));

    let dialog = app.view.dialog.as_ref().unwrap();
    assert_eq!(dialog.kind, DialogKind::Error);
    assert_eq!(app.view.status, "Paused");
    assert!(app.player.is_paused());
}

#[test]
fn dialog_captures_keys_until_dismissed() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);

    press(&mut app, KeyCode::Char('p'));
    press(&mut app, KeyCode::Char('r'));
    assert!(app.view.dialog.is_some());

    press(&mut app, KeyCode::Char('s'));
    assert!(app.player.is_playing());

    press(&mut app, KeyCode::Enter);
    assert!(app.view.dialog.is_none());

    press(&mut app, KeyCode::Char('s'));
    assert!(!app.player.is_playing());
}

#[test]
fn progress_moves_slider_and_time_label() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));

    progress(&mut app, Some(45_000), Some(TRACK_LENGTH_MS));

    assert_eq!(app.view.slider, 25);
    assert_eq!(app.view.time_label, "00:45 / 03:00");
}

#[test]
fn unknown_duration_shows_placeholder() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));
    progress(&mut app, Some(45_000), Some(TRACK_LENGTH_MS));

    progress(&mut app, Some(1_000), None);

    assert_eq!(app.view.slider, 0);
    assert_eq!(app.view.time_label, "--:-- / --:--");
}

#[test]
fn progress_is_ignored_when_not_playing() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);

    progress(&mut app, Some(45_000), Some(TRACK_LENGTH_MS));

    assert_eq!(app.view.slider, 0);
    assert_eq!(app.view.time_label, ZERO_PROGRESS);
}

#[test]
fn arrow_keys_seek() {
    let (mut app, control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));

    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);

    assert_eq!(app.view.slider, 10);
    assert_eq!(control.state().position_ms, TRACK_LENGTH_MS / 10);

    press(&mut app, KeyCode::Left);
    assert_eq!(app.view.slider, 5);
}

#[test]
fn seek_without_track_shows_error() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);

    press(&mut app, KeyCode::Right);

    assert_eq!(app.view.slider, 0);
    assert_eq!(app.view.dialog.as_ref().unwrap().kind, DialogKind::Error);
}

#[test]
fn dragging_wins_over_poller() {
    let (mut app, control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));
    app.view.slider_area = Some(Rect::new(0, 20, 101, 1));

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 50, 20);
    assert!(app.view.dragging);
    assert_eq!(app.view.slider, 50);
    assert_eq!(control.state().position_ms, TRACK_LENGTH_MS / 2);

    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 75, 22);
    assert_eq!(app.view.slider, 75);

    progress(&mut app, Some(18_000), Some(TRACK_LENGTH_MS));
    assert_eq!(app.view.slider, 75);
    assert_eq!(app.view.time_label, "00:18 / 03:00");

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 75, 22);
    assert!(!app.view.dragging);

    progress(&mut app, Some(18_000), Some(TRACK_LENGTH_MS));
    assert_eq!(app.view.slider, 10);
}

#[test]
fn press_outside_slider_does_not_seek() {
    let (mut app, control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));
    app.view.slider_area = Some(Rect::new(0, 20, 101, 1));

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 50, 3);

    assert!(!app.view.dragging);
    assert_eq!(control.state().position_ms, 0);
}

#[test]
fn quit_key_requests_exit() {
    let (mut app, _control, _dir) = test_app(&[]);

    press(&mut app, KeyCode::Char('q'));

    assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
}

#[test]
fn rescan_picks_up_new_files() {
    let (mut app, _control, dir) = test_app(&["a.mp3"]);
    fs::write(dir.path().join("c.ogg"), b"").unwrap();

    press(&mut app, KeyCode::Char('R'));

    assert_eq!(app.tracks.len(), 2);
    assert_eq!(app.view.selected(), Some(0));
}

#[test]
fn missing_folder_gives_empty_list() {
    let (mut app, _control, dir) = test_app(&["a.mp3"]);
    app.config.music_dir = dir.path().join("missing").to_string_lossy().into_owned();

    refresh_tracks(&mut app);

    assert!(app.tracks.is_empty());
    assert_eq!(app.view.selected(), None);
    assert_eq!(app.view.status, NO_TRACK_STATUS);
}

#[test]
fn successful_rescan_clears_unreadable_warning() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);
    app.view.status = UNREADABLE_STATUS.to_string();

    press(&mut app, KeyCode::Char('R'));

    assert_eq!(app.tracks.len(), 1);
    assert_eq!(app.view.status, NO_TRACK_STATUS);
}

#[test]
fn rescan_keeps_now_playing_status() {
    let (mut app, _control, dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));
    fs::write(dir.path().join("b.wav"), b"").unwrap();

    press(&mut app, KeyCode::Char('R'));

    assert_eq!(app.tracks.len(), 2);
    assert_eq!(app.view.status, "Now Playing: a.mp3");
}

#[cfg(unix)]
#[test]
fn unreadable_folder_shows_empty_list_with_warning() {
    use std::os::unix::fs::PermissionsExt;

    let (mut app, _control, dir) = test_app(&["a.mp3"]);
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("b.mp3"), b"").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits are not enforced for root.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    app.config.music_dir = locked.to_string_lossy().into_owned();
    refresh_tracks(&mut app);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(app.tracks.is_empty());
    assert_eq!(app.view.selected(), None);
    assert_eq!(app.view.status, UNREADABLE_STATUS);

    refresh_tracks(&mut app);

    assert_eq!(app.tracks.len(), 1);
    assert_eq!(app.view.status, NO_TRACK_STATUS);
}

#[test]
fn seek_while_playing_updates_time_label() {
    let (mut app, _control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));

    press(&mut app, KeyCode::Right);

    assert_eq!(app.view.slider, 5);
    assert_eq!(app.view.time_label, "00:09 / 03:00");
}

#[test]
fn seek_after_stop_is_accepted() {
    let (mut app, control, _dir) = test_app(&["a.mp3"]);
    press(&mut app, KeyCode::Char('p'));
    press(&mut app, KeyCode::Char('s'));

    press(&mut app, KeyCode::Right);

    assert!(app.view.dialog.is_none());
    assert_eq!(app.view.slider, 5);
    assert_eq!(app.view.time_label, ZERO_PROGRESS);
    assert_eq!(control.state().position_ms, TRACK_LENGTH_MS / 20);
}
