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

/// Placeholder shown when a time is not known.
pub(crate) const UNKNOWN_TIME: &str = "--:--";

/// Formats a time in milliseconds as `MM:SS`, truncating to whole seconds.
///
/// `None` renders as [`UNKNOWN_TIME`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(Some(65_900)), "01:05");
/// assert_eq!(format_time(None), "--:--");
/// ```
pub(crate) fn format_time(millis: Option<u64>) -> String {
    match millis {
        Some(millis) => {
            let total_seconds = millis / 1000;
            format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
        }
        None => UNKNOWN_TIME.to_string(),
    }
}

/// The `elapsed / total` time readout.
pub(crate) fn format_progress(current: Option<u64>, duration: Option<u64>) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

/// Maps elapsed time onto the 0-100 slider scale.
///
/// Returns `None` if the duration is unknown or zero.
pub(crate) fn progress_percent(current: Option<u64>, duration: Option<u64>) -> Option<u16> {
    let duration = duration.filter(|d| *d > 0)?;
    let current = current.unwrap_or(0).min(duration);

    Some((current * 100 / duration) as u16)
}
