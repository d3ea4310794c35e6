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

//! Discovery of playable audio files.
//!
//! The music folder is scanned one level deep, keeping only files with a
//! supported extension. Results are ordered by file name so that scanning an
//! unchanged folder always yields the same list.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// File extensions (lowercase, without the dot) recognised as playable.
pub(crate) const SUPPORTED_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];

/// A discovered audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Track {
    pub(crate) path: PathBuf,
    /// File name only, used for display.
    pub(crate) name: String,
    /// Lowercased extension.
    pub(crate) extension: String,
}

#[derive(Debug, Error)]
pub(crate) enum DiscoveryError {
    #[error("failed to read music folder {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl Track {
    /// Builds a track from a path if its extension is supported.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())?;

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let name = path.file_name()?.to_string_lossy().into_owned();

        Some(Self {
            path: path.to_path_buf(),
            name,
            extension,
        })
    }
}

/// Lists the playable tracks directly inside `folder`.
///
/// A folder that does not exist yields an empty list rather than an error.
///
/// # Errors
///
/// Returns [`DiscoveryError::Unreadable`] if the folder exists but it, or one
/// of its entries, cannot be read.
pub(crate) fn list_tracks(folder: &Path) -> Result<Vec<Track>, DiscoveryError> {
    if !folder.is_dir() {
        log::info!("Music folder {} does not exist", folder.display());
        return Ok(vec![]);
    }

    let mut tracks = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DiscoveryError::Unreadable {
            path: folder.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if let Some(track) = Track::from_path(path) {
            tracks.push(track);
        }
    }

    log::debug!("Found {} tracks in {}", tracks.len(), folder.display());

    Ok(tracks)
}
