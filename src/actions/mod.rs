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

//! Controller logic, event handling and dispatching.
//!
//! This module is where user input and background updates are turned into
//! [`Player`](crate::player::Player) calls and view changes.
//!
//! # Organisation
//!
//! * [`events`]: The [`AppEvent`](events::AppEvent) type, the main event loop
//!   and input mapping.
//! * [`handlers`]: One function per user action (play, pause, seek, ...).

pub(crate) mod events;
pub(crate) mod handlers;

#[cfg(test)]
mod tests;
