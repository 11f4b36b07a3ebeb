// ChanLog - GPL-3.0-or-later
// This file is part of ChanLog.
//
// Copyright (C) 2026 Daniel Freiermuth
//
// ChanLog is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// ChanLog is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with ChanLog.  If not, see <https://www.gnu.org/licenses/>.

use serde::Serialize;
use std::fmt;

/// Prefix of every fragment anchor. Anchors must not start with a digit.
pub const FRAGMENT_PREFIX: char = 'T';

/// Semantic category of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineClass {
    Message,
    Action,
    Join,
    Part,
    Quit,
    Event,
    Unknown,
}

impl LineClass {
    /// Name used as CSS class and in serialized output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Action => "action",
            Self::Join => "join",
            Self::Part => "part",
            Self::Quit => "quit",
            Self::Event => "event",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript line split into its parts, body still unrendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    /// Timestamp token exactly as it appeared in the log
    pub time: String,
    pub class: LineClass,
    /// Speaker, or a literal marker (`***`, `?`) for system lines
    pub actor: String,
    /// Free text after the actor, control codes untouched
    pub body: String,
    /// Per-line anchor derived from `time`
    pub fragment_id: String,
}

impl ClassifiedLine {
    pub fn new(time: &str, class: LineClass, actor: String, body: String) -> Self {
        Self {
            time: time.to_string(),
            class,
            actor,
            body,
            fragment_id: fragment_id(time),
        }
    }
}

/// Build the anchor for a timestamp: `12:03:44` becomes `T12-03-44`.
///
/// Two lines logged within the same second share an anchor.
#[must_use]
pub fn fragment_id(time: &str) -> String {
    let mut id = String::with_capacity(time.len() + 1);
    id.push(FRAGMENT_PREFIX);
    id.extend(time.chars().map(|c| if c == ':' { '-' } else { c }));
    id
}
