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

use super::line::LineClass;
use thiserror::Error;

/// A line that cannot be split into the tokens its class requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLineError {
    /// No space separates the timestamp from the content
    #[error("no timestamp separator in line {line:?}")]
    MissingTimestamp { line: String },

    /// The remainder after the class marker has no actor/body separator
    #[error("{class} line has no separator between actor and body: {content:?}")]
    MissingActor { class: LineClass, content: String },
}
