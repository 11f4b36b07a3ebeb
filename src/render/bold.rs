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

use super::replace_matches;
use fancy_regex::Regex;
use std::sync::LazyLock;

/// Bold toggle marker
pub const BOLD_MARKER: char = '\x02';

// Shortest run between two toggles; toggles do not nest
static BOLD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\x02([^\x02]*?)\x02").expect("valid regex literal"));

/// Wrap text between toggle pairs in a bold span, dropping the toggles.
/// A toggle without a partner stays in the text.
#[must_use]
pub fn apply(body: &str) -> String {
    if !body.contains(BOLD_MARKER) {
        return body.to_string();
    }

    replace_matches(&BOLD_RUN, body, |caps, out| {
        out.push_str("<span style=\"font-weight: bold;\">");
        if let Some(inner) = caps.get(1) {
            out.push_str(inner.as_str());
        }
        out.push_str("</span>");
    })
}
