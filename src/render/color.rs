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

//! Color control codes.
//!
//! `\x03FF` or `\x03FF,BB` switches color. Legacy clients let colors pile
//! up instead of pairing them, so every opened span stays open until the
//! end of the body, where exactly as many closing tags as spans opened are
//! appended.

use super::replace_matches;
use fancy_regex::Regex;
use std::sync::LazyLock;

/// Color control marker
pub const COLOR_MARKER: char = '\x03';

static COLOR_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\x03([0-9]{1,2})(?:,([0-9]{1,2}))?").expect("valid regex literal")
});

/// Codes are looked up verbatim, so `3` is not `03`.
pub const PALETTE: [(&str, &str); 15] = [
    ("01", "black"),
    ("02", "navy"),
    ("03", "green"),
    ("04", "red"),
    ("05", "maroon"),
    ("06", "purple"),
    ("07", "olive"),
    ("08", "yellow"),
    ("09", "lime"),
    ("10", "teal"),
    ("11", "aqua"),
    ("12", "blue"),
    ("13", "fuchsia"),
    ("14", "gray"),
    ("15", "slategrey"),
];

const CLOSE_SPAN: &str = "</span>";

/// CSS color name for a palette code
#[must_use]
pub fn color_name(code: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// Opening tag for a color switch, `None` if any given code is unknown
#[must_use]
pub fn open_span(fg: &str, bg: Option<&str>) -> Option<String> {
    let fg = color_name(fg)?;
    match bg {
        None => Some(format!("<span style=\"color:{fg};\">")),
        Some(bg) => {
            let bg = color_name(bg)?;
            Some(format!("<span style=\"color:{fg}; background-color:{bg}\">"))
        }
    }
}

/// Result of the color scan before finalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScan {
    pub text: String,
    /// Spans opened and not yet closed
    pub opened: usize,
}

impl ColorScan {
    /// Close every span the scan opened
    #[must_use]
    pub fn finish(self) -> String {
        let mut text = self.text;
        text.reserve(CLOSE_SPAN.len() * self.opened);
        for _ in 0..self.opened {
            text.push_str(CLOSE_SPAN);
        }
        text
    }
}

/// Replace color codes with opening spans, counting what was opened
#[must_use]
pub fn scan(body: &str) -> ColorScan {
    if !body.contains(COLOR_MARKER) {
        return ColorScan {
            text: body.to_string(),
            opened: 0,
        };
    }

    let mut opened = 0;
    let text = replace_matches(&COLOR_CODE, body, |caps, out| {
        let Some(fg) = caps.get(1) else {
            return;
        };
        let bg = caps.get(2).map(|m| m.as_str());
        if let Some(span) = open_span(fg.as_str(), bg) {
            out.push_str(&span);
            opened += 1;
        }
    });
    ColorScan { text, opened }
}

/// Color overlay: scan, then close everything that was opened
#[must_use]
pub fn apply(body: &str) -> String {
    scan(body).finish()
}
