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

//! Inline markup for message bodies.
//!
//! The body is HTML-escaped first, then three overlays run in a fixed
//! order: color codes, bold toggles, bare links. Each overlay only ever
//! sees escaped text plus markup produced by the overlays before it, and
//! none of the patterns can match inside that markup.

pub mod bold;
pub mod color;
pub mod escape;
pub mod uri;

pub use escape::Esc;

use fancy_regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;

/// Markup produced by [`render`]. Safe to embed in a page without further
/// escaping; every span it opens is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RenderedBody(String);

impl RenderedBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderedBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render a raw message body. Never fails; unknown or unpaired control
/// codes are dropped or left as text.
#[must_use]
pub fn render(body: &str) -> RenderedBody {
    let escaped = Esc(body).to_string();
    let colored = color::apply(&escaped);
    let bolded = bold::apply(&colored);
    RenderedBody(uri::apply(&bolded))
}

/// Copy `text`, letting `replace` write the substitute for every match.
///
/// If the matcher gives up part way (backtrack limit), the rest of the
/// text is copied unchanged.
pub(crate) fn replace_matches<F>(pattern: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&Captures<'_>, &mut String),
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(e) => {
                tracing::debug!("Inline markup scan stopped early: {e}");
                break;
            }
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        replace(&caps, &mut out);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}
