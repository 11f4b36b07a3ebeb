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

//! Bare links in already escaped text.
//!
//! A link is `ftp://`, `http://` or `https://` followed by characters from a
//! conservative class. Brackets, closing parens and `, ; : .` only count when
//! another non-space character follows, so sentence punctuation stays
//! outside. Control characters, such as unpaired color or bold markers, end
//! a link. An `&` only counts when it does not start one of the entities the
//! escaper produces for `< > " '`, so a link never swallows them.

use super::replace_matches;
use fancy_regex::Regex;
use std::sync::LazyLock;

static URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:ftp|https?)://(?:[^\s\x00-\x1f<>"'\[\]),;:.&]|&(?!(?:[gl]t|quot|#39);)|[\[\]),;:.](?=\S))+"#,
    )
    .expect("valid regex literal")
});

/// Turn every bare link into a link to itself
#[must_use]
pub fn apply(text: &str) -> String {
    if !text.contains("://") {
        return text.to_string();
    }

    replace_matches(&URI, text, |caps, out| {
        if let Some(uri) = caps.get(0) {
            let uri = uri.as_str();
            out.push_str("<a href=\"");
            out.push_str(uri);
            out.push_str("\">");
            out.push_str(uri);
            out.push_str("</a>");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(uri: &str) -> String {
        format!("<a href=\"{uri}\">{uri}</a>")
    }

    #[test]
    fn test_plain_link() {
        assert_eq!(
            apply("see https://example.com/path?q=1 now"),
            format!("see {} now", link("https://example.com/path?q=1"))
        );
    }

    #[test]
    fn test_inner_comma_kept() {
        assert_eq!(
            apply("see http://example.com/a,b for info"),
            format!("see {} for info", link("http://example.com/a,b"))
        );
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        assert_eq!(apply("http://x.com."), format!("{}.", link("http://x.com")));
        assert_eq!(
            apply("go to http://x.com, then"),
            format!("go to {}, then", link("http://x.com"))
        );
        assert_eq!(
            apply("(see http://x.com/a)"),
            format!("(see {})", link("http://x.com/a"))
        );
    }

    #[test]
    fn test_stops_at_escaped_angle_brackets() {
        assert_eq!(
            apply("&lt;http://x.com/a&gt;"),
            format!("&lt;{}&gt;", link("http://x.com/a"))
        );
    }

    #[test]
    fn test_keeps_escaped_ampersand() {
        assert_eq!(
            apply("http://x.com/?a=1&amp;b=2"),
            link("http://x.com/?a=1&amp;b=2")
        );
    }

    #[test]
    fn test_stops_at_escaped_quote() {
        assert_eq!(
            apply("&quot;http://x.com&quot;"),
            format!("&quot;{}&quot;", link("http://x.com"))
        );
    }

    #[test]
    fn test_ftp_and_unsupported_schemes() {
        assert_eq!(
            apply("ftp://files.example.org/pub"),
            link("ftp://files.example.org/pub")
        );
        assert_eq!(apply("gopher://old.example"), "gopher://old.example");
        assert_eq!(apply("http:// nothing"), "http:// nothing");
    }

    #[test]
    fn test_stops_at_leftover_control_codes() {
        assert_eq!(
            apply("http://x.com\x02 y"),
            format!("{}\x02 y", link("http://x.com"))
        );
        assert_eq!(
            apply("http://x.com/a\x03b"),
            format!("{}\x03b", link("http://x.com/a"))
        );
    }

    #[test]
    fn test_stops_before_markup() {
        assert_eq!(
            apply("<span style=\"color:red;\">http://x.com</span>"),
            format!("<span style=\"color:red;\">{}</span>", link("http://x.com"))
        );
    }
}
