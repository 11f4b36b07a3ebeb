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

//! HTML pages around rendered transcripts.
//!
//! Everything coming from configuration or the file system is escaped
//! here. Rendered bodies are already markup and are written as they are.

use crate::archive::DayEntry;
use crate::config::GlobalConfig;
use crate::render::Esc;
use crate::transcript::RenderedLine;
use std::fmt::{self, Write};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
table.log td { vertical-align: top; padding: 0 0.5em; }
table.log a.time { color: #888; text-decoration: none; }
tr.join td, tr.part td, tr.quit td, tr.event td { color: #666; font-size: 90%; }
tr.action td.body { font-style: italic; }
tr:target { background-color: #ffc; }
";

/// Displays one URL path segment with everything but unreserved ASCII
/// percent-encoded. The output never needs HTML escaping.
struct PathSegment<'a>(&'a str);

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                f.write_char(char::from(byte))?;
            } else {
                write!(f, "%{byte:02X}")?;
            }
        }
        Ok(())
    }
}

fn open_page(out: &mut String, title: &str) {
    // Writing into a String cannot fail, here and below
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n",
        Esc(title)
    );
}

fn close_page(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

fn heading(out: &mut String, config: &GlobalConfig) {
    if config.website.is_empty() {
        let _ = writeln!(out, "<h1>{}</h1>", Esc(&config.organization));
    } else {
        let _ = writeln!(
            out,
            "<h1><a href=\"{}\">{}</a></h1>",
            Esc(&config.website),
            Esc(&config.organization)
        );
    }
}

/// Human readable file size
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// List of all channels
#[must_use]
pub fn index_page(config: &GlobalConfig, channels: &[String]) -> String {
    let mut out = String::new();
    open_page(&mut out, &format!("{} chat logs", config.organization));
    heading(&mut out, config);
    out.push_str("<ul class=\"channels\">\n");
    for channel in channels {
        let _ = writeln!(
            out,
            "<li><a href=\"{}/index.html\">{}</a></li>",
            PathSegment(channel),
            Esc(channel)
        );
    }
    out.push_str("</ul>\n");
    close_page(&mut out);
    out
}

/// Available days of one channel, in the order given
#[must_use]
pub fn channel_page(config: &GlobalConfig, channel: &str, days: &[DayEntry]) -> String {
    let mut out = String::new();
    open_page(&mut out, channel);
    heading(&mut out, config);
    let _ = writeln!(
        out,
        "<h2>{}</h2>\n<p><a href=\"../index.html\">All channels</a> | \
         <a href=\"today.html\">Today</a></p>",
        Esc(channel)
    );
    out.push_str("<ul class=\"days\">\n");
    for day in days {
        let _ = writeln!(
            out,
            "<li><a href=\"{0}.html\">{0}</a> ({1})</li>",
            Esc(&day.date),
            format_size(day.size)
        );
    }
    out.push_str("</ul>\n");
    close_page(&mut out);
    out
}

/// One day of a channel. `day` is the long form date for the heading.
#[must_use]
pub fn day_page(config: &GlobalConfig, channel: &str, day: &str, lines: &[RenderedLine]) -> String {
    let mut out = String::new();
    open_page(&mut out, &format!("{channel} {day}"));
    heading(&mut out, config);
    let _ = writeln!(
        out,
        "<h2>{} on {}</h2>\n<p><a href=\"index.html\">All days</a></p>",
        Esc(channel),
        Esc(day)
    );
    out.push_str("<table class=\"log\">\n");
    for line in lines {
        let _ = writeln!(
            out,
            "<tr class=\"{class}\" id=\"{id}\"><td><a class=\"time\" href=\"#{id}\">{time}</a></td>\
             <td class=\"actor\">{actor}</td><td class=\"body\">{body}</td></tr>",
            class = line.class,
            id = Esc(&line.fragment_id),
            time = Esc(&line.time),
            actor = Esc(&line.actor),
            body = line.body,
        );
    }
    out.push_str("</table>\n");
    close_page(&mut out);
    out
}

/// Page that forwards to the day page of `date`
#[must_use]
pub fn redirect_page(date: &str) -> String {
    let target = format!("{date}.html");
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={0}\">\n<title>Today</title>\n</head>\n\
         <body>\n<p><a href=\"{0}\">{1}</a></p>\n</body>\n</html>\n",
        Esc(&target),
        Esc(date)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::render_line;

    fn config() -> GlobalConfig {
        GlobalConfig {
            organization: "A & B".into(),
            website: "https://example.org".into(),
            log_dir: None,
        }
    }

    #[test]
    fn test_index_escapes_names() {
        let page = index_page(&config(), &["<rust>".to_string()]);
        assert!(page.contains("<h1><a href=\"https://example.org\">A &amp; B</a></h1>"));
        assert!(page.contains("<a href=\"%3Crust%3E/index.html\">&lt;rust&gt;</a>"));
        assert!(!page.contains("<rust>"));
    }

    #[test]
    fn test_index_links_are_percent_encoded() {
        let page = index_page(&config(), &["#rust".to_string(), "c++ & co".to_string()]);
        assert!(page.contains("<a href=\"%23rust/index.html\">#rust</a>"));
        assert!(page.contains("<a href=\"c%2B%2B%20%26%20co/index.html\">c++ &amp; co</a>"));
        assert_eq!(PathSegment("ok-name_1.~").to_string(), "ok-name_1.~");
        assert_eq!(PathSegment("é?").to_string(), "%C3%A9%3F");
    }

    #[test]
    fn test_heading_without_website() {
        let config = GlobalConfig {
            organization: "Org".into(),
            ..GlobalConfig::default()
        };
        assert!(index_page(&config, &[]).contains("<h1>Org</h1>"));
    }

    #[test]
    fn test_channel_page_lists_days() {
        let days = vec![
            DayEntry {
                date: "2024-01-02".into(),
                size: 2048,
            },
            DayEntry {
                date: "2024-01-01".into(),
                size: 10,
            },
        ];
        let page = channel_page(&config(), "rust", &days);
        let newer = page.find("2024-01-02.html").expect("lists newer day");
        let older = page.find("2024-01-01.html").expect("lists older day");
        assert!(newer < older);
        assert!(page.contains("(2.0 KiB)"));
        assert!(page.contains("(10 B)"));
        assert!(page.contains("href=\"today.html\""));
    }

    #[test]
    fn test_day_page_rows() {
        let lines = vec![
            render_line("09:00:00 <alice> \x02hi\x02 <there>").expect("renders"),
            render_line("09:00:01 * bob waves").expect("renders"),
        ];
        let page = day_page(&config(), "rust", "7 March 2024", &lines);
        assert!(page.contains("<h2>rust on 7 March 2024</h2>"));
        assert!(page.contains(
            "<tr class=\"message\" id=\"T09-00-00\"><td><a class=\"time\" href=\"#T09-00-00\">09:00:00</a></td>\
             <td class=\"actor\">&lt;alice&gt;</td>\
             <td class=\"body\"><span style=\"font-weight: bold;\">hi</span> &lt;there&gt;</td></tr>"
        ));
        assert!(page.contains("<tr class=\"action\" id=\"T09-00-01\">"));
        assert!(page.contains("<td class=\"actor\">* bob</td>"));
    }

    #[test]
    fn test_redirect_page() {
        let page = redirect_page("2024-03-07");
        assert!(page.contains("content=\"0; url=2024-03-07.html\""));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
