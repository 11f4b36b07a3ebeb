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

//! Static export of a whole archive.
//!
//! Layout of the output directory:
//!
//! ```text
//! index.html
//! <channel>/index.html
//! <channel>/<YYYY-MM-DD>.html
//! <channel>/today.html
//! ```

use crate::archive::{self, Archive};
use crate::config::GlobalConfig;
use crate::page;
use crate::transcript::{MalformedPolicy, Transcript};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Totals of one export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteSummary {
    pub channels: usize,
    pub days: usize,
    /// Malformed lines dropped under [`MalformedPolicy::Skip`]
    pub skipped_lines: usize,
}

/// Render one day of a channel to a complete page
///
/// # Errors
///
/// Fails for invalid names, unreadable files, and malformed lines under
/// [`MalformedPolicy::Abort`].
pub fn render_day(
    archive: &Archive,
    config: &GlobalConfig,
    channel: &str,
    date: &str,
    policy: MalformedPolicy,
) -> Result<(String, Transcript)> {
    let path = archive.day_path(channel, date)?;
    let transcript = Transcript::open(&path, policy)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    let heading = archive::long_date(date)?;
    let html = page::day_page(config, channel, &heading, &transcript.lines);
    Ok((html, transcript))
}

/// Write every page of the archive below `out_dir`.
///
/// Days are rendered in parallel; nothing is shared between them.
///
/// # Errors
///
/// Fails on the first channel or day that cannot be read or written.
pub fn build_site(
    archive: &Archive,
    config: &GlobalConfig,
    out_dir: &Path,
    policy: MalformedPolicy,
) -> Result<SiteSummary> {
    let start = Instant::now();
    let channels = archive.channels()?;
    tracing::info!(
        "Building site for {} channels from {:?}",
        channels.len(),
        archive.root()
    );

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    write_page(&out_dir.join("index.html"), &page::index_page(config, &channels))?;

    let today = archive::today();
    let mut summary = SiteSummary {
        channels: channels.len(),
        ..SiteSummary::default()
    };

    for channel in &channels {
        let days = archive.days(channel)?;
        let channel_dir = out_dir.join(channel);
        fs::create_dir_all(&channel_dir)
            .with_context(|| format!("Failed to create {}", channel_dir.display()))?;

        write_page(
            &channel_dir.join("index.html"),
            &page::channel_page(config, channel, &days),
        )?;
        write_page(&channel_dir.join("today.html"), &page::redirect_page(&today))?;

        let skipped = days
            .par_iter()
            .map(|day| -> Result<usize> {
                let (html, transcript) = render_day(archive, config, channel, &day.date, policy)?;
                write_page(&channel_dir.join(format!("{}.html", day.date)), &html)?;
                Ok(transcript.skipped)
            })
            .collect::<Result<Vec<usize>>>()?;

        tracing::debug!("Rendered {} days of {channel}", days.len());
        summary.days += days.len();
        summary.skipped_lines += skipped.iter().sum::<usize>();
    }

    tracing::info!(
        "Wrote {} day pages for {} channels in {:?}",
        summary.days,
        summary.channels,
        start.elapsed()
    );
    Ok(summary)
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_archive() -> (tempfile::TempDir, Archive) {
        let dir = tempfile::tempdir().expect("temp dir");
        let rust = dir.path().join("rust");
        let go = dir.path().join("go");
        fs::create_dir_all(&rust).expect("mkdir");
        fs::create_dir_all(&go).expect("mkdir");
        fs::write(
            rust.join("2024-03-07.txt"),
            "10:00:00 <ferris> \x0304crab\x02!\x02\n10:00:01 *** ferris has quit (bye)\n",
        )
        .expect("write");
        fs::write(rust.join("2024-03-08.txt"), "10:00:00 <ferris> again\n10:00:01\n")
            .expect("write");
        fs::write(go.join("2024-03-07.txt"), "11:00:00 * gopher digs\n").expect("write");
        let archive = Archive::new(dir.path());
        (dir, archive)
    }

    #[test]
    fn test_render_day() {
        let (_dir, archive) = sample_archive();
        let (html, transcript) = render_day(
            &archive,
            &GlobalConfig::default(),
            "rust",
            "2024-03-07",
            MalformedPolicy::Abort,
        )
        .expect("renders");
        assert_eq!(transcript.lines.len(), 2);
        assert!(html.contains("rust on 7 March 2024"));
        assert!(html.contains(
            "<span style=\"color:red;\">crab<span style=\"font-weight: bold;\">!</span></span>"
        ));
    }

    #[test]
    fn test_render_day_abort_on_malformed() {
        let (_dir, archive) = sample_archive();
        assert!(render_day(
            &archive,
            &GlobalConfig::default(),
            "rust",
            "2024-03-08",
            MalformedPolicy::Abort,
        )
        .is_err());
    }

    #[test]
    fn test_build_site_writes_all_pages() {
        let (_dir, archive) = sample_archive();
        let out = tempfile::tempdir().expect("temp dir");
        let summary = build_site(
            &archive,
            &GlobalConfig::default(),
            out.path(),
            MalformedPolicy::Skip,
        )
        .expect("builds");

        assert_eq!(
            summary,
            SiteSummary {
                channels: 2,
                days: 3,
                skipped_lines: 1,
            }
        );
        for page in [
            "index.html",
            "go/index.html",
            "go/today.html",
            "go/2024-03-07.html",
            "rust/index.html",
            "rust/2024-03-07.html",
            "rust/2024-03-08.html",
        ] {
            assert!(out.path().join(page).is_file(), "missing {page}");
        }
        let index = fs::read_to_string(out.path().join("index.html")).expect("read");
        assert!(index.find("go/index.html") < index.find("rust/index.html"));
    }

    #[test]
    fn test_build_site_ignores_hidden_directories() {
        let (_dir, archive) = sample_archive();
        fs::create_dir_all(archive.root().join(".git/objects")).expect("mkdir");
        let out = tempfile::tempdir().expect("temp dir");
        let summary = build_site(
            &archive,
            &GlobalConfig::default(),
            out.path(),
            MalformedPolicy::Skip,
        )
        .expect("builds");

        assert_eq!(summary.channels, 2);
        assert!(!out.path().join(".git").exists());
    }

    #[test]
    fn test_build_site_abort_fails() {
        let (_dir, archive) = sample_archive();
        let out = tempfile::tempdir().expect("temp dir");
        assert!(build_site(
            &archive,
            &GlobalConfig::default(),
            out.path(),
            MalformedPolicy::Abort,
        )
        .is_err());
    }
}
