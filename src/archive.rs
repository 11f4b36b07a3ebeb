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

//! On-disk layout of the archive: `<root>/<channel>/<YYYY-MM-DD>.txt`.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Date format of transcript file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const TRANSCRIPT_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("unknown channel {0:?}")]
    UnknownChannel(String),

    #[error("invalid channel name {0:?}")]
    InvalidChannel(String),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One available day of a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    /// File stem, `YYYY-MM-DD`
    pub date: String,
    /// File size in bytes
    pub size: u64,
}

/// Read-only view of a log directory
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Channel names (subdirectories of the root), sorted. Hidden
    /// directories such as `.git` are not channels.
    ///
    /// # Errors
    ///
    /// Fails if the root directory cannot be listed.
    pub fn channels(&self) -> Result<Vec<String>, ArchiveError> {
        let entries = fs::read_dir(&self.root).map_err(|source| self.io_error(&self.root, source))?;

        let mut channels: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| validate_channel(name).is_ok())
            .collect();
        channels.sort();

        tracing::debug!("Found {} channels in {:?}", channels.len(), self.root);
        Ok(channels)
    }

    /// Days with a readable transcript named `YYYY-MM-DD.txt`, newest first.
    ///
    /// # Errors
    ///
    /// Fails for invalid or missing channels and unreadable directories.
    pub fn days(&self, channel: &str) -> Result<Vec<DayEntry>, ArchiveError> {
        let dir = self.channel_dir(channel)?;
        if !dir.is_dir() {
            return Err(ArchiveError::UnknownChannel(channel.to_string()));
        }

        let entries = fs::read_dir(&dir).map_err(|source| self.io_error(&dir, source))?;
        let mut days: Vec<DayEntry> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
            })
            .filter_map(|path| {
                // Only files that can actually be opened are listed
                let metadata = fs::metadata(&path).ok()?;
                if !metadata.is_file() || fs::File::open(&path).is_err() {
                    return None;
                }
                let date = path.file_stem()?.to_str()?.to_string();
                if parse_date(&date).is_err() {
                    tracing::debug!("Ignoring {path:?}, not named after a date");
                    return None;
                }
                Some(DayEntry {
                    date,
                    size: metadata.len(),
                })
            })
            .collect();
        days.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(days)
    }

    /// Path of one day's transcript. The file need not exist.
    ///
    /// # Errors
    ///
    /// Fails for channel names that would leave the root and for dates not
    /// in `YYYY-MM-DD` form.
    pub fn day_path(&self, channel: &str, date: &str) -> Result<PathBuf, ArchiveError> {
        parse_date(date)?;
        Ok(self
            .channel_dir(channel)?
            .join(format!("{date}.{TRANSCRIPT_EXTENSION}")))
    }

    fn channel_dir(&self, channel: &str) -> Result<PathBuf, ArchiveError> {
        validate_channel(channel)?;
        Ok(self.root.join(channel))
    }

    fn io_error(&self, path: &Path, source: io::Error) -> ArchiveError {
        tracing::debug!("I/O error below {:?}: {source}", self.root);
        ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reject names that are empty, hidden, or contain a path component
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidChannel`].
pub fn validate_channel(channel: &str) -> Result<(), ArchiveError> {
    let bad = channel.is_empty()
        || channel.starts_with('.')
        || channel.contains(['/', '\\'])
        || channel.contains('\0');
    if bad {
        return Err(ArchiveError::InvalidChannel(channel.to_string()));
    }
    Ok(())
}

/// Parse a zero-padded `YYYY-MM-DD` date token. Unpadded forms such as
/// `2024-1-5` are rejected so tokens sort chronologically as text.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidDate`].
pub fn parse_date(date: &str) -> Result<NaiveDate, ArchiveError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .filter(|parsed| parsed.format(DATE_FORMAT).to_string() == date)
        .ok_or_else(|| ArchiveError::InvalidDate(date.to_string()))
}

/// Long form of a date token: `2024-03-07` becomes `7 March 2024`.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidDate`].
pub fn long_date(date: &str) -> Result<String, ArchiveError> {
    Ok(parse_date(date)?.format("%-d %B %Y").to_string())
}

/// Today's date token in UTC
#[must_use]
pub fn today() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Archive) {
        let dir = tempfile::tempdir().expect("temp dir");
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().expect("has parent")).expect("mkdir");
            fs::write(&full, content).expect("write");
        }
        let archive = Archive::new(dir.path());
        (dir, archive)
    }

    #[test]
    fn test_channels_sorted_and_only_directories() {
        let (_dir, archive) = archive_with(&[
            ("zeta/2024-01-01.txt", "x"),
            ("alpha/2024-01-01.txt", "x"),
            ("stray.txt", "not a channel"),
        ]);
        assert_eq!(archive.channels().expect("lists"), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_hidden_directories_are_not_channels() {
        let (_dir, archive) = archive_with(&[("rust/2024-03-07.txt", "x")]);
        fs::create_dir_all(archive.root().join(".git")).expect("mkdir");
        assert_eq!(archive.channels().expect("lists"), vec!["rust"]);
    }

    #[test]
    fn test_unpadded_dates_are_not_listed() {
        let (_dir, archive) = archive_with(&[
            ("rust/2024-01-10.txt", "x"),
            ("rust/2024-1-5.txt", "x"),
        ]);
        let dates: Vec<String> = archive
            .days("rust")
            .expect("lists")
            .into_iter()
            .map(|day| day.date)
            .collect();
        assert_eq!(dates, vec!["2024-01-10"]);
        assert!(matches!(
            parse_date("2024-1-5"),
            Err(ArchiveError::InvalidDate(_))
        ));
        assert!(parse_date("2024-01-05").is_ok());
    }

    #[test]
    fn test_days_newest_first_with_sizes() {
        let (_dir, archive) = archive_with(&[
            ("rust/2024-01-02.txt", "12345"),
            ("rust/2024-01-10.txt", "1"),
            ("rust/2023-12-31.txt", ""),
            ("rust/notes.md", "ignored"),
            ("rust/notes.txt", "not a date"),
        ]);
        let days = archive.days("rust").expect("lists");
        assert_eq!(
            days,
            vec![
                DayEntry {
                    date: "2024-01-10".into(),
                    size: 1
                },
                DayEntry {
                    date: "2024-01-02".into(),
                    size: 5
                },
                DayEntry {
                    date: "2023-12-31".into(),
                    size: 0
                },
            ]
        );
    }

    #[test]
    fn test_unknown_and_invalid_channels() {
        let (_dir, archive) = archive_with(&[("rust/2024-01-01.txt", "x")]);
        assert!(matches!(
            archive.days("python"),
            Err(ArchiveError::UnknownChannel(_))
        ));
        assert!(matches!(
            archive.days(".."),
            Err(ArchiveError::InvalidChannel(_))
        ));
        assert!(matches!(
            archive.day_path("../etc", "2024-01-01"),
            Err(ArchiveError::InvalidChannel(_))
        ));
    }

    #[test]
    fn test_day_path() {
        let archive = Archive::new("/logs");
        assert_eq!(
            archive.day_path("rust", "2024-01-01").expect("valid"),
            PathBuf::from("/logs/rust/2024-01-01.txt")
        );
        assert!(matches!(
            archive.day_path("rust", "yesterday"),
            Err(ArchiveError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2024-03-07").expect("valid"), "7 March 2024");
        assert_eq!(long_date("1999-12-25").expect("valid"), "25 December 1999");
        assert!(long_date("2024-02-30").is_err());
        assert!(long_date("2024-3-7").is_err());
    }

    #[test]
    fn test_today_is_a_valid_date_token() {
        assert!(parse_date(&today()).is_ok());
    }
}
