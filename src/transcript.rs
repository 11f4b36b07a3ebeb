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

//! Runs a whole transcript through the classifier and the renderer.

use crate::parser::{classify, LineClass, MalformedLineError};
use crate::render::{render, RenderedBody};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// A transcript line ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub time: String,
    pub class: LineClass,
    pub actor: String,
    pub body: RenderedBody,
    pub fragment_id: String,
}

/// Classify and render a single raw line.
///
/// # Errors
///
/// Returns [`MalformedLineError`] if the line cannot be classified.
pub fn render_line(raw: &str) -> Result<RenderedLine, MalformedLineError> {
    let line = classify(raw)?;
    Ok(RenderedLine {
        body: render(&line.body),
        time: line.time,
        class: line.class,
        actor: line.actor,
        fragment_id: line.fragment_id,
    })
}

/// What to do with a line the classifier rejects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Stop at the first malformed line
    #[default]
    Abort,
    /// Log and drop malformed lines
    Skip,
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript: {0}")]
    Io(#[from] io::Error),

    #[error("malformed line {line_number}: {source}")]
    Malformed {
        line_number: usize,
        #[source]
        source: MalformedLineError,
    },
}

/// One rendered day, lines in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub lines: Vec<RenderedLine>,
    /// Malformed lines dropped under [`MalformedPolicy::Skip`]
    pub skipped: usize,
}

impl Transcript {
    /// Render every line of `reader`. Invalid UTF-8 is replaced, blank
    /// lines are ignored.
    ///
    /// # Errors
    ///
    /// Fails on read errors, and on the first malformed line under
    /// [`MalformedPolicy::Abort`].
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        policy: MalformedPolicy,
    ) -> Result<Self, TranscriptError> {
        let mut transcript = Self::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let text = String::from_utf8_lossy(&buffer);
            let raw = text.trim_end_matches('\n').trim_end_matches('\r');
            if raw.trim().is_empty() {
                continue;
            }

            match render_line(raw) {
                Ok(line) => transcript.lines.push(line),
                Err(source) => match policy {
                    MalformedPolicy::Abort => {
                        return Err(TranscriptError::Malformed {
                            line_number,
                            source,
                        });
                    }
                    MalformedPolicy::Skip => {
                        tracing::warn!("Skipping malformed line {line_number}: {source}");
                        transcript.skipped += 1;
                    }
                },
            }
        }

        tracing::debug!(
            "Rendered {} lines, skipped {}",
            transcript.lines.len(),
            transcript.skipped
        );
        Ok(transcript)
    }

    /// Render the transcript stored at `path`.
    ///
    /// # Errors
    ///
    /// See [`Transcript::from_reader`]; also fails if the file cannot be opened.
    pub fn open(path: &Path, policy: MalformedPolicy) -> Result<Self, TranscriptError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), policy)
    }
}
