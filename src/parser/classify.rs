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

//! Prefix dispatch for transcript lines.
//!
//! A line is `<time> <content>`. The content is matched against [`RULES`]
//! in order and the first rule whose predicate holds decides the class and
//! how actor and body are cut out of the content. A line mentioning both
//! `part` and `quit` is therefore a quit, because quit is tested first.

use super::error::MalformedLineError;
use super::line::{ClassifiedLine, LineClass};

const SYSTEM_MARKER: &str = "***";
const UNKNOWN_ACTOR: &str = "?";

/// How actor and body are extracted once a rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Drop `skip` characters, then split actor/body on the first space
    Split { skip: usize },
    /// Like `Split`, with `* ` put back in front of the actor
    Action { skip: usize },
    /// Drop `skip` characters; actor is the system marker, rest is body
    Marker { skip: usize },
    /// Actor is `?`, the whole content is the body
    Verbatim,
}

/// One entry of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub class: LineClass,
    pub applies: fn(&str) -> bool,
    pub extract: Extract,
}

fn is_quit(content: &str) -> bool {
    content.starts_with(SYSTEM_MARKER) && content.contains("quit")
}

fn is_part(content: &str) -> bool {
    content.starts_with(SYSTEM_MARKER) && content.contains("part")
}

fn is_join(content: &str) -> bool {
    content.starts_with(SYSTEM_MARKER) && content.contains("join")
}

fn is_event(content: &str) -> bool {
    content.starts_with(SYSTEM_MARKER)
}

fn is_action(content: &str) -> bool {
    content.starts_with('*')
}

fn is_message(content: &str) -> bool {
    content.starts_with('<')
}

const fn always(_content: &str) -> bool {
    true
}

/// Ordered dispatch table. Order is the tie-break policy.
pub const RULES: &[Rule] = &[
    Rule {
        class: LineClass::Quit,
        applies: is_quit,
        extract: Extract::Split { skip: 4 },
    },
    Rule {
        class: LineClass::Part,
        applies: is_part,
        extract: Extract::Split { skip: 4 },
    },
    Rule {
        class: LineClass::Join,
        applies: is_join,
        extract: Extract::Split { skip: 4 },
    },
    Rule {
        class: LineClass::Event,
        applies: is_event,
        extract: Extract::Marker { skip: 4 },
    },
    Rule {
        class: LineClass::Action,
        applies: is_action,
        extract: Extract::Action { skip: 2 },
    },
    Rule {
        class: LineClass::Message,
        applies: is_message,
        extract: Extract::Split { skip: 0 },
    },
    Rule {
        class: LineClass::Unknown,
        applies: always,
        extract: Extract::Verbatim,
    },
];

/// Find the first rule that applies to `content`
#[must_use]
pub fn select_rule(content: &str) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(content))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Split a raw transcript line into time, class, actor and body.
///
/// # Errors
///
/// Returns [`MalformedLineError`] when the line has no space after the
/// timestamp, or when a class that carries an actor has no space between
/// actor and body.
pub fn classify(raw_line: &str) -> Result<ClassifiedLine, MalformedLineError> {
    let (time, content) =
        raw_line
            .split_once(' ')
            .ok_or_else(|| MalformedLineError::MissingTimestamp {
                line: raw_line.to_string(),
            })?;

    let rule = select_rule(content);
    let (actor, body) = match rule.extract {
        Extract::Split { skip } => {
            let (actor, body) = split_actor(rule.class, skip_chars(content, skip))?;
            (actor.to_string(), body.to_string())
        }
        Extract::Action { skip } => {
            let (actor, body) = split_actor(rule.class, skip_chars(content, skip))?;
            (format!("* {actor}"), body.to_string())
        }
        Extract::Marker { skip } => (
            SYSTEM_MARKER.to_string(),
            skip_chars(content, skip).to_string(),
        ),
        Extract::Verbatim => (UNKNOWN_ACTOR.to_string(), content.to_string()),
    };

    Ok(ClassifiedLine::new(time, rule.class, actor, body))
}

fn split_actor(class: LineClass, rest: &str) -> Result<(&str, &str), MalformedLineError> {
    rest.split_once(' ')
        .ok_or_else(|| MalformedLineError::MissingActor {
            class,
            content: rest.to_string(),
        })
}

/// Drop the first `n` characters; shorter input leaves nothing
fn skip_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or("", |(idx, _)| &s[idx..])
}
