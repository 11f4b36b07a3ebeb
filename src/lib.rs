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

//! Renders archived chat-room transcripts as HTML.
//!
//! [`parser`] splits a raw line into time, class, actor and body;
//! [`render`] turns the body into safe markup. The remaining modules read
//! the archive from disk and assemble pages around the rendered lines.

pub mod archive;
pub mod config;
pub mod page;
pub mod parser;
pub mod render;
pub mod site;
pub mod transcript;

pub use parser::{classify, ClassifiedLine, LineClass, MalformedLineError};
pub use render::{render, RenderedBody};
pub use transcript::{render_line, MalformedPolicy, RenderedLine, Transcript};
