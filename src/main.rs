// `ChanLog` - Browsable HTML for archived chat transcripts
//
// Copyright (C) 2026 Daniel Freiermuth
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
use anyhow::{Context, Result};
use chanlog::archive::{self, Archive};
use chanlog::config::GlobalConfig;
use chanlog::site;
use chanlog::transcript::{MalformedPolicy, Transcript};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chanlog")]
#[command(author = "ChanLog Team")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Render archived chat-room transcripts as HTML", long_about = None)]
struct Args {
    /// Directory with one subdirectory per channel
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Organization name shown in page headings
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Website the organization heading links to
    #[arg(long, global = true)]
    website: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List channels
    Channels,

    /// List the days of a channel, newest first
    Days { channel: String },

    /// Render one day to stdout
    Show {
        channel: String,
        /// Day as YYYY-MM-DD, or "today"
        date: String,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
        /// Drop malformed lines instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Write a static site for the whole archive
    Build {
        #[arg(value_name = "OUT_DIR")]
        out_dir: PathBuf,
        /// Drop malformed lines instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Store --organization, --website and --log-dir in the config file
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Html,
    Json,
}

const fn policy(skip_malformed: bool) -> MalformedPolicy {
    if skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Abort
    }
}

fn main() -> Result<()> {
    // Set RUST_LOG environment variable to override (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    tracing::debug!(
        "ChanLog starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let args = Args::parse();
    let config =
        GlobalConfig::load().with_overrides(args.organization, args.website, args.log_dir);
    let archive = Archive::new(config.log_dir());
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Channels => {
            for channel in archive.channels()? {
                writeln!(stdout, "{channel}")?;
            }
        }
        Command::Days { channel } => {
            for day in archive.days(&channel)? {
                writeln!(stdout, "{}\t{}", day.date, day.size)?;
            }
        }
        Command::Show {
            channel,
            date,
            format,
            skip_malformed,
        } => {
            let date = if date == "today" { archive::today() } else { date };
            match format {
                Format::Html => {
                    let (html, _) = site::render_day(
                        &archive,
                        &config,
                        &channel,
                        &date,
                        policy(skip_malformed),
                    )?;
                    stdout.write_all(html.as_bytes())?;
                }
                Format::Json => {
                    let path = archive.day_path(&channel, &date)?;
                    let transcript = Transcript::open(&path, policy(skip_malformed))
                        .with_context(|| format!("Failed to render {}", path.display()))?;
                    for line in &transcript.lines {
                        serde_json::to_writer(&mut stdout, line)?;
                        writeln!(stdout)?;
                    }
                }
            }
        }
        Command::Build {
            out_dir,
            skip_malformed,
        } => {
            let summary = site::build_site(&archive, &config, &out_dir, policy(skip_malformed))?;
            if summary.skipped_lines > 0 {
                tracing::warn!("Skipped {} malformed lines", summary.skipped_lines);
            }
            writeln!(
                stdout,
                "{} channels, {} days written to {}",
                summary.channels,
                summary.days,
                out_dir.display()
            )?;
        }
        Command::Config => {
            let path = config.save().map_err(anyhow::Error::msg)?;
            writeln!(stdout, "{}", path.display())?;
        }
    }

    Ok(())
}
