// SPDX-License-Identifier: MIT
//
// quick-jump: two-keystroke cursor jumps over the files on the command line.
//
// This is the binary that wires the crates together:
//
//   qj-config → settings file, validated into a JumpConfig and a Palette
//   qj-core   → target scanning, labels, the two-prompt state machine
//   terminal  → the Host: files as panes, markers drawn with crossterm
//
// One run is one jump:
//
//   args → settings → panes → qj_core::jump → print path:line:col
//
// Exit status: 0 after a jump, 1 when the jump was cancelled (nothing to
// jump to, bad key, Esc), 2 when the settings or files could not be used.

mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use qj_config::Settings;
use qj_core::Outcome;

use crate::terminal::{FilePane, Size, TermHost};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "quick-jump", version, about = "Jump anywhere on screen in two keystrokes")]
struct Args {
    /// Settings file (default: <config dir>/quick-jump/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// First line shown in every pane, 1-indexed.
    #[arg(long, value_name = "LINE", default_value_t = 1)]
    top: usize,

    /// Write the default settings to PATH and exit.
    #[arg(long, value_name = "PATH", conflicts_with = "files")]
    write_default_config: Option<PathBuf>,

    /// Files to show, one pane each, top to bottom.
    #[arg(required_unless_present = "write_default_config")]
    files: Vec<PathBuf>,
}

// ─── Exit status ────────────────────────────────────────────────────────────

const EXIT_CANCELLED: u8 = 1;
const EXIT_UNUSABLE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("quick-jump: {err:#}");
            ExitCode::from(EXIT_UNUSABLE)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    if let Some(path) = &args.write_default_config {
        Settings::default()
            .save_to_path(path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!("wrote default settings to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Validate everything before the terminal is touched.
    let settings = Settings::load_or_default(args.config.as_deref())?;
    let (config, palette) = settings.validate()?;
    debug!("settings: {settings:?}");

    let panes = args
        .files
        .iter()
        .zip(1..)
        .map(|(path, ordinal)| FilePane::load(path, ordinal))
        .collect::<Result<Vec<_>>>()?;

    let mut host = TermHost::new(panes, Size::query(), args.top.saturating_sub(1), palette);
    let outcome = qj_core::jump(&mut host, &config);
    if host.has_markers() {
        warn!("markers left on screen after {outcome:?}");
    }
    let cursor = host
        .cursor()
        .map(|(path, pos)| format!("{}:{pos}", path.display()));
    debug!("focused pane: {:?}", host.focused());
    // Leave the alternate screen before printing.
    drop(host);

    match (outcome, cursor) {
        (Outcome::Jumped(_), Some(location)) => {
            println!("{location}");
            Ok(ExitCode::SUCCESS)
        }
        (Outcome::PaneGone(target), _) => {
            debug!("{} closed before the jump", target.pane);
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        (outcome, _) => {
            debug!("no jump: {outcome:?}");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
