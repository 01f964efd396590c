//! Quickread - a terminal speed reader.
//!
//! # Usage
//!
//! ```bash
//! quickread book.txt
//! quickread --speed 1200 book.txt
//! quickread --no-color --log-file reader.log book.txt
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quickread::app::{App, DEFAULT_TICK};
use quickread::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    no_color_requested, parse_flag_tokens, save_config_flags,
};
use quickread::pacing::Speed;

/// A terminal speed reader that shows a text file one word at a time
#[derive(Parser, Debug)]
#[command(name = "quickread", version, about, long_about = None)]
struct Cli {
    /// UTF-8 text file to read (it is truncated to the unread part on quit)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start at this speed (characters per minute) instead of asking
    #[arg(long, value_name = "CPM", value_parser = clap::value_parser!(u32).range(1..))]
    speed: Option<u32>,

    /// Highlight the active word with bold text instead of colour
    #[arg(long)]
    no_color: bool,

    /// Milliseconds between ticks of the reading loop
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Parse the command line.
///
/// Usage errors are printed to stdout and exit with clap's failure status.
/// `--help` and `--version` keep clap's own handling.
fn parse_cli(args: &[String]) -> Cli {
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = write_usage_error(&mut io::stdout().lock(), &err);
            std::process::exit(err.exit_code());
        }
        Err(err) => err.exit(),
    }
}

fn write_usage_error<W: Write>(out: &mut W, err: &clap::Error) -> io::Result<()> {
    write!(out, "{}", err.render())?;
    out.flush()
}

/// Filter for logs written to stderr, which shares the terminal with the
/// reading stream. `RUST_LOG` only applies to `--log-file` output.
fn stderr_filter() -> EnvFilter {
    EnvFilter::new("warn")
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // The reader writes inline to the terminal, so detailed logs only go
    // to a file; stderr gets warnings and up.
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("quickread=debug")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(stderr_filter())
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = parse_cli(&raw_args);
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    let tick = effective
        .tick_ms
        .map_or(DEFAULT_TICK, Duration::from_millis);
    let ending = App::new(cli.file)
        .with_speed(effective.speed.and_then(Speed::new))
        .with_color(!(effective.no_color || no_color_requested()))
        .with_tick(tick)
        .run()
        .context("Application error")?;

    tracing::info!(?ending, "reader finished");
    Ok(())
}
