use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dotenvy::dotenv;
use mp3tagger::utils;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod commands;

/// Tag mp3 files from `<album artist> <year>-<album>/<track> <artist> - <title>.mp3` names
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Music directory
    folder: String,
    /// Show what would be written without changing any file
    #[arg(long)]
    dry_run: bool,
    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    let Some(log_file) = log_file else {
        registry.init();
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file '{}' has no file name", log_file.display()))?;
    let directory = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Ok(Some(guard))
}

fn main() -> Result<()> {
    // Load environment variables (RUST_LOG) from a .env file if present
    dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    let guard = init_logging(cli.log_file.as_deref())?;

    let music_dir = utils::expand_path(&cli.folder);
    if !music_dir.is_dir() {
        error!(
            "Folder should exist and be a directory, not a file: {}",
            music_dir.display()
        );
        drop(guard);
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    // Parent folder names carry the album fields, so resolve `.` and friends.
    let music_dir = music_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve '{}'", music_dir.display()))?;

    // Per-file failures are logged inside the report and do not fail the run.
    commands::tag::tag_music_folder(&music_dir, cli.dry_run)?;

    drop(guard);
    Ok(())
}
