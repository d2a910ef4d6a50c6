//! ppstack CLI
//!
//! Renders a snapshot document of goroutine stacks as colorized,
//! column-aligned text.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use ppstack::utils::config::PATH_FORMAT_ENV;
use ppstack::{JsonEngine, Palette, PathFormat, Printer, StaticDump};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// ppstack - readable goroutine stack dumps
#[derive(Parser, Debug)]
#[command(name = "ppstack")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Snapshot document to render
    dump: PathBuf,

    /// Snapshot document holding only the goroutine that requested the dump
    #[arg(long)]
    current: Option<PathBuf>,

    /// Render the `--current` document instead of the full dump
    #[arg(long, requires = "current")]
    current_only: bool,

    /// Path display: full, relative or base
    #[arg(long, env = PATH_FORMAT_ENV, default_value = "relative")]
    path_format: PathFormat,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Write to a file instead of stderr
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut source = StaticDump::from_file(&cli.dump)
        .with_context(|| format!("Failed to load dump {}", cli.dump.display()))?;
    if let Some(current) = &cli.current {
        source = source
            .with_current_file(current)
            .with_context(|| format!("Failed to load dump {}", current.display()))?;
    }
    let engine = JsonEngine::new();
    let plain = Palette::plain();

    let mut printer = Printer::new(&source, &engine).with_path_format(cli.path_format);
    if cli.no_color {
        printer = printer.with_palette(&plain);
    }

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            printer
                .render(&mut out, !cli.current_only)
                .context("Failed to render stack dump")?;
            out.flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Stacks written to: {}", path.display());
        }
        None => {
            let stderr = io::stderr();
            let mut out = stderr.lock();
            printer
                .render(&mut out, !cli.current_only)
                .context("Failed to render stack dump")?;
        }
    }

    Ok(())
}
