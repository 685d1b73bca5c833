// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! pdfile developer CLI.
//!
//! - `pdfile digits` writes the digit-to-word demo patch.
//! - `pdfile parse` tries the (unsupported) reader.
//! - `pdfile config init` stores the default canvas settings.
//!
//! Canvas settings come from `--config <file>`, else the user config
//! directory (`pdfile.json`), else built-in demo defaults.

mod config;
mod demo;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::SettingsFile;
use pdfile::{PatchFile, PatchFileConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdfile",
    version,
    about = "Build Pure Data patch files programmatically",
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON file with canvas and writer settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a patch that spells out the number arriving on its inlet.
    Digits(DigitsArgs),
    /// Read a patch file back (not implemented; always fails).
    Parse(ParseArgs),
    /// Manage stored settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
struct DigitsArgs {
    /// Output path.
    #[arg(long, short, default_value = "digitos.pd")]
    out: PathBuf,

    /// Comma-separated words, one per number starting at 1.
    #[arg(long, value_delimiter = ',')]
    words: Vec<String>,
}

#[derive(Args)]
struct ParseArgs {
    /// Patch file to read.
    path: PathBuf,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the default settings as JSON.
    Init {
        /// Target file (defaults to the user config directory).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Digits(args) => run_digits(cli.config.as_deref(), args),
        Commands::Parse(args) => run_parse(&args.path),
        Commands::Config(ConfigCommand::Init { path, force }) => run_config_init(path, force),
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<PatchFileConfig> {
    if let Some(path) = explicit {
        return SettingsFile::at(path)
            .load()
            .map_err(anyhow::Error::from)
            .and_then(|found| found.context("file not found"))
            .with_context(|| format!("failed to load config from {}", path.display()));
    }
    // Best-effort: an unreadable user config falls back to defaults.
    match SettingsFile::user().and_then(|file| file.load()) {
        Ok(Some(cfg)) => Ok(cfg),
        Ok(None) => Ok(demo::demo_config()),
        Err(err) => {
            warn!(%err, "ignoring stored config");
            Ok(demo::demo_config())
        }
    }
}

fn run_digits(config: Option<&Path>, args: DigitsArgs) -> Result<()> {
    let settings = load_settings(config)?;
    let destination = args.out.display().to_string();
    let built = if args.words.is_empty() {
        demo::digits(&destination, &settings, &demo::DEFAULT_WORDS[..])
    } else {
        demo::digits(&destination, &settings, &args.words)
    };
    let file = built.context("failed to build digits patch")?;
    file.write()
        .with_context(|| format!("failed to write {destination}"))?;
    info!(path = %destination, "wrote digits patch");
    Ok(())
}

fn run_parse(path: &Path) -> Result<()> {
    let file = PatchFile::parse(path).with_context(|| format!("parse {}", path.display()))?;
    info!(destination = file.destination(), "parsed");
    Ok(())
}

fn run_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let file = match path {
        Some(path) => SettingsFile::at(path),
        None => SettingsFile::user()?,
    };
    refuse_overwrite(file.path(), force)?;
    // Same settings `digits` falls back to when nothing is stored.
    file.save(&demo::demo_config())?;
    info!(path = %file.path().display(), "wrote default config");
    Ok(())
}

fn refuse_overwrite(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}
