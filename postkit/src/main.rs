//! postkit: sentence tagging and article checks for the multilingual blog.
//!
//! Subcommands:
//!
//! - `tag`: insert `<!-- sN -->` markers into article bodies (stdin or files)
//! - `validate`: report whether existing markers are sequential
//! - `align`: pair two language versions sentence by sentence
//! - `check-article`: verify an article's markdown, metadata and images
//! - `import`: split a saved model reply into tagged article files
//! - `check-keys`: find unused and undefined UI translation keys

mod article;
mod commands;
mod config;
mod inputs;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "postkit",
    about = "Sentence tagging and article checks for the multilingual blog pipeline"
)]
struct Cli {
    /// Config file (TOML). Defaults to ./postkit.toml when present.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Project base directory, overriding the config file
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert sentence markers into markdown bodies
    Tag(commands::tag::TagArgs),
    /// Report on existing sentence markers
    Validate(commands::validate::ValidateArgs),
    /// Align two language versions by sentence id
    Align(commands::align::AlignArgs),
    /// Check an article's file tree
    CheckArticle(commands::check::CheckArgs),
    /// Write article files from a saved model reply
    Import(commands::import::ImportArgs),
    /// Compare UI translation keys with the sources that use them
    CheckKeys(commands::check_keys::CheckKeysArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Tag(args) => commands::tag::run(args),
        Command::Validate(args) => commands::validate::run(args),
        Command::Align(args) => commands::align::run(args),
        Command::CheckArticle(args) => commands::check::run(args, &load_config(&cli)?),
        Command::Import(args) => commands::import::run(args, &load_config(&cli)?),
        Command::CheckKeys(args) => commands::check_keys::run(args, &load_config(&cli)?),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = base_dir.clone();
    }
    Ok(config)
}
