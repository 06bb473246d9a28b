// SPDX-License-Identifier: AGPL-3.0-or-later
//! resx CLI
//!
//! Browse and read game resources whether they are loose files or packed
//! into a bundle.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use resx_core::{ExplorerConfig, ResxResult};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "resx")]
#[command(author, version, about = "resx - Dual-mode resource explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Loose resource directory to search, before any configured ones
    #[arg(long = "root", global = true)]
    roots: Vec<PathBuf>,

    /// Archive bundle to search, before any configured ones
    #[arg(long = "bundle", global = true)]
    bundles: Vec<PathBuf>,

    /// Resource namespace (e.g. "assets/")
    #[arg(long, global = true)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List resources under a resource directory
    #[command(alias = "dir")]
    Ls {
        /// Resource directory (defaults to the namespace root)
        #[arg(default_value = "")]
        path: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a resource to stdout
    Cat {
        /// Resource to display
        path: String,
    },

    /// Show where a resource lives
    Resolve {
        /// Resource path
        path: String,
    },

    /// Show resource information
    Stat {
        /// Resource to inspect
        path: String,
    },

    /// List regular files of a host directory
    Files {
        /// Host directory
        dir: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Gzip a host file and delete the original
    Gzip {
        /// File to compress
        source: PathBuf,

        /// Compressed output file
        dest: PathBuf,
    },

    /// Open a host file with the default application
    Open {
        /// File to open
        path: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration file merged with command-line overrides
fn load_config(cli: &Cli) -> ResxResult<ExplorerConfig> {
    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => match ExplorerConfig::default_path() {
            Some(path) => ExplorerConfig::load_or_default(&path)?,
            None => ExplorerConfig::default(),
        },
    };

    apply_overrides(cli, &mut config);
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut ExplorerConfig) {
    if let Some(prefix) = &cli.prefix {
        config.resource_prefix = prefix.clone();
    }
    config.search_roots.splice(0..0, cli.roots.iter().cloned());
    config.bundles.splice(0..0, cli.bundles.iter().cloned());
}

fn run(cli: &Cli) -> ResxResult<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Ls { path, recursive, json } => commands::ls(config, path, *recursive, *json),
        Commands::Cat { path } => commands::cat(config, path),
        Commands::Resolve { path } => commands::resolve(config, path),
        Commands::Stat { path } => commands::stat(config, path),
        Commands::Files { dir, recursive } => commands::files(config, dir, *recursive),
        Commands::Gzip { source, dest } => commands::gzip(config, source, dest),
        Commands::Open { path } => commands::open(config, path),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let missing = std::env::temp_dir().join("resx-cli-missing-config.toml");
        let cli = Cli::parse_from(["resx", "--config", missing.to_str().unwrap(), "ls"]);
        assert!(load_config(&cli).unwrap_err().is_not_found());
    }

    #[test]
    fn test_overrides_come_first() {
        let cli = Cli::parse_from([
            "resx", "--bundle", "patch.zip", "--root", "res", "--prefix", "data/", "ls", "-r",
        ]);
        let mut config = ExplorerConfig {
            bundles: vec![PathBuf::from("game.zip")],
            ..Default::default()
        };
        apply_overrides(&cli, &mut config);

        assert_eq!(config.resource_prefix, "data/");
        assert_eq!(config.bundles, vec![PathBuf::from("patch.zip"), PathBuf::from("game.zip")]);
        assert_eq!(config.search_roots, vec![PathBuf::from("res")]);
        assert!(matches!(cli.command, Commands::Ls { recursive: true, json: false, .. }));
    }
}
