//! CLI definitions for bumblebee
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bumblebee",
    version,
    about = "Shorthand for docker compose in an infra repo",
    long_about = "Locates per-service compose files inside an infra repo and runs\n`docker compose -f <file> ...` against them, one service or a whole app at a time."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file location (default: ~/.bumblebee/config.yml)
    #[arg(long = "config", global = true, env = "BUMBLEBEE_CONFIG", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Controls for infra repo.
    ///
    /// Helps in controlling infra repo for both production and non-production
    /// environments. Usage: `infra <app> <service> <compose-args...>`, or
    /// `infra -a <app> <compose-args...>` for every service of the app.
    /// `-d` and `-a` are recognised anywhere; put compose's own `-d` or `-a`
    /// after `--` to forward them.
    Infra {
        /// Runs in non-production environment.
        #[arg(short, long)]
        dev: bool,

        /// Execute for all compose file in the infra app.
        #[arg(short, long)]
        all: bool,

        /// Print the docker compose commands instead of running them
        #[arg(long)]
        dry_run: bool,

        /// <app> [<service>] <compose-subcommand> [extra args...]
        #[arg(
            value_name = "ARGS",
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// Inspect or change the stored configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the config file location and infra repo path
    Show,

    /// Store the infra repo path without prompting
    SetPath {
        /// Path to the infra repo root
        path: String,
    },
}
