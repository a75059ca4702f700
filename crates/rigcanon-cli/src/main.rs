//! RigCanon CLI - Command-line interface for skeleton canonicalization
//!
//! This binary turns auto-rigger output into canonical humanoid skeletons
//! and explains how the engine reads a rig.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use rigcanon_cli::commands;
use rigcanon_cli::commands::canonicalize::{CanonicalizeArgs, OutputFormat};
use rigcanon_cli::logging;

/// RigCanon - Humanoid Skeleton Canonicalization
#[derive(Parser)]
#[command(name = "rigcanon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a rig file and write the canonical skeleton
    Canonicalize {
        /// Path to the rig file
        #[arg(short, long)]
        rig: String,

        /// Output path (default: <stem>.canonical.json or .canonical.txt next to the rig)
        #[arg(short, long)]
        out: Option<String>,

        /// Output format (json or rig)
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// JSON config file with canonicalization settings
        #[arg(short, long)]
        config: Option<String>,

        /// Fold the chest-root joint into Chest
        #[arg(long)]
        merge_chest: bool,

        /// Translate the output so its lowest joint sits at z = 0
        #[arg(long)]
        align_ground: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show how a rig would be classified without changing it
    Inspect {
        /// Path to the rig file
        #[arg(short, long)]
        rig: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Canonicalize {
            rig,
            out,
            format,
            config,
            merge_chest,
            align_ground,
            json,
        } => {
            let args = CanonicalizeArgs {
                rig,
                out,
                format,
                config,
                merge_chest,
                align_ground,
            };
            commands::canonicalize::run(&args, json)
        }
        Commands::Inspect { rig, json } => commands::inspect::run(&rig, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
