//! typegen CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
#[cfg(test)]
mod test_helpers;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{completion, generate, targets, watch};
use tracing_subscriber::EnvFilter;

/// typegen - Generate type definitions from JSON documents
#[derive(Parser)]
#[command(name = "typegen")]
#[command(about = "typegen - Generate type definitions from JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine activity to stderr (overrides TYPEGEN_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate types for a JSON or YAML document
    Generate {
        /// Input file; reads stdin when omitted or '-'
        #[arg(long, short)]
        input: Option<String>,
        /// Output target id (see `typegen targets`)
        #[arg(long, short, env = "TYPEGEN_TARGET")]
        target: Option<String>,
        /// Root type name for targets that name it
        #[arg(long)]
        root_name: Option<String>,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<String>,
        /// Derive list for Rust output, e.g. "Debug, Deserialize"
        #[arg(long)]
        rust_derives: Option<String>,
    },
    /// List the supported output targets
    Targets {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Regenerate whenever the input file changes; type a target name to switch
    Watch {
        /// Input file to watch
        #[arg(long, short)]
        input: String,
        /// Initial output target id
        #[arg(long, short, env = "TYPEGEN_TARGET")]
        target: Option<String>,
        /// Root type name for targets that name it
        #[arg(long)]
        root_name: Option<String>,
        /// Derive list for Rust output
        #[arg(long)]
        rust_derives: Option<String>,
    },
    /// Generate a shell completion script
    Completion {
        /// Shell to generate for: bash, zsh or fish
        shell: String,
    },
}

/// The clap command tree, used for completion scripts
pub(crate) fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TYPEGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Generate {
            input,
            target,
            root_name,
            output,
            rust_derives,
        } => {
            let opts = generate::Options {
                input,
                target,
                root_name,
                output,
                rust_derives,
            };
            generate::run(&opts)
        }
        Commands::Targets { json } => targets::run(&targets::Options { json }),
        Commands::Watch {
            input,
            target,
            root_name,
            rust_derives,
        } => {
            let opts = watch::Options {
                input,
                target,
                root_name,
                rust_derives,
            };
            watch::run(&opts)
        }
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}
