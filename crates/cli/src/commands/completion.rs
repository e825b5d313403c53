//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

const SUPPORTED: &str = "bash, zsh, fish";

pub struct Options {
    pub shell: String,
}

/// Print a completion script for the requested shell
pub fn run(options: &Options) -> i32 {
    match run_inner(options, &mut io::stdout()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    match name.trim().to_lowercase().as_str() {
        "" => Err(CliError::Message(format!(
            "Shell name is required. Supported shells: {SUPPORTED}"
        ))),
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: {SUPPORTED}"
        ))),
    }
}

fn run_inner(options: &Options, out: &mut dyn Write) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "typegen", out);
    Ok(())
}
