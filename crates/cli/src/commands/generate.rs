//! Generate command implementation

use crate::error::{CliError, CliResult};
use crate::utils::config::{resolve_settings, Overrides, Settings};
use crate::utils::input::read_input;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use typegen_engine::{DispatchOptions, Dispatcher, GenerationRequest, GenerationResult};

pub struct Options {
    pub input: Option<String>,
    pub target: Option<String>,
    pub root_name: Option<String>,
    pub output: Option<String>,
    pub rust_derives: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let settings = resolve_settings(Overrides {
        target: options.target.as_deref(),
        root_name: options.root_name.as_deref(),
        rust_derives: options.rust_derives.as_deref(),
    })?;
    let json = read_input(options.input.as_deref())?;
    debug!(target_id = settings.target.id(), "input parsed");

    let result = generate(&settings, json)?;

    match options.output.as_deref().map(PathBuf::from) {
        Some(path) => {
            write_output(&path, &result.text)?;
            eprintln!(
                "✓ Generated {} types to {}",
                result.target.label(),
                path.display()
            );
        }
        None => print!("{}", result.text),
    }
    Ok(())
}

/// Run one generation with the resolved settings.
pub fn generate(settings: &Settings, json: serde_json::Value) -> CliResult<GenerationResult> {
    let dispatcher = Dispatcher::global().with_options(DispatchOptions {
        rust_derives: settings.rust_derives.clone(),
    });
    let request =
        GenerationRequest::new(json, settings.target).with_root_name(settings.root_name.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Message(format!("Failed to create runtime: {e}")))?;
    Ok(rt.block_on(dispatcher.generate(&request))?)
}

fn write_output(path: &Path, text: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    Ok(())
}
