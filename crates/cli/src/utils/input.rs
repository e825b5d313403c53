//! Reading the input document from a file or stdin

use crate::error::{CliError, CliResult};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use typegen_engine::parse_document;

/// `None` and `-` both mean stdin.
pub fn is_stdin(input: Option<&str>) -> bool {
    matches!(input, None | Some("-"))
}

/// Read and parse the input document.
pub fn read_input(input: Option<&str>) -> CliResult<Value> {
    match input {
        Some(path) if !is_stdin(input) => read_file(Path::new(path)),
        _ => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(parse_document(&content, None)?)
        }
    }
}

/// Read and parse a JSON or YAML file, picking the format from its extension.
pub fn read_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::Message(format!("Failed to read input file {}: {e}", path.display()))
    })?;
    Ok(parse_document(&content, path.to_str())?)
}
