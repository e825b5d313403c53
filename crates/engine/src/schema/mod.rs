/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Schema-inference engine: one inference algorithm whose output dialect is
 * selected by the `output_mode` option.
 */

pub mod dialect;
pub mod json_schema;
pub mod render;
pub mod shape;

use crate::error::GenerateError;
use crate::registry::OutputTarget;
use dialect::{Emit, OutputMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tera::Tera;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_RUST_DERIVES: &str = "Default, Debug, Clone, PartialEq, Serialize, Deserialize";

const TEMPLATES: [(&str, &str); 3] = [
    ("typescript.tera", include_str!("templates/typescript.tera")),
    ("kotlin.tera", include_str!("templates/kotlin.tera")),
    ("rust.tera", include_str!("templates/rust.tera")),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaEngineError {
    #[error("invalid engine options: {0}")]
    InvalidOptions(String),

    #[error("output mode '{0}' is not supported by the schema inference engine")]
    UnsupportedOutputMode(String),

    #[error("render error: {0}")]
    Render(String),
}

impl From<SchemaEngineError> for GenerateError {
    fn from(err: SchemaEngineError) -> Self {
        match err {
            SchemaEngineError::UnsupportedOutputMode(mode) => GenerateError::UnsupportedTarget(mode),
            other => GenerateError::InferenceFailure(other.to_string()),
        }
    }
}

/// Engine configuration, one per generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineOptions {
    /// Output mode identifier such as `typescript` or `json_schema`
    pub output_mode: String,
    /// Derive list for `rust` output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derives: Option<String>,
}

impl EngineOptions {
    pub fn new(output_mode: impl Into<String>) -> Self {
        Self {
            output_mode: output_mode.into(),
            derives: None,
        }
    }

    pub fn with_derives(mut self, derives: Option<String>) -> Self {
        self.derives = derives;
        self
    }

    fn derives(&self) -> Result<&str, SchemaEngineError> {
        let Some(derives) = self.derives.as_deref() else {
            return Ok(DEFAULT_RUST_DERIVES);
        };
        let valid = derives.split(',').map(str::trim).all(|item| {
            !item.is_empty()
                && item
                    .split("::")
                    .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_alphanumeric() || c == '_'))
        });
        if valid {
            Ok(derives)
        } else {
            Err(SchemaEngineError::InvalidOptions(format!(
                "derives must be a comma-separated list of paths, got '{derives}'"
            )))
        }
    }
}

/// The loaded inference engine. Holds the compiled dialect templates.
pub struct SchemaEngine {
    tera: Tera,
}

impl SchemaEngine {
    /// Compile the dialect templates.
    ///
    /// # Errors
    ///
    /// Returns `SchemaEngineError::Render` if a template fails to compile.
    pub fn new() -> Result<Self, SchemaEngineError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| SchemaEngineError::Render(describe(&e)))?;
        // Generated code, never HTML
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    /// Infer types for `value` and render them in the options' output mode.
    ///
    /// Output is a pure function of the arguments.
    pub fn generate(
        &self,
        root_name: &str,
        value: &Value,
        options: &EngineOptions,
    ) -> Result<String, SchemaEngineError> {
        let mode: OutputMode = options
            .output_mode
            .parse()
            .map_err(SchemaEngineError::UnsupportedOutputMode)?;
        let profile = mode.profile();
        let root_name = root_type_name(root_name);
        let shape = shape::infer(value);
        debug!(output_mode = profile.id, root = %root_name, "rendering inferred shape");

        match profile.emit {
            Emit::SchemaDocument => {
                let doc = json_schema::document(profile, &root_name, &shape);
                serde_json::to_string_pretty(&doc)
                    .map(|text| text + "\n")
                    .map_err(|e| SchemaEngineError::Render(e.to_string()))
            }
            Emit::Declarations { template } => {
                let derives = options.derives()?;
                let declarations = render::declarations(profile, &root_name, &shape);
                render::render(&self.tera, profile, template, &declarations, derives)
                    .map_err(|e| SchemaEngineError::Render(describe(&e)))
            }
        }
    }
}

/// Schema-inference strategy: forward to the engine with the target id as output mode.
pub fn infer(
    engine: &SchemaEngine,
    root_name: &str,
    json: &Value,
    target: OutputTarget,
    derives: Option<String>,
) -> Result<String, GenerateError> {
    let options = EngineOptions::new(target.id()).with_derives(derives);
    engine
        .generate(root_name, json, &options)
        .map_err(GenerateError::from)
}

fn root_type_name(name: &str) -> String {
    let trimmed = name.trim();
    let is_identifier = trimmed
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier {
        trimmed.to_string()
    } else {
        crate::naming::to_pascal_case(trimmed)
    }
}

// tera keeps the useful part of its messages in the source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests;
