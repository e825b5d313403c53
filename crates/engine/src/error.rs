/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use crate::registry::OutputTarget;
use thiserror::Error;

/// Top-level error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Generation(#[from] GenerationFailure),
}

/// Parse errors for JSON/YAML input documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),
}

/// Failure raised by one stage of a generation attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The engine was asked for an output mode it cannot render.
    #[error("Unsupported output target: {0}")]
    UnsupportedTarget(String),

    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    #[error("Formatting failed: {0}")]
    FormatFailure(String),
}

/// A generation attempt that did not produce text.
///
/// Every stage error is converted into this type at the dispatcher boundary,
/// so callers only ever see a target plus a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to generate {} types: {}", .target.label(), .error)]
pub struct GenerationFailure {
    pub target: OutputTarget,
    #[source]
    pub error: GenerateError,
}

impl GenerationFailure {
    pub fn new(target: OutputTarget, error: GenerateError) -> Self {
        Self { target, error }
    }

    /// Human-readable diagnostic for display surfaces
    pub fn diagnostic(&self) -> String {
        self.error.to_string()
    }
}
