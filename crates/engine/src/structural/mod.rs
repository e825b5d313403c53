/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Structural-inference pipeline for the Go target: infer raw declarations,
 * then lay them out with the formatter. Both stages must succeed; no partial
 * output is ever returned.
 */

pub mod format;
pub mod infer;

pub use format::{FormatError, GoFormatter};
pub use infer::{StructuralError, StructuralInference, ROOT_TYPE_NAME};

use crate::error::GenerateError;
use serde_json::Value;
use tracing::debug;

/// The two Go stages, loaded together.
#[derive(Debug, Clone, Default)]
pub struct GoPipeline {
    inference: StructuralInference,
    formatter: GoFormatter,
}

impl GoPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage 1: unformatted declarations for `json`.
    pub fn infer(&self, json: &Value) -> Result<String, GenerateError> {
        self.inference
            .infer(json)
            .map_err(|e| GenerateError::InferenceFailure(e.to_string()))
    }

    /// Stage 2: canonical layout of `source`.
    pub fn format(&self, source: &str) -> Result<String, GenerateError> {
        self.formatter
            .format(source)
            .map_err(|e| GenerateError::FormatFailure(e.to_string()))
    }

    /// Run both stages. The root type is always named `AutoGenerated`.
    pub fn generate(&self, json: &Value) -> Result<String, GenerateError> {
        let raw = self.infer(json)?;
        debug!(bytes = raw.len(), "structural inference complete, formatting");
        self.format(&raw)
    }
}
