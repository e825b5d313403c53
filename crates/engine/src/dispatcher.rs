/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Generation dispatcher: resolves the requested target in the registry and
 * runs the strategy it names. Every stage error leaves this module as a
 * `GenerationFailure`.
 */

use crate::error::{GenerateError, GenerationFailure};
use crate::loader::Backends;
use crate::registry::{self, OutputTarget, StrategyTag};
use crate::schema;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::debug;

pub const DEFAULT_ROOT_NAME: &str = "Root";

/// One generation attempt: a snapshot of the document and the selected target.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub json: Arc<Value>,
    pub target: OutputTarget,
    /// Root type name for the schema-inference targets. Go ignores it.
    pub root_name: String,
}

impl GenerationRequest {
    pub fn new(json: impl Into<Arc<Value>>, target: OutputTarget) -> Self {
        Self {
            json: json.into(),
            target,
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }

    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
}

/// Generated text plus what a display surface needs to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub target: OutputTarget,
    pub text: String,
    pub highlight: &'static str,
}

/// Anything that can turn a request into generated text.
///
/// The session drives this trait, so tests can substitute slow or failing
/// generators for the real dispatcher.
#[async_trait]
pub trait Generate: Send + Sync + 'static {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure>;
}

/// Per-dispatcher settings that reach the engines as options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Derive list for `rust` output; `None` uses the engine default
    pub rust_derives: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    backends: Arc<Backends>,
    options: DispatchOptions,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher with its own engine cache.
    pub fn new() -> Self {
        Self {
            backends: Arc::new(Backends::new()),
            options: DispatchOptions::default(),
        }
    }

    /// A dispatcher sharing the process-wide engine cache.
    pub fn global() -> Self {
        static BACKENDS: OnceLock<Arc<Backends>> = OnceLock::new();
        Self {
            backends: Arc::clone(BACKENDS.get_or_init(|| Arc::new(Backends::new()))),
            options: DispatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Generate text for `request.target` from `request.json`.
    ///
    /// # Errors
    ///
    /// Returns a `GenerationFailure` naming the target when the engine cannot
    /// be loaded or a strategy stage rejects the input.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure> {
        let entry = registry::resolve(request.target);
        debug!(
            target_id = request.target.id(),
            strategy = entry.strategy.as_str(),
            "dispatching generation"
        );

        self.run_strategy(entry.strategy, request)
            .await
            .map(|text| GenerationResult {
                target: request.target,
                text,
                highlight: entry.highlight,
            })
            .map_err(|error| GenerationFailure::new(request.target, error))
    }

    async fn run_strategy(
        &self,
        strategy: StrategyTag,
        request: &GenerationRequest,
    ) -> Result<String, GenerateError> {
        match strategy {
            StrategyTag::StructuralFormatter => {
                let pipeline = self.backends.go_pipeline().await?;
                pipeline.generate(&request.json)
            }
            StrategyTag::SchemaInference => {
                let engine = self.backends.schema_engine().await?;
                schema::infer(
                    &engine,
                    &request.root_name,
                    &request.json,
                    request.target,
                    self.options.rust_derives.clone(),
                )
            }
        }
    }
}

#[async_trait]
impl Generate for Dispatcher {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure> {
        Dispatcher::generate(self, &request).await
    }
}
