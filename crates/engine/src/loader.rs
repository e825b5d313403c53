/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Lazy engine loading. Each backend is built on first use and cached; a load
 * that fails is not cached, so the next request tries again.
 */

use crate::error::GenerateError;
use crate::schema::SchemaEngine;
use crate::structural::GoPipeline;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Memoized async factory for one engine.
pub struct EngineLoader<T> {
    name: &'static str,
    cell: OnceCell<Arc<T>>,
}

impl<T> EngineLoader<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Return the cached engine, loading it with `load` if no load has
    /// succeeded yet. Concurrent callers wait for a single in-flight load.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<T>, GenerateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, GenerateError>>,
    {
        let engine = self
            .cell
            .get_or_try_init(|| async {
                debug!(engine = self.name, "loading engine");
                match load().await {
                    Ok(engine) => Ok(Arc::new(engine)),
                    Err(e) => {
                        warn!(engine = self.name, error = %e, "engine failed to load");
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(engine))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> fmt::Debug for EngineLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineLoader")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// The engines behind both generation strategies.
#[derive(Debug)]
pub struct Backends {
    schema: EngineLoader<SchemaEngine>,
    go: EngineLoader<GoPipeline>,
}

impl Default for Backends {
    fn default() -> Self {
        Self::new()
    }
}

impl Backends {
    pub fn new() -> Self {
        Self {
            schema: EngineLoader::new("schema-inference"),
            go: EngineLoader::new("go-structural"),
        }
    }

    pub async fn schema_engine(&self) -> Result<Arc<SchemaEngine>, GenerateError> {
        self.schema
            .get_or_load(|| async {
                SchemaEngine::new().map_err(|e| GenerateError::EngineUnavailable(e.to_string()))
            })
            .await
    }

    pub async fn go_pipeline(&self) -> Result<Arc<GoPipeline>, GenerateError> {
        self.go.get_or_load(|| async { Ok(GoPipeline::new()) }).await
    }
}
