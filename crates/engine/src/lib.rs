//! typegen engine library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library turns arbitrary JSON values into type definitions for several
//! output targets (TypeScript, Go, JSON Schema, Kotlin, Rust). It works only
//! with in-memory data (no file I/O).
//!
//! # Example
//!
//! ```rust,no_run
//! use typegen_engine::{parse_document, Dispatcher, GenerationRequest, OutputTarget};
//!
//! # async fn run() -> Result<(), typegen_engine::EngineError> {
//! let json = parse_document(r#"{"id": 1, "name": "a"}"#, None)?;
//! let request = GenerationRequest::new(json, OutputTarget::Kotlin);
//! let result = Dispatcher::global().generate(&request).await?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod error;
pub mod input;
pub mod loader;
pub mod naming;
pub mod registry;
pub mod schema;
pub mod session;
pub mod structural;

pub use dispatcher::{
    DispatchOptions, Dispatcher, Generate, GenerationRequest, GenerationResult, DEFAULT_ROOT_NAME,
};
pub use error::{EngineError, GenerateError, GenerationFailure, ParseError};
pub use input::parse_document;
pub use registry::{OutputTarget, RegistryEntry, StrategyTag, UnknownTarget};
pub use session::{
    GenerationMachine, GenerationSession, GenerationState, JsonSource, RequestId, StateWatcher,
};
