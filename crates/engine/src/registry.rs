/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Output-target registry: the static table that maps every supported output
 * target to its label, generation strategy and highlighting hint.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A generated language or dialect the caller can select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputTarget {
    #[default]
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "typescript/typealias")]
    TypeScriptCombined,
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "json_schema")]
    JsonSchema,
    #[serde(rename = "kotlin")]
    Kotlin,
    #[serde(rename = "rust")]
    Rust,
}

/// How a target's text is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    /// One parameterized inference engine renders the dialect directly.
    SchemaInference,
    /// Dedicated structural inference followed by a source formatting pass.
    StructuralFormatter,
}

impl StrategyTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyTag::SchemaInference => "schema-inference",
            StrategyTag::StructuralFormatter => "structural+formatter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub target: OutputTarget,
    pub label: &'static str,
    pub strategy: StrategyTag,
    /// Language name understood by syntax highlighters
    pub highlight: &'static str,
}

// Indexed by `OutputTarget as usize`; order must follow the enum declaration.
const REGISTRY: [RegistryEntry; 6] = [
    RegistryEntry {
        target: OutputTarget::TypeScript,
        label: "TypeScript",
        strategy: StrategyTag::SchemaInference,
        highlight: "typescript",
    },
    RegistryEntry {
        target: OutputTarget::TypeScriptCombined,
        label: "TypeScript (combined)",
        strategy: StrategyTag::SchemaInference,
        highlight: "typescript",
    },
    RegistryEntry {
        target: OutputTarget::Go,
        label: "Go",
        strategy: StrategyTag::StructuralFormatter,
        highlight: "go",
    },
    RegistryEntry {
        target: OutputTarget::JsonSchema,
        label: "JSON Schema",
        strategy: StrategyTag::SchemaInference,
        highlight: "json",
    },
    RegistryEntry {
        target: OutputTarget::Kotlin,
        label: "Kotlin",
        strategy: StrategyTag::SchemaInference,
        highlight: "kotlin",
    },
    RegistryEntry {
        target: OutputTarget::Rust,
        label: "Rust",
        strategy: StrategyTag::SchemaInference,
        highlight: "rust",
    },
];

/// Look up the registry entry for a target. Total over the enum.
pub fn resolve(target: OutputTarget) -> &'static RegistryEntry {
    &REGISTRY[target as usize]
}

/// All registry entries in display order
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 6] = [
        OutputTarget::TypeScript,
        OutputTarget::TypeScriptCombined,
        OutputTarget::Go,
        OutputTarget::JsonSchema,
        OutputTarget::Kotlin,
        OutputTarget::Rust,
    ];

    /// Stable identifier, also used as the inference engine's output mode
    pub fn id(self) -> &'static str {
        match self {
            OutputTarget::TypeScript => "typescript",
            OutputTarget::TypeScriptCombined => "typescript/typealias",
            OutputTarget::Go => "go",
            OutputTarget::JsonSchema => "json_schema",
            OutputTarget::Kotlin => "kotlin",
            OutputTarget::Rust => "rust",
        }
    }

    pub fn label(self) -> &'static str {
        resolve(self).label
    }

    pub fn highlight(self) -> &'static str {
        resolve(self).highlight
    }

    pub fn strategy(self) -> StrategyTag {
        resolve(self).strategy
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown output target: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for OutputTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "typescript" | "ts" => Ok(OutputTarget::TypeScript),
            "typescript/typealias" | "typescript-combined" | "ts-combined" => {
                Ok(OutputTarget::TypeScriptCombined)
            }
            "go" | "golang" => Ok(OutputTarget::Go),
            "json_schema" | "json-schema" | "jsonschema" => Ok(OutputTarget::JsonSchema),
            "kotlin" | "kt" => Ok(OutputTarget::Kotlin),
            "rust" | "rs" => Ok(OutputTarget::Rust),
            _ => Err(UnknownTarget(s.to_string())),
        }
    }
}
