/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Structural inference for Go: builds struct definitions directly from the
 * JSON tree. The output is valid Go but not laid out; see `format`.
 */

use crate::naming::{split_words, NameAllocator};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Name given to the root type. Inference owns it; callers cannot override it.
pub const ROOT_TYPE_NAME: &str = "AutoGenerated";

const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("root value must be an object or an array, found {0}")]
    UnsupportedRoot(&'static str),

    #[error("root array is empty, no element type to infer")]
    EmptyRoot,

    #[error("key {0:?} contains a backtick and cannot be written in a struct tag")]
    UntaggableKey(String),
}

#[derive(Debug, Clone, PartialEq)]
enum GoType {
    Null,
    Int,
    Int64,
    Float64,
    Bool,
    String,
    Any,
    Slice(Box<GoType>),
    Struct(Vec<GoField>),
}

#[derive(Debug, Clone, PartialEq)]
struct GoField {
    key: String,
    ty: GoType,
    omitempty: bool,
}

/// Infers Go struct definitions from JSON values.
#[derive(Debug, Clone)]
pub struct StructuralInference {
    initialisms: HashSet<&'static str>,
}

impl Default for StructuralInference {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralInference {
    pub fn new() -> Self {
        Self {
            initialisms: INITIALISMS.iter().copied().collect(),
        }
    }

    /// Produce unformatted Go source declaring `AutoGenerated`.
    ///
    /// # Errors
    ///
    /// Fails when the root is a scalar or an empty array, or when a key cannot
    /// be expressed in a struct tag.
    pub fn infer(&self, value: &Value) -> Result<String, StructuralError> {
        let root = match value {
            Value::Object(_) => type_of(value),
            Value::Array(items) if items.is_empty() => return Err(StructuralError::EmptyRoot),
            Value::Array(_) => type_of(value),
            Value::Null => return Err(StructuralError::UnsupportedRoot("null")),
            Value::Bool(_) => return Err(StructuralError::UnsupportedRoot("a boolean")),
            Value::Number(_) => return Err(StructuralError::UnsupportedRoot("a number")),
            Value::String(_) => return Err(StructuralError::UnsupportedRoot("a string")),
        };

        let mut out = format!("type {ROOT_TYPE_NAME} ");
        self.write_type(&root, &mut out)?;
        out.push('\n');
        Ok(out)
    }

    fn write_type(&self, ty: &GoType, out: &mut String) -> Result<(), StructuralError> {
        match ty {
            GoType::Null | GoType::Any => out.push_str("any"),
            GoType::Int => out.push_str("int"),
            GoType::Int64 => out.push_str("int64"),
            GoType::Float64 => out.push_str("float64"),
            GoType::Bool => out.push_str("bool"),
            GoType::String => out.push_str("string"),
            GoType::Slice(element) => {
                out.push_str("[]");
                self.write_type(element, out)?;
            }
            GoType::Struct(fields) => {
                out.push_str("struct {\n");
                let mut names = NameAllocator::new();
                for field in fields {
                    if field.key.contains('`') {
                        return Err(StructuralError::UntaggableKey(field.key.clone()));
                    }
                    out.push_str(&names.allocate(&self.field_name(&field.key)));
                    out.push(' ');
                    self.write_type(&field.ty, out)?;
                    out.push_str(&format!(" `json:\"{}", escape_tag(&field.key)));
                    if field.omitempty {
                        out.push_str(",omitempty");
                    }
                    out.push_str("\"`\n");
                }
                out.push('}');
            }
        }
        Ok(())
    }

    /// Exported Go identifier for a JSON key, with common initialisms upper-cased.
    pub fn field_name(&self, key: &str) -> String {
        let mut name = String::new();
        for word in split_words(key) {
            let upper = word.to_uppercase();
            if self.initialisms.contains(upper.as_str()) {
                name.push_str(&upper);
            } else {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    name.extend(first.to_uppercase());
                    name.push_str(&chars.as_str().to_lowercase());
                }
            }
        }
        if name.is_empty() {
            return "Field".to_string();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert_str(0, "Num");
        }
        name
    }
}

fn type_of(value: &Value) -> GoType {
    match value {
        Value::Null => GoType::Null,
        Value::Bool(_) => GoType::Bool,
        Value::String(_) => GoType::String,
        Value::Number(n) => match n.as_i64() {
            Some(i) if i32::try_from(i).is_ok() => GoType::Int,
            Some(_) => GoType::Int64,
            None if n.is_u64() => GoType::Int64,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX) => GoType::Int,
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => GoType::Int64,
                _ => GoType::Float64,
            },
        },
        Value::Array(items) => {
            let element = items
                .iter()
                .map(type_of)
                .reduce(merge)
                .unwrap_or(GoType::Any);
            GoType::Slice(Box::new(element))
        }
        Value::Object(map) => GoType::Struct(
            map.iter()
                .map(|(key, value)| GoField {
                    key: key.clone(),
                    ty: type_of(value),
                    omitempty: false,
                })
                .collect(),
        ),
    }
}

fn merge(a: GoType, b: GoType) -> GoType {
    if a == b {
        return a;
    }
    match (a, b) {
        (GoType::Null, other) | (other, GoType::Null) => other,
        (GoType::Int, GoType::Int64) | (GoType::Int64, GoType::Int) => GoType::Int64,
        (GoType::Int | GoType::Int64, GoType::Float64)
        | (GoType::Float64, GoType::Int | GoType::Int64) => GoType::Float64,
        (GoType::Slice(a), GoType::Slice(b)) => GoType::Slice(Box::new(merge(*a, *b))),
        (GoType::Struct(a), GoType::Struct(b)) => GoType::Struct(merge_fields(a, b)),
        _ => GoType::Any,
    }
}

fn merge_fields(a: Vec<GoField>, mut b: Vec<GoField>) -> Vec<GoField> {
    let mut fields = Vec::with_capacity(a.len().max(b.len()));
    for field in a {
        match b.iter().position(|f| f.key == field.key) {
            Some(index) => {
                let other = b.remove(index);
                fields.push(GoField {
                    key: field.key,
                    ty: merge(field.ty, other.ty),
                    omitempty: field.omitempty || other.omitempty,
                });
            }
            None => fields.push(GoField {
                omitempty: true,
                ..field
            }),
        }
    }
    fields.extend(b.into_iter().map(|field| GoField {
        omitempty: true,
        ..field
    }));
    fields
}

// Tag values are Go quoted strings inside a raw literal; control characters become escapes.
fn escape_tag(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
