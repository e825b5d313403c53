/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Input documents: JSON or YAML text turned into a `serde_json::Value`.
 * Works only with in-memory strings (no file I/O).
 */

use crate::error::ParseError;
use serde_json::{Map, Number, Value};
use yaml_rust::{Yaml, YamlLoader};

/// Parse a JSON or YAML document.
///
/// The format is taken from the extension of `path_hint` when it names one;
/// otherwise JSON is tried first, then YAML.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` for a `.json` path that fails to parse and
/// `ParseError::InvalidYaml` otherwise.
pub fn parse_document(content: &str, path_hint: Option<&str>) -> Result<Value, ParseError> {
    if let Some(path) = path_hint {
        let path = path.to_lowercase();
        if path.ends_with(".json") {
            return parse_json(content).map_err(ParseError::InvalidJson);
        }
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            return parse_yaml(content).map_err(ParseError::InvalidYaml);
        }
    }

    match parse_json(content) {
        Ok(value) => Ok(value),
        Err(_) => parse_yaml(content).map_err(ParseError::InvalidYaml),
    }
}

fn parse_json(content: &str) -> Result<Value, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

fn parse_yaml(content: &str) -> Result<Value, String> {
    let docs = YamlLoader::load_from_str(content).map_err(|e| e.to_string())?;
    match docs.first() {
        Some(doc) => yaml_to_json(doc),
        None => Err("document is empty".to_string()),
    }
}

fn yaml_to_json(yaml: &Yaml) -> Result<Value, String> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::Number(Number::from(*i)),
        // non-finite reals have no JSON number form
        Yaml::Real(s) => match s.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) => Value::Number(n),
            None => Value::String(s.clone()),
        },
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect::<Result<_, _>>()?),
        Yaml::Hash(hash) => {
            let mut map = Map::new();
            for (key, value) in hash {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Alias(_) => return Err("aliases are not supported".to_string()),
        Yaml::BadValue => return Err("unrepresentable value".to_string()),
    })
}

fn yaml_key(yaml: &Yaml) -> Result<String, String> {
    match yaml {
        Yaml::String(s) | Yaml::Real(s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err("mapping keys must be scalars".to_string()),
    }
}
