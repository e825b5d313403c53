/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use crate::schema::dialect::DialectProfile;
use crate::schema::shape::Shape;
use serde_json::{json, Map, Value};

pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Build a draft-07 schema document for `shape`.
pub fn document(profile: &DialectProfile, root_name: &str, shape: &Shape) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".to_string(), json!(DRAFT_07));
    doc.insert("title".to_string(), json!(root_name));
    if let Value::Object(body) = schema_for(profile, shape) {
        doc.extend(body);
    }
    Value::Object(doc)
}

fn schema_for(profile: &DialectProfile, shape: &Shape) -> Value {
    let types = &profile.types;
    match shape {
        Shape::Bottom | Shape::Any => json!({}),
        Shape::Null => json!({ "type": types.null }),
        Shape::Bool => json!({ "type": types.boolean }),
        Shape::StringT => json!({ "type": types.string }),
        Shape::Integer => json!({ "type": types.integer }),
        Shape::Floating => json!({ "type": types.floating }),
        Shape::Vec(element) => json!({
            "type": profile.array,
            "items": schema_for(profile, element),
        }),
        Shape::Struct(fields) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (key, field) in fields {
                properties.insert(key.clone(), schema_for(profile, &field.shape));
                if !field.is_optional() {
                    required.push(json!(key));
                }
            }
            let mut schema = Map::new();
            schema.insert("type".to_string(), json!("object"));
            schema.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                schema.insert("required".to_string(), Value::Array(required));
            }
            Value::Object(schema)
        }
        Shape::Optional(inner) => {
            let mut schema = schema_for(profile, inner);
            if let Some(Value::String(ty)) = schema.get("type").cloned() {
                schema["type"] = json!([ty, profile.nullable]);
            }
            schema
        }
    }
}
