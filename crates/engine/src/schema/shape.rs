/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Shape inference: reduces a JSON value to the structural type it exhibits.
 */

use indexmap::IndexMap;
use serde_json::Value;

/// The inferred structural type of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No information yet (element type of an empty array)
    Bottom,
    /// Conflicting observations that no single type covers
    Any,
    Null,
    Bool,
    StringT,
    Integer,
    Floating,
    Vec(Box<Shape>),
    Struct(IndexMap<String, Field>),
    /// Null was observed alongside the inner shape
    Optional(Box<Shape>),
}

impl Shape {
    pub fn is_nullable(&self) -> bool {
        matches!(self, Shape::Optional(_))
    }

    /// Strip one level of nullability.
    pub fn required(&self) -> &Shape {
        match self {
            Shape::Optional(inner) => inner,
            other => other,
        }
    }
}

/// One struct field. Absence and nullability are tracked separately: a key
/// missing from some elements is `absent`, a null value makes `shape` nullable.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub shape: Shape,
    pub absent: bool,
}

impl Field {
    pub fn present(shape: Shape) -> Self {
        Self {
            shape,
            absent: false,
        }
    }

    /// Missing from some observations.
    pub fn absent(shape: Shape) -> Self {
        Self {
            shape,
            absent: true,
        }
    }

    /// Absent or nullable.
    pub fn is_optional(&self) -> bool {
        self.absent || self.shape.is_nullable()
    }
}

/// Infer the shape of a value.
pub fn infer(value: &Value) -> Shape {
    match value {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Bool,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() || n.as_f64().map_or(false, is_integral) {
                Shape::Integer
            } else {
                Shape::Floating
            }
        }
        Value::String(_) => Shape::StringT,
        Value::Array(items) => {
            let element = items
                .iter()
                .map(infer)
                .fold(Shape::Bottom, |acc, shape| unify(acc, shape));
            Shape::Vec(Box::new(element))
        }
        Value::Object(map) => Shape::Struct(
            map.iter()
                .map(|(key, value)| (key.clone(), Field::present(infer(value))))
                .collect(),
        ),
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64
}

/// Combine two observed shapes into one that describes both.
pub fn unify(a: Shape, b: Shape) -> Shape {
    if a == b {
        return a;
    }
    match (a, b) {
        (Shape::Bottom, other) | (other, Shape::Bottom) => other,
        (Shape::Any, _) | (_, Shape::Any) => Shape::Any,
        (Shape::Integer, Shape::Floating) | (Shape::Floating, Shape::Integer) => Shape::Floating,
        (Shape::Null, other) | (other, Shape::Null) => nullable(other),
        (Shape::Optional(a), Shape::Optional(b)) => nullable(unify(*a, *b)),
        (Shape::Optional(a), other) | (other, Shape::Optional(a)) => nullable(unify(*a, other)),
        (Shape::Vec(a), Shape::Vec(b)) => Shape::Vec(Box::new(unify(*a, *b))),
        (Shape::Struct(a), Shape::Struct(b)) => Shape::Struct(unify_fields(a, b)),
        _ => Shape::Any,
    }
}

/// Mark a shape as possibly null.
pub fn nullable(shape: Shape) -> Shape {
    match shape {
        Shape::Bottom | Shape::Null => Shape::Null,
        Shape::Any => Shape::Any,
        Shape::Optional(_) => shape,
        other => Shape::Optional(Box::new(other)),
    }
}

fn unify_fields(
    mut a: IndexMap<String, Field>,
    mut b: IndexMap<String, Field>,
) -> IndexMap<String, Field> {
    let mut fields = IndexMap::with_capacity(a.len().max(b.len()));
    for (key, field) in a.drain(..) {
        let merged = match b.shift_remove(&key) {
            Some(other) => Field {
                shape: unify(field.shape, other.shape),
                absent: field.absent || other.absent,
            },
            None => Field::absent(field.shape),
        };
        fields.insert(key, merged);
    }
    for (key, field) in b.drain(..) {
        fields.insert(key, Field::absent(field.shape));
    }
    fields
}
