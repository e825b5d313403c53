/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Turns an inferred shape into a flat list of declarations for a dialect
 * profile, then renders them through the profile's template.
 */

use crate::naming::{singularize, to_camel_case, to_pascal_case, to_snake_case, NameAllocator};
use crate::schema::dialect::{DialectProfile, Escape, FieldCase, FieldOptional, Nesting};
use crate::schema::shape::{nullable, Field, Shape};
use indexmap::IndexMap;
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Struct,
    Alias,
}

#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
    /// Aliased type expression
    pub target: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDeclaration {
    /// Name as written in the output, escaped if needed
    pub name: String,
    /// Original JSON key
    pub key: String,
    /// JSON key escaped for a string literal
    pub key_literal: String,
    /// The written name differs from the JSON key
    pub renamed: bool,
    pub optional: bool,
    pub type_expr: String,
}

/// Build the declarations describing `shape` under the root name.
///
/// The root comes first; nested types follow their parent in the order they
/// are first referenced.
pub fn declarations(profile: &DialectProfile, root_name: &str, shape: &Shape) -> Vec<Declaration> {
    let mut builder = DeclarationBuilder {
        profile,
        names: NameAllocator::reserving(profile.reserved_types),
        declarations: Vec::new(),
    };
    let root = builder.names.allocate(root_name);

    match (profile.nesting, shape) {
        (Nesting::Named, Shape::Struct(fields)) => builder.declare_struct(root, fields),
        (_, shape) => {
            let target = builder.type_expr(shape, &root, 0);
            builder.declarations.insert(
                0,
                Declaration {
                    kind: DeclarationKind::Alias,
                    name: root,
                    fields: Vec::new(),
                    target: Some(target),
                },
            );
        }
    }
    builder.declarations
}

/// Render declarations through a profile template.
pub fn render(
    tera: &Tera,
    profile: &DialectProfile,
    template: &str,
    declarations: &[Declaration],
    derives: &str,
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("declarations", declarations);
    context.insert(
        "has_structs",
        &declarations
            .iter()
            .any(|d| d.kind == DeclarationKind::Struct),
    );
    context.insert(
        "has_renamed",
        &declarations
            .iter()
            .flat_map(|d| &d.fields)
            .any(|f| f.renamed),
    );
    context.insert("derives", derives);
    context.insert("indent", profile.indent);
    tera.render(template, &context)
}

struct DeclarationBuilder<'p> {
    profile: &'p DialectProfile,
    names: NameAllocator,
    declarations: Vec<Declaration>,
}

impl DeclarationBuilder<'_> {
    fn declare_struct(&mut self, name: String, fields: &IndexMap<String, Field>) {
        // Reserve the slot first so a parent precedes the types its fields introduce
        let index = self.declarations.len();
        self.declarations.push(Declaration {
            kind: DeclarationKind::Struct,
            name,
            fields: Vec::new(),
            target: None,
        });
        let fields = self.fields(fields, 0);
        self.declarations[index].fields = fields;
    }

    fn fields(&mut self, fields: &IndexMap<String, Field>, depth: usize) -> Vec<FieldDeclaration> {
        let mut local = NameAllocator::new();
        fields
            .iter()
            .map(|(key, field)| {
                let optional = field.is_optional();
                let type_expr = match self.profile.field_optional {
                    FieldOptional::Marker => self.type_expr(&field.shape, key, depth),
                    FieldOptional::Nullable if field.absent => {
                        self.type_expr(&nullable(field.shape.clone()), key, depth)
                    }
                    FieldOptional::Nullable => self.type_expr(&field.shape, key, depth),
                };
                let (name, renamed) = self.field_name(key, &mut local);
                FieldDeclaration {
                    name,
                    key: key.clone(),
                    key_literal: escape_literal(key, self.profile),
                    renamed,
                    optional,
                    type_expr,
                }
            })
            .collect()
    }

    fn field_name(&self, key: &str, local: &mut NameAllocator) -> (String, bool) {
        let base = match self.profile.field_case {
            FieldCase::Verbatim => key.to_string(),
            FieldCase::Camel => to_camel_case(key),
            FieldCase::Snake => to_snake_case(key),
        };
        let base = local.allocate(&base);

        match self.profile.escape {
            Escape::Quote => {
                if is_identifier(&base) {
                    (base, false)
                } else {
                    (quote(&base), false)
                }
            }
            Escape::Backtick(keywords) => {
                let renamed = base != key;
                if keywords.contains(&base.as_str()) {
                    (format!("`{base}`"), renamed)
                } else {
                    (base, renamed)
                }
            }
            Escape::Raw {
                keywords,
                unrawable,
            } => {
                if unrawable.contains(&base.as_str()) {
                    let name = format!("{base}_");
                    let renamed = name != key;
                    (name, renamed)
                } else if keywords.contains(&base.as_str()) {
                    let renamed = base != key;
                    (format!("r#{base}"), renamed)
                } else {
                    let renamed = base != key;
                    (base, renamed)
                }
            }
        }
    }

    fn type_expr(&mut self, shape: &Shape, hint: &str, depth: usize) -> String {
        let types = self.profile.types;
        match shape {
            Shape::Bottom | Shape::Any => types.any.to_string(),
            Shape::Null => types.null.to_string(),
            Shape::Bool => types.boolean.to_string(),
            Shape::StringT => types.string.to_string(),
            Shape::Integer => types.integer.to_string(),
            Shape::Floating => types.floating.to_string(),
            Shape::Optional(inner) => {
                let inner = self.type_expr(inner, hint, depth);
                self.profile.nullable.replacen("{}", &inner, 1)
            }
            Shape::Vec(element) => {
                let mut inner = self.type_expr(element, &element_hint(hint), depth);
                if element.is_nullable() {
                    if let Some((open, close)) = self.profile.group {
                        inner = format!("{open}{inner}{close}");
                    }
                }
                self.profile.array.replacen("{}", &inner, 1)
            }
            Shape::Struct(fields) => match self.profile.nesting {
                Nesting::Named => {
                    let name = self.names.allocate(&to_pascal_case(hint));
                    self.declare_struct(name.clone(), fields);
                    name
                }
                Nesting::Inline => self.inline_struct(fields, depth),
            },
        }
    }

    fn inline_struct(&mut self, fields: &IndexMap<String, Field>, depth: usize) -> String {
        if fields.is_empty() {
            return "{}".to_string();
        }
        let indent = self.profile.indent;
        let mut out = String::from("{\n");
        for field in self.fields(fields, depth + 1) {
            let marker = if field.optional { "?" } else { "" };
            out.push_str(&format!(
                "{}{}{}: {};\n",
                indent.repeat(depth + 1),
                field.name,
                marker,
                field.type_expr
            ));
        }
        out.push_str(&indent.repeat(depth));
        out.push('}');
        out
    }
}

fn element_hint(hint: &str) -> String {
    let singular = singularize(hint);
    if singular == hint {
        format!("{hint}Item")
    } else {
        singular
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn escape_literal(key: &str, profile: &DialectProfile) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if matches!(profile.escape, Escape::Backtick(_)) => out.push_str("\\$"),
            c if c.is_control() => match profile.escape {
                Escape::Raw { .. } => out.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
                _ => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            },
            c => out.push(c),
        }
    }
    out
}
