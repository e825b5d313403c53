/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Dialect profiles. Each output mode the inference engine understands is
 * described here as data; the renderer has no per-dialect code paths.
 */

use std::str::FromStr;

/// Output modes understood by the schema-inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    TypeScript,
    TypeScriptCombined,
    JsonSchema,
    Kotlin,
    Rust,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PROFILES
            .iter()
            .find(|p| p.id == s)
            .map(|p| p.mode)
            .ok_or_else(|| s.to_string())
    }
}

/// How the result text is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Type declarations rendered through the named template
    Declarations { template: &'static str },
    /// A JSON Schema document
    SchemaDocument,
}

/// Where nested object types go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Hoisted into their own named declarations
    Named,
    /// Written in place; the root becomes a single alias
    Inline,
}

/// How a field that may be missing is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOptional {
    /// A marker on the field name; the type stays non-nullable (`name?: T`)
    Marker,
    /// The field's type becomes the nullable form of the type
    Nullable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCase {
    Verbatim,
    Camel,
    Snake,
}

/// How field names that are not plain identifiers are made legal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Quote names that are not identifiers (`"first-name"`)
    Quote,
    /// Wrap keywords in backticks
    Backtick(&'static [&'static str]),
    /// Prefix keywords with `r#`; the listed exceptions get a trailing underscore
    Raw {
        keywords: &'static [&'static str],
        unrawable: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TypeNames {
    pub boolean: &'static str,
    pub string: &'static str,
    pub integer: &'static str,
    pub floating: &'static str,
    pub any: &'static str,
    pub null: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DialectProfile {
    pub mode: OutputMode,
    pub id: &'static str,
    pub emit: Emit,
    pub nesting: Nesting,
    pub types: TypeNames,
    /// `{}` is replaced by the element type
    pub array: &'static str,
    /// `{}` is replaced by the inner type
    pub nullable: &'static str,
    /// Brackets placed around a nullable element type inside an array
    pub group: Option<(&'static str, &'static str)>,
    pub field_optional: FieldOptional,
    pub field_case: FieldCase,
    pub escape: Escape,
    /// Type names a hoisted declaration must not shadow
    pub reserved_types: &'static [&'static str],
    pub indent: &'static str,
}

const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

const RUST_UNRAWABLE: &[&str] = &["crate", "self", "Self", "super"];

const TYPESCRIPT_RESERVED_TYPES: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "Function", "Map", "Number", "Object", "Partial",
    "Promise", "Record", "Set", "String", "Symbol",
];

const KOTLIN_RESERVED_TYPES: &[&str] = &[
    "Any", "Array", "Boolean", "Byte", "Char", "Double", "Float", "Int", "List", "Long", "Map",
    "Nothing", "Number", "Pair", "SerialName", "Serializable", "Set", "Short", "String",
    "Triple", "Unit",
];

// Prelude items, `Self`, and the derive and import names the template writes
const RUST_RESERVED_TYPES: &[&str] = &[
    "AsMut", "AsRef", "Box", "Clone", "Copy", "Debug", "Default", "Deserialize", "Drop", "Eq",
    "Err", "Extend", "Fn", "FnMut", "FnOnce", "From", "Hash", "Into", "IntoIterator",
    "Iterator", "None", "Ok", "Option", "Ord", "PartialEq", "PartialOrd", "Result", "Self",
    "Send", "Serialize", "Sized", "Some", "String", "Sync", "ToOwned", "ToString", "Unpin",
    "Vec",
];

const TYPESCRIPT_TYPES: TypeNames = TypeNames {
    boolean: "boolean",
    string: "string",
    integer: "number",
    floating: "number",
    any: "any",
    null: "null",
};

pub const PROFILES: [DialectProfile; 5] = [
    DialectProfile {
        mode: OutputMode::TypeScript,
        id: "typescript",
        emit: Emit::Declarations {
            template: "typescript.tera",
        },
        nesting: Nesting::Named,
        types: TYPESCRIPT_TYPES,
        array: "{}[]",
        nullable: "{} | null",
        group: Some(("(", ")")),
        field_optional: FieldOptional::Marker,
        field_case: FieldCase::Verbatim,
        escape: Escape::Quote,
        reserved_types: TYPESCRIPT_RESERVED_TYPES,
        indent: "    ",
    },
    DialectProfile {
        mode: OutputMode::TypeScriptCombined,
        id: "typescript/typealias",
        emit: Emit::Declarations {
            template: "typescript.tera",
        },
        nesting: Nesting::Inline,
        types: TYPESCRIPT_TYPES,
        array: "{}[]",
        nullable: "{} | null",
        group: Some(("(", ")")),
        field_optional: FieldOptional::Marker,
        field_case: FieldCase::Verbatim,
        escape: Escape::Quote,
        reserved_types: TYPESCRIPT_RESERVED_TYPES,
        indent: "    ",
    },
    DialectProfile {
        mode: OutputMode::JsonSchema,
        id: "json_schema",
        emit: Emit::SchemaDocument,
        nesting: Nesting::Inline,
        types: TypeNames {
            boolean: "boolean",
            string: "string",
            integer: "integer",
            floating: "number",
            any: "",
            null: "null",
        },
        array: "array",
        nullable: "null",
        group: None,
        field_optional: FieldOptional::Marker,
        field_case: FieldCase::Verbatim,
        escape: Escape::Quote,
        reserved_types: &[],
        indent: "  ",
    },
    DialectProfile {
        mode: OutputMode::Kotlin,
        id: "kotlin",
        emit: Emit::Declarations {
            template: "kotlin.tera",
        },
        nesting: Nesting::Named,
        types: TypeNames {
            boolean: "Boolean",
            string: "String",
            integer: "Long",
            floating: "Double",
            any: "Any?",
            null: "Any?",
        },
        array: "List<{}>",
        nullable: "{}?",
        group: None,
        field_optional: FieldOptional::Nullable,
        field_case: FieldCase::Camel,
        escape: Escape::Backtick(KOTLIN_KEYWORDS),
        reserved_types: KOTLIN_RESERVED_TYPES,
        indent: "    ",
    },
    DialectProfile {
        mode: OutputMode::Rust,
        id: "rust",
        emit: Emit::Declarations {
            template: "rust.tera",
        },
        nesting: Nesting::Named,
        types: TypeNames {
            boolean: "bool",
            string: "String",
            integer: "i64",
            floating: "f64",
            any: "serde_json::Value",
            null: "Option<serde_json::Value>",
        },
        array: "Vec<{}>",
        nullable: "Option<{}>",
        group: None,
        field_optional: FieldOptional::Nullable,
        field_case: FieldCase::Snake,
        escape: Escape::Raw {
            keywords: RUST_KEYWORDS,
            unrawable: RUST_UNRAWABLE,
        },
        reserved_types: RUST_RESERVED_TYPES,
        indent: "    ",
    },
];

impl OutputMode {
    pub fn profile(self) -> &'static DialectProfile {
        // PROFILES holds one entry per mode
        PROFILES
            .iter()
            .find(|p| p.mode == self)
            .unwrap_or(&PROFILES[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_a_profile() {
        for mode in [
            OutputMode::TypeScript,
            OutputMode::TypeScriptCombined,
            OutputMode::JsonSchema,
            OutputMode::Kotlin,
            OutputMode::Rust,
        ] {
            assert_eq!(mode.profile().mode, mode);
            assert_eq!(mode.profile().id.parse::<OutputMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_go_is_not_an_output_mode() {
        assert_eq!("go".parse::<OutputMode>(), Err("go".to_string()));
    }
}
