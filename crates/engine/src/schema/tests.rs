//! Unit tests for the schema-inference engine

use super::*;
use serde_json::json;

fn engine() -> SchemaEngine {
    SchemaEngine::new().unwrap()
}

fn generate(mode: &str, value: Value) -> String {
    engine()
        .generate("Root", &value, &EngineOptions::new(mode))
        .unwrap()
}

#[test]
fn test_engine_initialization() {
    assert!(SchemaEngine::new().is_ok());
}

#[test]
fn test_typescript_interfaces() {
    let output = generate(
        "typescript",
        json!({"id": 1, "name": "a", "address": {"city": "x"}, "tags": ["t"]}),
    );
    assert_eq!(
        output,
        "export interface Root {\n    id: number;\n    name: string;\n    address: Address;\n    tags: string[];\n}\n\nexport interface Address {\n    city: string;\n}\n"
    );
}

#[test]
fn test_typescript_combined_alias() {
    let output = generate("typescript/typealias", json!({"id": 1, "name": "a"}));
    assert_eq!(
        output,
        "export type Root = {\n    id: number;\n    name: string;\n};\n"
    );
}

#[test]
fn test_kotlin_data_classes() {
    let output = generate("kotlin", json!([{"id": 1}, {"id": 2, "extra": true}]));
    assert_eq!(
        output,
        "import kotlinx.serialization.Serializable\n\ntypealias Root = List<RootItem>\n\n@Serializable\ndata class RootItem(\n    val id: Long,\n    val extra: Boolean? = null,\n)\n"
    );
}

#[test]
fn test_kotlin_serial_names_and_empty_class() {
    let output = generate("kotlin", json!({"first_name": "a", "meta": {}}));
    assert!(output.contains("    @SerialName(\"first_name\")\n    val firstName: String,\n"));
    assert!(output.contains("@Serializable\nclass Meta\n"));
    assert!(output.starts_with(
        "import kotlinx.serialization.SerialName\nimport kotlinx.serialization.Serializable\n\n"
    ));
}

#[test]
fn test_kotlin_omits_unused_serial_name_import() {
    let output = generate("kotlin", json!({"id": 1, "meta": {"name": "a"}}));
    assert!(!output.contains("SerialName"));
    assert!(output.starts_with("import kotlinx.serialization.Serializable\n\n@Serializable\n"));
}

#[test]
fn test_rust_structs() {
    let output = generate("rust", json!({"id": 1, "userName": "a", "score": 1.5}));
    assert_eq!(
        output,
        "use serde::{Deserialize, Serialize};\n\n#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]\npub struct Root {\n    pub id: i64,\n    #[serde(rename = \"userName\")]\n    pub user_name: String,\n    pub score: f64,\n}\n"
    );
}

#[test]
fn test_rust_custom_derives() {
    let options = EngineOptions::new("rust").with_derives(Some("Debug, serde::Deserialize".to_string()));
    let output = engine()
        .generate("Root", &json!({"a": true}), &options)
        .unwrap();
    assert!(output.contains("#[derive(Debug, serde::Deserialize)]"));
}

#[test]
fn test_rust_rejects_malformed_derives() {
    let options = EngineOptions::new("rust").with_derives(Some("Debug,,".to_string()));
    let result = engine().generate("Root", &json!({"a": true}), &options);
    assert!(matches!(result, Err(SchemaEngineError::InvalidOptions(_))));
}

#[test]
fn test_json_schema_document_is_valid_schema() {
    let value = json!({"id": 1, "name": "a"});
    let output = generate("json_schema", value.clone());
    let schema: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(schema["properties"]["id"]["type"], "integer");
    assert_eq!(schema["properties"]["name"]["type"], "string");

    let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
    assert!(compiled.is_valid(&value));
    assert!(!compiled.is_valid(&json!({"id": "not a number", "name": "a"})));
}

#[test]
fn test_scalar_roots_become_aliases() {
    assert_eq!(generate("typescript", json!(42)), "export type Root = number;\n");
    assert_eq!(generate("kotlin", json!(42)), "typealias Root = Long\n");
    assert_eq!(generate("rust", json!(42)), "pub type Root = i64;\n");
    let schema: Value = serde_json::from_str(&generate("json_schema", json!(42))).unwrap();
    assert_eq!(schema["type"], "integer");
}

#[test]
fn test_heterogeneous_elements_give_optional_field_in_every_dialect() {
    let value = json!([{"id": 1}, {"id": 2, "extra": true}]);
    assert!(generate("typescript", value.clone()).contains("extra?: boolean;"));
    assert!(generate("typescript/typealias", value.clone()).contains("extra?: boolean;"));
    assert!(generate("kotlin", value.clone()).contains("val extra: Boolean? = null,"));
    assert!(generate("rust", value.clone()).contains("pub extra: Option<bool>,"));

    let schema: Value = serde_json::from_str(&generate("json_schema", value)).unwrap();
    assert_eq!(schema["items"]["required"], json!(["id"]));
    assert_eq!(schema["items"]["properties"]["extra"]["type"], "boolean");
}

#[test]
fn test_null_values_stay_nullable_in_every_dialect() {
    let value = json!([{"email": "x"}, {"email": null}]);
    assert_eq!(
        generate("typescript", value.clone()),
        "export type Root = RootItem[];\n\nexport interface RootItem {\n    email?: string | null;\n}\n"
    );
    assert!(generate("typescript/typealias", value.clone()).contains("email?: string | null;"));
    assert!(generate("kotlin", value.clone()).contains("val email: String? = null,"));
    assert!(generate("rust", value.clone()).contains("pub email: Option<String>,"));

    let schema: Value = serde_json::from_str(&generate("json_schema", value.clone())).unwrap();
    assert!(schema["items"].get("required").is_none());
    assert_eq!(
        schema["items"]["properties"]["email"]["type"],
        json!(["string", "null"])
    );
    let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
    assert!(compiled.is_valid(&value));
}

#[test]
fn test_output_is_deterministic() {
    let value = json!({"b": [{"x": 1}, {"y": "2"}], "a": {"nested": [1.5, null]}});
    for mode in ["typescript", "typescript/typealias", "json_schema", "kotlin", "rust"] {
        assert_eq!(generate(mode, value.clone()), generate(mode, value.clone()));
    }
}

#[test]
fn test_unsupported_output_mode() {
    let result = engine().generate("Root", &json!({}), &EngineOptions::new("go"));
    assert_eq!(
        result,
        Err(SchemaEngineError::UnsupportedOutputMode("go".to_string()))
    );
}

#[test]
fn test_invalid_root_name_is_normalized() {
    let output = engine()
        .generate("my root", &json!(true), &EngineOptions::new("typescript"))
        .unwrap();
    assert_eq!(output, "export type MyRoot = boolean;\n");
}

#[test]
fn test_options_deserialize_from_engine_config() {
    let options: EngineOptions =
        serde_json::from_str(r#"{"output_mode": "kotlin", "derives": "Debug"}"#).unwrap();
    assert_eq!(options.output_mode, "kotlin");
    assert_eq!(options.derives.as_deref(), Some("Debug"));

    let unknown = serde_json::from_str::<EngineOptions>(r#"{"output_mode": "rust", "x": 1}"#);
    assert!(unknown.is_err());
}

#[test]
fn test_strategy_maps_engine_errors() {
    let result = infer(
        &engine(),
        "Root",
        &json!({"a": 1}),
        OutputTarget::Rust,
        Some("".to_string()),
    );
    assert!(matches!(result, Err(GenerateError::InferenceFailure(_))));

    let result = infer(&engine(), "Root", &json!({"a": 1}), OutputTarget::Go, None);
    assert_eq!(result, Err(GenerateError::UnsupportedTarget("go".to_string())));
}
