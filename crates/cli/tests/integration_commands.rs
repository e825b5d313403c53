//! Integration tests for individual commands

mod integration_test_helpers;

use integration_test_helpers::*;
use serde_json::Value;

#[test]
fn test_generate_every_target_from_file() {
    let project = TestProject::with_input(sample_document());

    for target in [
        "typescript",
        "typescript/typealias",
        "go",
        "json_schema",
        "kotlin",
        "rust",
    ] {
        let stdout =
            project.run_command_success(&["generate", "--input", "data.json", "--target", target]);
        assert!(!stdout.trim().is_empty(), "no output for {target}");
    }
}

#[test]
fn test_generate_typescript_output() {
    let project = TestProject::with_input(r#"{"id": 1, "name": "a"}"#);
    let stdout = project.run_command_success(&["generate", "-i", "data.json", "-t", "typescript"]);
    assert_eq!(
        stdout,
        "export interface Root {\n    id: number;\n    name: string;\n}\n"
    );
}

#[test]
fn test_generate_go_output() {
    let project = TestProject::with_input(r#"{"user_id": 1, "html_url": "x"}"#);
    let stdout = project.run_command_success(&["generate", "-i", "data.json", "-t", "go"]);
    assert!(stdout.starts_with("type AutoGenerated struct {\n"));
    assert!(stdout.contains("\tUserID  int    `json:\"user_id\"`\n"));
    assert!(stdout.contains("\tHTMLURL string `json:\"html_url\"`\n"));
}

#[test]
fn test_generate_json_schema_is_json() {
    let project = TestProject::with_input(sample_document());
    let stdout = project.run_command_success(&["generate", "-i", "data.json", "-t", "json-schema"]);
    let schema: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(schema["type"], "object");
}

#[test]
fn test_generate_from_stdin() {
    let project = TestProject::new();
    let output =
        project.run_command_with_stdin(&["generate", "--target", "rust"], r#"{"count": 3}"#);
    assert_success(&["generate", "--target", "rust"], &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pub struct Root {"));
    assert!(stdout.contains("pub count: i64,"));
}

#[test]
fn test_generate_yaml_input() {
    let project = TestProject::new();
    project.write_file("data.yaml", "id: 1\nlabels:\n  - a\n");
    let stdout = project.run_command_success(&["generate", "-i", "data.yaml", "-t", "kotlin"]);
    assert!(stdout.contains("data class Root("));
    assert!(stdout.contains("val labels: List<String>,"));
}

#[test]
fn test_generate_root_name_and_output_file() {
    let project = TestProject::with_input(r#"{"id": 1}"#);
    let output = project.run_command(&[
        "generate",
        "-i",
        "data.json",
        "-t",
        "typescript",
        "--root-name",
        "Event",
        "-o",
        "types/event.ts",
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✓ Generated TypeScript types to types/event.ts"));
    assert!(project
        .read_file("types/event.ts")
        .starts_with("export interface Event {"));
}

#[test]
fn test_generate_rust_derives_flag() {
    let project = TestProject::with_input(r#"{"id": 1}"#);
    let stdout = project.run_command_success(&[
        "generate",
        "-i",
        "data.json",
        "-t",
        "rust",
        "--rust-derives",
        "Debug, Clone",
    ]);
    assert!(stdout.contains("#[derive(Debug, Clone)]"));
}

#[test]
fn test_config_file_supplies_defaults() {
    let project = TestProject::with_input(r#"{"id": 1}"#);
    project.write_config("target: kotlin\nrootName: Payload\n");

    let stdout = project.run_command_success(&["generate", "-i", "data.json"]);
    assert!(stdout.contains("data class Payload("));

    // flag wins over config
    let stdout = project.run_command_success(&["generate", "-i", "data.json", "-t", "rust"]);
    assert!(stdout.contains("pub struct Payload {"));
}

#[test]
fn test_env_target_overrides_config() {
    let project = TestProject::with_input(r#"{"id": 1}"#);
    project.write_config("target: kotlin\n");

    let output = project
        .command(&["generate", "-i", "data.json"])
        .env("TYPEGEN_TARGET", "go")
        .output()
        .unwrap();
    assert_success(&["generate", "-i", "data.json"], &output);
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("type AutoGenerated struct {"));
}

#[test]
fn test_targets_table() {
    let project = TestProject::new();
    let stdout = project.run_command_success(&["targets"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("ID"));
    assert!(stdout.contains("typescript/typealias"));
    assert!(stdout.contains("structural+formatter"));
}

#[test]
fn test_targets_json() {
    let project = TestProject::new();
    let stdout = project.run_command_success(&["targets", "--json"]);
    let listing: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = listing
        .iter()
        .map(|entry| entry["target"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            "typescript",
            "typescript/typealias",
            "go",
            "json_schema",
            "kotlin",
            "rust"
        ]
    );
}

#[test]
fn test_completion_scripts() {
    let project = TestProject::new();
    for shell in ["bash", "zsh", "fish"] {
        let stdout = project.run_command_success(&["completion", shell]);
        assert!(stdout.contains("typegen"), "{shell} script missing binary name");
    }
}
