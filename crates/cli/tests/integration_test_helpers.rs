//! Test helpers for integration tests

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

// Set by Cargo for integration tests of a crate with a binary target
const BINARY_NAME: &str = env!("CARGO_BIN_EXE_typegen");

/// A temporary project directory the binary runs in
pub struct TestProject {
    #[allow(dead_code)] // Keeps the temp directory alive
    pub temp_dir: TempDir,
    pub project_path: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project_path = temp_dir.path().to_path_buf();
        fs::create_dir_all(project_path.join(".typegen")).unwrap();

        Self {
            temp_dir,
            project_path,
        }
    }

    /// Project with a `data.json` input
    pub fn with_input(content: &str) -> Self {
        let project = Self::new();
        project.write_file("data.json", content);
        project
    }

    #[allow(dead_code)] // Used across multiple test files
    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.project_path.join(relative_path)
    }

    #[allow(dead_code)] // Used across multiple test files
    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.path(relative_path).exists()
    }

    #[allow(dead_code)] // Used across multiple test files
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path(relative_path)).unwrap()
    }

    pub fn write_file(&self, relative_path: &str, content: &str) {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Replace `to` with `from` the way editors save atomically
    #[allow(dead_code)] // Used across multiple test files
    pub fn rename_file(&self, from: &str, to: &str) {
        fs::rename(self.path(from), self.path(to)).unwrap();
    }

    #[allow(dead_code)] // Used across multiple test files
    pub fn write_config(&self, content: &str) {
        self.write_file(".typegen/config.yaml", content);
    }

    /// Command for the binary, rooted in the project and isolated from the
    /// caller's environment
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(BINARY_NAME);
        cmd.current_dir(&self.project_path);
        cmd.env_remove("TYPEGEN_TARGET");
        cmd.env_remove("TYPEGEN_LOG");
        cmd.args(args);
        cmd
    }

    /// Run typegen and return output
    pub fn run_command(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    /// Run typegen with `stdin` piped in
    #[allow(dead_code)] // Used across multiple test files
    pub fn run_command_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    /// Run typegen, assert success and return stdout
    #[allow(dead_code)] // Used across multiple test files
    pub fn run_command_success(&self, args: &[&str]) -> String {
        let output = self.run_command(args);
        assert_success(args, &output);
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Run typegen, assert failure and return stderr
    #[allow(dead_code)] // Used across multiple test files
    pub fn run_command_failure(&self, args: &[&str]) -> String {
        let output = self.run_command(args);
        assert!(
            !output.status.success(),
            "Command should have failed: typegen {}",
            args.join(" ")
        );
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}

pub fn assert_success(args: &[&str], output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed: typegen {}", args.join(" "));
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("Command failed with exit code: {:?}", output.status.code());
    }
}

/// A small document exercising nesting, arrays and mixed optionality
#[allow(dead_code)] // Used across multiple test files
pub fn sample_document() -> &'static str {
    r#"{
  "id": 7,
  "name": "widget",
  "tags": ["a", "b"],
  "owner": {"login": "octo", "admin": false},
  "parts": [{"sku": "x1", "qty": 2}, {"sku": "x2"}]
}"#
}
