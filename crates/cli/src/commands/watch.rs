//! Watch command implementation
//!
//! Keeps a generation session open on an input file. File changes become
//! document-changed triggers and target names typed on stdin become selection
//! changes; every settled state is printed as it arrives.

use crate::error::{CliError, CliResult};
use crate::utils::config::{resolve_settings, Overrides};
use crate::utils::input::read_file;
use crate::utils::target::parse_target;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tokio::time::Instant;
use typegen_engine::{
    DispatchOptions, Dispatcher, GenerationSession, GenerationState, OutputTarget, StateWatcher,
};

const DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Options {
    pub input: String,
    pub target: Option<String>,
    pub root_name: Option<String>,
    pub rust_derives: Option<String>,
}

/// What a line typed on stdin asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Select(OutputTarget),
    Regenerate,
    Quit,
    Skip,
}

fn parse_command(line: &str) -> CliResult<Command> {
    match line.trim() {
        "" => Ok(Command::Skip),
        ":q" | "quit" | "exit" => Ok(Command::Quit),
        ":r" | "reload" => Ok(Command::Regenerate),
        name => parse_target(name).map(Command::Select),
    }
}

/// Runs the watch command until Ctrl+C or `quit` on stdin.
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Watch mode failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let settings = resolve_settings(Overrides {
        target: options.target.as_deref(),
        root_name: options.root_name.as_deref(),
        rust_derives: options.rust_derives.as_deref(),
    })?;
    let input_path = PathBuf::from(&options.input);
    if !input_path.exists() {
        return Err(CliError::Message(format!(
            "Input file not found: {}",
            input_path.display()
        )));
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Message(format!("Failed to create runtime: {e}")))?;

    let outcome = rt.block_on(async {
        let document = Arc::new(Mutex::new(load_document(&input_path)));
        let source = {
            let document = Arc::clone(&document);
            move || document.lock().unwrap_or_else(PoisonError::into_inner).clone()
        };
        let dispatcher = Dispatcher::global().with_options(DispatchOptions {
            rust_derives: settings.rust_derives.clone(),
        });
        let session = GenerationSession::new(Arc::new(dispatcher), source, settings.target)
            .with_root_name(settings.root_name.clone());
        tokio::spawn(print_states(session.subscribe()));

        let (tx, mut events) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |event: notify::Result<Event>| {
                let _ = tx.send(event);
            },
            Config::default(),
        )
        .map_err(|e| CliError::Message(format!("Failed to create file watcher: {e}")))?;
        let (watch_dir, input_canonical) = watch_paths(&input_path)?;
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| CliError::Message(format!("Failed to watch input directory: {e}")))?;

        println!("Watching {} ({})", input_path.display(), settings.target.label());
        println!("Type a target name to switch, 'quit' to stop. Press Ctrl+C to exit.");
        if session.open().is_none() {
            eprintln!("  Waiting for a valid document...");
        }

        let mut stdin = Some(BufReader::new(tokio::io::stdin()).lines());
        let mut reload_at: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                Some(event) = events.recv() => match event {
                    Ok(event) if touches(&event, &input_canonical) => {
                        reload_at = Some(Instant::now() + DEBOUNCE);
                    }
                    Ok(_) => {}
                    Err(e) => eprintln!("  Warning: File watcher error: {e}"),
                },
                _ = sleep_until(reload_at), if reload_at.is_some() => {
                    reload_at = None;
                    println!("\n📝 Input file changed");
                    if let Some(value) = reload_document(&input_path) {
                        *document.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
                        session.document_changed();
                    }
                }
                line = next_line(&mut stdin) => match line {
                    Some(line) => match parse_command(&line) {
                        Ok(Command::Select(target)) => {
                            if session.select_target(target).is_none() {
                                println!("  {} is already selected", target.label());
                            }
                        }
                        Ok(Command::Regenerate) => {
                            if let Some(value) = reload_document(&input_path) {
                                *document.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
                            }
                            session.document_changed();
                        }
                        Ok(Command::Quit) => break,
                        Ok(Command::Skip) => {}
                        Err(e) => eprintln!("  {e}"),
                    },
                    // stdin closed; keep watching the file
                    None => stdin = None,
                },
            }
        }

        session.close();
        Ok::<(), CliError>(())
    });
    // a pending stdin read cannot be cancelled and would block runtime drop
    rt.shutdown_background();
    outcome
}

fn load_document(path: &Path) -> Option<Value> {
    match read_file(path) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("  Warning: {e}");
            None
        }
    }
}

// A broken edit keeps the last good document.
fn reload_document(path: &Path) -> Option<Value> {
    match read_file(path) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("  ✗ Keeping previous document: {e}");
            None
        }
    }
}

/// The directory to watch and the canonical input path. The directory is
/// watched rather than the file so that saves which rename a new file over
/// the input keep being seen.
fn watch_paths(input: &Path) -> CliResult<(PathBuf, PathBuf)> {
    let input = input.canonicalize().map_err(|e| {
        CliError::Message(format!("Failed to resolve input file {}: {e}", input.display()))
    })?;
    let dir = input.parent().map(Path::to_path_buf).ok_or_else(|| {
        CliError::Message(format!("Input file has no parent directory: {}", input.display()))
    })?;
    Ok((dir, input))
}

// Removed paths cannot be canonicalized; resolve their parent instead.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn touches(event: &Event, input: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|path| normalize(path) == input)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn next_line(stdin: &mut Option<Lines<BufReader<Stdin>>>) -> Option<String> {
    match stdin {
        Some(lines) => lines.next_line().await.ok().flatten(),
        None => std::future::pending().await,
    }
}

async fn print_states(mut watcher: StateWatcher) {
    while let Some(state) = watcher.changed().await {
        match state {
            GenerationState::Idle => {}
            GenerationState::Loading(id) => eprintln!("… generating (request {id})"),
            GenerationState::Ready(id, result) => {
                println!("✓ {} (request {id})", result.target.label());
                print!("{}", result.text);
            }
            GenerationState::Failed(id, failure) => {
                eprintln!("✗ {failure} (request {id})");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ProjectDir;
    use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
    use serial_test::serial;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("go").unwrap(), Command::Select(OutputTarget::Go));
        assert_eq!(
            parse_command("  json-schema \n").unwrap(),
            Command::Select(OutputTarget::JsonSchema)
        );
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command(":r").unwrap(), Command::Regenerate);
        assert_eq!(parse_command("   ").unwrap(), Command::Skip);
        assert!(parse_command("swift").is_err());
    }

    #[test]
    #[serial]
    fn test_touches_only_the_input_file() {
        let project = ProjectDir::new();
        let input = project.write("data.json", "{}");
        let other = project.write("other.json", "{}");
        let input_canonical = input.canonicalize().unwrap();

        let modify = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(input.clone());
        assert!(touches(&modify, &input_canonical));

        let create = Event::new(EventKind::Create(CreateKind::File)).add_path(other);
        assert!(!touches(&create, &input_canonical));

        let access = Event::new(EventKind::Access(notify::event::AccessKind::Any)).add_path(input);
        assert!(!touches(&access, &input_canonical));
    }

    #[test]
    #[serial]
    fn test_watch_paths_resolve_the_enclosing_directory() {
        let project = ProjectDir::new();
        project.write("data.json", "{}");
        let (dir, input) = watch_paths(Path::new("data.json")).unwrap();
        assert_eq!(dir, project.path().canonicalize().unwrap());
        assert_eq!(input, dir.join("data.json"));
        assert!(watch_paths(Path::new("missing.json")).is_err());
    }

    #[test]
    #[serial]
    fn test_touches_a_replaced_input_file() {
        let project = ProjectDir::new();
        let input = project.write("data.json", "{}");
        let (dir, input_canonical) = watch_paths(&input).unwrap();

        // rename-over save: the old file is removed, then a new one appears
        std::fs::remove_file(&input).unwrap();
        let removed = Event::new(EventKind::Remove(RemoveKind::File)).add_path(dir.join("data.json"));
        assert!(touches(&removed, &input_canonical));

        let temp = project.write("data.json.tmp", "{\"id\": 1}");
        std::fs::rename(&temp, &input).unwrap();
        let renamed = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(dir.join("data.json"));
        assert!(touches(&renamed, &input_canonical));

        let sibling = Event::new(EventKind::Create(CreateKind::File)).add_path(dir.join("data.json.tmp"));
        assert!(!touches(&sibling, &input_canonical));
    }

    #[test]
    #[serial]
    fn test_broken_document_is_not_loaded() {
        let project = ProjectDir::new();
        let good = project.write("good.yaml", "id: 1\n");
        let bad = project.write("bad.json", "{");

        assert_eq!(load_document(&good), Some(serde_json::json!({"id": 1})));
        assert_eq!(reload_document(&bad), None);
    }

    #[test]
    #[serial]
    fn test_missing_input_fails() {
        let _project = ProjectDir::new();
        let options = Options {
            input: "does/not/exist.json".to_string(),
            target: Some("go".to_string()),
            root_name: None,
            rust_derives: None,
        };
        assert_eq!(run(&options), 1);
    }
}
