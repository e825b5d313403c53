//! Targets command implementation

use crate::error::{CliError, CliResult};
use typegen_engine::registry;

pub struct Options {
    pub json: bool,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Listing targets failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    if options.json {
        let listing = serde_json::to_string_pretty(registry::entries())
            .map_err(|e| CliError::Message(format!("Failed to serialize targets: {e}")))?;
        println!("{listing}");
    } else {
        print!("{}", render_table());
    }
    Ok(())
}

fn render_table() -> String {
    let rows: Vec<[&str; 4]> = registry::entries()
        .iter()
        .map(|e| [e.target.id(), e.label, e.highlight, e.strategy.as_str()])
        .collect();
    let header = ["ID", "LABEL", "HIGHLIGHT", "STRATEGY"];

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
