//! Output target selection from user input

use crate::error::{CliError, CliResult};
use strsim::levenshtein;
use typegen_engine::OutputTarget;

/// Parse a target id or alias. Unknown names list the supported ids and the
/// closest match, if any is close enough.
pub fn parse_target(input: &str) -> CliResult<OutputTarget> {
    input.parse().map_err(|_| {
        let ids: Vec<&str> = OutputTarget::ALL.iter().map(|t| t.id()).collect();
        let mut message = format!(
            "Unknown target '{input}'. Supported targets: {}",
            ids.join(", ")
        );
        if let Some(suggestion) = suggest_target(input) {
            message.push_str(&format!("\n  Did you mean '{suggestion}'?"));
        }
        CliError::Message(message)
    })
}

/// The target id closest to `input` by edit distance.
pub fn suggest_target(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    OutputTarget::ALL
        .iter()
        .map(|target| (target.id(), levenshtein(&input, target.id())))
        .filter(|(id, distance)| *distance > 0 && *distance <= input.len().max(id.len()) / 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(id, _)| id)
}
