//! CLI commands

pub mod completion;
pub mod generate;
pub mod targets;
pub mod watch;
