//! Shared helpers for the CLI commands

pub mod config;
pub mod input;
pub mod target;
