//! CLI module
//!
//! This module provides:
//! - CLI argument definitions (args)
//! - One-shot commands that talk to the backend without the TUI (commands)

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
