//! CLI command definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Process flags, command names, and invocation parsing
//! - [`options`] - `--key value` option parsing
//! - [`handlers`] - Command execution handlers

mod commands;
mod handlers;
mod options;

pub use commands::*;
pub use handlers::*;
pub use options::*;
