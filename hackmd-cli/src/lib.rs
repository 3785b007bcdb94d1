//! HackMD CLI Library
//!
//! This library provides the core functionality for the `hackmd-cli` tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::HackmdClient`] which provides
//! programmatic access to the HackMD notes API. Configuration types are also
//! available via [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use hackmd_cli::client::HackmdClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HackmdClient::new("https://api.hackmd.io/v1", "my-token")?;
//!
//! let notes = client.list_notes().await?;
//! println!("You have {} notes", notes.len());
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the HackMD REST API.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
