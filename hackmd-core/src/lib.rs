//! HackMD Core Library
//!
//! Shared types, request models, and the error taxonomy for the HackMD
//! command-line client. The CLI crate builds on these; nothing here performs
//! I/O beyond resolving well-known paths.

pub mod api;
pub mod error;
pub mod paths;
pub mod types;

// Re-export commonly used types
pub use api::{NewNote, NoteUpdate};
pub use error::*;
pub use paths::default_config_path;
pub use types::*;
