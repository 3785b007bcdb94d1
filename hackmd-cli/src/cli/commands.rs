//! CLI command definitions
//!
//! clap handles the process-level flags that precede the command name.
//! Everything from the command name onward is collected verbatim and split
//! into a [`Command`], an optional positional argument, and [`Options`].

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use super::options::Options;

/// HackMD CLI - Interact with HackMD API
#[derive(Parser, Debug)]
#[command(name = "hackmd-cli")]
#[command(version, about = "HackMD CLI - Interact with HackMD API", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path (default: ~/.config/hackmd/cli.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Don't load config file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// API base URL (overrides config file and HACKMD_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Command followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Operation selected by the first token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ListNotes,
    CreateNote,
    GetNote,
    UpdateNote,
    DeleteNote,
    Help,
}

impl Command {
    /// Look up a command by its CLI name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "list-notes" => Some(Command::ListNotes),
            "create-note" => Some(Command::CreateNote),
            "get-note" => Some(Command::GetNote),
            "update-note" => Some(Command::UpdateNote),
            "delete-note" => Some(Command::DeleteNote),
            "help" | "--help" | "-h" => Some(Command::Help),
            _ => None,
        }
    }

    /// Whether this command talks to the API
    pub fn needs_api(&self) -> bool {
        !matches!(self, Command::Help)
    }
}

/// Command name that matched nothing
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

/// A fully parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    /// First argument after the command, unless it is a flag
    pub positional: Option<String>,
    pub options: Options,
}

impl Invocation {
    /// Split tokens (command name first) into an invocation.
    ///
    /// No tokens at all means help.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, UnknownCommand> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(Self {
                command: Command::Help,
                positional: None,
                options: Options::default(),
            });
        };

        let name: &str = name.as_ref();
        let command = Command::from_name(name).ok_or_else(|| UnknownCommand(name.to_string()))?;

        let first: Option<&str> = rest.first().map(|t| t.as_ref());
        let positional = first
            .filter(|t| !t.starts_with("--"))
            .map(str::to_string);

        Ok(Self {
            command,
            positional,
            options: Options::parse(rest),
        })
    }
}
