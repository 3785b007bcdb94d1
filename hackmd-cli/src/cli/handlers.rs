//! Command execution handlers
//!
//! Each handler validates its inputs before touching the network, makes one
//! API call, and writes the formatted result to `out`.

use anyhow::{Context, Result};
use hackmd_core::{HackmdError, NewNote, NoteUpdate, Permission};
use std::io::Write;
use tracing::debug;

use crate::client::HackmdClient;
use crate::format::{
    format_note_created, format_note_deleted, format_note_detail, format_note_list,
    format_note_updated, USAGE,
};

use super::commands::{Command, Invocation};
use super::options::Options;

/// Notes shown by `list-notes` without `--limit`
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Number of notes to show out of `total`.
///
/// Positive limits cap the count. Negative limits drop that many from the
/// end. Zero or no limit falls back to [`DEFAULT_LIST_LIMIT`].
pub fn resolve_limit(limit: Option<i64>, total: usize) -> usize {
    match limit {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX).min(total),
        Some(n) if n < 0 => {
            let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            total.saturating_sub(drop)
        }
        _ => DEFAULT_LIST_LIMIT.min(total),
    }
}

fn validation(message: &str) -> anyhow::Error {
    HackmdError::Validation(message.to_string()).into()
}

/// Read a permission from its kebab-case flag or camelCase key
fn permission_option(options: &Options, kebab: &str, camel: &str) -> Result<Option<Permission>> {
    options
        .text_any(&[kebab, camel])
        .map(|value| {
            value
                .parse::<Permission>()
                .map_err(|e| validation(&format!("--{}: {}", kebab, e)))
        })
        .transpose()
}

/// Whether `err` comes from writing to a closed stdout, e.g. `| head`
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map_or(false, |e| e.kind() == std::io::ErrorKind::BrokenPipe)
    })
}

/// Dispatch a parsed invocation to its handler
pub async fn run_command<W: Write>(
    client: &HackmdClient,
    invocation: &Invocation,
    web_url: &str,
    out: &mut W,
) -> Result<()> {
    let positional = invocation.positional.as_deref();
    let options = &invocation.options;

    match invocation.command {
        Command::ListNotes => handle_list_notes(client, options, web_url, out).await,
        Command::CreateNote => handle_create_note(client, options, web_url, out).await,
        Command::GetNote => handle_get_note(client, positional, web_url, out).await,
        Command::UpdateNote => {
            handle_update_note(client, positional, options, web_url, out).await
        }
        Command::DeleteNote => handle_delete_note(client, positional, out).await,
        Command::Help => handle_help(out),
    }
}

/// Handle help command
pub fn handle_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", USAGE)?;
    Ok(())
}

/// Handle list-notes command
pub async fn handle_list_notes<W: Write>(
    client: &HackmdClient,
    options: &Options,
    web_url: &str,
    out: &mut W,
) -> Result<()> {
    let notes = client.list_notes().await.context("Error fetching notes")?;

    let shown = resolve_limit(options.limit(), notes.len());
    debug!(shown, total = notes.len(), "listing notes");

    writeln!(out, "{}", format_note_list(&notes[..shown], notes.len(), web_url))?;
    Ok(())
}

/// Handle create-note command
pub async fn handle_create_note<W: Write>(
    client: &HackmdClient,
    options: &Options,
    web_url: &str,
    out: &mut W,
) -> Result<()> {
    let (Some(title), Some(content)) = (options.text("title"), options.text("content")) else {
        return Err(validation("--title and --content are required"));
    };

    let request = NewNote {
        title: title.to_string(),
        content: content.to_string(),
        read_permission: permission_option(options, "read-permission", "readPermission")?,
        write_permission: permission_option(options, "write-permission", "writePermission")?,
    };

    let note = client
        .create_note(&request)
        .await
        .context("Error creating note")?;

    writeln!(out, "{}", format_note_created(title, &note, web_url))?;
    Ok(())
}

/// Handle get-note command
pub async fn handle_get_note<W: Write>(
    client: &HackmdClient,
    note_id: Option<&str>,
    web_url: &str,
    out: &mut W,
) -> Result<()> {
    let Some(note_id) = note_id else {
        return Err(validation("note ID is required"));
    };

    let note = client
        .get_note(note_id)
        .await
        .context("Error fetching note")?;

    writeln!(out, "{}", format_note_detail(&note, web_url))?;
    Ok(())
}

/// Handle update-note command
pub async fn handle_update_note<W: Write>(
    client: &HackmdClient,
    note_id: Option<&str>,
    options: &Options,
    web_url: &str,
    out: &mut W,
) -> Result<()> {
    let (Some(note_id), Some(content)) = (note_id, options.text("content")) else {
        return Err(validation("note ID and --content are required"));
    };

    let update = NoteUpdate {
        content: content.to_string(),
        read_permission: permission_option(options, "read-permission", "readPermission")?,
        write_permission: permission_option(options, "write-permission", "writePermission")?,
    };

    client
        .update_note(note_id, &update)
        .await
        .context("Error updating note")?;

    writeln!(out, "{}", format_note_updated(note_id, web_url))?;
    Ok(())
}

/// Handle delete-note command
pub async fn handle_delete_note<W: Write>(
    client: &HackmdClient,
    note_id: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let Some(note_id) = note_id else {
        return Err(validation("note ID is required"));
    };

    client
        .delete_note(note_id)
        .await
        .context("Error deleting note")?;

    writeln!(out, "{}", format_note_deleted(note_id))?;
    Ok(())
}
