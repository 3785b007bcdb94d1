//! Output formatting utilities for the CLI
//!
//! Every formatter returns a `String`; handlers decide where it goes.

use colored::*;
use hackmd_core::{note_url, HackmdError, Note};

/// Width of the rule drawn around a note's metadata
const RULE_WIDTH: usize = 60;

/// Usage text for `help`, `--help`, `-h` and the no-argument case
pub const USAGE: &str = "
HackMD CLI - Interact with HackMD API

Usage:
  hackmd-cli [--verbose] [--config <path> | --no-config] [--api-url <url>] <command> [options]

Commands:
  list-notes              List your HackMD notes
    --limit <number>      Number of notes to show (default: 10)

  create-note             Create a new note
    --title <string>      Note title (required)
    --content <string>    Note content (required)
    --read-permission     Read permission: owner, signed_in, guest
    --write-permission    Write permission: owner, signed_in, guest

  get-note <id>           Get note content

  update-note <id>        Update a note
    --content <string>    New content (required)
    --read-permission     Update read permission
    --write-permission    Update write permission

  delete-note <id>        Delete a note

Environment Variables:
  HACKMD_API_TOKEN        Your HackMD API token (required)
                          Get one from: https://hackmd.io/settings#api
  HACKMD_API_URL          API base URL (default: https://api.hackmd.io/v1)
  HACKMD_WEB_URL          Base for note links (default: https://hackmd.io)

Examples:
  hackmd-cli list-notes --limit 5
  hackmd-cli create-note --title \"My Note\" --content \"# Hello World\"
  hackmd-cli get-note abc123
  hackmd-cli update-note abc123 --content \"# Updated Content\"
  hackmd-cli delete-note abc123
";

/// Guidance printed when no API token is configured
pub const TOKEN_GUIDANCE: &str = "
Get your API token from: https://hackmd.io/settings#api
Then set it with: export HACKMD_API_TOKEN=your_token_here";

/// Format the note list with a `Showing N of M notes:` header
pub fn format_note_list(shown: &[Note], total: usize, web_url: &str) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(
        &format!("Showing {} of {} notes:", shown.len(), total)
            .bold()
            .to_string(),
    );
    output.push_str("\n\n");

    for (index, note) in shown.iter().enumerate() {
        let updated = note
            .last_changed_at
            .as_ref()
            .map(|t| t.format_local())
            .unwrap_or_else(|| "unknown".to_string());

        output.push_str(&format!("{}. {}\n", index + 1, note.display_title()));
        output.push_str(&format!("   ID: {}\n", note.id));
        output.push_str(&format!("   URL: {}\n", note.view_url(web_url).cyan()));
        output.push_str(&format!("   Updated: {}\n\n", updated));
    }

    output
}

/// Format the confirmation for a newly created note
pub fn format_note_created(title: &str, note: &Note, web_url: &str) -> String {
    format!(
        "\n{}\n  Title: {}\n  ID: {}\n  URL: {}\n",
        format_success("Note created successfully!"),
        title,
        note.id,
        note.view_url(web_url).cyan()
    )
}

/// Format a single note with metadata and raw content
pub fn format_note_detail(note: &Note, web_url: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let timestamp = |t: &Option<hackmd_core::Timestamp>| {
        t.as_ref()
            .map(|t| t.format_local())
            .unwrap_or_else(|| "unknown".to_string())
    };

    let mut output = String::new();
    output.push('\n');
    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!("Title: {}\n", note.display_title().bold()));
    output.push_str(&format!("ID: {}\n", note.id));
    output.push_str(&format!("URL: {}\n", note.view_url(web_url).cyan()));
    output.push_str(&format!("Created: {}\n", timestamp(&note.created_at)));
    output.push_str(&format!("Updated: {}\n", timestamp(&note.last_changed_at)));
    output.push_str(&rule);
    output.push_str("\n\nContent:\n\n");
    output.push_str(&note.content);
    output.push('\n');
    output
}

/// Format the confirmation for an updated note
pub fn format_note_updated(note_id: &str, web_url: &str) -> String {
    format!(
        "\n{}\n  ID: {}\n  URL: {}\n",
        format_success("Note updated successfully!"),
        note_id,
        note_url(web_url, note_id).cyan()
    )
}

/// Format the confirmation for a deleted note
pub fn format_note_deleted(note_id: &str) -> String {
    format!(
        "\n{}\n  ID: {}\n",
        format_success("Note deleted successfully!"),
        note_id
    )
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Render a command failure for stderr.
///
/// Validation failures get a bare `Error:` prefix; everything else already
/// carries its context chain (`Error creating note: API request failed: ...`).
pub fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<HackmdError>() {
        Some(HackmdError::Validation(msg)) => format!("Error: {}", msg),
        _ => format!("{:#}", err),
    }
}
