//! Core types and data structures for HackMD notes

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level for reading or writing a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Only the note owner
    Owner,
    /// Any signed-in user
    SignedIn,
    /// Anyone with the link
    Guest,
}

impl Permission {
    /// All permission levels, in the order the service documents them
    pub const ALL: [Permission; 3] = [Permission::Owner, Permission::SignedIn, Permission::Guest];

    /// Wire name of this permission level
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Owner => "owner",
            Permission::SignedIn => "signed_in",
            Permission::Guest => "guest",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid permission '{}'. Must be one of: owner, signed_in, guest",
                    s
                )
            })
    }
}

/// Point in time as reported by the service.
///
/// The API sends epoch milliseconds; RFC 3339 strings are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    /// Convert to the local time zone, if the value is a valid instant
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        match self {
            Timestamp::Millis(ms) => Local.timestamp_millis_opt(*ms).single(),
            Timestamp::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Local)),
        }
    }

    /// Render as `YYYY-MM-DD HH:MM:SS` in local time, or `unknown`
    pub fn format_local(&self) -> String {
        self.to_local()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// A HackMD note.
///
/// List responses omit `content`, so it defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque note identifier
    pub id: String,
    /// Note title, if the note has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Note {
    /// Title for display, with a placeholder for untitled notes
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "(Untitled)",
        }
    }

    /// Browser URL for this note under the given web base
    pub fn view_url(&self, web_url: &str) -> String {
        note_url(web_url, &self.id)
    }
}

/// Browser URL for a note ID under the given web base
pub fn note_url(web_url: &str, note_id: &str) -> String {
    format!("{}/{}", web_url.trim_end_matches('/'), note_id)
}
