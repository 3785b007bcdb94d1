//! Request bodies for the HackMD REST API
//!
//! Optional permissions are omitted from the JSON when unset, so the service
//! keeps its own defaults.

use crate::types::Permission;
use serde::{Deserialize, Serialize};

/// Body of `POST /notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_permission: Option<Permission>,
}

/// Body of `PATCH /notes/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_permission: Option<Permission>,
}
