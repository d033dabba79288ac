//! JSON encoding for the task store HTTP contract.
//!
//! Request bodies are `{"title": ..., "description": ...}`. The list
//! endpoint returns a JSON array of tasks. Create responses are only
//! inspected for an `_id`.

use serde::Deserialize;

use crate::task::{Task, TaskDraft, TaskId};

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes a draft as a create/update request body.
///
/// # Errors
///
/// Returns `CodecError::Json` if the draft cannot be serialized.
pub fn encode_draft(draft: &TaskDraft) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(draft)?)
}

/// Decodes the body of a list response.
///
/// # Errors
///
/// Returns `CodecError::Json` if the body is not a JSON array of tasks.
pub fn decode_task_list(bytes: &[u8]) -> Result<Vec<Task>, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[derive(Deserialize)]
struct CreatedRecord {
    #[serde(rename = "_id")]
    id: Option<TaskId>,
}

/// Extracts the store-assigned `_id` from a create response body.
///
/// The body is otherwise ignored, so anything that does not decode to an
/// object with a string `_id` yields `None`.
#[must_use]
pub fn decode_created_id(bytes: &[u8]) -> Option<TaskId> {
    serde_json::from_slice::<CreatedRecord>(bytes)
        .ok()
        .and_then(|record| record.id)
}
