//! Task types shared between the client and the remote task store.
//!
//! The store owns identity: a [`TaskId`] is assigned by the store when a
//! task is created and is never generated on the client. On the wire the
//! identifier field is named `_id`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier assigned to a task by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier string received from the store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task as held in the client-side cache of the store.
///
/// `id` is `None` only for a task appended after a create whose response
/// did not carry an identifier. Such a task cannot be addressed on the
/// store until the list is fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier (`_id` on the wire).
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
}

/// Errors returned by [`TaskDraft::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// Title is empty after trimming.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Description is empty after trimming.
    #[error("task description cannot be empty")]
    DescriptionEmpty,
}

/// Title and description as typed by the user.
///
/// This is both the body of create/update requests and the contents of
/// the create and edit forms. Fields are kept raw: trimming is only used
/// to decide whether the draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Draft title.
    pub title: String,
    /// Draft description.
    pub description: String,
}

impl TaskDraft {
    /// Creates a draft from raw field values.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Seeds a draft from a task's current fields.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self::new(task.title.clone(), task.description.clone())
    }

    /// Checks that neither field is blank.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::TitleEmpty`] or [`DraftError::DescriptionEmpty`]
    /// when the corresponding field trims to an empty string.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::TitleEmpty);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::DescriptionEmpty);
        }
        Ok(())
    }

    /// Whether the draft may be sent to the store.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Builds a task from the raw draft fields.
    #[must_use]
    pub fn into_task(self, id: Option<TaskId>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
        }
    }

    /// Resets both fields to empty.
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
