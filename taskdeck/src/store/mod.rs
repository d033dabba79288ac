//! Task store abstraction for `Taskdeck`.
//!
//! Defines the [`TaskStore`] trait that every store backend must satisfy.
//! Concrete implementations:
//! - [`http::HttpTaskStore`]: the remote REST store (`/todos`)
//! - [`memory::InMemoryTaskStore`]: in-process store for tests and offline mode
//!
//! The store is the source of truth. Callers send a [`StoreCommand`] through
//! [`execute`] and receive a [`StoreEvent`] describing how it resolved; the
//! controller patches its local cache from that event.

pub mod http;
pub mod memory;

use taskdeck_proto::codec::CodecError;
use taskdeck_proto::task::{Task, TaskDraft, TaskId};

/// Errors that can occur while talking to a task store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The configured base URL cannot address the store.
    #[error("invalid store url {url}: {reason}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The store answered with a non-success HTTP status.
    #[error("store rejected request with status {0}")]
    Rejected(u16),

    /// The request never produced a response (connection, TLS, body read).
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected store response: {0}")]
    Decode(#[from] CodecError),

    /// The store could not be reached.
    #[error("store is unreachable")]
    Unreachable,
}

/// Async task store trait.
///
/// Every method is a single request with no retry. Success is decided by
/// the store alone (HTTP status for the remote store).
pub trait TaskStore: Send + Sync {
    /// Fetch every task, in the store's order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Create a task from a draft.
    ///
    /// Returns the store-assigned id when the response carries one.
    fn create(
        &self,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<Option<TaskId>, StoreError>> + Send;

    /// Overwrite the title and description of the task with `id`.
    fn update(
        &self,
        id: &TaskId,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete the task with `id`.
    fn delete(&self, id: &TaskId)
    -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Short human-readable label for the status bar.
    fn describe(&self) -> String;
}

/// A request to the store, produced by a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Fetch the full task list.
    List,
    /// Create a task.
    Create(TaskDraft),
    /// Update the task with `id`.
    Update {
        /// Target task.
        id: TaskId,
        /// New title and description.
        draft: TaskDraft,
    },
    /// Delete a task.
    Delete(TaskId),
}

/// The resolution of a [`StoreCommand`].
///
/// Each variant carries the request inputs alongside the result, because
/// the local cache is patched from what was sent, not from the response.
#[derive(Debug)]
pub enum StoreEvent {
    /// A list request resolved.
    Listed(Result<Vec<Task>, StoreError>),
    /// A create request resolved.
    Created {
        /// The draft that was sent.
        draft: TaskDraft,
        /// Store-assigned id, if the response carried one.
        result: Result<Option<TaskId>, StoreError>,
    },
    /// An update request resolved.
    Updated {
        /// Target task.
        id: TaskId,
        /// The draft that was sent.
        draft: TaskDraft,
        /// Outcome.
        result: Result<(), StoreError>,
    },
    /// A delete request resolved.
    Deleted {
        /// Target task.
        id: TaskId,
        /// Outcome (ignored by the controller).
        result: Result<(), StoreError>,
    },
}

/// Run one command against a store and report how it resolved.
pub async fn execute<S: TaskStore>(store: &S, command: StoreCommand) -> StoreEvent {
    match command {
        StoreCommand::List => StoreEvent::Listed(store.list().await),
        StoreCommand::Create(draft) => {
            let result = store.create(&draft).await;
            StoreEvent::Created { draft, result }
        }
        StoreCommand::Update { id, draft } => {
            let result = store.update(&id, &draft).await;
            StoreEvent::Updated { id, draft, result }
        }
        StoreCommand::Delete(id) => {
            let result = store.delete(&id).await;
            StoreEvent::Deleted { id, result }
        }
    }
}
