//! Controller state and the transitions applied to it.
//!
//! Every operation is a plain method on [`ControllerState`]: the `prepare_*`
//! methods validate input and produce the [`StoreCommand`] to send (or
//! nothing), and [`ControllerState::apply`] patches the local cache once a
//! command has resolved. No method performs I/O.

use std::time::{Duration, Instant};

use taskdeck_proto::task::{Task, TaskDraft, TaskId};

use crate::store::{StoreCommand, StoreEvent};

/// Shown after a successful create.
pub const CREATE_SUCCEEDED: &str = "ToDo item added successfully...";

/// Shown after a successful update.
pub const UPDATE_SUCCEEDED: &str = "ToDo item updated successfully...";

/// Shown after a failed create or update.
pub const WRITE_FAILED: &str = "Unable to create ToDo item...";

/// Shown after a failed list fetch.
pub const LIST_FAILED: &str = "Unable to load ToDo items...";

/// Question put to the user before a delete is sent.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Yes/no confirmation collaborator consulted before destructive actions.
pub trait Confirm {
    /// Ask `prompt`; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A transient notice with its own expiry deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    text: String,
    expires_at: Instant,
}

impl Notice {
    fn new(text: &str, now: Instant, ttl: Duration) -> Self {
        Self {
            text: text.to_string(),
            expires_at: now + ttl,
        }
    }

    /// Notice text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Client-side view of the task store plus form and edit state.
///
/// `tasks` is a cache: it is replaced by list results and patched only
/// from resolved store commands, never from local input alone.
#[derive(Debug, Clone)]
pub struct ControllerState {
    /// Tasks in store order, followed by tasks created this session.
    pub tasks: Vec<Task>,
    /// Create form contents.
    pub draft: TaskDraft,
    /// Task currently in edit mode, if any.
    pub editing_id: Option<TaskId>,
    /// Edit form contents.
    pub edit_draft: TaskDraft,
    message: Option<Notice>,
    error: Option<Notice>,
    notice_duration: Duration,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl ControllerState {
    /// Creates an empty state whose notices last `notice_duration`.
    #[must_use]
    pub const fn new(notice_duration: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            draft: TaskDraft {
                title: String::new(),
                description: String::new(),
            },
            editing_id: None,
            edit_draft: TaskDraft {
                title: String::new(),
                description: String::new(),
            },
            message: None,
            error: None,
            notice_duration,
        }
    }

    /// Current success notice text.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(Notice::text)
    }

    /// Current failure notice text.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(Notice::text)
    }

    /// Whether some task is in edit mode.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.as_ref() == Some(id))
    }

    /// Validates the create form and returns the command to send.
    ///
    /// Any previous error notice is cleared first, even when the draft
    /// turns out to be blank.
    pub fn prepare_create(&mut self) -> Option<StoreCommand> {
        self.error = None;
        if !self.draft.is_submittable() {
            return None;
        }
        Some(StoreCommand::Create(self.draft.clone()))
    }

    /// Validates the edit form and returns the update for the task in edit
    /// mode.
    ///
    /// Any previous error notice is cleared first.
    pub fn prepare_update(&mut self) -> Option<StoreCommand> {
        let Some(id) = self.editing_id.clone() else {
            self.error = None;
            return None;
        };
        self.prepare_update_of(&id)
    }

    /// Validates the edit form and returns the update for `id`.
    ///
    /// Any previous error notice is cleared first.
    pub fn prepare_update_of(&mut self, id: &TaskId) -> Option<StoreCommand> {
        self.error = None;
        if !self.edit_draft.is_submittable() {
            return None;
        }
        Some(StoreCommand::Update {
            id: id.clone(),
            draft: self.edit_draft.clone(),
        })
    }

    /// Enters edit mode for `task` and seeds the edit form from it.
    ///
    /// Returns `false` and changes nothing if the task has no id.
    pub fn begin_edit(&mut self, task: &Task) -> bool {
        let Some(id) = task.id.clone() else {
            return false;
        };
        self.editing_id = Some(id);
        self.edit_draft = TaskDraft::from_task(task);
        true
    }

    /// Leaves edit mode without sending anything.
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Asks `confirm` and, if accepted, returns the delete command.
    pub fn prepare_delete(
        &self,
        id: &TaskId,
        confirm: &mut impl Confirm,
    ) -> Option<StoreCommand> {
        confirm
            .confirm(DELETE_PROMPT)
            .then(|| StoreCommand::Delete(id.clone()))
    }

    /// Applies a resolved store command, stamping notices with the current
    /// time.
    pub fn apply(&mut self, event: StoreEvent) {
        self.apply_at(event, Instant::now());
    }

    /// Applies a resolved store command as of `now`.
    ///
    /// A successful update clears only the edit form; the create form is
    /// left as the user typed it. A list result or delete that drops the
    /// task in edit mode also ends edit mode.
    pub fn apply_at(&mut self, event: StoreEvent, now: Instant) {
        match event {
            StoreEvent::Listed(Ok(tasks)) => {
                tracing::info!(count = tasks.len(), "task list loaded");
                self.tasks = tasks;
                self.drop_stale_edit();
            }
            StoreEvent::Listed(Err(e)) => {
                tracing::warn!(error = %e, "task list fetch failed");
                self.set_error(LIST_FAILED, now);
            }
            StoreEvent::Created {
                draft,
                result: Ok(id),
            } => {
                tracing::info!(id = ?id, "task created");
                self.tasks.push(draft.into_task(id));
                self.draft.clear();
                self.set_message(CREATE_SUCCEEDED, now);
            }
            StoreEvent::Created { result: Err(e), .. } => {
                tracing::warn!(error = %e, "task create failed");
                self.set_error(WRITE_FAILED, now);
            }
            StoreEvent::Updated {
                id,
                draft,
                result: Ok(()),
            } => {
                tracing::info!(%id, "task updated");
                for task in self.tasks.iter_mut().filter(|t| t.id.as_ref() == Some(&id)) {
                    task.title.clone_from(&draft.title);
                    task.description.clone_from(&draft.description);
                }
                self.set_message(UPDATE_SUCCEEDED, now);
                self.editing_id = None;
                self.edit_draft.clear();
            }
            StoreEvent::Updated {
                id, result: Err(e), ..
            } => {
                tracing::warn!(%id, error = %e, "task update failed");
                self.set_error(WRITE_FAILED, now);
            }
            StoreEvent::Deleted { id, result } => {
                if let Err(e) = result {
                    tracing::warn!(%id, error = %e, "task delete failed, removing locally");
                } else {
                    tracing::info!(%id, "task deleted");
                }
                self.tasks.retain(|t| t.id.as_ref() != Some(&id));
                self.drop_stale_edit();
            }
        }
    }

    /// Clears every notice whose deadline is at or before `now`.
    pub fn expire_notices(&mut self, now: Instant) {
        if self.message.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.message = None;
        }
        if self.error.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.error = None;
        }
    }

    /// Leaves edit mode if the edited task is no longer cached.
    fn drop_stale_edit(&mut self) {
        let stale = self
            .editing_id
            .as_ref()
            .is_some_and(|id| self.task(id).is_none());
        if stale {
            tracing::debug!(id = ?self.editing_id, "edited task gone, leaving edit mode");
            self.editing_id = None;
            self.edit_draft.clear();
        }
    }

    fn set_message(&mut self, text: &str, now: Instant) {
        self.message = Some(Notice::new(text, now, self.notice_duration));
    }

    fn set_error(&mut self, text: &str, now: Instant) {
        self.error = Some(Notice::new(text, now, self.notice_duration));
    }
}
