//! Task list controller.
//!
//! [`TaskListController`] keeps a [`ControllerState`] consistent with a
//! [`TaskStore`]. Each operation is the same three steps: prepare a command
//! from the current state, [`execute`] it against the store, and apply the
//! resulting event. The TUI runs the same steps but executes commands on a
//! background worker (see [`crate::net`]) so the UI stays responsive.

pub mod state;

pub use state::{
    CREATE_SUCCEEDED, Confirm, ControllerState, DEFAULT_NOTICE_DURATION, DELETE_PROMPT,
    LIST_FAILED, Notice, UPDATE_SUCCEEDED, WRITE_FAILED,
};

use std::time::{Duration, Instant};

use taskdeck_proto::task::{TaskDraft, TaskId};

use crate::store::{StoreCommand, TaskStore, execute};

/// Owns a store and the client-side view of it.
pub struct TaskListController<S> {
    store: S,
    state: ControllerState,
}

impl<S: TaskStore> TaskListController<S> {
    /// Creates a controller with an empty cache. Call
    /// [`initialize`](Self::initialize) to load the task list.
    pub const fn new(store: S, notice_duration: Duration) -> Self {
        Self {
            store,
            state: ControllerState::new(notice_duration),
        }
    }

    /// Current state.
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Mutable state, for form input.
    pub const fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads the task list, replacing the cache.
    pub async fn initialize(&mut self) {
        self.run(StoreCommand::List).await;
    }

    /// Fetches the task list again. Same as [`initialize`](Self::initialize).
    pub async fn refresh(&mut self) {
        self.run(StoreCommand::List).await;
    }

    /// Fills the create form and submits it.
    ///
    /// Blank input (after trimming) sends nothing.
    pub async fn submit_create(&mut self, title: &str, description: &str) {
        self.state.draft = TaskDraft::new(title, description);
        if let Some(command) = self.state.prepare_create() {
            self.run(command).await;
        }
    }

    /// Fills the edit form and submits it as an update of `id`.
    ///
    /// Blank input (after trimming) sends nothing. On success edit mode is
    /// left, whichever task it was on.
    pub async fn submit_update(&mut self, id: &TaskId, title: &str, description: &str) {
        self.state.edit_draft = TaskDraft::new(title, description);
        if let Some(command) = self.state.prepare_update_of(id) {
            self.run(command).await;
        }
    }

    /// Enters edit mode for the cached task with `id`.
    ///
    /// Returns `false` if no such task is cached.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.state.task(id).cloned() else {
            return false;
        };
        self.state.begin_edit(&task)
    }

    /// Leaves edit mode, discarding the edit form.
    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Deletes the task with `id` once `confirm` agrees.
    ///
    /// The task is removed locally after the store answers, whatever it
    /// answered.
    pub async fn delete_task(&mut self, id: &TaskId, confirm: &mut impl Confirm) {
        if let Some(command) = self.state.prepare_delete(id, confirm) {
            self.run(command).await;
        }
    }

    /// Clears notices whose display time has elapsed.
    pub fn expire_notices(&mut self, now: Instant) {
        self.state.expire_notices(now);
    }

    async fn run(&mut self, command: StoreCommand) {
        tracing::debug!(?command, "running store command");
        let event = execute(&self.store, command).await;
        self.state.apply(event);
    }
}
