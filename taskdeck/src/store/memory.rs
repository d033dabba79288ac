//! In-process task store.
//!
//! Holds tasks in a [`parking_lot::Mutex`] and assigns ids `task-1`,
//! `task-2`, ... the way a real store would. Every request is recorded so
//! tests can assert which requests a flow issued, and failures can be
//! injected to exercise the controller's error paths. Also backs the
//! `--offline` demo mode, so the request log keeps only the most recent
//! [`REQUEST_LOG_LIMIT`] entries.

use std::collections::VecDeque;

use parking_lot::Mutex;

use taskdeck_proto::task::{Task, TaskDraft, TaskId};

use super::{StoreError, TaskStore};

/// Number of requests kept by [`InMemoryTaskStore::requests`].
pub const REQUEST_LOG_LIMIT: usize = 1024;

/// A failure to inject into every subsequent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Answer with a non-success status.
    Reject(u16),
    /// Behave as if the store could not be reached.
    Unreachable,
}

/// A request received by the store, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `list`
    List,
    /// `create`
    Create(TaskDraft),
    /// `update`
    Update(TaskId, TaskDraft),
    /// `delete`
    Delete(TaskId),
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
    failure: Option<Failure>,
    requests: VecDeque<Request>,
}

impl Inner {
    /// Records the request and returns the injected failure, if any.
    fn begin(&mut self, request: Request) -> Result<(), StoreError> {
        if self.requests.len() == REQUEST_LOG_LIMIT {
            self.requests.pop_front();
        }
        self.requests.push_back(request);
        match self.failure {
            None => Ok(()),
            Some(Failure::Reject(status)) => Err(StoreError::Rejected(status)),
            Some(Failure::Unreachable) => Err(StoreError::Unreachable),
        }
    }

    fn assign_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(format!("task-{}", self.next_id))
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id.as_ref() == Some(id))
    }
}

/// In-memory [`TaskStore`].
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    inner: Mutex<Inner>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given drafts, in order.
    ///
    /// Seeding is not recorded as requests.
    #[must_use]
    pub fn with_tasks(drafts: impl IntoIterator<Item = TaskDraft>) -> Self {
        let mut inner = Inner::default();
        for draft in drafts {
            let id = inner.assign_id();
            inner.tasks.push(draft.into_task(Some(id)));
        }
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Makes every subsequent request fail (or succeed again with `None`).
    pub fn fail_with(&self, failure: Option<Failure>) {
        self.inner.lock().failure = failure;
    }

    /// Returns the requests received so far, oldest first, up to
    /// [`REQUEST_LOG_LIMIT`].
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.inner.lock().requests.iter().cloned().collect()
    }

    /// Returns the store's current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }
}

impl TaskStore for InMemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut inner = self.inner.lock();
        inner.begin(Request::List)?;
        Ok(inner.tasks.clone())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Option<TaskId>, StoreError> {
        let mut inner = self.inner.lock();
        inner.begin(Request::Create(draft.clone()))?;
        let id = inner.assign_id();
        inner.tasks.push(draft.clone().into_task(Some(id.clone())));
        Ok(Some(id))
    }

    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.begin(Request::Update(id.clone(), draft.clone()))?;
        let index = inner.position(id).ok_or(StoreError::Rejected(404))?;
        let task = &mut inner.tasks[index];
        task.title.clone_from(&draft.title);
        task.description.clone_from(&draft.description);
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.begin(Request::Delete(id.clone()))?;
        let index = inner.position(id).ok_or(StoreError::Rejected(404))?;
        inner.tasks.remove(index);
        Ok(())
    }

    fn describe(&self) -> String {
        "offline (in-memory)".to_string()
    }
}
