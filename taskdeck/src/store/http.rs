//! REST task store client.
//!
//! Talks JSON to a store exposing `/todos` (list, create) and
//! `/todos/{id}` (update, delete) under a configured base URL. Success is
//! decided purely by HTTP status. No retries, no timeout beyond the
//! transport default.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use url::Url;

use taskdeck_proto::codec;
use taskdeck_proto::task::{Task, TaskDraft, TaskId};

use super::{StoreError, TaskStore};

/// Path segment of the task collection.
const COLLECTION: &str = "todos";

/// [`TaskStore`] backed by a remote REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base: Url,
}

impl HttpTaskStore {
    /// Creates a client for the store at `base_url`.
    ///
    /// The base may carry a path prefix (`http://host/api`), in which case
    /// the collection lives at `http://host/api/todos`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBaseUrl`] if `base_url` does not parse
    /// or is not an `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Like [`new`](Self::new), reusing an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        Ok(Self { client, base })
    }

    /// Builds `{base}/todos` or `{base}/todos/{id}`.
    ///
    /// The id is pushed as a single percent-encoded segment.
    fn endpoint(&self, id: Option<&TaskId>) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }
}

/// Maps a non-2xx response to [`StoreError::Rejected`].
fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Rejected(status.as_u16()))
    }
}

impl TaskStore for HttpTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let url = self.endpoint(None);
        tracing::debug!(%url, "GET task list");

        let response = check_status(self.client.get(url).send().await?)?;
        let body = response.bytes().await?;
        let tasks = codec::decode_task_list(&body)?;

        tracing::debug!(count = tasks.len(), "task list received");
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Option<TaskId>, StoreError> {
        let url = self.endpoint(None);
        tracing::debug!(%url, "POST task");

        let body = codec::encode_draft(draft)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response = check_status(response)?;

        // The body is only consulted for the assigned id; an unreadable
        // body does not turn a successful create into a failure.
        let id = match response.bytes().await {
            Ok(bytes) => codec::decode_created_id(&bytes),
            Err(e) => {
                tracing::debug!(error = %e, "create response body unreadable");
                None
            }
        };
        Ok(id)
    }

    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), StoreError> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, "PUT task");

        let body = codec::encode_draft(draft)?;
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, "DELETE task");

        check_status(self.client.delete(url).send().await?)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base.as_str().trim_end_matches('/').to_string()
    }
}
