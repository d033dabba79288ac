//! Integration tests for wiring the TUI app to a store through the worker.
//!
//! Drives [`App`] with key events the way the main loop does, hands the
//! resulting commands to `net::spawn_worker`, and applies the events that
//! come back. These tests validate:
//! - The initial list request populates the app
//! - Typing into the form and pressing Enter creates a task
//! - Overlapping submits are not de-duplicated
//! - A slow request does not hold back a later one
//! - A delete the store rejects still removes the row
//! - Shutdown still delivers events for requests already in flight

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::{Notify, mpsc};

use taskdeck::app::{App, Focus};
use taskdeck::controller::{CREATE_SUCCEEDED, ControllerState};
use taskdeck::net::{self, NetCommand};
use taskdeck::store::memory::{Failure, InMemoryTaskStore, Request};
use taskdeck::store::{StoreCommand, StoreError, StoreEvent, TaskStore};
use taskdeck_proto::task::{Task, TaskDraft, TaskId};

/// Store whose list requests wait until `release` is notified.
#[derive(Default)]
struct GatedStore {
    inner: InMemoryTaskStore,
    release: Notify,
}

impl TaskStore for GatedStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.release.notified().await;
        self.inner.list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Option<TaskId>, StoreError> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), StoreError> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

type Worker = (mpsc::Sender<NetCommand>, mpsc::Receiver<StoreEvent>);

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        assert!(app.handle_key_event(key(KeyCode::Char(c))).is_none());
    }
}

async fn send(tx: &mpsc::Sender<NetCommand>, command: StoreCommand) {
    tx.send(NetCommand::Request(command))
        .await
        .expect("worker stopped");
}

async fn recv(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for store event")
        .expect("event channel closed unexpectedly")
}

/// Start a worker over `store` and load the initial list into a new app.
async fn loaded_app(store: &Arc<InMemoryTaskStore>) -> (App, Worker) {
    let (tx, mut rx) = net::spawn_worker(Arc::clone(store), 16);
    let mut app = App::new(ControllerState::default(), "test");

    send(&tx, StoreCommand::List).await;
    app.apply_event(recv(&mut rx).await);

    (app, (tx, rx))
}

#[tokio::test]
async fn initial_list_populates_app() {
    let store = Arc::new(InMemoryTaskStore::with_tasks([
        TaskDraft::new("A", "a"),
        TaskDraft::new("B", "b"),
    ]));

    let (app, _worker) = loaded_app(&store).await;

    assert_eq!(app.state.tasks, store.snapshot());
    assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("A"));
}

#[tokio::test]
async fn typed_form_creates_task() {
    let store = Arc::new(InMemoryTaskStore::new());
    let (mut app, (tx, mut rx)) = loaded_app(&store).await;

    type_str(&mut app, "Buy milk");
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Description);
    type_str(&mut app, "2 liters");

    let command = app
        .handle_key_event(key(KeyCode::Enter))
        .expect("Enter should submit");
    send(&tx, command).await;
    app.apply_event(recv(&mut rx).await);

    assert_eq!(app.state.tasks.len(), 1);
    assert_eq!(app.state.tasks[0].title, "Buy milk");
    assert_eq!(app.state.draft, TaskDraft::default());
    assert_eq!(app.state.message(), Some(CREATE_SUCCEEDED));
}

#[tokio::test]
async fn overlapping_submits_both_append() {
    let store = Arc::new(InMemoryTaskStore::new());
    let (mut app, (tx, mut rx)) = loaded_app(&store).await;

    type_str(&mut app, "Twice");
    app.handle_key_event(key(KeyCode::Tab));
    type_str(&mut app, "d");

    let first = app.handle_key_event(key(KeyCode::Enter)).expect("submit");
    let second = app.handle_key_event(key(KeyCode::Enter)).expect("submit");
    send(&tx, first).await;
    send(&tx, second).await;
    app.apply_event(recv(&mut rx).await);
    app.apply_event(recv(&mut rx).await);

    let titles: Vec<_> = app.state.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Twice", "Twice"]);
    assert_ne!(app.state.tasks[0].id, app.state.tasks[1].id);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn slow_request_does_not_block_later_one() {
    let store = Arc::new(GatedStore::default());
    let (tx, mut rx) = net::spawn_worker(Arc::clone(&store), 16);

    send(&tx, StoreCommand::List).await;
    send(&tx, StoreCommand::Create(TaskDraft::new("T", "D"))).await;

    // The list is still waiting; the create must resolve without it.
    match recv(&mut rx).await {
        StoreEvent::Created { result, .. } => assert!(result.is_ok()),
        other => panic!("expected Created before Listed, got: {other:?}"),
    }

    store.release.notify_one();
    match recv(&mut rx).await {
        StoreEvent::Listed(result) => assert_eq!(result.map(|t| t.len()).ok(), Some(1)),
        other => panic!("expected Listed, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_delete_still_removes_row() {
    let store = Arc::new(InMemoryTaskStore::with_tasks([
        TaskDraft::new("A", "a"),
        TaskDraft::new("B", "b"),
    ]));
    let (mut app, (tx, mut rx)) = loaded_app(&store).await;
    store.fail_with(Some(Failure::Reject(500)));

    app.focus = Focus::Tasks;
    app.handle_key_event(key(KeyCode::Char('j')));
    assert!(app.handle_key_event(key(KeyCode::Char('d'))).is_none());
    let command = app
        .handle_key_event(key(KeyCode::Char('y')))
        .expect("confirmed delete");
    send(&tx, command).await;
    app.apply_event(recv(&mut rx).await);

    let titles: Vec<_> = app.state.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["A"]);
    assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("A"));
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn refresh_key_reloads_list() {
    let store = Arc::new(InMemoryTaskStore::new());
    let (mut app, (tx, mut rx)) = loaded_app(&store).await;

    app.focus = Focus::Tasks;
    let command = app
        .handle_key_event(key(KeyCode::Char('r')))
        .expect("refresh");
    send(&tx, command).await;
    app.apply_event(recv(&mut rx).await);

    assert_eq!(store.requests(), [Request::List, Request::List]);
}

#[tokio::test]
async fn shutdown_delivers_in_flight_events() {
    let store = Arc::new(InMemoryTaskStore::new());
    let (tx, mut rx) = net::spawn_worker(Arc::clone(&store), 16);

    send(&tx, StoreCommand::Create(TaskDraft::new("T", "D"))).await;
    tx.send(NetCommand::Shutdown).await.expect("worker stopped");

    match recv(&mut rx).await {
        StoreEvent::Created { result, .. } => assert!(result.is_ok()),
        other => panic!("expected Created, got: {other:?}"),
    }

    let closed = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for channel close");
    assert!(closed.is_none());
}
