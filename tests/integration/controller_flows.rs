//! Integration tests for the task list controller against an in-process store.
//!
//! These tests validate the user-visible flows end to end:
//! - Initial load mirrors the store, in order, and is idempotent
//! - Create appends, clears the form, and posts the success notice
//! - Blank input never reaches the store
//! - Edit, cancel, and update keep the cache consistent with the store
//! - Delete honours the confirmation and removes locally even on failure
//! - Failures surface as error notices that expire on schedule

use std::time::{Duration, Instant};

use taskdeck::controller::{
    CREATE_SUCCEEDED, LIST_FAILED, TaskListController, UPDATE_SUCCEEDED, WRITE_FAILED,
};
use taskdeck::store::memory::{Failure, InMemoryTaskStore, Request};
use taskdeck_proto::task::{Task, TaskDraft, TaskId};

const NOTICE: Duration = Duration::from_secs(3);

fn seeded(titles: &[&str]) -> TaskListController<InMemoryTaskStore> {
    let store =
        InMemoryTaskStore::with_tasks(titles.iter().map(|t| TaskDraft::new(*t, format!("{t} desc"))));
    TaskListController::new(store, NOTICE)
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

// =============================================================================
// Load
// =============================================================================

#[tokio::test]
async fn initialize_mirrors_store_in_order() {
    let mut controller = seeded(&["A", "B", "C"]);
    controller.initialize().await;

    assert_eq!(titles(&controller.state().tasks), ["A", "B", "C"]);
    assert_eq!(controller.state().tasks, controller.store().snapshot());
    assert!(controller.state().error().is_none());
}

#[tokio::test]
async fn loading_twice_gives_the_same_list() {
    let mut controller = seeded(&["A", "B"]);
    controller.initialize().await;
    let first = controller.state().tasks.clone();

    controller.refresh().await;

    assert_eq!(controller.state().tasks, first);
    assert_eq!(controller.store().requests(), [Request::List, Request::List]);
}

#[tokio::test]
async fn failed_load_keeps_cache_and_reports() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;

    controller.store().fail_with(Some(Failure::Unreachable));
    controller.refresh().await;

    assert_eq!(titles(&controller.state().tasks), ["A"]);
    assert_eq!(controller.state().error(), Some(LIST_FAILED));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_appends_and_resets_form() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;

    controller.submit_create("Buy milk", "2 liters").await;

    let state = controller.state();
    assert_eq!(titles(&state.tasks), ["A", "Buy milk"]);
    let created = &state.tasks[1];
    assert_eq!(created.description, "2 liters");
    assert_eq!(created.id, Some(TaskId::new("task-2")));
    assert_eq!(state.draft, TaskDraft::default());
    assert_eq!(state.message(), Some(CREATE_SUCCEEDED));
    assert_eq!(state.tasks, controller.store().snapshot());
}

#[tokio::test]
async fn blank_create_sends_nothing() {
    let mut controller = seeded(&[]);
    controller.initialize().await;

    controller.submit_create("   ", "desc").await;
    controller.submit_create("title", "\t\n").await;

    assert_eq!(controller.store().requests(), [Request::List]);
    assert!(controller.state().tasks.is_empty());
    assert!(controller.state().message().is_none());
    assert!(controller.state().error().is_none());
}

#[tokio::test]
async fn rejected_create_keeps_form_and_reports() {
    let mut controller = seeded(&[]);
    controller.initialize().await;
    controller.store().fail_with(Some(Failure::Reject(500)));

    controller.submit_create("Keep me", "please").await;

    let state = controller.state();
    assert!(state.tasks.is_empty());
    assert_eq!(state.draft, TaskDraft::new("Keep me", "please"));
    assert_eq!(state.error(), Some(WRITE_FAILED));
    assert!(state.message().is_none());
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let mut controller = seeded(&[]);
    controller.initialize().await;
    controller.store().fail_with(Some(Failure::Reject(503)));
    controller.submit_create("T", "D").await;
    assert_eq!(controller.state().error(), Some(WRITE_FAILED));

    controller.store().fail_with(None);
    controller.submit_create("T", "D").await;

    assert!(controller.state().error().is_none());
    assert_eq!(controller.state().message(), Some(CREATE_SUCCEEDED));
    assert_eq!(titles(&controller.state().tasks), ["T"]);
}

// =============================================================================
// Edit and update
// =============================================================================

#[tokio::test]
async fn update_rewrites_only_the_edited_task() {
    let mut controller = seeded(&["A", "B", "C"]);
    controller.initialize().await;
    let id = TaskId::new("task-2");

    assert!(controller.begin_edit(&id));
    assert_eq!(controller.state().edit_draft, TaskDraft::new("B", "B desc"));

    controller.submit_update(&id, "B2", "new").await;

    let state = controller.state();
    assert_eq!(titles(&state.tasks), ["A", "B2", "C"]);
    assert_eq!(state.tasks[1].description, "new");
    assert_eq!(state.tasks[1].id, Some(id));
    assert!(!state.is_editing());
    assert_eq!(state.message(), Some(UPDATE_SUCCEEDED));
    assert_eq!(state.tasks, controller.store().snapshot());
}

#[tokio::test]
async fn cancel_edit_sends_nothing() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;

    assert!(controller.begin_edit(&TaskId::new("task-1")));
    controller.state_mut().edit_draft.title.push_str(" changed");
    controller.cancel_edit();

    assert!(!controller.state().is_editing());
    assert_eq!(controller.store().requests(), [Request::List]);
    assert_eq!(titles(&controller.state().tasks), ["A"]);
}

#[tokio::test]
async fn update_outside_edit_mode_targets_given_id() {
    let mut controller = seeded(&["A", "B"]);
    controller.initialize().await;

    controller
        .submit_update(&TaskId::new("task-1"), "A2", "direct")
        .await;

    assert_eq!(titles(&controller.state().tasks), ["A2", "B"]);
    assert_eq!(controller.state().message(), Some(UPDATE_SUCCEEDED));
}

#[tokio::test]
async fn begin_edit_of_unknown_task_is_refused() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;

    assert!(!controller.begin_edit(&TaskId::new("nope")));
    assert!(!controller.state().is_editing());
}

#[tokio::test]
async fn rejected_update_stays_in_edit_mode() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;
    let id = TaskId::new("task-1");
    assert!(controller.begin_edit(&id));
    controller.store().fail_with(Some(Failure::Reject(400)));

    controller.submit_update(&id, "A2", "x").await;

    let state = controller.state();
    assert_eq!(titles(&state.tasks), ["A"]);
    assert!(state.is_editing());
    assert_eq!(state.error(), Some(WRITE_FAILED));
}

#[tokio::test]
async fn blank_update_sends_nothing() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;
    let id = TaskId::new("task-1");
    assert!(controller.begin_edit(&id));

    controller.submit_update(&id, "", "x").await;

    assert_eq!(controller.store().requests(), [Request::List]);
    assert!(controller.state().is_editing());
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn confirmed_delete_removes_task() {
    let mut controller = seeded(&["A", "B"]);
    controller.initialize().await;
    let id = TaskId::new("task-1");

    let mut prompts = Vec::new();
    controller
        .delete_task(&id, &mut |prompt: &str| {
            prompts.push(prompt.to_string());
            true
        })
        .await;

    assert_eq!(prompts, ["Are you sure you want to delete this task?"]);
    assert_eq!(titles(&controller.state().tasks), ["B"]);
    assert_eq!(
        controller.store().requests(),
        [Request::List, Request::Delete(id)]
    );
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let mut controller = seeded(&["A"]);
    controller.initialize().await;

    controller
        .delete_task(&TaskId::new("task-1"), &mut |_: &str| false)
        .await;

    assert_eq!(titles(&controller.state().tasks), ["A"]);
    assert_eq!(controller.store().requests(), [Request::List]);
}

#[tokio::test]
async fn failed_delete_still_removes_locally() {
    let mut controller = seeded(&["A", "B"]);
    controller.initialize().await;
    controller.store().fail_with(Some(Failure::Reject(500)));

    controller
        .delete_task(&TaskId::new("task-2"), &mut |_: &str| true)
        .await;

    assert_eq!(titles(&controller.state().tasks), ["A"]);
    assert!(controller.state().error().is_none());
    assert_eq!(controller.store().snapshot().len(), 2);
}

// =============================================================================
// Notices
// =============================================================================

#[tokio::test]
async fn notices_expire_after_their_duration() {
    let mut controller = seeded(&[]);
    controller.initialize().await;
    let before = Instant::now();

    controller.submit_create("T", "D").await;
    assert_eq!(controller.state().message(), Some(CREATE_SUCCEEDED));

    controller.expire_notices(before);
    assert!(controller.state().message().is_some());

    controller.expire_notices(Instant::now() + NOTICE);
    assert!(controller.state().message().is_none());
}
