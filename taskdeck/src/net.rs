//! Background store worker for wiring the TUI to the async store.
//!
//! This module bridges the synchronous TUI event loop (crossterm poll-based)
//! with the async [`TaskStore`]. The main thread sends [`NetCommand`]s and
//! drains [`StoreEvent`]s on each tick of the loop.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── StoreEvent ───  dispatcher ──spawn──> one task per request
//!                     ─── NetCommand →
//! ```
//!
//! Every request runs in its own tokio task, so overlapping requests resolve
//! independently and their events arrive in completion order. There is no
//! queuing, de-duplication, or cancellation of in-flight requests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::store::{StoreCommand, StoreEvent, TaskStore, execute};

/// Commands sent from the TUI main loop to the store worker.
#[derive(Debug)]
pub enum NetCommand {
    /// Send a request to the store.
    Request(StoreCommand),
    /// Stop accepting new requests. Requests already in flight still
    /// report their events.
    Shutdown,
}

/// Spawn the store worker and return its channel handles.
///
/// Must be called from within a tokio runtime.
pub fn spawn_worker<S>(
    store: Arc<S>,
    channel_capacity: usize,
) -> (mpsc::Sender<NetCommand>, mpsc::Receiver<StoreEvent>)
where
    S: TaskStore + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<NetCommand>(channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<StoreEvent>(channel_capacity);

    tokio::spawn(async move {
        dispatcher(store, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: hand each request to its own task.
async fn dispatcher<S>(
    store: Arc<S>,
    mut cmd_rx: mpsc::Receiver<NetCommand>,
    evt_tx: mpsc::Sender<StoreEvent>,
) where
    S: TaskStore + 'static,
{
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            NetCommand::Request(command) => {
                tracing::debug!(?command, "dispatching store request");
                let store = Arc::clone(&store);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let event = execute(store.as_ref(), command).await;
                    if evt_tx.send(event).await.is_err() {
                        // TUI dropped; nothing left to update.
                        tracing::debug!("store event dropped, receiver closed");
                    }
                });
            }
            NetCommand::Shutdown => {
                tracing::info!("store worker shutting down");
                break;
            }
        }
    }
}
