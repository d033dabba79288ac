//! Shared task types and JSON codec for the `Taskdeck` store contract.

pub mod codec;
pub mod task;
