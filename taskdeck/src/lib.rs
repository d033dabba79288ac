//! `Taskdeck` — terminal client for a REST task store.

pub mod app;
pub mod config;
pub mod controller;
pub mod net;
pub mod store;
pub mod ui;
