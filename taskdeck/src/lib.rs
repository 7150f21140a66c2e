//! `TaskDeck`: terminal client for a remote task-management API.

pub mod api;
pub mod app;
pub mod config;
pub mod form;
pub mod sync;
pub mod tasks;
pub mod ui;
