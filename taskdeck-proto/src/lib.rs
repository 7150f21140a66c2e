//! Shared wire definitions for the `TaskDeck` task API.

pub mod codec;
pub mod task;
