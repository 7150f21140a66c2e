//! Client-side task state for `TaskDeck`.
//!
//! Holds the task collection, the active filter and the error banner in a
//! single [`TaskBoard`], and defines the transitions that keep it in step
//! with the server: full replacement on listing, append on create,
//! replace-by-id on status change and remove-by-id on delete.

pub mod board;

pub use board::{FetchTicket, TaskBoard};
