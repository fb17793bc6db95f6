//! Poll Scheduler: drives the fetch, detect, notify cycle forever.
//!
//! This module provides:
//! - The watcher loop ([`Watcher`])
//! - The per-cycle result types ([`CycleReport`], [`CycleError`])

mod error;
mod watcher;

pub use error::CycleError;
pub use watcher::{CycleReport, Watcher};
