//! Task management facade.
//!
//! Wraps the organization task calls so that every operation yields a
//! [`TaskOutcome`] record instead of an error.

#![warn(missing_docs)]

pub mod outcome;
pub mod manager;

pub use outcome::TaskOutcome;
pub use manager::{BasicTaskManager, TaskManager};
