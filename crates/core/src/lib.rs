//! Samaritan core data models.
//!
//! This crate defines the request payloads sent to the remote functions of
//! the Samaritan backend and the catalogue of those functions, including the
//! response shape each one is known to return.

#![warn(missing_docs)]

// Identities
mod id;

// Remote function catalogue
mod function;

// Request payloads
mod payload;

// Re-exports
pub use id::*;

pub use function::{RemoteFunction, ResponseShape, UnknownFunction};
pub use payload::{
    AvailableTasksQuery, Credentials, EmailLookup, NewTask, TaskRef, UserTasksQuery,
};
