//! Invocation client abstraction and implementations for Samaritan.
//!
//! This crate provides a trait-based interface for invoking named remote
//! functions, an HTTP implementation speaking the Lambda invoke API, and a
//! scripted in-memory implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod lambda;
pub mod scripted;

pub use trait_::{Invoker, InvokeError, InvocationResponse, Result};
pub use lambda::{InvokerConfig, LambdaHttpInvoker};
pub use scripted::{RecordedCall, ScriptedInvoker};
