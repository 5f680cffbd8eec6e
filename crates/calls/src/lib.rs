//! Remote call wrappers.
//!
//! Each operation serializes its parameters, invokes one remote function and
//! unwraps the response according to the shape that function is known to
//! return. The login checks additionally gate a profile lookup on the check's
//! status code and persist the profile as a local snapshot.

#![warn(missing_docs)]

pub mod error;
pub mod remote;
pub mod snapshot;
pub mod login;
pub mod org;
pub mod user;

pub use error::{CallError, FaultKind, Result};
pub use remote::{unwrap_response, RemoteCaller};
pub use snapshot::{SnapshotKind, SnapshotStore};
pub use login::LoginOutcome;
pub use org::{OrgCalls, TaskCalls};
pub use user::UserCalls;
