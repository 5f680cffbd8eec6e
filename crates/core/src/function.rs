//! Catalogue of the remote functions the client talks to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a remote function packages its response.
///
/// The backend is not consistent about this, so the shape is a fixed property
/// of each function rather than something detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// The payload is the result document itself.
    Direct,
    /// The payload is an object whose `body` field holds the result as
    /// JSON-encoded text.
    Enveloped,
    /// Only the invocation status code matters; the payload is ignored.
    Status,
}

/// A named remote function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteFunction {
    /// Verify a user's email and password
    CheckLogin,
    /// Fetch a user record by email
    GetUser,
    /// Verify an organization's email and password
    CheckOrgLogin,
    /// Fetch an organization record by email
    GetOrg,
    /// Create a task owned by an organization
    CreateTask,
    /// Remove a task
    RemoveTask,
    /// Mark a task as completed
    CompleteTask,
    /// List tasks open to a user
    GetAvailableTasks,
    /// List a user's tasks near a location
    GetUserTasks,
    /// Register a new user
    SignUp,
}

impl RemoteFunction {
    /// Every known remote function.
    pub const ALL: [RemoteFunction; 10] = [
        RemoteFunction::CheckLogin,
        RemoteFunction::GetUser,
        RemoteFunction::CheckOrgLogin,
        RemoteFunction::GetOrg,
        RemoteFunction::CreateTask,
        RemoteFunction::RemoveTask,
        RemoteFunction::CompleteTask,
        RemoteFunction::GetAvailableTasks,
        RemoteFunction::GetUserTasks,
        RemoteFunction::SignUp,
    ];

    /// Deployed function name.
    pub fn name(&self) -> &'static str {
        match self {
            RemoteFunction::CheckLogin => "checkLogin",
            RemoteFunction::GetUser => "getUser",
            RemoteFunction::CheckOrgLogin => "checkOrgLogin",
            RemoteFunction::GetOrg => "getOrg",
            RemoteFunction::CreateTask => "createTask",
            RemoteFunction::RemoveTask => "removeTask",
            RemoteFunction::CompleteTask => "completeTask",
            RemoteFunction::GetAvailableTasks => "getAvailableTasks",
            RemoteFunction::GetUserTasks => "getUserTasks",
            RemoteFunction::SignUp => "signUp",
        }
    }

    /// Response shape this function returns.
    pub fn shape(&self) -> ResponseShape {
        match self {
            RemoteFunction::CheckLogin | RemoteFunction::CheckOrgLogin => ResponseShape::Status,
            RemoteFunction::GetUser | RemoteFunction::GetOrg => ResponseShape::Enveloped,
            RemoteFunction::CreateTask
            | RemoteFunction::RemoveTask
            | RemoteFunction::CompleteTask
            | RemoteFunction::GetAvailableTasks
            | RemoteFunction::GetUserTasks
            | RemoteFunction::SignUp => ResponseShape::Direct,
        }
    }
}

impl fmt::Display for RemoteFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a function name is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown remote function: {0}")]
pub struct UnknownFunction(pub String);

impl std::str::FromStr for RemoteFunction {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemoteFunction::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}
