//! Request payloads, one struct per remote function argument set.
//!
//! Field names on the wire follow the backend's naming, which mixes
//! `camelCase`, `ID` suffixes and `snake_case`.

use crate::id::{OrgId, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Email and password, sent to `checkLogin`, `checkOrgLogin` and `signUp`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,

    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The lookup payload for the account these credentials belong to.
    pub fn lookup(&self) -> EmailLookup {
        EmailLookup {
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account lookup by email, sent to `getUser` and `getOrg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLookup {
    /// Account email
    pub email: String,
}

/// A task to create, sent to `createTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Latitude of the task location
    pub latitude: f64,

    /// Longitude of the task location
    pub longitude: f64,

    /// Rating awarded for completing the task
    pub elo: i64,

    /// Owning organization
    #[serde(rename = "orgID")]
    pub org_id: OrgId,

    /// When the task takes place, passed through untouched
    pub time: String,
}

/// Reference to an existing task, sent to `removeTask` and `completeTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Target task
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
}

impl From<TaskId> for TaskRef {
    fn from(task_id: TaskId) -> Self {
        Self { task_id }
    }
}

/// Query for tasks open to a user, sent to `getAvailableTasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableTasksQuery {
    /// Requesting user
    pub user_id: UserId,
}

/// Query for a user's tasks around a location, sent to `getUserTasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTasksQuery {
    /// Requesting user
    #[serde(rename = "userID")]
    pub user_id: UserId,

    /// Longitude of the user
    pub longitude: f64,

    /// Latitude of the user
    pub latitude: f64,
}
