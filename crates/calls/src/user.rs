//! User-side calls: sign up, login check and task listings.

use crate::error::Result;
use crate::login::{gated_login, LoginOutcome};
use crate::remote::{take_field, RemoteCaller};
use crate::snapshot::{SnapshotKind, SnapshotStore};
use samaritan_core::{AvailableTasksQuery, Credentials, RemoteFunction, UserId, UserTasksQuery};
use samaritan_invoke::Invoker;
use serde_json::Value;
use std::sync::Arc;

/// Calls made on behalf of a user.
#[derive(Clone)]
pub struct UserCalls {
    remote: RemoteCaller,
    snapshots: SnapshotStore,
}

impl UserCalls {
    /// Create user calls over `invoker`, snapshotting into the current directory.
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self {
            remote: RemoteCaller::new(invoker),
            snapshots: SnapshotStore::current_dir(),
        }
    }

    /// Set the snapshot store.
    pub fn with_snapshots(mut self, snapshots: SnapshotStore) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Check a user's credentials with `checkLogin`.
    ///
    /// A 200 answer triggers a `getUser` lookup whose `user` object is
    /// written to `user.json`. Any other status is returned as
    /// [`LoginOutcome::Rejected`] and nothing is fetched or written.
    pub async fn check_login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        gated_login(
            &self.remote,
            &self.snapshots,
            RemoteFunction::CheckLogin,
            RemoteFunction::GetUser,
            SnapshotKind::User,
            credentials,
        )
        .await
    }

    /// Register a new user; returns the decoded `signUp` response.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Value> {
        self.remote.fetch(RemoteFunction::SignUp, credentials).await
    }

    /// Tasks open to `user_id`.
    ///
    /// Returns the `tasks` field of the response, or an empty object when the
    /// response has none.
    pub async fn get_available_tasks(&self, user_id: &UserId) -> Result<Value> {
        let query = AvailableTasksQuery {
            user_id: user_id.clone(),
        };
        let body = self.remote.fetch(RemoteFunction::GetAvailableTasks, &query).await?;
        take_field(RemoteFunction::GetAvailableTasks, body, "tasks", Value::Object(Default::default()))
    }

    /// Tasks of `user_id` around a location.
    ///
    /// Returns the `tasks` field of the response, or `null` when the response
    /// has none.
    pub async fn get_user_tasks(&self, user_id: &UserId, longitude: f64, latitude: f64) -> Result<Value> {
        let query = UserTasksQuery {
            user_id: user_id.clone(),
            longitude,
            latitude,
        };
        let body = self.remote.fetch(RemoteFunction::GetUserTasks, &query).await?;
        take_field(RemoteFunction::GetUserTasks, body, "tasks", Value::Null)
    }
}
