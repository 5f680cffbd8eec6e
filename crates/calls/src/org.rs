//! Organization-side calls: login check and task lifecycle.

use crate::error::Result;
use crate::login::{gated_login, LoginOutcome};
use crate::remote::RemoteCaller;
use crate::snapshot::{SnapshotKind, SnapshotStore};
use async_trait::async_trait;
use samaritan_core::{Credentials, NewTask, RemoteFunction, TaskId, TaskRef};
use samaritan_invoke::Invoker;
use serde_json::Value;
use std::sync::Arc;

/// Task lifecycle calls.
#[async_trait]
pub trait TaskCalls: Send + Sync {
    /// Create a task; returns the decoded `createTask` response.
    async fn create_task(&self, task: &NewTask) -> Result<Value>;

    /// Remove a task; returns the decoded `removeTask` response.
    async fn remove_task(&self, task_id: &TaskId) -> Result<Value>;

    /// Complete a task; returns the decoded `completeTask` response.
    async fn complete_task(&self, task_id: &TaskId) -> Result<Value>;
}

/// Calls made on behalf of an organization.
#[derive(Clone)]
pub struct OrgCalls {
    remote: RemoteCaller,
    snapshots: SnapshotStore,
}

impl OrgCalls {
    /// Create org calls over `invoker`, snapshotting into the current directory.
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

    /// Check an organization's credentials with `checkOrgLogin`.
    ///
    /// When the check answers 200 the organization is fetched with `getOrg`
    /// and its `org` object is written to `org.json`, replacing any previous
    /// snapshot. Any other status is returned as [`LoginOutcome::Rejected`]
    /// without further calls.
    // TODO: confirm with product whether org.json is meant as a session cache
    // before anything else starts reading it.
    pub async fn check_org_login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        gated_login(
            &self.remote,
            &self.snapshots,
            RemoteFunction::CheckOrgLogin,
            RemoteFunction::GetOrg,
            SnapshotKind::Org,
            credentials,
        )
        .await
    }
}

#[async_trait]
impl TaskCalls for OrgCalls {
    async fn create_task(&self, task: &NewTask) -> Result<Value> {
        self.remote.fetch(RemoteFunction::CreateTask, task).await
    }

    async fn remove_task(&self, task_id: &TaskId) -> Result<Value> {
        let payload = TaskRef::from(task_id.clone());
        self.remote.fetch(RemoteFunction::RemoveTask, &payload).await
    }

    async fn complete_task(&self, task_id: &TaskId) -> Result<Value> {
        let payload = TaskRef::from(task_id.clone());
        self.remote.fetch(RemoteFunction::CompleteTask, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaultKind;
    use samaritan_core::OrgId;
    use samaritan_invoke::{InvocationResponse, ScriptedInvoker};
    use serde_json::json;

    fn sample_task() -> NewTask {
        NewTask {
            title: "Park cleanup".to_string(),
            description: "Litter picking".to_string(),
            latitude: 40.7,
            longitude: -74.0,
            elo: 25,
            org_id: OrgId::new("org-1"),
            time: "2024-05-04T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_task_sends_all_fields_and_returns_response() {
        let invoker = Arc::new(ScriptedInvoker::new().with_response(
            "createTask",
            InvocationResponse::json(&json!({"taskID": "t-1", "success": true})),
        ));
        let calls = OrgCalls::new(invoker.clone());

        let value = calls.create_task(&sample_task()).await.unwrap();

        assert_eq!(value, json!({"taskID": "t-1", "success": true}));
        let sent = invoker.calls_to("createTask").await;
        assert_eq!(
            sent[0].payload,
            json!({
                "title": "Park cleanup",
                "description": "Litter picking",
                "latitude": 40.7,
                "longitude": -74.0,
                "elo": 25,
                "orgID": "org-1",
                "time": "2024-05-04T10:00:00Z",
            })
        );
    }

    #[tokio::test]
    async fn test_remove_and_complete_send_task_id() {
        let invoker = Arc::new(
            ScriptedInvoker::new()
                .with_response("removeTask", InvocationResponse::json(&json!({"removed": 1})))
                .with_response("completeTask", InvocationResponse::json(&json!("done"))),
        );
        let calls = OrgCalls::new(invoker.clone());
        let id = TaskId::new("t-7");

        assert_eq!(calls.remove_task(&id).await.unwrap(), json!({"removed": 1}));
        assert_eq!(calls.complete_task(&id).await.unwrap(), json!("done"));

        let sent = invoker.calls().await;
        assert_eq!(sent[0].function, "removeTask");
        assert_eq!(sent[0].payload, json!({"taskID": "t-7"}));
        assert_eq!(sent[1].function, "completeTask");
        assert_eq!(sent[1].payload, json!({"taskID": "t-7"}));
    }

    #[tokio::test]
    async fn test_undecodable_response_is_decode_fault() {
        let invoker = Arc::new(
            ScriptedInvoker::new().with_response("removeTask", InvocationResponse::new(200, "oops")),
        );
        let err = OrgCalls::new(invoker)
            .remove_task(&TaskId::new("t-1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FaultKind::Decode);
    }

    #[tokio::test]
    async fn test_org_login_writes_org_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = Arc::new(
            ScriptedInvoker::new()
                .with_response("checkOrgLogin", InvocationResponse::new(200, "{}"))
                .with_response(
                    "getOrg",
                    InvocationResponse::json(&json!({
                        "statusCode": 200,
                        "body": "{\"org\": {\"orgID\": \"o-1\", \"name\": \"Helpers\"}}",
                    })),
                ),
        );
        let calls = OrgCalls::new(invoker.clone()).with_snapshots(SnapshotStore::new(dir.path()));

        let outcome = calls
            .check_org_login(&Credentials::new("org@example.com", "pw"))
            .await
            .unwrap();

        assert!(outcome.is_verified());
        assert_eq!(invoker.calls_to("getOrg").await[0].payload, json!({"email": "org@example.com"}));

        let written = std::fs::read_to_string(dir.path().join("org.json")).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!({"orgID": "o-1", "name": "Helpers"}));
        assert!(!dir.path().join("user.json").exists());
    }
}
