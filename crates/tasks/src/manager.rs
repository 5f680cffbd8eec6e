//! Task management service.

use crate::outcome::TaskOutcome;
use async_trait::async_trait;
use samaritan_calls::TaskCalls;
use samaritan_core::{NewTask, TaskId};
use tracing::{info, warn};

const CREATED: &str = "Task created successfully.";
const CREATE_FAILED: &str = "An error occurred while creating the task.";
const REMOVED: &str = "Task removed successfully.";
const REMOVE_FAILED: &str = "An error occurred while removing the task.";
const COMPLETED: &str = "Task completed successfully.";
const COMPLETE_FAILED: &str = "An error occurred while completing the task.";

/// Task management service.
///
/// Operations never fail; faults come back as [`TaskOutcome::Failure`].
#[async_trait]
pub trait TaskManager: Send + Sync {
    /// Create a new task.
    async fn create_task(&self, task: NewTask) -> TaskOutcome;

    /// Remove a task.
    async fn remove_task(&self, task_id: TaskId) -> TaskOutcome;

    /// Complete a task.
    async fn complete_task(&self, task_id: TaskId) -> TaskOutcome;
}

/// Basic task manager implementation.
pub struct BasicTaskManager<C: TaskCalls> {
    calls: C,
}

impl<C: TaskCalls> BasicTaskManager<C> {
    /// Create a new task manager.
    pub fn new(calls: C) -> Self {
        Self { calls }
    }
}

#[async_trait]
impl<C: TaskCalls + 'static> TaskManager for BasicTaskManager<C> {
    async fn create_task(&self, task: NewTask) -> TaskOutcome {
        match self.calls.create_task(&task).await {
            Ok(data) => {
                info!("Created task {:?}", task.title);
                TaskOutcome::success(CREATED, data)
            }
            Err(e) => {
                warn!("Failed to create task {:?}: {}", task.title, e);
                TaskOutcome::failure(CREATE_FAILED, &e)
            }
        }
    }

    async fn remove_task(&self, task_id: TaskId) -> TaskOutcome {
        match self.calls.remove_task(&task_id).await {
            Ok(data) => {
                info!("Removed task {}", task_id);
                TaskOutcome::success(REMOVED, data)
            }
            Err(e) => {
                warn!("Failed to remove task {}: {}", task_id, e);
                TaskOutcome::failure(REMOVE_FAILED, &e)
            }
        }
    }

    async fn complete_task(&self, task_id: TaskId) -> TaskOutcome {
        match self.calls.complete_task(&task_id).await {
            Ok(data) => {
                info!("Completed task {}", task_id);
                TaskOutcome::success(COMPLETED, data)
            }
            Err(e) => {
                warn!("Failed to complete task {}: {}", task_id, e);
                TaskOutcome::failure(COMPLETE_FAILED, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use samaritan_calls::{CallError, FaultKind, OrgCalls, Result};
    use samaritan_core::OrgId;
    use samaritan_invoke::{InvocationResponse, InvokeError, ScriptedInvoker};
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Task calls answering every operation with the same result.
    struct FixedCalls {
        value: Option<Value>,
        error: &'static str,
    }

    impl FixedCalls {
        fn ok(value: Value) -> Self {
            Self {
                value: Some(value),
                error: "",
            }
        }

        fn failing(error: &'static str) -> Self {
            Self { value: None, error }
        }

        fn answer(&self) -> Result<Value> {
            match &self.value {
                Some(v) => Ok(v.clone()),
                None => Err(CallError::from(InvokeError::Other(self.error.to_string()))),
            }
        }
    }

    #[async_trait]
    impl TaskCalls for FixedCalls {
        async fn create_task(&self, _task: &NewTask) -> Result<Value> {
            self.answer()
        }

        async fn remove_task(&self, _task_id: &TaskId) -> Result<Value> {
            self.answer()
        }

        async fn complete_task(&self, _task_id: &TaskId) -> Result<Value> {
            self.answer()
        }
    }

    fn sample_task() -> NewTask {
        NewTask {
            title: "Food drive".to_string(),
            description: "Sort donations".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            elo: 10,
            org_id: OrgId::new("org-1"),
            time: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_records_wrap_data() {
        let manager = BasicTaskManager::new(FixedCalls::ok(json!({"id": "t-1"})));

        let created = manager.create_task(sample_task()).await;
        let removed = manager.remove_task(TaskId::new("t-1")).await;
        let completed = manager.complete_task(TaskId::new("t-1")).await;

        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({"message": "Task created successfully.", "data": {"id": "t-1"}})
        );
        assert_eq!(
            serde_json::to_value(&removed).unwrap(),
            json!({"message": "Task removed successfully.", "data": {"id": "t-1"}})
        );
        assert_eq!(
            serde_json::to_value(&completed).unwrap(),
            json!({"message": "Task completed successfully.", "data": {"id": "t-1"}})
        );
    }

    #[tokio::test]
    async fn test_faults_become_failure_records() {
        let manager = BasicTaskManager::new(FixedCalls::failing("boom"));

        let created = manager.create_task(sample_task()).await;
        let removed = manager.remove_task(TaskId::new("t-1")).await;
        let completed = manager.complete_task(TaskId::new("t-1")).await;

        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({"error": "boom", "message": "An error occurred while creating the task."})
        );
        assert_eq!(
            serde_json::to_value(&removed).unwrap(),
            json!({"error": "boom", "message": "An error occurred while removing the task."})
        );
        assert_eq!(
            serde_json::to_value(&completed).unwrap(),
            json!({"error": "boom", "message": "An error occurred while completing the task."})
        );
        assert_eq!(created.fault(), Some(FaultKind::Transport));
    }

    #[tokio::test]
    async fn test_with_org_calls_decode_fault_is_reported() {
        let invoker = Arc::new(
            ScriptedInvoker::new()
                .with_response("completeTask", InvocationResponse::new(200, "not json")),
        );
        let manager = BasicTaskManager::new(OrgCalls::new(invoker.clone()));

        let outcome = manager.complete_task(TaskId::new("t-3")).await;

        assert_eq!(outcome.fault(), Some(FaultKind::Decode));
        assert_eq!(outcome.message(), "An error occurred while completing the task.");
        assert_eq!(invoker.calls_to("completeTask").await[0].payload, json!({"taskID": "t-3"}));
    }

    #[tokio::test]
    async fn test_with_org_calls_unknown_function_is_transport_fault() {
        let manager = BasicTaskManager::new(OrgCalls::new(Arc::new(ScriptedInvoker::new())));

        let outcome = manager.remove_task(TaskId::new("t-3")).await;

        assert_eq!(outcome.fault(), Some(FaultKind::Transport));
        assert!(!outcome.is_success());
    }
}
