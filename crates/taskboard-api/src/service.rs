use std::sync::Arc;

use taskboard_core::TaskboardResult;
use taskboard_domain::{Task, TaskDraft, TaskId, TaskPatch};

use crate::traits::TaskApi;

/// Result of a mutation that reached the server.
///
/// The mutation succeeded; `reload` holds the refreshed task list or the
/// error of the reload that followed it.
#[derive(Debug)]
pub struct MutationOutcome {
    pub message: String,
    /// Record returned by a create or update.
    pub task: Option<Task>,
    pub reload: TaskboardResult<Vec<Task>>,
}

impl MutationOutcome {
    fn new(
        message: impl Into<String>,
        task: Option<Task>,
        reload: TaskboardResult<Vec<Task>>,
    ) -> Self {
        Self {
            message: message.into(),
            task,
            reload,
        }
    }
}

/// Runs every task operation followed by a full reload.
///
/// No optimistic updates: the cached list is only ever replaced by what the
/// server returns from `list()`.
#[derive(Clone)]
pub struct TaskService {
    api: Arc<dyn TaskApi>,
}

impl TaskService {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn TaskApi> {
        &self.api
    }

    pub fn endpoint(&self) -> String {
        self.api.endpoint()
    }

    pub async fn load_tasks(&self) -> TaskboardResult<Vec<Task>> {
        match self.api.list().await {
            Ok(tasks) => {
                tracing::debug!("Loaded {} tasks from {}", tasks.len(), self.api.endpoint());
                Ok(tasks)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading tasks");
                Err(e)
            }
        }
    }

    pub async fn create_task(&self, draft: TaskDraft) -> TaskboardResult<MutationOutcome> {
        draft.validate()?;
        let created = self.api.create(&draft).await.map_err(|e| {
            tracing::error!(error = %e, "Error creating task");
            e
        })?;
        tracing::info!(id = created.id, "Created task");
        Ok(MutationOutcome::new(
            "Task created successfully!",
            Some(created),
            self.load_tasks().await,
        ))
    }

    pub async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskboardResult<MutationOutcome> {
        patch.validate()?;
        let updated = self.api.update(id, &patch).await.map_err(|e| {
            tracing::error!(id, error = %e, "Error updating task");
            e
        })?;
        tracing::info!(id, "Updated task");
        Ok(MutationOutcome::new(
            "Task updated successfully!",
            Some(updated),
            self.load_tasks().await,
        ))
    }

    pub async fn delete_task(&self, id: TaskId) -> TaskboardResult<MutationOutcome> {
        self.api.delete(id).await.map_err(|e| {
            tracing::error!(id, error = %e, "Error deleting task");
            e
        })?;
        tracing::info!(id, "Deleted task");
        Ok(MutationOutcome::new(
            "Task deleted successfully!",
            None,
            self.load_tasks().await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryTaskApi;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use taskboard_core::TaskboardError;
    use taskboard_domain::{TaskPriority, TaskStatus};

    mock! {
        pub Api {}

        #[async_trait]
        impl TaskApi for Api {
            async fn list(&self) -> TaskboardResult<Vec<Task>>;
            async fn create(&self, draft: &TaskDraft) -> TaskboardResult<Task>;
            async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskboardResult<Task>;
            async fn delete(&self, id: TaskId) -> TaskboardResult<()>;
            fn endpoint(&self) -> String;
        }
    }

    fn sample(id: TaskId) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: None,
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_reload_includes_new_task() {
        let service = TaskService::new(Arc::new(InMemoryTaskApi::new()));

        let mut draft = TaskDraft::new("Write docs");
        draft.description = "user guide".to_string();
        draft.priority = TaskPriority::High;
        draft.status = TaskStatus::InProgress;

        let outcome = service.create_task(draft).await.unwrap();
        assert_eq!(outcome.message, "Task created successfully!");
        let created_id = outcome.task.as_ref().map(|t| t.id);

        let tasks = outcome.reload.unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.description.as_deref(), Some("user guide"));
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.created_at.is_some());
        assert_eq!(created_id, Some(task.id));
    }

    #[tokio::test]
    async fn test_delete_removes_task_after_reload() {
        let service = TaskService::new(Arc::new(InMemoryTaskApi::new()));
        let first = service.create_task(TaskDraft::new("a")).await.unwrap();
        service.create_task(TaskDraft::new("b")).await.unwrap();
        let id = first.reload.unwrap()[0].id;

        let outcome = service.delete_task(id).await.unwrap();
        let tasks = outcome.reload.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks.iter().all(|t| t.id != id));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_never_sent() {
        let mut api = MockApi::new();
        api.expect_create().never();
        api.expect_list().never();
        let service = TaskService::new(Arc::new(api));

        let err = service.create_task(TaskDraft::new("")).await.unwrap_err();
        assert!(matches!(err, TaskboardError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_mutation_skips_reload() {
        let mut api = MockApi::new();
        api.expect_update()
            .with(eq(7), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Err(TaskboardError::http_status(500, "Internal Server Error")));
        api.expect_list().never();
        api.expect_endpoint().return_const("mock".to_string());
        let service = TaskService::new(Arc::new(api));

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let err = service.update_task(7, patch).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_reload_failure_after_delete_is_reported_separately() {
        let mut api = MockApi::new();
        api.expect_delete().with(eq(3)).times(1).returning(|_| Ok(()));
        api.expect_list()
            .times(1)
            .returning(|| Err(TaskboardError::transport("connection reset")));
        api.expect_endpoint().return_const("mock".to_string());
        let service = TaskService::new(Arc::new(api));

        let outcome = service.delete_task(3).await.unwrap();
        assert_eq!(outcome.message, "Task deleted successfully!");
        assert!(outcome.reload.is_err());
    }

    #[tokio::test]
    async fn test_load_tasks_passes_list_through() {
        let mut api = MockApi::new();
        api.expect_list()
            .times(1)
            .returning(|| Ok(vec![sample(1), sample(2)]));
        api.expect_endpoint().return_const("mock".to_string());
        let service = TaskService::new(Arc::new(api));

        let tasks = service.load_tasks().await.unwrap();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
