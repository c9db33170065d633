use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Task, TaskDraft, TaskId, TaskPatch};

use crate::traits::TaskApi;

struct MemoryState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// Task API backed by process memory.
///
/// Behaves like the server: it assigns ids and timestamps, lists tasks in
/// creation order, and answers unknown ids with a 404.
pub struct InMemoryTaskApi {
    state: Mutex<MemoryState>,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MemoryState { tasks, next_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn not_found(id: TaskId) -> TaskboardError {
        tracing::error!(id, "Task not found in memory store");
        TaskboardError::http_status(404, format!("task {} not found", id))
    }
}

impl Default for InMemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list(&self) -> TaskboardResult<Vec<Task>> {
        Ok(self.state.lock().tasks.clone())
    }

    async fn create(&self, draft: &TaskDraft) -> TaskboardResult<Task> {
        draft
            .validate()
            .map_err(|e| TaskboardError::http_status(400, e.to_string()))?;

        let mut state = self.state.lock();
        let now = Utc::now();
        let task = Task {
            id: state.next_id,
            title: draft.title.clone(),
            description: Some(draft.description.clone()).filter(|d| !d.is_empty()),
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.next_id += 1;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskboardResult<Task> {
        patch
            .validate()
            .map_err(|e| TaskboardError::http_status(400, e.to_string()))?;

        let mut state = self.state.lock();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        patch.clone().apply_to(task);
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskboardResult<()> {
        let mut state = self.state.lock();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    fn endpoint(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_domain::{FieldUpdate, TaskPriority, TaskStatus};

    #[tokio::test]
    async fn test_create_assigns_server_fields() {
        let api = InMemoryTaskApi::new();
        let mut draft = TaskDraft::new("Write docs");
        draft.priority = TaskPriority::High;

        let created = api.create(&draft).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(created.created_at.is_some());
        assert_eq!(created.priority, TaskPriority::High);

        let second = api.create(&TaskDraft::new("Fix bug")).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(api.len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_as_bad_request() {
        let api = InMemoryTaskApi::new();
        let err = api.create(&TaskDraft::new(" ")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(api.is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let api = InMemoryTaskApi::new();
        let created = api.create(&TaskDraft::new("Design API")).await.unwrap();

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            due_date: FieldUpdate::Clear,
            ..Default::default()
        };
        let updated = api.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.title, "Design API");
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let api = InMemoryTaskApi::new();
        assert_eq!(api.delete(99).await.unwrap_err().status(), Some(404));
        assert_eq!(
            api.update(99, &TaskPatch::default()).await.unwrap_err().status(),
            Some(404)
        );
    }

    #[tokio::test]
    async fn test_with_tasks_continues_ids() {
        let existing = api_task(5);
        let api = InMemoryTaskApi::with_tasks(vec![existing]);
        let created = api.create(&TaskDraft::new("next")).await.unwrap();
        assert_eq!(created.id, 6);
    }

    fn api_task(id: TaskId) -> Task {
        Task {
            id,
            title: "existing".to_string(),
            description: None,
            priority: TaskPriority::Low,
            status: TaskStatus::Todo,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }
}
