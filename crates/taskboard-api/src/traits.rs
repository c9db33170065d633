use async_trait::async_trait;
use taskboard_core::TaskboardResult;
use taskboard_domain::{Task, TaskDraft, TaskId, TaskPatch};

/// Gateway to the remote task resource.
///
/// Each operation is a single request. Failures surface as
/// `TaskboardError::RequestFailed`; nothing is retried.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task record.
    async fn list(&self) -> TaskboardResult<Vec<Task>>;

    /// Create a task and return the server's record of it.
    async fn create(&self, draft: &TaskDraft) -> TaskboardResult<Task>;

    /// Apply a partial update and return the updated record.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskboardResult<Task>;

    async fn delete(&self, id: TaskId) -> TaskboardResult<()>;

    /// Human-readable description of where requests go.
    fn endpoint(&self) -> String;
}
