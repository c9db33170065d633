use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Task, TaskDraft, TaskId, TaskPatch};

use crate::decode::{decode, decode_task_list};
use crate::traits::TaskApi;

/// Task API over HTTP with JSON bodies.
///
/// Routes: `GET|POST {base}/tasks/` and `PATCH|DELETE {base}/tasks/{id}/`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> TaskboardResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TaskboardError::Internal(format!("failed building HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    pub fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}/", self.base_url, id)
    }

    /// Sends one request and returns the response body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> TaskboardResult<String> {
        tracing::debug!(method = %method, url, "Sending task API request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, url, error = %e, "Task API request failed");
            TaskboardError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                method = %method,
                url,
                status = status.as_u16(),
                "Task API returned an error status"
            );
            return Err(TaskboardError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("HTTP error"),
            ));
        }

        response.text().await.map_err(|e| {
            tracing::error!(
                method = %method,
                url,
                error = %e,
                "Failed reading task API response body"
            );
            TaskboardError::transport(e.to_string())
        })
    }
}

fn encode<T: serde::Serialize>(value: &T) -> TaskboardResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> TaskboardResult<Vec<Task>> {
        let body = self.send(Method::GET, &self.collection_url(), None).await?;
        decode_task_list(&body)
    }

    async fn create(&self, draft: &TaskDraft) -> TaskboardResult<Task> {
        let body = self
            .send(Method::POST, &self.collection_url(), Some(encode(draft)?))
            .await?;
        decode(&body)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskboardResult<Task> {
        let body = self
            .send(Method::PATCH, &self.task_url(id), Some(encode(patch)?))
            .await?;
        decode(&body)
    }

    async fn delete(&self, id: TaskId) -> TaskboardResult<()> {
        self.send(Method::DELETE, &self.task_url(id), None).await?;
        Ok(())
    }

    fn endpoint(&self) -> String {
        self.collection_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let api = HttpTaskApi::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(api.collection_url(), "http://127.0.0.1:8000/api/tasks/");
        assert_eq!(api.task_url(12), "http://127.0.0.1:8000/api/tasks/12/");
        assert_eq!(api.endpoint(), api.collection_url());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_failed_without_status() {
        // Nothing listens on the local discard port.
        let api = HttpTaskApi::new("http://127.0.0.1:9/api").unwrap();
        let err = api.list().await.unwrap_err();
        assert!(matches!(err, TaskboardError::RequestFailed { status: None, .. }));
    }
}
