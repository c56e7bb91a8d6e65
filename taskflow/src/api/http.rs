use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::TaskApi;
use crate::{NewTask, Result, Task, TaskPatch, TaskflowError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the task backend.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            TaskflowError::http("configure task API", format!("invalid URL {base_url}: {e}"))
        })?;
        // Relative joins only append to a path that ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TaskflowError::http("configure task API", e))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TaskflowError::http(path, format!("failed to build URL: {e}")))
    }

    fn task_endpoint(&self, id: &str) -> Result<Url> {
        self.endpoint(&format!("tasks/{}", urlencoding::encode(id)))
    }

    /// Sends one request. 404 on a task path becomes [`TaskflowError::NotFound`].
    async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
        task_id: Option<&str>,
    ) -> Result<Response> {
        tracing::debug!("{call_name}");

        let response = request
            .send()
            .await
            .map_err(|e| TaskflowError::http(call_name, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = task_id {
                return Err(TaskflowError::NotFound(id.to_string()));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {}", body.trim())
            };
            return Err(TaskflowError::http(call_name, message));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
        task_id: Option<&str>,
    ) -> Result<T> {
        let response = self.send(request, call_name, task_id).await?;
        response.json::<T>().await.map_err(|e| {
            TaskflowError::http(call_name, format!("failed to parse response: {e}"))
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .send_json(self.client.get(self.endpoint("tasks")?), "GET /tasks", None)
            .await?;
        tracing::info!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        let task: Task = self
            .send_json(
                self.client.get(self.task_endpoint(id)?),
                &format!("GET /tasks/{id}"),
                Some(id),
            )
            .await?;
        tracing::info!(id, title = %task.title, "fetched task");
        Ok(task)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let created: Task = self
            .send_json(
                self.client.post(self.endpoint("tasks")?).json(task),
                "POST /tasks",
                None,
            )
            .await?;
        tracing::info!(id = %created.id, title = %created.title, "created task");
        Ok(created)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let updated: Task = self
            .send_json(
                self.client.patch(self.task_endpoint(id)?).json(patch),
                &format!("PATCH /tasks/{id}"),
                Some(id),
            )
            .await?;
        tracing::info!(id, title = %updated.title, "updated task");
        Ok(updated)
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let response = self
            .send(
                self.client.delete(self.task_endpoint(id)?),
                &format!("DELETE /tasks/{id}"),
                Some(id),
            )
            .await?;
        if let Err(e) = response.bytes().await {
            tracing::debug!(error = %e, "ignoring unreadable delete response body");
        }
        tracing::info!(id, "deleted task");
        Ok(())
    }
}
