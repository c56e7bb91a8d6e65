//! Access to the remote task collection.
//!
//! [`TaskApi`] lets the store run against the real server, the in-memory dev
//! backend, or a test double.

use async_trait::async_trait;

use crate::{NewTask, Result, Task, TaskPatch};

mod http;
mod memory;

pub use http::HttpTaskApi;
pub use memory::MemoryTaskApi;

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks`
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// `GET /tasks/{id}`
    async fn get_task(&self, id: &str) -> Result<Task>;

    /// `POST /tasks`
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// `PATCH /tasks/{id}`
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, id: &str) -> Result<()>;
}
