use std::sync::Arc;

use async_trait::async_trait;
use time::macros::datetime;
use tokio::sync::Mutex;

use super::TaskApi;
use crate::{NewTask, Result, Task, TaskPatch, TaskflowError};

/// In-process task backend for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskApi {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl MemoryTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    /// A backend pre-filled with a few sample tasks.
    pub fn seeded() -> Self {
        Self::with_tasks(seed_tasks())
    }

    pub async fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }
}

#[async_trait]
impl TaskApi for MemoryTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.lock().await.clone())
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        self.tasks
            .lock()
            .await
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| TaskflowError::NotFound(id.to_string()))
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let mut tasks = self.tasks.lock().await;

        let mut id = task.id.clone();
        let mut suffix = 1;
        while tasks.iter().any(|existing| existing.id == id) {
            id = format!("{}-{}", task.id, suffix);
            suffix += 1;
        }

        let created = Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
        };
        tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| TaskflowError::NotFound(id.to_string()))?;
        patch.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(TaskflowError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Weekly groceries".to_string(),
            description: "Buy fresh food and cleaning supplies for the week".to_string(),
            completed: false,
            created_at: datetime!(2025-01-06 09:00 UTC),
        },
        Task {
            id: "2".to_string(),
            title: "Gym".to_string(),
            description: "Leg day at the gym today".to_string(),
            completed: true,
            created_at: datetime!(2025-01-07 18:30 UTC),
        },
        Task {
            id: "3".to_string(),
            title: "Preparar reunión".to_string(),
            description: "Revisar la agenda y enviar la invitación al equipo".to_string(),
            completed: false,
            created_at: datetime!(2025-01-08 11:15 UTC),
        },
    ]
}
