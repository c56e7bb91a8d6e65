//! In-memory mirror of the server's task collection.
//!
//! Every operation is one round trip against a [`TaskApi`]. The local
//! collection only changes after the server answers; on failure it is left as
//! it was and the error message is kept for display.

use crate::api::TaskApi;
use crate::validation::validate_task_form;
use crate::{NewTask, Result, Task, TaskForm, TaskPatch, TaskflowError};

/// Status of the most recent network operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

pub struct TaskStore<A> {
    api: A,
    tasks: Vec<Task>,
    loading: LoadingState,
    error: Option<String>,
}

impl<A: TaskApi> TaskStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: LoadingState::Idle,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn loading(&self) -> LoadingState {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Local lookup; never touches the network.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.completed)
    }

    fn begin(&mut self) {
        self.loading = LoadingState::Loading;
        self.error = None;
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.loading = LoadingState::Success,
            Err(e) => {
                tracing::warn!(error = %e, "task operation failed");
                self.loading = LoadingState::Error;
                self.error = Some(e.to_string());
            }
        }
        result
    }

    fn replace_local(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Replaces the local collection with the server's.
    pub async fn fetch(&mut self) -> Result<&[Task]> {
        self.begin();
        let result = self.api.list_tasks().await;
        let tasks = self.finish(result)?;
        self.tasks = tasks;
        Ok(&self.tasks)
    }

    /// Refreshes a single task, adding it locally if it was not known yet.
    pub async fn fetch_one(&mut self, id: &str) -> Result<Task> {
        self.begin();
        let result = self.api.get_task(id).await;
        let task = self.finish(result)?;
        self.replace_local(task.clone());
        Ok(task)
    }

    pub async fn add(&mut self, form: &TaskForm) -> Result<Task> {
        self.begin();
        if let Err(e) = validate_task_form(form).into_result() {
            return self.finish(Err(e));
        }

        let result = self.api.create_task(&NewTask::from_form(form)).await;
        let created = self.finish(result)?;
        self.tasks.push(created.clone());
        Ok(created)
    }

    /// Validates the form and saves its title and description.
    pub async fn edit(&mut self, id: &str, form: &TaskForm) -> Result<Task> {
        if let Err(e) = validate_task_form(form).into_result() {
            self.begin();
            return self.finish(Err(e));
        }
        self.update(id, TaskPatch::from_form(form)).await
    }

    pub async fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.begin();
        let result = self.api.update_task(id, &patch).await;
        let updated = self.finish(result)?;
        for task in self.tasks.iter_mut().filter(|task| task.id == id) {
            *task = updated.clone();
        }
        Ok(updated)
    }

    /// Flips the completion flag of a locally known task.
    pub async fn toggle(&mut self, id: &str) -> Result<Task> {
        let Some(completed) = self.get(id).map(|task| task.completed) else {
            self.begin();
            return self.finish(Err(TaskflowError::NotFound(id.to_string())));
        };
        self.update(id, TaskPatch::completed(!completed)).await
    }

    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.begin();
        let result = self.api.delete_task(id).await;
        self.finish(result)?;
        self.tasks.retain(|task| task.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryTaskApi;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn loaded_store() -> TaskStore<MemoryTaskApi> {
        let mut store = TaskStore::new(MemoryTaskApi::seeded());
        store.fetch().await.unwrap();
        store
    }

    /// Fails every call and counts how many were made.
    #[derive(Default, Clone)]
    struct FailingApi {
        calls: Arc<AtomicUsize>,
    }

    impl FailingApi {
        fn fail(&self) -> TaskflowError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            TaskflowError::http("GET /tasks", "connection refused")
        }
    }

    #[async_trait]
    impl TaskApi for FailingApi {
        async fn list_tasks(&self) -> Result<Vec<Task>> {
            Err(self.fail())
        }
        async fn get_task(&self, _id: &str) -> Result<Task> {
            Err(self.fail())
        }
        async fn create_task(&self, _task: &NewTask) -> Result<Task> {
            Err(self.fail())
        }
        async fn update_task(&self, _id: &str, _patch: &TaskPatch) -> Result<Task> {
            Err(self.fail())
        }
        async fn delete_task(&self, _id: &str) -> Result<()> {
            Err(self.fail())
        }
    }

    /// Serves the seeded tasks until `go_down` is called, then fails every call.
    #[derive(Clone)]
    struct FlakyApi {
        inner: MemoryTaskApi,
        down: Arc<AtomicBool>,
    }

    impl FlakyApi {
        fn seeded() -> Self {
            Self {
                inner: MemoryTaskApi::seeded(),
                down: Arc::new(AtomicBool::new(false)),
            }
        }

        fn go_down(&self) {
            self.down.store(true, Ordering::SeqCst);
        }

        fn check(&self, call: &str) -> Result<()> {
            if self.down.load(Ordering::SeqCst) {
                Err(TaskflowError::http(call, "503 Service Unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TaskApi for FlakyApi {
        async fn list_tasks(&self) -> Result<Vec<Task>> {
            self.check("GET /tasks")?;
            self.inner.list_tasks().await
        }
        async fn get_task(&self, id: &str) -> Result<Task> {
            self.check("GET /tasks")?;
            self.inner.get_task(id).await
        }
        async fn create_task(&self, task: &NewTask) -> Result<Task> {
            self.check("POST /tasks")?;
            self.inner.create_task(task).await
        }
        async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
            self.check("PATCH /tasks")?;
            self.inner.update_task(id, patch).await
        }
        async fn delete_task(&self, id: &str) -> Result<()> {
            self.check("DELETE /tasks")?;
            self.inner.delete_task(id).await
        }
    }

    #[tokio::test]
    async fn fetch_replaces_collection() {
        let mut store = TaskStore::new(MemoryTaskApi::seeded());
        assert_eq!(store.loading(), LoadingState::Idle);

        let count = store.fetch().await.unwrap().len();

        assert_eq!(count, 3);
        assert_eq!(store.loading(), LoadingState::Success);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn toggle_flips_only_completion() {
        let mut store = loaded_store().await;
        let before = store.get("1").cloned().unwrap();

        let toggled = store.toggle("1").await.unwrap();

        assert_eq!(toggled.completed, !before.completed);
        assert_eq!(toggled.title, before.title);
        assert_eq!(toggled.description, before.description);
        assert_eq!(toggled.created_at, before.created_at);
        assert_eq!(store.get("1"), Some(&toggled));

        let back = store.toggle("1").await.unwrap();
        assert_eq!(back, before);
    }

    #[tokio::test]
    async fn toggle_unknown_task_is_not_found() {
        let api = FailingApi::default();
        let mut store = TaskStore::new(api.clone());

        let err = store.toggle("missing").await.unwrap_err();

        assert!(matches!(err, TaskflowError::NotFound(_)));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.loading(), LoadingState::Error);
    }

    #[tokio::test]
    async fn remove_drops_task_for_good() {
        let mut store = loaded_store().await;

        store.remove("2").await.unwrap();

        assert!(store.get("2").is_none());
        store.fetch().await.unwrap();
        assert!(store.get("2").is_none());
        assert!(matches!(
            store.remove("2").await,
            Err(TaskflowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn add_appends_server_copy() {
        let mut store = loaded_store().await;

        let created = store
            .add(&TaskForm::new("Read", "Read two chapters tonight"))
            .await
            .unwrap();

        assert!(!created.completed);
        assert_eq!(store.tasks().last(), Some(&created));
        assert_eq!(store.tasks().len(), 4);
    }

    #[tokio::test]
    async fn add_rejects_invalid_form_without_calling_api() {
        let api = FailingApi::default();
        let mut store = TaskStore::new(api.clone());

        let err = store.add(&TaskForm::new("Hi", "short")).await.unwrap_err();

        assert!(matches!(err, TaskflowError::Validation(_)));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.loading(), LoadingState::Error);
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn edit_saves_title_and_description() {
        let mut store = loaded_store().await;

        let edited = store
            .edit("3", &TaskForm::new("Preparar la reunión", "Revisar agenda y enviar invitación"))
            .await
            .unwrap();

        assert_eq!(edited.title, "Preparar la reunión");
        assert!(!edited.completed);
        assert_eq!(store.get("3"), Some(&edited));
    }

    #[tokio::test]
    async fn edit_of_deleted_task_is_not_found() {
        let mut store = loaded_store().await;
        store.api().delete_task("3").await.unwrap();

        let err = store
            .edit("3", &TaskForm::new("Preparar reunión", "Revisar la agenda otra vez"))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskflowError::NotFound(_)));
        // No reconciliation: the stale local copy stays.
        assert!(store.get("3").is_some());
    }

    #[tokio::test]
    async fn failed_fetch_records_message() {
        let mut store = TaskStore::new(FailingApi::default());

        let err = store.fetch().await.unwrap_err();

        assert!(store.tasks().is_empty());
        assert_eq!(store.loading(), LoadingState::Error);
        assert_eq!(store.error(), Some(err.to_string().as_str()));
    }

    #[tokio::test]
    async fn failed_operations_leave_loaded_tasks_untouched() {
        let api = FlakyApi::seeded();
        let mut store = TaskStore::new(api.clone());
        store.fetch().await.unwrap();
        api.go_down();
        let before = store.tasks().to_vec();
        assert_eq!(before.len(), 3);

        let errors = vec![
            store.remove("2").await.unwrap_err(),
            store.toggle("1").await.unwrap_err(),
            store
                .add(&TaskForm::new("Read", "Read two chapters tonight"))
                .await
                .unwrap_err(),
            store
                .edit("3", &TaskForm::new("Preparar reunión", "Revisar la agenda otra vez"))
                .await
                .unwrap_err(),
            store.fetch().await.unwrap_err(),
        ];

        for err in &errors {
            assert!(matches!(err, TaskflowError::Http { .. }), "{err:?}");
        }
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.loading(), LoadingState::Error);
        assert_eq!(store.error(), Some(errors[4].to_string().as_str()));
        assert_eq!(api.inner.snapshot().await, before);
    }

    #[tokio::test]
    async fn each_failure_is_recorded_in_turn() {
        let api = FlakyApi::seeded();
        let mut store = TaskStore::new(api.clone());
        store.fetch().await.unwrap();
        api.go_down();
        let before = store.tasks().to_vec();

        let err = store.remove("2").await.unwrap_err();
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.loading(), LoadingState::Error);
        assert_eq!(store.error(), Some(err.to_string().as_str()));

        let err = store.toggle("1").await.unwrap_err();
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.error(), Some(err.to_string().as_str()));
        assert!(err.to_string().starts_with("PATCH /tasks failed"));
    }

    #[tokio::test]
    async fn fetch_one_inserts_unknown_task() {
        let mut store = TaskStore::new(MemoryTaskApi::seeded());

        let task = store.fetch_one("2").await.unwrap();

        assert_eq!(store.tasks(), &[task]);
    }

    #[tokio::test]
    async fn filters_split_by_completion() {
        let store = loaded_store().await;
        assert_eq!(store.pending().count(), 2);
        assert_eq!(store.completed().count(), 1);
    }
}
