use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A task as the server returns it. The server's copy is authoritative.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for `POST /tasks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NewTask {
    /// Builds a create payload stamped with the current time. The proposed id is
    /// the creation instant in milliseconds; the server may replace it.
    pub fn from_form(form: &TaskForm) -> Self {
        let created_at = OffsetDateTime::now_utc();
        Self {
            id: (created_at.unix_timestamp_nanos() / 1_000_000).to_string(),
            title: form.title.clone(),
            description: form.description.clone(),
            completed: false,
            created_at,
        }
    }
}

/// Payload for `PATCH /tasks/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn from_form(form: &TaskForm) -> Self {
        Self {
            title: Some(form.title.clone()),
            description: Some(form.description.clone()),
            completed: None,
        }
    }

    /// Applies the set fields to `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// The editable fields of a task, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self::new(task.title.clone(), task.description.clone())
    }

    /// Replaces both fields with the suggested ones, verbatim.
    pub fn apply_suggestion(&mut self, suggestion: &AiSuggestion) {
        self.title = suggestion.improved_title.clone();
        self.description = suggestion.improved_description.clone();
    }
}

/// Rewrite proposed by the language model. Consumed once to prefill a form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub improved_title: String,
    pub improved_description: String,
    pub reasoning: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

// Some backends hand out numeric ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
