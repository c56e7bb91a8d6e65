//! Client-side checks run before a task form is submitted.

use std::fmt;

use crate::{Result, TaskForm, TaskflowError};

pub const TITLE_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MIN_CHARS: usize = 10;

const ACCENTED: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú', 'ñ', 'Ñ'];

/// Per-field validation messages. A field without a message is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TaskflowError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.title.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// The whitespace class of ECMAScript regexes and `String.prototype.trim`:
/// Unicode `White_Space` minus NEL (U+0085), plus the BOM (U+FEFF).
fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c != '\u{85}' && c.is_whitespace())
}

/// Letters, digits, whitespace and the accented letters used in Spanish.
pub fn is_allowed_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_space(c) || ACCENTED.contains(&c))
}

fn check_field(label: &str, value: &str, min_chars: usize) -> Option<String> {
    let trimmed = value.trim_matches(is_space);
    if trimmed.is_empty() {
        Some(format!("{label} is required"))
    } else if !is_allowed_text(value) {
        Some(format!(
            "{label} may only contain letters, numbers and spaces"
        ))
    } else if trimmed.chars().count() < min_chars {
        Some(format!("{label} must be at least {min_chars} characters"))
    } else {
        None
    }
}

pub fn validate_task_form(form: &TaskForm) -> ValidationErrors {
    ValidationErrors {
        title: check_field("Title", &form.title, TITLE_MIN_CHARS),
        description: check_field("Description", &form.description, DESCRIPTION_MIN_CHARS),
    }
}
