use serde::Deserialize;

use crate::{AiSuggestion, Result, TaskflowError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    improved_title: Option<String>,
    improved_description: Option<String>,
    reasoning: Option<String>,
}

/// Removes a surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Parses the model's reply into a suggestion with all three fields present.
pub fn parse_suggestion(text: &str) -> Result<AiSuggestion> {
    let raw: RawSuggestion = serde_json::from_str(strip_code_fences(text)).map_err(|e| {
        tracing::warn!(error = %e, "AI reply is not valid JSON");
        TaskflowError::AiMalformedResponse
    })?;

    match (
        non_empty(raw.improved_title),
        non_empty(raw.improved_description),
        non_empty(raw.reasoning),
    ) {
        (Some(improved_title), Some(improved_description), Some(reasoning)) => Ok(AiSuggestion {
            improved_title,
            improved_description,
            reasoning,
        }),
        _ => {
            tracing::warn!("AI reply is missing suggestion fields");
            Err(TaskflowError::AiMalformedResponse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{"improvedTitle":"Leg workout","improvedDescription":"Train legs\n\nSubtasks\n1 Squats","reasoning":"Clearer"}"#;

    #[test]
    fn parses_plain_json() {
        let suggestion = parse_suggestion(REPLY).unwrap();
        assert_eq!(suggestion.improved_title, "Leg workout");
        assert_eq!(suggestion.improved_description, "Train legs\n\nSubtasks\n1 Squats");
        assert_eq!(suggestion.reasoning, "Clearer");
    }

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{REPLY}\n```");
        assert_eq!(parse_suggestion(&fenced).unwrap().reasoning, "Clearer");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = format!("  ```\n{REPLY}\n```  ");
        assert!(parse_suggestion(&fenced).is_ok());
    }

    #[test]
    fn malformed_json_is_generic_error() {
        let err = parse_suggestion("Sure! Here is your task: {").unwrap_err();
        assert!(matches!(err, TaskflowError::AiMalformedResponse));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = parse_suggestion(r#"{"improvedTitle":"A","improvedDescription":"B"}"#).unwrap_err();
        assert!(matches!(err, TaskflowError::AiMalformedResponse));
    }

    #[test]
    fn blank_field_is_rejected() {
        let err = parse_suggestion(
            r#"{"improvedTitle":"A","improvedDescription":"  ","reasoning":"C"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TaskflowError::AiMalformedResponse));
    }
}
