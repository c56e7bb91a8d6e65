use anyhow::Result;
use taskflow::ai::{AiSettings, GeminiClient};
use taskflow::TaskForm;

use super::confirm;
use crate::output;

pub async fn print_suggestion(settings: AiSettings, title: &str, description: &str) -> Result<()> {
    let client = GeminiClient::new(settings)?;
    let suggestion = client.suggest_improvements(title, description).await?;
    println!("{}", output::suggestion(&suggestion));
    Ok(())
}

/// Asks the AI to rewrite `form` and applies the result once accepted.
/// Returns whether the form changed.
pub async fn suggest_into_form(settings: AiSettings, form: &mut TaskForm, yes: bool) -> Result<bool> {
    let client = GeminiClient::new(settings)?;
    println!("Asking {} for suggestions...", client.model());
    let suggestion = client
        .suggest_improvements(&form.title, &form.description)
        .await?;

    println!("{}\n", output::suggestion(&suggestion));
    if !yes && !confirm("Apply suggestion?")? {
        println!("Keeping your original text.");
        return Ok(false);
    }

    form.apply_suggestion(&suggestion);
    println!("Suggestion applied.");
    Ok(true)
}
