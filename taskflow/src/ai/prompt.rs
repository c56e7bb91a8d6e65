/// Sent in place of an empty description so the model still gets some context.
pub const EMPTY_DESCRIPTION: &str = "No description";

/// Builds the rewrite instruction for one task.
pub fn build_prompt(title: &str, description: &str) -> String {
    let description = if description.trim().is_empty() {
        EMPTY_DESCRIPTION
    } else {
        description
    };

    format!(
        r#"You are an expert assistant in productivity and task management.

A user has created the following task:

TITLE: "{title}"
DESCRIPTION: "{description}"

Help improve this task by providing:

1. Improved title: a clearer, concise and actionable title (at most 50 characters)
2. Improved description: a detailed description with the main context and a numbered list of specific subtasks at the end (at most 300 characters)
3. Reasoning: a short explanation of why you made these suggestions

DESCRIPTION FORMAT:
- First write a paragraph with the general context of the task
- Then add a blank line
- Then write "Subtasks" followed by a line break
- List the numbered subtasks (1, 2, 3 and so on), one per line

EXAMPLE OF AN IMPROVED DESCRIPTION:
"Do the weekly household shopping including fresh food and cleaning products

Subtasks
1 Check the pantry and write a list
2 Look for supermarket deals
3 Do the shopping
4 Put the products away at home"

IMPORTANT RULES:
- In the title and description use only letters, numbers, spaces and line breaks, with no punctuation
- Keep the language of the original task
- Keep a professional but friendly tone
- Subtasks must be actionable and specific
- If the original title or description is already good, make subtle improvements

Reply ONLY with valid JSON using exactly this structure:
{{
  "improvedTitle": "your improved title here",
  "improvedDescription": "your improved description here including the subtasks",
  "reasoning": "your short explanation here"
}}

Do NOT add any text outside the JSON. Only the raw JSON."#
    )
}
