use taskflow::{AiSuggestion, Task};
use time::macros::format_description;
use time::UtcOffset;

pub fn to_local_time(dt: time::OffsetDateTime) -> time::OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

fn format_created(task: &Task) -> String {
    to_local_time(task.created_at)
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| task.created_at.to_string())
}

fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One line per task.
pub fn task_line(task: &Task) -> String {
    format!("{} {:>6}  {}", checkbox(task), task.id, task.title)
}

pub fn task_detail(task: &Task) -> String {
    let status = if task.completed { "completed" } else { "pending" };
    let mut out = format!("{} {}\n", checkbox(task), task.title);
    out.push_str(&format!("id:      {}\n", task.id));
    out.push_str(&format!("status:  {status}\n"));
    out.push_str(&format!("created: {}\n\n", format_created(task)));
    out.push_str(&task.description);
    out
}

pub fn suggestion(suggestion: &AiSuggestion) -> String {
    format!(
        "Suggested title:\n  {}\n\nSuggested description:\n{}\n\nWhy:\n  {}",
        suggestion.improved_title,
        indent(&suggestion.improved_description),
        suggestion.reasoning
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
