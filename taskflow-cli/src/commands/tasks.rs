use anyhow::{Context, Result};
use taskflow::ai::AiSettings;
use taskflow::api::TaskApi;
use taskflow::{Task, TaskForm, TaskStore};

use super::{confirm, suggest_into_form};
use crate::cli::{Commands, StatusFilter};
use crate::output;

/// Runs one of the commands that talk to the task backend.
pub async fn run_task_command<A: TaskApi>(
    command: Commands,
    store: &mut TaskStore<A>,
    ai: AiSettings,
) -> Result<()> {
    match command {
        Commands::List { status } => list(store, status).await,
        Commands::Show { id } => {
            let task = store.fetch_one(&id).await?;
            println!("{}", output::task_detail(&task));
            Ok(())
        }
        Commands::Add {
            title,
            description,
            suggest,
            yes,
        } => {
            let mut form = TaskForm::new(title, description);
            if suggest {
                suggest_into_form(ai, &mut form, yes).await?;
            }
            let task = store.add(&form).await.context("Could not create the task")?;
            println!("Task created.\n\n{}", output::task_detail(&task));
            Ok(())
        }
        Commands::Edit {
            id,
            title,
            description,
            suggest,
            yes,
        } => {
            let current = store.fetch_one(&id).await?;
            let mut form = edit_form(&current, title, description);
            if suggest {
                suggest_into_form(ai, &mut form, yes).await?;
            }
            if form == TaskForm::from_task(&current) {
                println!("Nothing to change.");
                return Ok(());
            }
            let task = store
                .edit(&id, &form)
                .await
                .context("Could not update the task")?;
            println!("Task updated.\n\n{}", output::task_detail(&task));
            Ok(())
        }
        Commands::Toggle { id } => {
            store.fetch_one(&id).await?;
            let task = store.toggle(&id).await?;
            let state = if task.completed { "completed" } else { "pending" };
            println!("Marked as {state}: {}", output::task_line(&task));
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let task = store.fetch_one(&id).await?;
            println!("{}", output::task_line(&task));
            if !yes && !confirm("Delete this task? This cannot be undone.")? {
                println!("Nothing deleted.");
                return Ok(());
            }
            store
                .remove(&id)
                .await
                .context("Could not delete the task")?;
            println!("Task deleted.");
            Ok(())
        }
        other => anyhow::bail!("{other:?} does not use the task backend"),
    }
}

async fn list<A: TaskApi>(store: &mut TaskStore<A>, status: StatusFilter) -> Result<()> {
    store.fetch().await.context("Could not load tasks")?;

    let tasks: Vec<&Task> = match status {
        StatusFilter::All => store.tasks().iter().collect(),
        StatusFilter::Pending => store.pending().collect(),
        StatusFilter::Completed => store.completed().collect(),
    };

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    for task in &tasks {
        println!("{}", output::task_line(task));
    }
    println!(
        "\n{} of {} completed",
        store.completed().count(),
        store.tasks().len()
    );
    Ok(())
}

/// Starts from the saved task and overrides the fields given on the command line.
fn edit_form(task: &Task, title: Option<String>, description: Option<String>) -> TaskForm {
    let mut form = TaskForm::from_task(task);
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    form
}
