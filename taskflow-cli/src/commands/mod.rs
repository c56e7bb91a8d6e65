use anyhow::Result;
use std::io::{self, Write};

mod config_path;
mod suggest;
mod tasks;
mod theme;

pub use config_path::print_config_path;
pub use suggest::{print_suggestion, suggest_into_form};
pub use tasks::run_task_command;
pub use theme::show_or_set_theme;

/// Asks a yes/no question on stdin. Anything but "y"/"yes" is a no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
