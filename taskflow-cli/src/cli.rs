use clap::{Parser, Subcommand, ValueEnum};

use crate::theme_store::ThemeName;

#[derive(Debug, Parser)]
#[command(name = "taskflow")]
#[command(about = "Manage tasks on a TaskFlow server, with optional AI rewrites")]
pub struct Cli {
    /// Use local in-memory sample data instead of the server
    #[arg(long, global = true)]
    pub dev: bool,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List tasks
    List {
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },
    /// Show one task
    Show { id: String },
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Ask the AI for a better title and description first
        #[arg(long)]
        suggest: bool,
        /// Apply the suggestion without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Edit a task's title and/or description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Ask the AI for a better title and description first
        #[arg(long)]
        suggest: bool,
        /// Apply the suggestion without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a task as completed, or as pending again
    Toggle { id: String },
    /// Delete a task. This cannot be undone
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print an AI rewrite of a title and description without saving anything
    Suggest {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show or change the saved theme
    Theme { name: Option<ThemeName> },
    /// Print config path and create default file if missing
    ConfigPath,
}
