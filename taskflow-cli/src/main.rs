mod cli;
mod commands;
mod config;
mod output;
mod theme_store;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::TaskflowConfig;
use taskflow::api::{HttpTaskApi, MemoryTaskApi};
use taskflow::TaskStore;
use theme_store::ThemeStore;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "taskflow=debug,taskflow_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::ConfigPath => commands::print_config_path(),
        Commands::Theme { name } => commands::show_or_set_theme(&ThemeStore::new()?, name),
        Commands::Suggest { title, description } => {
            let cfg = TaskflowConfig::load()?;
            commands::print_suggestion(cfg.ai_settings(), &title, &description).await
        }
        command => {
            let cfg = TaskflowConfig::load()?;
            if cli.dev {
                let mut store = TaskStore::new(MemoryTaskApi::seeded());
                commands::run_task_command(command, &mut store, cfg.ai_settings()).await
            } else {
                let api = HttpTaskApi::new(&cfg.api_url, cfg.request_timeout())?;
                tracing::debug!(api_url = %api.base_url(), "using task backend");
                let mut store = TaskStore::new(api);
                commands::run_task_command(command, &mut store, cfg.ai_settings()).await
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
