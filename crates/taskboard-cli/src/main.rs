mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, FilterArgs};
use context::CliContext;
use taskboard_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Debug logs go to `TASKBOARD_DEBUG_LOG` when set. Otherwise one-shot
/// commands log to stderr and the interactive board logs nothing, since
/// stderr would draw over the terminal screen.
fn init_tracing(interactive: bool) -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else if !interactive {
        let filter = EnvFilter::try_from_env("TASKBOARD_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Task(task_cmd) => handlers::task::handle(ctx, task_cmd.action).await,
        Commands::Board(args) => handlers::board::handle(ctx, args).await,
        Commands::Stats => handlers::stats::handle(ctx).await,
        Commands::Seed { count, delete } => handlers::seed::handle(ctx, count, delete).await,
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none())?;

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = match CliContext::from_cli(&cli, AppConfig::load()) {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&e.to_string()),
    };

    match cli.command {
        None => {
            let filters = ctx.filters(&FilterArgs::default())?;
            taskboard_tui::run(ctx.service, filters).await?;
        }
        Some(command) => {
            if let Err(e) = dispatch(&ctx, command).await {
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}
