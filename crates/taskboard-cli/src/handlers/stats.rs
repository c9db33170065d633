use crate::context::CliContext;
use crate::output;
use chrono::Utc;
use taskboard_domain::TaskStats;

pub async fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    let tasks = ctx.service.load_tasks().await?;
    output::output_success(TaskStats::compute(&tasks, Utc::now()));
    Ok(())
}
