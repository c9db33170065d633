use crate::context::CliContext;
use crate::output;
use chrono::Utc;
use taskboard_api::seed::seed_tasks;

pub async fn handle(ctx: &CliContext, count: usize, delete: bool) -> anyhow::Result<()> {
    let report = seed_tasks(ctx.service.api().as_ref(), count, delete, Utc::now()).await?;
    output::output_success(report);
    Ok(())
}
