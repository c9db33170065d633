use crate::cli::{TaskAction, TaskCreateArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_api::MutationOutcome;
use taskboard_core::TaskboardResult;
use taskboard_domain::{filter_tasks, sort_tasks, FieldUpdate, TaskDraft, TaskPatch};

use super::{parse_datetime, parse_priority, parse_status};

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::List(args) => {
            let filters = ctx.filters(&args)?;
            let tasks = ctx.service.load_tasks().await?;
            let mut visible = filter_tasks(&tasks, &filters);
            sort_tasks(&mut visible, filters.sort_by);
            output::output_list(visible);
        }
        TaskAction::Create(args) => {
            let draft = build_draft(&args)?;
            let outcome = ctx.service.create_task(draft).await?;
            report_reload(&outcome);
            output::output_success(&outcome.task);
        }
        TaskAction::Update(args) => {
            let patch = build_patch(&args)?;
            if patch.is_empty() {
                output::output_error("Nothing to update: pass at least one field");
            }
            let outcome = ctx.service.update_task(args.id, patch).await?;
            report_reload(&outcome);
            output::output_success(&outcome.task);
        }
        TaskAction::Delete { id } => {
            let outcome = ctx.service.delete_task(id).await?;
            report_reload(&outcome);
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}

// The mutation itself succeeded, so a failed reload is only logged.
fn report_reload(outcome: &MutationOutcome) {
    match &outcome.reload {
        Ok(tasks) => tracing::debug!("{} ({} tasks)", outcome.message, tasks.len()),
        Err(e) => tracing::warn!("{} but reloading tasks failed: {}", outcome.message, e),
    }
}

fn build_draft(args: &TaskCreateArgs) -> TaskboardResult<TaskDraft> {
    let mut draft = TaskDraft::new(args.title.trim());
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(priority) = &args.priority {
        draft.priority = parse_priority(priority)?;
    }
    if let Some(status) = &args.status {
        draft.status = parse_status(status)?;
    }
    draft.due_date = args.due_date.as_deref().map(parse_datetime).transpose()?;
    Ok(draft)
}

fn build_patch(args: &TaskUpdateArgs) -> TaskboardResult<TaskPatch> {
    Ok(TaskPatch {
        title: args.title.as_ref().map(|t| t.trim().to_string()),
        description: args.description.clone(),
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        status: args.status.as_deref().map(parse_status).transpose()?,
        due_date: if args.clear_due_date {
            FieldUpdate::Clear
        } else {
            match &args.due_date {
                Some(d) => FieldUpdate::Set(parse_datetime(d)?),
                None => FieldUpdate::NoChange,
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_domain::{TaskPriority, TaskStatus};

    fn update_args() -> TaskUpdateArgs {
        TaskUpdateArgs {
            id: 1,
            title: None,
            description: None,
            priority: None,
            status: None,
            due_date: None,
            clear_due_date: false,
        }
    }

    #[test]
    fn test_build_patch_only_given_fields() {
        let mut args = update_args();
        args.status = Some("done".to_string());
        let patch = build_patch(&args).unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Done));
        assert!(patch.title.is_none());
        assert_eq!(patch.due_date, FieldUpdate::NoChange);
    }

    #[test]
    fn test_build_patch_clear_due_date() {
        let mut args = update_args();
        args.clear_due_date = true;
        assert_eq!(build_patch(&args).unwrap().due_date, FieldUpdate::Clear);
        assert!(build_patch(&update_args()).unwrap().is_empty());
    }

    #[test]
    fn test_build_draft_defaults() {
        let args = TaskCreateArgs {
            title: " Write docs ".to_string(),
            description: None,
            priority: Some("high".to_string()),
            status: None,
            due_date: None,
        };
        let draft = build_draft(&args).unwrap();
        assert_eq!(draft.title, "Write docs");
        assert_eq!(draft.priority, TaskPriority::High);
        assert_eq!(draft.status, TaskStatus::Todo);
        assert_eq!(draft.description, "");
    }
}
