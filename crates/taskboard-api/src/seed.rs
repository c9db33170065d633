//! Sample tasks for local development and offline mode.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use taskboard_core::TaskboardResult;
use taskboard_domain::{Task, TaskDraft, TaskPriority, TaskStatus};

use crate::traits::TaskApi;

pub const DEFAULT_SEED_COUNT: usize = 20;

const TITLES: [&str; 8] = [
    "Write docs",
    "Fix bug",
    "Refactor module",
    "Design API",
    "Code review",
    "Prepare release",
    "Improve tests",
    "Update dependencies",
];

const DESCRIPTIONS: [&str; 5] = [
    "Short task description.",
    "Follow up with the team.",
    "Make sure to cover edge cases.",
    "Coordinate with frontend.",
    "Document the changes in README.",
];

// Weighted pools: priority 2:5:3, status 5:3:2.
const PRIORITY_POOL: [TaskPriority; 10] = [
    TaskPriority::Low,
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::Medium,
    TaskPriority::Medium,
    TaskPriority::Medium,
    TaskPriority::Medium,
    TaskPriority::High,
    TaskPriority::High,
    TaskPriority::High,
];

const STATUS_POOL: [TaskStatus; 10] = [
    TaskStatus::Todo,
    TaskStatus::Todo,
    TaskStatus::Todo,
    TaskStatus::Todo,
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::InProgress,
    TaskStatus::InProgress,
    TaskStatus::Done,
    TaskStatus::Done,
];

/// Builds `count` sample drafts with due dates between five days before
/// and about fifteen days after `now`.
///
/// The sequence is deterministic; every block of ten drafts follows the
/// pool weights exactly.
pub fn sample_drafts(count: usize, now: DateTime<Utc>) -> Vec<TaskDraft> {
    (0..count)
        .map(|i| {
            let days = (i * 11 % 21) as i64 - 5;
            let hours = (i * 5 % 9) as i64;
            TaskDraft {
                title: TITLES[i % TITLES.len()].to_string(),
                description: DESCRIPTIONS[i * 2 % DESCRIPTIONS.len()].to_string(),
                priority: PRIORITY_POOL[(i * 7 + 3) % PRIORITY_POOL.len()],
                status: STATUS_POOL[i * 3 % STATUS_POOL.len()],
                due_date: Some(now + Duration::days(days) + Duration::hours(hours)),
            }
        })
        .collect()
}

/// Sample tasks with ids and creation times, for an in-memory board.
pub fn sample_tasks(count: usize, now: DateTime<Utc>) -> Vec<Task> {
    sample_drafts(count, now)
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            // Spread creation times so newest-first ordering is visible.
            let created = now - Duration::minutes((count - i) as i64 * 37);
            Task {
                id: i as u64 + 1,
                title: draft.title,
                description: Some(draft.description),
                priority: draft.priority,
                status: draft.status,
                due_date: draft.due_date,
                created_at: Some(created),
                updated_at: Some(created),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub deleted: usize,
    pub created: usize,
}

/// Creates sample tasks through the API, optionally deleting every existing
/// task first. Stops at the first failed request.
pub async fn seed_tasks(
    api: &dyn TaskApi,
    count: usize,
    delete_existing: bool,
    now: DateTime<Utc>,
) -> TaskboardResult<SeedReport> {
    let mut report = SeedReport::default();

    if delete_existing {
        for task in api.list().await? {
            api.delete(task.id).await?;
            report.deleted += 1;
        }
        tracing::warn!("Deleted {} existing tasks", report.deleted);
    }

    for draft in sample_drafts(count, now) {
        api.create(&draft).await?;
        report.created += 1;
    }
    tracing::info!("Created {} tasks", report.created);

    Ok(report)
}
