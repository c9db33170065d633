use chrono::Utc;
use std::sync::Arc;
use taskboard_api::seed::{sample_tasks, DEFAULT_SEED_COUNT};
use taskboard_api::{HttpTaskApi, InMemoryTaskApi, TaskApi, TaskService};
use taskboard_core::{AppConfig, TaskboardResult};
use taskboard_domain::{FilterState, SortField};

use crate::cli::{Cli, FilterArgs};
use crate::handlers::{parse_priority, parse_status};

/// Resolved settings shared by every command.
pub struct CliContext {
    pub service: TaskService,
    pub config: AppConfig,
}

impl CliContext {
    /// Picks the task API from flags, environment and config file, in that
    /// order of precedence.
    pub fn from_cli(cli: &Cli, config: AppConfig) -> TaskboardResult<Self> {
        let api: Arc<dyn TaskApi> = if cli.offline {
            tracing::info!("Using in-memory task API with sample tasks");
            Arc::new(InMemoryTaskApi::with_tasks(sample_tasks(
                DEFAULT_SEED_COUNT,
                Utc::now(),
            )))
        } else {
            let base_url = cli
                .api_url
                .as_deref()
                .unwrap_or_else(|| config.effective_api_base_url());
            tracing::debug!("Using task API at {}", base_url);
            Arc::new(HttpTaskApi::new(base_url)?)
        };

        Ok(Self {
            service: TaskService::new(api),
            config,
        })
    }

    pub fn filters(&self, args: &FilterArgs) -> TaskboardResult<FilterState> {
        let sort = args
            .sort
            .as_deref()
            .unwrap_or_else(|| self.config.effective_default_sort());

        Ok(FilterState {
            status: args.status.as_deref().map(parse_status).transpose()?,
            priority: args.priority.as_deref().map(parse_priority).transpose()?,
            search: args.search.clone().unwrap_or_default().to_lowercase(),
            sort_by: sort.parse::<SortField>()?,
        })
    }
}
