use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A terminal task board for a REST task API", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Base URL of the task API, e.g. http://127.0.0.1:8000/api
    #[arg(long, global = true, value_name = "URL", env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Work against an in-memory board filled with sample tasks; takes
    /// precedence over --api-url
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Task(TaskCommand),
    /// Show the three board columns
    Board(BoardArgs),
    /// Summary statistics over all tasks
    Stats,
    /// Create sample tasks through the API
    Seed {
        /// Number of tasks to create
        #[arg(long, default_value_t = taskboard_api::seed::DEFAULT_SEED_COUNT)]
        count: usize,
        /// Delete existing tasks before seeding
        #[arg(long)]
        delete: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks with optional filters
    List(FilterArgs),
    /// Create a new task
    Create(TaskCreateArgs),
    /// Update fields of a task
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: u64,
    },
}

/// Filter and sort options shared by listing commands.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// todo, in_progress or done
    #[arg(long)]
    pub status: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<String>,
    /// Case-insensitive text matched against title and description
    #[arg(long)]
    pub search: Option<String>,
    /// created_at, priority or due_date
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// YYYY-MM-DD, YYYY-MM-DDTHH:MM (local time) or RFC 3339
    #[arg(long)]
    pub due_date: Option<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, conflicts_with = "clear_due_date")]
    pub due_date: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due_date: bool,
}

#[derive(Args)]
pub struct BoardArgs {
    #[arg(long, value_enum, default_value_t = BoardFormat::Json)]
    pub format: BoardFormat,
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BoardFormat {
    Json,
    Text,
    Html,
}
