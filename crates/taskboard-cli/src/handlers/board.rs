use crate::cli::{BoardArgs, BoardFormat};
use crate::context::CliContext;
use crate::output;
use chrono::{Local, Utc};
use taskboard_domain::html::render_board;
use taskboard_domain::{BoardView, TaskStats};

pub async fn handle(ctx: &CliContext, args: BoardArgs) -> anyhow::Result<()> {
    let filters = ctx.filters(&args.filters)?;
    let tasks = ctx.service.load_tasks().await?;
    let now = Utc::now();
    let board = BoardView::build(&tasks, &filters, now);

    match args.format {
        BoardFormat::Json => output::output_success(&board),
        BoardFormat::Html => println!("{}", render_board(&board, &Local)),
        BoardFormat::Text => print!("{}", render_text(&board, &TaskStats::compute(&tasks, now))),
    }
    Ok(())
}

fn render_text(board: &BoardView, stats: &TaskStats) -> String {
    let mut out = format!(
        "Total: {}  To Do: {}  In Progress: {}  Done: {}  Overdue: {}\n",
        stats.total,
        stats.by_status.todo,
        stats.by_status.in_progress,
        stats.by_status.done,
        stats.overdue
    );
    for column in &board.columns {
        out.push_str(&format!("\n{} ({})\n", column.title(), column.count()));
        if column.is_empty() {
            out.push_str("  No tasks here\n");
            continue;
        }
        for card in &column.cards {
            out.push_str(&format!("  #{} [{}] {}", card.id, card.priority, card.title));
            if let Some(due) = card.due_date {
                out.push_str(&format!(
                    "  due {}",
                    due.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ));
                if card.overdue {
                    out.push_str(" OVERDUE");
                }
            }
            out.push('\n');
        }
    }
    out
}
