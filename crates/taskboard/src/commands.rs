use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use taskboard_app::TaskBoard;
use taskboard_core::{Clock, ListSelector};
use taskboard_store::AsyncTaskStore;

use crate::render;

/// Output format for `ls`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LsFormat {
    /// One line per task.
    #[default]
    Table,
    /// JSON array of tasks in display order.
    Json,
}

/// Print the display list for `selector` and `search`.
///
/// # Errors
/// Returns an error when the board cannot be loaded or output fails.
pub async fn ls<S: AsyncTaskStore, C: Clock>(
    board: &mut TaskBoard<S, C>,
    selector: Option<ListSelector>,
    search: Option<String>,
    format: LsFormat,
    out: &mut impl Write,
) -> Result<()> {
    board.load().await?;
    if let Some(selector) = selector {
        board.select(selector);
    }
    if let Some(search) = search {
        board.set_query(search);
    }

    match format {
        LsFormat::Table => write!(out, "{}", render::task_table(board.state(), board.today()))?,
        LsFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &board.display_tasks())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print every selector with its task count.
///
/// # Errors
/// Returns an error when the board cannot be loaded or output fails.
pub async fn lists<S: AsyncTaskStore, C: Clock>(
    board: &mut TaskBoard<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    board.load().await?;
    write!(out, "{}", render::list_table(board.state(), board.today()))?;
    Ok(())
}

/// Print board counters.
///
/// # Errors
/// Returns an error when the board cannot be loaded or output fails.
pub async fn stats<S: AsyncTaskStore, C: Clock>(
    board: &mut TaskBoard<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    board.load().await?;
    write!(out, "{}", render::stats(board.counts()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskboard_core::{FixedClock, ListId, Task};
    use taskboard_store::{Latency, MemoryTaskStore, Seed};
    use time::macros::datetime;

    type Board = TaskBoard<MemoryTaskStore<Arc<FixedClock>>, Arc<FixedClock>>;

    fn board() -> Board {
        let clock = Arc::new(FixedClock::new(datetime!(2024-01-15 09:00 UTC)));
        let seed = Seed::builtin().unwrap_or_else(|err| panic!("seed: {err}"));
        let store = MemoryTaskStore::new(seed)
            .with_latency(Latency::none())
            .with_clock(Arc::clone(&clock));
        TaskBoard::new(store, clock, ListSelector::All)
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap_or_else(|err| panic!("utf8: {err}"))
    }

    #[tokio::test]
    async fn ls_filters_by_list_in_display_order() {
        let mut board = board();
        let mut out = Vec::new();
        let result = ls(
            &mut board,
            Some(ListSelector::List(ListId::from("work"))),
            None,
            LsFormat::Table,
            &mut out,
        )
        .await;
        assert!(result.is_ok());
        let out = text(out);
        let ids: Vec<&str> = out
            .lines()
            .filter_map(|line| line.split_whitespace().nth(1))
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn ls_json_emits_wire_records() {
        let mut board = board();
        let mut out = Vec::new();
        let result = ls(
            &mut board,
            None,
            Some("passport".into()),
            LsFormat::Json,
            &mut out,
        )
        .await;
        assert!(result.is_ok());
        let tasks: Vec<Task> =
            serde_json::from_slice(&out).unwrap_or_else(|err| panic!("json: {err}"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "6");
        assert!(text(out).contains("\"dueDate\": \"2024-02-01\""));
    }

    #[tokio::test]
    async fn stats_counts_the_seed() {
        let mut board = board();
        let mut out = Vec::new();
        assert!(stats(&mut board, &mut out).await.is_ok());
        assert_eq!(text(out), "total: 6  completed: 1  due today: 1\n");
    }

    #[tokio::test]
    async fn lists_marks_the_active_selector() {
        let mut board = board();
        let mut out = Vec::new();
        assert!(lists(&mut board, &mut out).await.is_ok());
        let out = text(out);
        assert!(out.starts_with("* all       (6)"));
        assert!(out.contains("  work  Work (2)"));
    }
}
