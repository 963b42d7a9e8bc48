//! Line-oriented interactive board.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use taskboard_app::{BoardError, LoadState, TaskBoard};
use taskboard_core::{
    Clock, DescriptionPatch, DueDatePatch, ListId, ListSelector, NewTask, Priority, TaskId,
    TaskPatch, due_date,
};
use taskboard_store::AsyncTaskStore;
use time::Date;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::render;

const PROMPT: &str = "taskboard> ";

/// One shell input line.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    verb: Verb,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Verb {
    /// Create a task.
    Add {
        /// Title words.
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long, value_parser = due_date::parse)]
        due: Option<Date>,
        #[arg(short, long)]
        list: Option<ListId>,
    },
    /// Show the display list.
    Ls,
    /// Set the search text; no words clears it.
    Search { words: Vec<String> },
    /// Switch to `all`, `today` or a list id.
    Select { selector: ListSelector },
    /// Toggle completion.
    Done { id: TaskId },
    /// Delete a task.
    Rm { id: TaskId },
    /// Change task fields.
    Edit {
        id: TaskId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(long, value_parser = due_date::parse, conflicts_with = "clear_due")]
        due: Option<Date>,
        #[arg(long)]
        clear_due: bool,
        #[arg(short, long)]
        list: Option<ListId>,
    },
    /// Show one task.
    Show { id: TaskId },
    /// Show selectors with counts.
    Lists,
    /// Show counters.
    Stats,
    /// Fetch everything again.
    #[command(alias = "retry")]
    Reload,
    /// Show keyboard shortcuts.
    Keys,
    /// Show this help.
    Help,
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

fn edit_patch(
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    priority: Option<Priority>,
    due: Option<Date>,
    clear_due: bool,
    list: Option<ListId>,
) -> TaskPatch {
    TaskPatch {
        title,
        description: if clear_description {
            Some(DescriptionPatch::Clear)
        } else {
            description.map(|description| DescriptionPatch::Set { description })
        },
        priority,
        due_date: if clear_due {
            Some(DueDatePatch::Clear)
        } else {
            due.map(|date| DueDatePatch::Set { date })
        },
        list_id: list,
        completed: None,
    }
}

/// Parse one line into a shell command. Blank lines yield `Ok(None)`.
///
/// # Errors
/// Returns an error for unbalanced quotes or unknown verbs and arguments.
pub fn parse_line(line: &str) -> Result<Option<ShellLine>> {
    let words = shell_words::split(line).context("cannot split input line")?;
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words)
        .map(Some)
        .map_err(|err| anyhow::anyhow!(err.render().to_string()))
}

enum Flow {
    Continue,
    Quit,
}

/// Drives a [`TaskBoard`] from line input until `quit` or end of input.
pub struct Shell<S, C, W> {
    board: TaskBoard<S, C>,
    out: W,
}

impl<S: AsyncTaskStore, C: Clock, W: Write> Shell<S, C, W> {
    pub const fn new(board: TaskBoard<S, C>, out: W) -> Self {
        Self { board, out }
    }

    /// Load the board, then execute lines from `input`.
    ///
    /// # Errors
    /// Returns an error when reading input or writing output fails. Board
    /// failures are printed as notices and do not end the session.
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, input: R) -> Result<W> {
        writeln!(self.out, "Loading tasks...")?;
        self.reload().await?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await.context("failed to read input")? else {
                break;
            };
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(ShellLine { verb })) => {
                    if matches!(self.execute(verb).await?, Flow::Quit) {
                        break;
                    }
                }
                Err(err) => writeln!(self.out, "{err}")?,
            }
        }
        Ok(self.out)
    }

    async fn reload(&mut self) -> Result<()> {
        let result = if matches!(self.board.state().load_state(), LoadState::Failed { .. }) {
            self.board.retry().await
        } else {
            self.board.load().await
        };
        settle("reload", result);
        self.flush_notices()?;
        if let LoadState::Failed { message } = self.board.state().load_state() {
            writeln!(self.out, "{message}")?;
            writeln!(self.out, "Type `reload` to try again.")?;
        } else {
            self.print_table()?;
        }
        Ok(())
    }

    async fn execute(&mut self, verb: Verb) -> Result<Flow> {
        match verb {
            Verb::Add {
                title,
                description,
                priority,
                due,
                list,
            } => {
                let mut input = NewTask::new(title.join(" ")).with_priority(priority);
                input.description = description;
                input.due_date = due;
                if let Some(list) = list {
                    input = input.with_list(list);
                }
                settle("add", self.board.create(input).await);
            }
            Verb::Ls => self.print_table()?,
            Verb::Search { words } => {
                self.board.set_query(words.join(" "));
                self.print_table()?;
            }
            Verb::Select { selector } => {
                self.board.select(selector);
                self.print_table()?;
            }
            Verb::Done { id } => {
                settle("done", self.board.toggle_complete(&id).await);
            }
            Verb::Rm { id } => {
                settle("rm", self.board.delete(&id).await);
            }
            Verb::Edit {
                id,
                title,
                description,
                clear_description,
                priority,
                due,
                clear_due,
                list,
            } => {
                let patch = edit_patch(
                    title,
                    description,
                    clear_description,
                    priority,
                    due,
                    clear_due,
                    list,
                );
                if patch.is_empty() {
                    writeln!(self.out, "Nothing to change.")?;
                } else {
                    settle("edit", self.board.edit(&id, &patch).await);
                }
            }
            Verb::Show { id } => {
                let today = self.board.today();
                let state = self.board.state();
                let detail = state.task(&id).map_or_else(
                    || format!("No task with id {id}.\n"),
                    |task| render::task_detail(task, state, today),
                );
                write!(self.out, "{detail}")?;
            }
            Verb::Lists => {
                let table = render::list_table(self.board.state(), self.board.today());
                write!(self.out, "{table}")?;
            }
            Verb::Stats => write!(self.out, "{}", render::stats(self.board.counts()))?,
            Verb::Reload => self.reload().await?,
            Verb::Keys => write!(self.out, "{}", render::keys())?,
            Verb::Help => {
                let help = ShellLine::command().render_help();
                writeln!(self.out, "{help}")?;
            }
            Verb::Quit => return Ok(Flow::Quit),
        }
        self.flush_notices()?;
        Ok(Flow::Continue)
    }

    fn print_table(&mut self) -> Result<()> {
        let table = render::task_table(self.board.state(), self.board.today());
        write!(self.out, "{table}")?;
        Ok(())
    }

    fn flush_notices(&mut self) -> Result<()> {
        for notice in self.board.take_notices() {
            writeln!(self.out, "{}", render::notice(&notice))?;
        }
        Ok(())
    }
}

/// Log a failed board call. The user already sees it as a notice.
fn settle<T>(verb: &'static str, result: Result<T, BoardError>) -> Option<T> {
    result
        .map_err(|err| debug!(verb, %err, "board operation failed"))
        .ok()
}
