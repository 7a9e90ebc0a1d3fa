//! Console front end for the grading form: the interactive session and the
//! script runner behind `--file`.

use crate::config::schema::ReplConfig;
use crate::executor::{ExecutorError, FormExecutor};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

pub const BANNER: &[&str] = &[
    "Surgical Grading. Fill in the form, then 'save' and 'export'.",
    "Example: name \"Jane Doe\", entry 1 time 08:15:00, score \"Time and motion\" 4",
    "Type 'help' for all commands, 'exit' or 'quit' to close.",
];

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Where command results and errors are shown.
pub trait Console {
    fn print(&mut self, text: &str);
    fn error(&mut self, text: &str);
}

/// Both channels go to stdout so errors stay next to the prompt they answer.
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        println!("Error: {}", text);
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line} ('{text}'): {source}")]
    Line {
        line: usize,
        text: String,
        source: ExecutorError,
    },
}

/// Outcome of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Command lines executed, failed ones included.
    pub executed: usize,
    /// 1-based line numbers that failed.
    pub failed_lines: Vec<usize>,
}

/// Run a script of form commands. Blank lines and `#` comments are skipped.
///
/// Without `keep_going` the first failing line aborts the run with
/// [`CliError::Line`]; otherwise failures are reported and collected.
pub async fn run_file(
    executor: &mut FormExecutor,
    console: &mut impl Console,
    path: &Path,
    keep_going: bool,
) -> Result<ScriptSummary, CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    let mut summary = ScriptSummary::default();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        summary.executed += 1;

        match executor.execute_line(line).await {
            Ok(result) => console.print(&result.output),
            Err(source) => {
                let number = idx + 1;
                if !keep_going {
                    return Err(CliError::Line {
                        line: number,
                        text: line.to_string(),
                        source,
                    });
                }
                console.error(&format!("line {}: {}", number, source));
                warn!(line = number, "script line failed, continuing");
                summary.failed_lines.push(number);
            }
        }
    }

    Ok(summary)
}

/// Whether the session keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Prompt carrying the procedure, slot count and saved-record count.
pub fn prompt(executor: &FormExecutor, base: &str) -> String {
    format!(
        "[{} | {} entries | {} saved] {}",
        executor.form().procedure,
        executor.form().entry_count(),
        executor.store().len(),
        base
    )
}

/// Handle one line typed at the console.
pub async fn handle_input(
    executor: &mut FormExecutor,
    console: &mut impl Console,
    input: &str,
) -> Flow {
    let input = input.trim();
    if input.is_empty() {
        return Flow::Continue;
    }
    if EXIT_COMMANDS.iter().any(|c| c.eq_ignore_ascii_case(input)) {
        return Flow::Quit;
    }

    match executor.execute_line(input).await {
        Ok(result) => console.print(&result.output),
        Err(err) => console.error(&err.to_string()),
    }
    Flow::Continue
}

/// Interactive session on stdin. Returns the number of records saved when it closes.
pub async fn run_repl(
    executor: &mut FormExecutor,
    console: &mut impl Console,
    config: &ReplConfig,
) -> Result<usize, CliError> {
    for line in BANNER {
        console.print(line);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}", prompt(executor, &config.prompt));
        stdout.flush()?;

        let next = if config.handle_ctrl_c {
            tokio::select! {
                line = lines.next_line() => line,
                _ = tokio::signal::ctrl_c() => {
                    console.print("");
                    Ok(None)
                }
            }
        } else {
            lines.next_line().await
        };

        // EOF or Ctrl-C
        let Some(input) = next? else {
            break;
        };
        if handle_input(executor, console, &input).await == Flow::Quit {
            break;
        }
    }

    let saved = executor.store().len();
    info!(saved, "session closed");
    Ok(saved)
}
