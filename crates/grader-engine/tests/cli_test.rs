use chrono::NaiveDate;
use grader_engine::cli::{self, CliError, Console, Flow, ScriptSummary};
use grader_engine::common::FormState;
use grader_engine::executor::{ExecutorError, FormExecutor};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Console that records what would have been shown.
#[derive(Default)]
struct Captured {
    printed: Vec<String>,
    errors: Vec<String>,
}

impl Console for Captured {
    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

fn script(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", lines).unwrap();
    file
}

fn executor(dir: &TempDir) -> FormExecutor {
    let form = FormState::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    FormExecutor::with_form(form, dir.path().join("exports"))
}

#[tokio::test]
async fn test_script_saves_and_exports() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();
    let file = script(
        "# morning list\n\
         name Jane Doe\n\
         grader Dr. Smith\n\
         \n\
         entry 2 comment \"knot, square\"\n\
         save\n\
         export\n",
    );

    let summary = cli::run_file(&mut ex, &mut console, file.path(), false)
        .await
        .expect("script should run");

    assert_eq!(
        summary,
        ScriptSummary {
            executed: 5,
            failed_lines: vec![],
        }
    );
    assert!(console.errors.is_empty());
    assert!(console.printed.iter().any(|l| l == "Entry saved successfully!"));

    let csv = std::fs::read_to_string(
        dir.path()
            .join("exports")
            .join("Jane_Doe_Dr._Smith_2024_03_05.csv"),
    )
    .unwrap();
    assert!(csv.contains("Comment 2,\"knot, square\"\n"));
    assert!(!csv.contains("Comment 1"));
}

#[tokio::test]
async fn test_script_stops_on_first_error_with_line_number() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();
    let file = script("# header\nname Jane\nsave\ngrader X\nsave\n");

    let err = cli::run_file(&mut ex, &mut console, file.path(), false)
        .await
        .unwrap_err();

    match err {
        CliError::Line { line, text, source } => {
            assert_eq!(line, 3);
            assert_eq!(text, "save");
            assert!(matches!(source, ExecutorError::Validation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ex.store().is_empty());
    assert_eq!(ex.form().grader, "");
}

#[tokio::test]
async fn test_script_keeps_going_when_asked() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();
    let file = script("export\nname Jane\nsave\ngrader X\nsave\n");

    let summary = cli::run_file(&mut ex, &mut console, file.path(), true)
        .await
        .unwrap();

    assert_eq!(summary.executed, 5);
    assert_eq!(summary.failed_lines, vec![1, 3]);
    assert_eq!(console.errors.len(), 2);
    assert!(console.errors[0].starts_with("line 1: No data to export."));
    assert_eq!(ex.store().len(), 1);
}

#[tokio::test]
async fn test_missing_script_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();

    let err = cli::run_file(&mut ex, &mut console, &dir.path().join("none.txt"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

#[tokio::test]
async fn test_console_input_and_exit() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();

    assert_eq!(cli::handle_input(&mut ex, &mut console, "   ").await, Flow::Continue);
    assert!(console.printed.is_empty());

    assert_eq!(
        cli::handle_input(&mut ex, &mut console, " grader Dr. Who ").await,
        Flow::Continue
    );
    assert_eq!(console.printed, vec!["Grader: Dr. Who".to_string()]);

    assert_eq!(cli::handle_input(&mut ex, &mut console, "save").await, Flow::Continue);
    assert_eq!(
        console.errors,
        vec!["Please enter the Name and Grader information.".to_string()]
    );

    assert_eq!(cli::handle_input(&mut ex, &mut console, "QUIT").await, Flow::Quit);
    assert_eq!(cli::handle_input(&mut ex, &mut console, "exit").await, Flow::Quit);
}

#[tokio::test]
async fn test_prompt_tracks_form_and_session() {
    let dir = TempDir::new().unwrap();
    let mut ex = executor(&dir);
    let mut console = Captured::default();

    assert_eq!(cli::prompt(&ex, "> "), "[GJ | 7 entries | 0 saved] > ");

    for line in ["procedure HJ", "add-entry", "name A", "grader B", "save"] {
        cli::handle_input(&mut ex, &mut console, line).await;
    }
    assert!(console.errors.is_empty());
    assert_eq!(cli::prompt(&ex, "> "), "[HJ | 8 entries | 1 saved] > ");
}
