use clap::Parser;
use grader_engine::cli::{self, StdConsole};
use grader_engine::config::{ConfigLoader, GraderConfig};
use grader_engine::executor::FormExecutor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grader", version, about = "OSATS surgical grading recorder")]
struct Args {
    /// Config file (defaults to ./grader.yaml, then ~/.grader/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script of form commands to execute (non-interactive mode)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Directory exported CSV files are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Keep executing a script after a failing line
    #[arg(long)]
    keep_going: bool,
}

async fn load_config(args: &Args) -> anyhow::Result<GraderConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };
    if let Some(dir) = &args.export_dir {
        config.export.output_dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the form's output channel.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args).await?;
    tracing::debug!(?config, "configuration loaded");

    let mut executor = FormExecutor::new(&config);
    let mut console = StdConsole;

    if let Some(file_path) = &args.file {
        let summary = cli::run_file(&mut executor, &mut console, file_path, args.keep_going)
            .await
            .map_err(|e| anyhow::anyhow!("Error executing {}: {}", file_path.display(), e))?;
        if !summary.failed_lines.is_empty() {
            anyhow::bail!(
                "{} of {} line(s) failed in {} (lines {:?})",
                summary.failed_lines.len(),
                summary.executed,
                file_path.display(),
                summary.failed_lines
            );
        }
        return Ok(());
    }

    let saved = cli::run_repl(&mut executor, &mut console, &config.repl)
        .await
        .map_err(|e| anyhow::anyhow!("Error during session: {}", e))?;

    println!(
        "Session closed ({} record(s) saved). Unexported records are discarded.",
        saved
    );
    Ok(())
}
