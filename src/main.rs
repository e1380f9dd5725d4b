//! CLI entry point for the quiz dashboard.
//!
//! Loads the published quiz-result and question CSVs, then prints one
//! student's dashboard or lists the students present in the data.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use quiz_dashboard::{
    config::DashboardConfig,
    dashboard::Dashboard,
    fetch::BasicClient,
    output::{print_pretty, render_json, render_text, write_tables},
    store::DataStore,
};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quiz_dashboard")]
#[command(about = "Per-student quiz and practice-test reporting from published CSVs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Sources {
    /// Quiz results CSV (URL or path). Defaults to $QUIZ_DATA_URL
    #[arg(long)]
    quiz_url: Option<String>,

    /// Question detail CSV (URL or path). Defaults to $QUESTION_DATA_URL
    #[arg(long)]
    question_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for one student
    Report {
        /// Student Gmail ID (case-insensitive)
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        #[command(flatten)]
        sources: Sources,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the report tables as CSV files into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// List the student ids present in the quiz results
    Students {
        #[command(flatten)]
        sources: Sources,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quiz_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quiz_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            student_id,
            sources,
            format,
            export_dir,
        } => {
            let dashboard = load_dashboard(sources).await?;
            let report = dashboard.lookup(&student_id).inspect_err(|e| {
                error!(error = %e, "Lookup failed");
            })?;
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_text(&report)?),
                Format::Json => println!("{}", render_json(&report)?),
            }

            if let Some(dir) = export_dir {
                write_tables(&dir, &report)?;
                info!(dir = %dir.display(), "Report tables exported");
            }
        }
        Commands::Students { sources } => {
            let dashboard = load_dashboard(sources).await?;
            let ids = dashboard.store().student_ids();
            info!(total = ids.len(), "Students listed");
            for id in ids {
                println!("{id}");
            }
        }
    }

    Ok(())
}

/// Resolves the sources, loads both datasets and fails unless the store is ready.
async fn load_dashboard(sources: Sources) -> Result<Dashboard> {
    let config = DashboardConfig::resolve(sources.quiz_url, sources.question_url)?;
    let outcome = DataStore::load(&config, &BasicClient::new()).await;
    for failure in &outcome.failures {
        error!(error = %failure, "Dataset failed to load");
    }
    let store = outcome.into_ready()?;
    info!("Data loaded");
    Ok(Dashboard::new(store))
}
