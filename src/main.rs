use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use transaction_batch_processor::orchestrator::{Orchestrator, RunReport};
use transaction_batch_processor::settings::Settings;
use transaction_batch_processor::storage::{MemorySink, PostgresSink, TransactionSink};

#[derive(Parser, Debug)]
#[command(name = "transaction-batch-processor")]
#[command(version, about = "Loads pipe-delimited transaction files into the database")]
struct Cli {
    /// Configuration file (toml, yaml or json). Defaults to application.* in the working directory.
    #[arg(short, long, env = "TRANSACTION_CONFIG")]
    config: Option<PathBuf>,

    /// Most verbose level written to stderr
    #[arg(short, long, value_enum, default_value_t = LogLevel::Error)]
    log_level: LogLevel,

    /// Validate and chunk records without writing them to the database
    #[arg(long)]
    dry_run: bool
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    setup_logging(cli.log_level.into());

    let settings = Settings::load(cli.config.as_deref())?;

    let timer = Instant::now();

    let report = if cli.dry_run {
        info!("Dry run, records are kept in memory only");
        run(&settings, MemorySink::new()).await
    } else {
        let url = settings.database.url.as_deref()
            .ok_or_else(|| anyhow!("database.url is required unless --dry-run is given"))?;

        let sink = PostgresSink::connect(url, settings.database.max_connections).await?;
        run(&settings, sink).await
    };

    info!("Run finished in: {:?}", timer.elapsed());

    if let Some(failure) = &report.failure {
        error!("Run failed: {failure}");
    }

    write_summary_to_stdout(&report)?;

    Ok(ExitCode::from(report.status.exit_code()))
}

async fn run<S: TransactionSink>(settings: &Settings, sink: S) -> RunReport {
    Orchestrator::from_settings(settings, sink).run().await
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Schedulers parse the one-line summary from stdout, so nothing else may be written there
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(report: &RunReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(
        output,
        "status={} files={} read={} written={} skipped={}",
        report.status,
        report.counts.files,
        report.counts.read_count,
        report.success_count(),
        report.failure_count()
    )?;

    output.flush()?;

    Ok(())
}
