//! Scheduler entry point for the degree-day task.
//!
//! The binary only wires up ambient configuration (logging, credentials
//! source, working directory) and runs the task once.

use anyhow::Result;
use clap::Parser;
use graddage::fetch::BasicClient;
use graddage::infra::credentials::{CredentialFile, CredentialStore, EnvCredentialStore};
use graddage::process::{RunContext, process};
use graddage::settings::TaskSettings;
use graddage::upload::SftpTransfer;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "graddage")]
#[command(about = "Uploads daily heating degree days from DMI climate data", long_about = None)]
struct Cli {
    /// JSON file with named credentials. Without it credentials come from GRADDAGE_* variables
    #[arg(long, env = "GRADDAGE_CREDENTIALS")]
    credentials: Option<String>,

    /// Directory the report is written to before upload
    #[arg(short = 'd', long, default_value = ".")]
    work_dir: PathBuf,

    /// Municipality to fetch values for
    #[arg(long, default_value = "0751")]
    municipality_id: String,

    /// Write the report but do not upload or delete it
    #[arg(long, default_value_t = false)]
    no_upload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/graddage.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("graddage.log"));

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
    info!(version = env!("CARGO_PKG_VERSION"), "graddage starting");

    let credentials: Box<dyn CredentialStore> = match &cli.credentials {
        Some(path) => {
            let file = CredentialFile::load(path)?;
            debug!(path = %path, names = ?file.names().collect::<Vec<_>>(), "Credentials loaded");
            Box::new(file)
        }
        None => Box::new(EnvCredentialStore),
    };

    let ctx = RunContext {
        settings: TaskSettings {
            municipality_id: cli.municipality_id,
            work_dir: cli.work_dir,
            upload: !cli.no_upload,
            ..TaskSettings::default()
        },
        credentials,
        http: Box::new(BasicClient::new()?),
        transfer: Box::new(SftpTransfer),
    };

    if let Err(e) = process(&ctx, None).await {
        let chain = format!("{e:#}");
        error!(error = %chain, "Run failed");
        return Err(e);
    }

    info!("Run complete");
    Ok(())
}
