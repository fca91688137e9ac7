//! SpendLens CLI
//!
//! Terminal front end for the SpendLens dashboard:
//! - Analyze transaction CSVs and print the dashboard
//! - Check the analysis service
//! - Generate a config file
//!
//! Every file given to `analyze` counts as one drop on the upload surface.
//! All accepted files are uploaded concurrently on a single thread and the
//! dashboard shows whichever outcome the session policy lets through.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spendlens::analysis::{bar_records, daily_points, pie_slices};
use spendlens::client::{path_candidate, AnalysisService, CsvUpload, HttpAnalysisClient};
use spendlens::config::{generate_default_config, Config, LoggingConfig};
use spendlens::dashboard::{summary_line, DashboardView, TextRenderer};
use spendlens::intake::{IntakeEvent, UploadSurface};
use spendlens::session::{drive, RequestState, ResolutionPolicy, Session};

#[derive(Parser)]
#[command(name = "spendlens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chart the spending in a transactions CSV")]
#[command(long_about = "SpendLens uploads a transactions CSV to an analysis service and shows\nspending by category and by day.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analysis service base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/spendlens/config.toml or ./spendlens.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze CSV files and print the dashboard
    Analyze {
        /// CSV files; each one is a separate drop
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Which response wins when uploads overlap (overrides config)
        #[arg(long, value_enum)]
        policy: Option<ResolutionPolicy>,

        /// Show rejected files as an error instead of skipping them
        #[arg(long)]
        report_rejections: bool,
    },

    /// Check that the analysis service is up
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (mut config, config_path) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.service.endpoint.base_url = url.clone();
    }

    init_logging(&config.logging);
    match &config_path {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }

    match cli.command {
        Commands::Analyze {
            files,
            format,
            policy,
            report_rejections,
        } => {
            if let Some(policy) = policy {
                config.session.policy = policy;
            }
            if report_rejections {
                config.session.report_rejections = true;
            }
            analyze(&config, &files, format).await
        }

        Commands::Status => status(&config).await,

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spendlens={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the dashboard; logs go to stderr
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn analyze(config: &Config, files: &[PathBuf], format: OutputFormat) -> anyhow::Result<ExitCode> {
    let client = HttpAnalysisClient::new(config.service.endpoint.clone(), config.service.timeout())
        .context("building HTTP client")?;
    let session = RefCell::new(Session::new(config.session));
    let mut surface = UploadSurface::new();

    tracing::info!(
        files = files.len(),
        policy = ?config.session.policy,
        url = %client.endpoint().analyze_url(),
        "Starting analysis"
    );

    let mut requests = Vec::new();
    for path in files {
        surface.drag_enter();
        let Some(event) = surface.drop_files(vec![path_candidate(path)]) else {
            continue;
        };
        if let IntakeEvent::FileRejected(rejection) = &event {
            eprintln!("Skipped {:?}: {}", path, rejection);
        }

        let Some(selected) = session.borrow_mut().accept(event) else {
            continue;
        };
        let client = &client;
        requests.push(drive(&session, async move {
            let upload = CsvUpload::read(&selected.handle).await?;
            client.analyze(&upload).await
        }));
    }

    let outcomes = futures_util::future::join_all(requests).await;
    tracing::debug!(?outcomes, "All requests settled");

    let session = session.into_inner();
    let state = session.state();

    match format {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new();
            DashboardView::new(state, &surface).render(&mut renderer);
            print!("{}", renderer.finish());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_report(state))?);
        }
    }

    Ok(match state {
        RequestState::Ready(_) => ExitCode::SUCCESS,
        RequestState::Idle => {
            eprintln!("No CSV file was accepted.");
            ExitCode::from(2)
        }
        _ => ExitCode::FAILURE,
    })
}

fn json_report(state: &RequestState) -> serde_json::Value {
    match state {
        RequestState::Ready(result) => serde_json::json!({
            "state": state.label(),
            "summary": summary_line(result.total()),
            "total": result.total(),
            "pie": pie_slices(&result.by_category),
            "bar": bar_records(&result.by_category),
            "daily": daily_points(&result.daily_spending),
        }),
        RequestState::Failed(message) => serde_json::json!({
            "state": state.label(),
            "error": message,
        }),
        _ => serde_json::json!({ "state": state.label() }),
    }
}

async fn status(config: &Config) -> anyhow::Result<ExitCode> {
    let client = HttpAnalysisClient::new(config.service.endpoint.clone(), config.service.timeout())
        .context("building HTTP client")?;

    match client.health().await {
        Ok(health) if health.is_ok() => {
            println!("SpendLens v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Analysis service: {}", client.endpoint().base_url);
            println!("Status: {}", health.status);
            Ok(ExitCode::SUCCESS)
        }
        Ok(health) => {
            eprintln!("Analysis service reported status: {}", health.status);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("Cannot reach the analysis service at {}", client.endpoint().base_url);
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
