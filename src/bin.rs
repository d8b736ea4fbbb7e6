//! Binary entry point for `support-bot`.
//!
//! This module provides the command-line interface for support-bot with options
//! for configuration file paths and logging verbosity. It initializes the
//! necessary components and starts an interactive session.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use support_bot::base::{
    config::{Config, load_env_file},
    types::Void,
};
use tracing::warn;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Support-bot – classify support requests and collect ticket details.
///
/// Configuration can come from `config.toml`, a `.env` file, or environment variables.
/// The session runs in the terminal: describe an issue, and if it is ticket-worthy,
/// enter a name and phone number to confirm the ticket.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: WARN level
    /// - -v: INFO level
    /// - -vv: DEBUG level
    /// - -vvv or more: TRACE level, with span events
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP (configured with the standard `OTEL_EXPORTER_OTLP_*` variables).
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the support-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the session.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // A missing `.env` is fine; a broken one is reported once logging is up.
    let env_file = load_env_file(None);

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    let span_events = if args.verbose >= 3 { FmtSpan::NEW | FmtSpan::CLOSE } else { FmtSpan::NONE };

    // Prepare the log layer.  Stdout belongs to the session, so logs go to stderr.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(span_events);

    // Prepare the otlp layer.

    let provider = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        Some(opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build())
    } else {
        None
    };

    let otel = provider.as_ref().map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer("support-bot")));

    tracing_subscriber::registry().with(otel).with(level_filter).with(stderr).init();

    if let Err(err) = env_file {
        warn!("{err}");
    }

    let config = Config::load(args.config.as_deref())?;

    let result = support_bot::start(config).await;

    if let Some(provider) = provider {
        let _ = provider.shutdown();
    }

    result
}
