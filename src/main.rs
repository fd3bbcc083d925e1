use anyhow::Result;
use clap::Parser;
use codescope::analyzer::Codescope;
use codescope::config::ScanConfig;
use codescope::report::{OutputFormat, ReportGenerator};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line interface configuration using `clap`.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project to analyze.
    path: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Skip files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    max_file_size: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn init_logging(cli: &Cli, config: &ScanConfig) {
    let level = if let Some(level_str) = &cli.log_level {
        parse_level(level_str)
    } else if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    let mut filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_err() {
        if let Ok(directive) = format!("codescope={}", level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Main entry point of the application.
///
/// Any error (bad root path, invalid environment override) is printed by
/// `anyhow` and exits with a non-zero status.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ScanConfig::from_env()?;
    if let Some(max) = cli.max_file_size {
        config.max_file_size = max;
    }
    init_logging(&cli, &config);
    config.validate()?;

    let report = Codescope::new(config).analyze(&cli.path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ReportGenerator::new(cli.format).render(&report, &mut out)?;
    out.flush()?;

    Ok(())
}
