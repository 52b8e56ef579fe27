use anyhow::Result;
use bulkprocess::{copy_matched_files, AppConfig, BulkCopyConfig, BulkCopyReport};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

const DISPLAY_TITLE: &str = r"
 _           _ _
| |         | | |
| |__  _   _| | | ___ __  _ __ ___   ___ ___  ___ ___
| '_ \| | | | | |/ / '_ \| '__/ _ \ / __/ _ \/ __/ __|
| |_) | |_| | |   <| |_) | | | (_) | (_|  __/\__ \__ \
|_.__/ \__,_|_|_|\_\ .__/|_|  \___/ \___\___||___/___/
                   | |
                   |_|
";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("bulkprocess")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A dummy bulk processor. Move along. Not much to see here.")
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .value_name("GLOB")
                .help("input file filter glob")
                .default_value("**/*.dcm"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .value_name("SUFFIX")
                .help("suffix substituted into each output file name")
                .default_value(".bak.dcm"),
        )
        .arg(
            Arg::new("skip-existing")
                .long("skip-existing")
                .help("Skip files whose destination already exists instead of overwriting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("days-back")
                .long("days-back")
                .value_name("DAYS")
                .help("Only copy files modified within the last DAYS days"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the copy report as JSON on stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .arg(
            Arg::new("inputdir")
                .value_name("INPUTDIR")
                .help("Directory containing (read-only) input files")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("outputdir")
                .value_name("OUTPUTDIR")
                .help("Directory where to write output files")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    // Load .env file if it exists, so RUST_LOG can come from there
    dotenvy::dotenv().ok();

    // Initialize configuration from command line arguments
    let config = create_app_config(&matches)?;
    let json_report = matches.get_flag("json");
    let inputdir = matches.get_one::<PathBuf>("inputdir").unwrap().clone();
    let outputdir = matches.get_one::<PathBuf>("outputdir").unwrap().clone();

    // Initialize logging
    initialize_logging(&config.log_level)?;

    // Run the application
    run_application(inputdir, outputdir, config, json_report).await
}

/// Pure function to create application configuration from CLI arguments
fn create_app_config(matches: &clap::ArgMatches) -> Result<AppConfig> {
    let log_level = matches.get_one::<String>("log-level").unwrap().clone();

    let pattern = matches.get_one::<String>("pattern").unwrap().clone();
    let suffix = matches.get_one::<String>("suffix").unwrap().clone();

    let days_back = matches
        .get_one::<String>("days-back")
        .map(|days| {
            days.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("Invalid days-back value: {days}"))
        })
        .transpose()?;

    Ok(AppConfig {
        copy: BulkCopyConfig {
            pattern,
            suffix,
            overwrite: !matches.get_flag("skip-existing"),
            days_back,
        },
        log_level,
    })
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Main application logic
async fn run_application(
    inputdir: PathBuf,
    outputdir: PathBuf,
    config: AppConfig,
    json_report: bool,
) -> Result<()> {
    println!("{DISPLAY_TITLE}");
    info!("Starting bulk processor");
    info!("Configuration: {:#?}", config);

    let report = copy_matched_files(&inputdir, &outputdir, &config.copy).await?;

    if json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_copy_report(&report);
    }

    if !report.errors.is_empty() {
        anyhow::bail!("{} file(s) failed to copy", report.errors.len());
    }

    info!("Application completed successfully");
    Ok(())
}

/// Print the copy report
fn print_copy_report(report: &BulkCopyReport) {
    info!("=== BULK COPY REPORT ===");
    info!("Total files processed: {}", report.total_processed());
    info!("Successfully copied: {}", report.successful_copies);
    info!("Skipped files: {}", report.skipped_files);
    info!("Copy errors: {}", report.errors.len());
    info!("Success rate: {:.2}%", report.success_rate() * 100.0);

    if !report.errors.is_empty() {
        error!("Copy errors encountered:");
        for error in &report.errors {
            error!("  {} -> {}: {}", error.source, error.destination, error.error);
        }
    }
}
