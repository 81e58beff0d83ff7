//! Speed Test - command-line entry point
//!
//! Runs the full speed test against the configured server and prints the
//! report to stdout. Failures are reported on stderr with exit status 1.

use clap::Parser;
use speedtest_client::{
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, ErrorReporter, Result},
    models::config::ENABLE_COLOR_VAR,
    output::ReportFormatterFactory,
    SpeedTestClient, PKG_NAME, VERSION,
};
use std::io::{self, IsTerminal};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let reporter_color = cli.use_colors_for(io::stderr().is_terminal());
    let verbose = cli.verbose || cli.debug;

    if let Err(e) = run_application(cli).await {
        ErrorReporter::new(reporter_color, verbose).report_error(&e);
        process::exit(1);
    }
}

async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::config)?;

    let explicit_color = cli.color_override().is_some();
    let config = load_config(cli)?;

    // an explicit choice wins over the colored crate's own tty detection
    if explicit_color || std::env::var(ENABLE_COLOR_VAR).is_ok() {
        colored::control::set_override(config.enable_color);
    }

    if config.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        if let Some(build_time) = option_env!("BUILD_TIME") {
            eprintln!("Built: {}", build_time);
        }
        if let Some(commit) = option_env!("GIT_COMMIT") {
            eprintln!("Commit: {}", commit);
        }
        eprintln!("{}\n", display_config_summary(&config));
    }

    let formatter = ReportFormatterFactory::from_config(&config);
    if config.verbose {
        println!("{}", formatter.format_header(&config.server_url));
    }

    let client = SpeedTestClient::from_config(&config)?;
    let result = client.run_test().await?;

    print!("{}", formatter.format_result(&result));
    Ok(())
}
