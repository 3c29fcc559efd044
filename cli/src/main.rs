//! Webhost CLI - declare an EC2 web server as a CloudFormation stack

use clap::Parser;
use tracing_subscriber::EnvFilter;

use webhost_cli::cli::Cli;
use webhost_cli::output::json;

/// Environment variable holding the log filter, e.g. `webhost_cli=debug`.
const LOG_ENV: &str = "WEBHOST_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_errors = cli.json;
    if let Err(e) = cli.run() {
        tracing::debug!(error = ?e, "command failed");
        let message = format!("{e:#}");
        match json_errors.then(|| json::format_error(&message, "COMMAND_FAILED")) {
            Some(Ok(body)) => println!("{body}"),
            _ => eprintln!("Error: {message}"),
        }
        std::process::exit(1);
    }
}
