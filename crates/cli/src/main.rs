//! update-project-status CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — flags or GitHub Actions `INPUT_*` variables,
//!    validated into a [`project_status::StatusSyncRequest`]. Malformed values
//!    fail the same way as any other error.
//! 2. **Wire observability** — `tracing-subscriber` with a text or JSON layer,
//!    plus an OpenTelemetry OTLP exporter when one is configured.
//! 3. **Construct infrastructure** — a [`github::GithubClient`] implementing
//!    the [`project_status::ProjectBoard`] port.
//! 4. **Run once** — exit 0 on success; on failure emit an `::error::`
//!    workflow command and exit 1.

mod actions;
mod config;
mod telemetry;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use github::GithubClient;
use project_status::{RunId, RunSummary};

use config::{Cli, LogFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let Some(message) = config::parse_failure_message(&e) else {
                e.exit()
            };
            let _telemetry = telemetry::init(LogFormat::Text).ok();
            error!(error = %message, "Invalid command-line input");
            println!("{}", actions::error_command(&message));
            return ExitCode::FAILURE;
        }
    };

    let _telemetry = match telemetry::init(cli.log_format) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match execute(cli).await {
        Ok(summary) => {
            info!(
                project_id = %summary.project_id,
                status = %summary.status,
                items = summary.items_fetched,
                candidates = summary.candidates,
                updated = summary.updated,
                "Project status update complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Project status update failed");
            println!("{}", actions::error_command(&message));
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<RunSummary> {
    let config = cli.into_config()?;
    let client = GithubClient::new(&config.client).context("Failed to create GitHub client")?;
    let summary = project_status::run(&client, &config.request, RunId::new_random()).await?;
    Ok(summary)
}
