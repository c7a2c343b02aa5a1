//! Command-line and GitHub Actions input handling.
//!
//! Every input can be given as a flag or through the environment variable the
//! Actions runner sets for a step input (`INPUT_<NAME>`, name upper-cased with
//! dashes kept). Inputs are all optional at the clap level so that a missing
//! one is reported by the same validation path as an empty one.

use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use github::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use project_status::{require_input, resolve_request, StatusSyncError, StatusSyncRequest};

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line events.
    Text,
    /// One JSON object per event.
    Json,
}

/// Move GitHub project items to a status.
#[derive(Debug, Parser)]
#[command(name = "update-project-status", version, about)]
pub struct Cli {
    /// Project URL, e.g. https://github.com/orgs/<owner>/projects/<number>
    #[arg(long, env = "INPUT_PROJECT-URL")]
    pub project_url: Option<String>,

    /// Token with read/write access to the project
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Name of the status option to set
    #[arg(long, env = "INPUT_STATUS")]
    pub status: Option<String>,

    /// Comma-separated labels; only items carrying one of them (or no labels) are updated
    #[arg(long, env = "INPUT_LABELED")]
    pub labeled: Option<String>,

    /// GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "INPUT_TIMEOUT-SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "INPUT_LOG-FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Validated configuration of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// What to update.
    pub request: StatusSyncRequest,
    /// How to reach the API.
    pub client: ClientConfig,
}

impl Cli {
    /// Validates the inputs. No network access happens here.
    pub fn into_config(self) -> Result<RunConfig, StatusSyncError> {
        let token = require_input("github-token", self.github_token.as_deref().unwrap_or_default())?;
        let request = resolve_request(
            self.project_url.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or_default(),
            self.labeled.as_deref(),
        )?;
        let api_url = require_input("api-url", &self.api_url)?;

        Ok(RunConfig {
            request,
            client: ClientConfig {
                token: token.to_owned(),
                api_url: api_url.to_owned(),
                timeout: Duration::from_secs(self.timeout_secs),
            },
        })
    }
}

/// Returns the failure message for a clap error, or `None` for `--help` and
/// `--version`, which clap should handle itself.
pub fn parse_failure_message(err: &clap::Error) -> Option<String> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => {
            let rendered = err.render().to_string();
            let first_line = rendered.lines().next().unwrap_or_default().trim();
            let detail = first_line.strip_prefix("error: ").unwrap_or(first_line);
            Some(format!("Invalid input: {detail}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use project_status::OwnerType;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["update-project-status"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn builds_config_from_flags() {
        let config = cli(&[
            "--project-url",
            "https://github.com/users/octocat/projects/3",
            "--github-token",
            "t0ken",
            "--status",
            "Done",
            "--labeled",
            "bug, docs",
            "--timeout-secs",
            "5",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.request.project.owner_type, OwnerType::User);
        assert_eq!(config.request.status, "Done");
        assert!(config.request.labels.contains("bug"));
        assert!(config.request.labels.contains("docs"));
        assert_eq!(config.client.token, "t0ken");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_token_is_invalid_input() {
        let err = cli(&[
            "--project-url",
            "https://github.com/orgs/acme/projects/1",
            "--github-token",
            "",
            "--status",
            "Done",
        ])
        .into_config()
        .unwrap_err();

        assert!(matches!(err, StatusSyncError::InvalidInput { .. }));
        assert!(err.to_string().contains("github-token"));
    }

    #[test]
    fn missing_status_is_invalid_input() {
        let err = cli(&[
            "--project-url",
            "https://github.com/orgs/acme/projects/1",
            "--github-token",
            "t0ken",
            "--status",
            " ",
        ])
        .into_config()
        .unwrap_err();

        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn bad_url_is_rejected_before_any_request() {
        let err = cli(&[
            "--project-url",
            "https://github.com/acme/repo",
            "--github-token",
            "t0ken",
            "--status",
            "Done",
        ])
        .into_config()
        .unwrap_err();

        assert!(matches!(err, StatusSyncError::InvalidInput { .. }));
    }

    fn parse_error(args: &[&str]) -> clap::Error {
        let mut argv = vec!["update-project-status"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap_err()
    }

    #[test]
    fn timeout_defaults_to_client_default() {
        assert_eq!(cli(&[]).timeout_secs, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse_error(&["--timeout-secs", "0"]);
        let message = parse_failure_message(&err).unwrap();
        assert!(message.starts_with("Invalid input: "), "{message}");
        assert!(message.contains("timeout-secs"), "{message}");
    }

    #[test]
    fn malformed_flag_values_become_failure_messages() {
        let err = parse_error(&["--timeout-secs", "abc"]);
        let message = parse_failure_message(&err).unwrap();
        assert!(message.contains("abc"), "{message}");
        assert!(!message.contains('\n'));

        let err = parse_error(&["--log-format", "pretty"]);
        assert!(parse_failure_message(&err).unwrap().contains("pretty"));
    }

    #[test]
    fn help_and_version_are_left_to_clap() {
        assert!(parse_failure_message(&parse_error(&["--help"])).is_none());
        assert!(parse_failure_message(&parse_error(&["--version"])).is_none());
    }

    #[test]
    fn log_format_accepts_json() {
        let parsed = cli(&["--log-format", "json"]);
        assert_eq!(parsed.log_format, LogFormat::Json);
    }
}
