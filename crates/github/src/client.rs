//! Thin GraphQL client for the GitHub API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use project_status::BoardError;

use crate::responses::GraphQlResponse;

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("update-project-status/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Token sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// GraphQL endpoint. GitHub Enterprise Server uses `https://<host>/api/graphql`.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for api.github.com with the default timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// GitHub GraphQL client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// Builds a client with authentication headers preset.
    pub fn new(config: &ClientConfig) -> Result<Self, BoardError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            BoardError::Request {
                message: "GitHub token contains characters not allowed in a header".to_owned(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        // Projects (next-generation) were exposed behind a schema preview flag.
        headers.insert(
            "graphql-features",
            HeaderValue::from_static("projects_next_graphql"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| BoardError::Request {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
        })
    }

    /// Sends one GraphQL document and returns its `data`.
    ///
    /// Any entry in `errors` fails the call, even if partial data came back.
    pub async fn execute<V, R>(&self, query: &str, variables: V) -> Result<Option<R>, BoardError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let request = GraphQlRequest { query, variables };

        let response = self
            .http
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BoardError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(%status, url = %self.api_url, "GraphQL response received");
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response.text().await));
        }

        let body: GraphQlResponse<R> = response.json().await.map_err(|e| BoardError::Decode {
            message: e.to_string(),
        })?;

        if !body.errors.is_empty() {
            return Err(BoardError::GraphQl {
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        Ok(body.data)
    }
}

/// Builds the error for a non-success HTTP status. A body that cannot be read
/// is reported in place of the body.
fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> BoardError {
    let body = body.unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
    BoardError::Status { status, body }
}
