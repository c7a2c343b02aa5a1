//! The project board port.
//!
//! [`ProjectBoard`] is the only way the domain talks to GitHub. The `github`
//! crate implements it over GraphQL; tests implement it in memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::{ProjectReference, ProjectSnapshot, StatusUpdate};

/// Failures reported by a [`ProjectBoard`] implementation.
///
/// The variants only exist to give readable messages; callers never branch on
/// them and nothing is retried.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The request could not be sent or the connection failed.
    #[error("GitHub API request failed: {message}")]
    Request {
        /// Underlying transport message.
        message: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("GitHub API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The API answered 200 but reported GraphQL errors.
    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQl {
        /// Messages of every reported error.
        messages: Vec<String>,
    },

    /// The response body did not have the expected shape.
    #[error("Failed to decode GitHub API response: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

/// Read and write access to a GitHub project board.
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    /// Fetches the project's ID, fields, and items in one request.
    ///
    /// An owner or project that does not exist yields an empty snapshot rather
    /// than an error.
    async fn fetch_project(
        &self,
        project: &ProjectReference,
    ) -> Result<ProjectSnapshot, BoardError>;

    /// Sets one item's status field to the given option.
    async fn update_item_status(&self, update: &StatusUpdate) -> Result<(), BoardError>;
}
