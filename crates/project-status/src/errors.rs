//! Top-level error type for a status-sync run.
//!
//! [`StatusSyncError`] covers every condition that stops a run. Failures from
//! the board transport are defined next to the port in [`crate::board`] and
//! wrapped here unchanged.
//!
//! No variant is retried: the first error aborts the run, and updates already
//! applied stay applied.

use thiserror::Error;

use crate::board::BoardError;

/// Errors that abort a status-sync run.
#[derive(Debug, Error)]
pub enum StatusSyncError {
    /// A required input was missing or empty, or the project URL did not
    /// match the expected shape.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the offending input.
        message: String,
    },

    /// The owner segment of the project URL was neither `orgs` nor `users`.
    #[error("Unsupported ownerType: {owner_type}. Must be one of 'orgs' or 'users'")]
    UnsupportedOwnerType {
        /// The segment as it appeared in the URL.
        owner_type: String,
    },

    /// The project has no field with the expected status field name.
    ///
    /// Also produced when the owner or project does not exist, since the
    /// query then returns no fields at all.
    #[error("No field named '{field_name}' found on the project")]
    StatusFieldNotFound {
        /// Name that was looked up.
        field_name: String,
    },

    /// The status field has no option with the requested name.
    #[error("Status '{status}' not found on field '{field_name}' (available: {available})")]
    StatusOptionNotFound {
        /// Requested option name.
        status: String,
        /// Name of the status field that was searched.
        field_name: String,
        /// Comma-separated names of the options that do exist.
        available: String,
    },

    /// The status field's settings did not decode as `{ "options": [{ "id", "name" }] }`.
    #[error("Malformed settings on field '{field_name}': {reason}")]
    MalformedFieldSettings {
        /// Name of the field whose settings failed to decode.
        field_name: String,
        /// Decoder message.
        reason: String,
    },

    /// The query succeeded but returned no project ID to address mutations to.
    #[error("Project not found: {project}")]
    ProjectNotFound {
        /// Human-readable project reference.
        project: String,
    },

    /// The board transport failed. Displayed verbatim.
    #[error(transparent)]
    Transport(#[from] BoardError),
}

impl StatusSyncError {
    /// Shorthand for [`StatusSyncError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
