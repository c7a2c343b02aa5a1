//! Project status domain.
//!
//! Moves items on a GitHub (next-generation) project board to a given status.
//! A run resolves its inputs, fetches the board once through the
//! [`ProjectBoard`] port, selects the items that need a change, and updates
//! them one at a time.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! The `github` crate supplies the GraphQL implementation of [`ProjectBoard`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ProjectId`, `ItemId`, `OptionId`, etc.) |
//! | [`types`] | Snapshot and update value types, [`LabelFilter`] |
//! | [`errors`] | [`StatusSyncError`] |
//! | [`board`] | The [`ProjectBoard`] port and [`BoardError`] |
//! | [`resolver`] | Project URL parsing and input validation |
//! | [`selection`] | Status option resolution and candidate selection |
//! | [`updater`] | Sequential mutation of selected items |
//! | [`sync`] | The end-to-end [`run`] |
//!
//! ## Limitations
//!
//! Only the first page of the project is read: 50 fields, 100 items, and 50
//! field values and labels per item. Items beyond that are not updated; the
//! run logs a warning when the board is larger.

pub mod board;
pub mod errors;
pub mod identifiers;
pub mod resolver;
pub mod selection;
pub mod sync;
pub mod types;
pub mod updater;

#[cfg(test)]
mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use board::{BoardError, ProjectBoard};
pub use errors::StatusSyncError;
pub use identifiers::{FieldId, ItemId, OptionId, OwnerName, ProjectId, ProjectNumber, RunId};
pub use resolver::{parse_project_url, require_input, resolve_request, StatusSyncRequest};
pub use selection::{resolve_status, select_candidates, ResolvedStatus, STATUS_FIELD_NAME};
pub use sync::{run, RunSummary};
pub use types::{
    FieldValue, LabelFilter, OwnerType, ProjectField, ProjectItem, ProjectReference,
    ProjectSnapshot, StatusOption, StatusUpdate, UpdateCandidate,
};
pub use updater::apply_updates;
