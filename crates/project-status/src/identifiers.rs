//! Newtype domain identifiers.
//!
//! GitHub hands out opaque node IDs for projects, items, fields, and
//! single-select options. All of them are strings on the wire, so each one is
//! wrapped in its own newtype to keep an [`ItemId`] from being passed where a
//! [`FieldId`] is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub node IDs
// ---------------------------------------------------------------------------

string_id! {
    /// GraphQL node ID of a (next-generation) project.
    ProjectId
}

string_id! {
    /// GraphQL node ID of one item (row) on a project board.
    ItemId
}

string_id! {
    /// GraphQL node ID of a project field definition.
    FieldId
}

string_id! {
    /// Identifier of one option inside a single-select field's settings.
    ///
    /// Single-select field values store the option ID, not its display name,
    /// so this is what gets compared and written back.
    OptionId
}

// ---------------------------------------------------------------------------
// Identifiers — URL-derived
// ---------------------------------------------------------------------------

string_id! {
    /// Login of the organization or user that owns a project.
    OwnerName
}

/// The per-owner project number shown in the project URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectNumber(u32);

impl ProjectNumber {
    /// Creates a project number from a raw integer.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProjectNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single status-sync run.
///
/// Generated fresh for every CLI invocation and attached to the root span so
/// all activity from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
