//! Value types for project board snapshots and status updates.
//!
//! A [`ProjectSnapshot`] is the read-only result of the single project query.
//! Everything else in this module is either derived from a snapshot
//! ([`UpdateCandidate`], [`StatusUpdate`]) or from the caller's inputs
//! ([`ProjectReference`], [`LabelFilter`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{FieldId, ItemId, OptionId, OwnerName, ProjectId, ProjectNumber};

// ---------------------------------------------------------------------------
// Project reference
// ---------------------------------------------------------------------------

/// Kind of account that owns a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    /// `github.com/orgs/<login>/...`
    Organization,
    /// `github.com/users/<login>/...`
    User,
}

impl OwnerType {
    /// Name of the GraphQL query root used to look the owner up.
    pub fn query_root(self) -> &'static str {
        match self {
            OwnerType::Organization => "organization",
            OwnerType::User => "user",
        }
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_root())
    }
}

/// Identifies one project board, as parsed from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    /// Organization or user.
    pub owner_type: OwnerType,
    /// Login of the owning account.
    pub owner_name: OwnerName,
    /// Project number within the owner.
    pub project_number: ProjectNumber,
}

impl std::fmt::Display for ProjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} project #{}",
            self.owner_type, self.owner_name, self.project_number
        )
    }
}

// ---------------------------------------------------------------------------
// Label filter
// ---------------------------------------------------------------------------

/// Allow-list of label names an item must carry (at least one of) to be updated.
///
/// An empty filter allows every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter(BTreeSet<String>);

impl LabelFilter {
    /// Parses a comma-separated list, trimming entries and dropping empty ones.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Returns `true` if no labels were given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `label` is on the allow-list.
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Iterates the label names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if an item carrying `labels` passes the filter.
    ///
    /// Items without any labels always pass, even when the filter is non-empty.
    pub fn allows(&self, labels: &[String]) -> bool {
        self.is_empty() || labels.is_empty() || labels.iter().any(|l| self.contains(l))
    }
}

impl std::fmt::Display for LabelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", labels.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A field definition on the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectField {
    /// Field node ID.
    pub id: FieldId,
    /// Display name, e.g. `"Status"`.
    pub name: String,
    /// Raw JSON settings string. Single-select fields carry their options here;
    /// other field kinds may leave it empty.
    pub settings: Option<String>,
}

/// One selectable value of a single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    /// Option identifier stored in item field values.
    pub id: OptionId,
    /// Display name, e.g. `"In Progress"`.
    pub name: String,
}

/// The value of one field on one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Field the value belongs to.
    pub field_id: FieldId,
    /// Name of that field.
    pub field_name: String,
    /// Raw value. For single-select fields this is the option ID.
    pub value: Option<String>,
}

/// A row on the project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Item node ID.
    pub id: ItemId,
    /// Field values in the order the API returned them.
    pub field_values: Vec<FieldValue>,
    /// Label names of the backing issue; empty for drafts, pull requests, and
    /// unlabelled issues.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ProjectItem {
    /// Returns the first value recorded for the field called `field_name`.
    pub fn field_value(&self, field_name: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|fv| fv.field_name == field_name)
    }
}

/// Everything fetched about a project in one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// `None` when the owner or project could not be found.
    pub project_id: Option<ProjectId>,
    /// Field definitions (first page only).
    pub fields: Vec<ProjectField>,
    /// Items (first page only).
    pub items: Vec<ProjectItem>,
    /// Total number of items on the board as reported by the API.
    pub total_item_count: usize,
}

impl ProjectSnapshot {
    /// Returns `true` if the board holds more items than were fetched.
    pub fn is_truncated(&self) -> bool {
        self.total_item_count > self.items.len()
    }
}

// ---------------------------------------------------------------------------
// Derived
// ---------------------------------------------------------------------------

/// An item selected for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCandidate {
    /// Item to update.
    pub item_id: ItemId,
    /// The status value the item currently holds.
    pub current_status: String,
}

/// Input of a single field-update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Project containing the item.
    pub project_id: ProjectId,
    /// Item to change.
    pub item_id: ItemId,
    /// The status field.
    pub field_id: FieldId,
    /// Option to set.
    pub option_id: OptionId,
}
