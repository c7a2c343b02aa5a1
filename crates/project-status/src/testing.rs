//! In-memory [`ProjectBoard`] used by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::board::{BoardError, ProjectBoard};
use crate::{FieldId, FieldValue, ItemId, ProjectItem, ProjectReference, ProjectSnapshot, StatusUpdate};

/// Serves a fixed snapshot and records every mutation it receives.
#[derive(Default)]
pub struct RecordingBoard {
    snapshot: ProjectSnapshot,
    fail_fetch: bool,
    fail_on: Option<String>,
    attempted: Mutex<Vec<ItemId>>,
    updates: Mutex<Vec<StatusUpdate>>,
}

impl RecordingBoard {
    pub fn with_snapshot(snapshot: ProjectSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Makes the mutation for `item_id` fail.
    pub fn failing_on(mut self, item_id: &str) -> Self {
        self.fail_on = Some(item_id.to_owned());
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Items a mutation was sent for, including the one that failed.
    pub fn attempted(&self) -> Vec<ItemId> {
        self.attempted.lock().unwrap().clone()
    }

    /// Mutations that succeeded, in order.
    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectBoard for RecordingBoard {
    async fn fetch_project(
        &self,
        _project: &ProjectReference,
    ) -> Result<ProjectSnapshot, BoardError> {
        if self.fail_fetch {
            return Err(BoardError::Request {
                message: "connection refused".to_owned(),
            });
        }
        Ok(self.snapshot.clone())
    }

    async fn update_item_status(&self, update: &StatusUpdate) -> Result<(), BoardError> {
        self.attempted.lock().unwrap().push(update.item_id.clone());
        if self.fail_on.as_deref() == Some(update.item_id.as_str()) {
            return Err(BoardError::GraphQl {
                messages: vec![format!("mutation failed for {}", update.item_id)],
            });
        }
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}

/// An item whose only field value is `Status = status`.
pub fn status_item(id: &str, status: &str, labels: &[&str]) -> ProjectItem {
    ProjectItem {
        id: ItemId::new(id).unwrap(),
        field_values: vec![FieldValue {
            field_id: FieldId::new("f-status").unwrap(),
            field_name: "Status".to_owned(),
            value: Some(status.to_owned()),
        }],
        labels: labels.iter().map(|s| s.to_string()).collect(),
    }
}
