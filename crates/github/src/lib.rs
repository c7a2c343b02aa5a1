//! GitHub infrastructure adapter.
//!
//! Implements [`project_status::ProjectBoard`] over the GitHub GraphQL API:
//! one query reads the project, one mutation per item writes its status.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Query text,
//! HTTP transport, authentication, and response decoding live here; the
//! `project-status` crate only sees [`project_status::ProjectSnapshot`] and
//! [`project_status::BoardError`].
//!
//! No retries, pagination, or rate-limit handling are performed.

pub mod client;
pub mod queries;
pub mod responses;

use async_trait::async_trait;
use tracing::{debug, instrument};

use project_status::{BoardError, ProjectBoard, ProjectReference, ProjectSnapshot, StatusUpdate};

pub use client::{ClientConfig, GithubClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};

use queries::{project_query, ProjectVariables, UpdateItemFieldVariables, UPDATE_ITEM_FIELD_MUTATION};
use responses::{ProjectData, UpdateItemFieldData};

#[async_trait]
impl ProjectBoard for GithubClient {
    #[instrument(skip_all, fields(project = %project))]
    async fn fetch_project(
        &self,
        project: &ProjectReference,
    ) -> Result<ProjectSnapshot, BoardError> {
        let query = project_query(project.owner_type);
        let data: Option<ProjectData> = self
            .execute(&query, ProjectVariables::from(project))
            .await?;

        let snapshot = match data {
            Some(data) => data.into_snapshot(project.owner_type)?,
            None => ProjectSnapshot::default(),
        };
        debug!(
            fields = snapshot.fields.len(),
            items = snapshot.items.len(),
            total_items = snapshot.total_item_count,
            "Project snapshot decoded"
        );
        Ok(snapshot)
    }

    #[instrument(skip_all, fields(item_id = %update.item_id, option_id = %update.option_id))]
    async fn update_item_status(&self, update: &StatusUpdate) -> Result<(), BoardError> {
        let data: Option<UpdateItemFieldData> = self
            .execute(
                UPDATE_ITEM_FIELD_MUTATION,
                UpdateItemFieldVariables::from(update),
            )
            .await?;

        match data.and_then(|d| d.update_project_next_item_field) {
            Some(_) => Ok(()),
            None => Err(BoardError::Decode {
                message: format!("Field update for item {} returned no result", update.item_id),
            }),
        }
    }
}
