//! One status-sync run: fetch, resolve, select, update.

use tracing::{debug, info, instrument, warn};

use crate::board::ProjectBoard;
use crate::resolver::StatusSyncRequest;
use crate::selection::{resolve_status, select_candidates, STATUS_FIELD_NAME};
use crate::updater::apply_updates;
use crate::{ProjectId, RunId, StatusSyncError};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Project that was updated.
    pub project_id: ProjectId,
    /// Status option name that was applied.
    pub status: String,
    /// Items fetched from the board.
    pub items_fetched: usize,
    /// Items selected for an update.
    pub candidates: usize,
    /// Items actually updated.
    pub updated: usize,
}

/// Runs the whole pipeline against `board`.
///
/// The project is fetched once. The status field and target option are
/// resolved before any mutation is sent, so a bad status name never leaves the
/// board half-updated.
#[instrument(
    skip_all,
    fields(
        run_id = %run_id,
        project = %request.project,
        status = %request.status,
        labels = %request.labels,
    )
)]
pub async fn run<B>(
    board: &B,
    request: &StatusSyncRequest,
    run_id: RunId,
) -> Result<RunSummary, StatusSyncError>
where
    B: ProjectBoard + ?Sized,
{
    let snapshot = board.fetch_project(&request.project).await?;

    debug!(
        project_id = ?snapshot.project_id,
        item_count = snapshot.total_item_count,
        field_count = snapshot.fields.len(),
        "Fetched project"
    );
    if snapshot.is_truncated() {
        warn!(
            fetched = snapshot.items.len(),
            total = snapshot.total_item_count,
            "Project has more items than a single page; only the first page is processed"
        );
    }

    let status = resolve_status(&snapshot.fields, STATUS_FIELD_NAME, &request.status)?;
    debug!(
        field_id = %status.field_id,
        option_id = %status.option.id,
        "Resolved status option"
    );

    let project_id = snapshot
        .project_id
        .clone()
        .ok_or_else(|| StatusSyncError::ProjectNotFound {
            project: request.project.to_string(),
        })?;

    let candidates = select_candidates(
        &snapshot.items,
        STATUS_FIELD_NAME,
        &status.option.id,
        &request.labels,
    );
    info!(
        candidates = candidates.len(),
        items = snapshot.items.len(),
        "Selected items for status update"
    );

    let updated = apply_updates(
        board,
        &project_id,
        &status.field_id,
        &status.option.id,
        &candidates,
    )
    .await?;

    Ok(RunSummary {
        project_id,
        status: status.option.name,
        items_fetched: snapshot.items.len(),
        candidates: candidates.len(),
        updated,
    })
}
