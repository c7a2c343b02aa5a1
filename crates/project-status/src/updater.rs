//! Sequential application of status updates.

use tracing::{debug, info};

use crate::board::ProjectBoard;
use crate::{FieldId, OptionId, ProjectId, StatusSyncError, StatusUpdate, UpdateCandidate};

/// Sets every candidate's status field to `option_id`, one item at a time.
///
/// Each mutation is awaited before the next one is sent. The first failure is
/// returned immediately; earlier updates are not rolled back and later ones are
/// never issued. Returns the number of items updated.
pub async fn apply_updates<B>(
    board: &B,
    project_id: &ProjectId,
    field_id: &FieldId,
    option_id: &OptionId,
    candidates: &[UpdateCandidate],
) -> Result<usize, StatusSyncError>
where
    B: ProjectBoard + ?Sized,
{
    for (index, candidate) in candidates.iter().enumerate() {
        let update = StatusUpdate {
            project_id: project_id.clone(),
            item_id: candidate.item_id.clone(),
            field_id: field_id.clone(),
            option_id: option_id.clone(),
        };

        debug!(
            item_id = %candidate.item_id,
            from = %candidate.current_status,
            to = %option_id,
            "Updating item status"
        );
        board.update_item_status(&update).await?;
        info!(
            item_id = %candidate.item_id,
            done = index + 1,
            total = candidates.len(),
            "Item status updated"
        );
    }

    Ok(candidates.len())
}
