//! Input resolution: project URL parsing and required-input validation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{LabelFilter, OwnerName, OwnerType, ProjectNumber, ProjectReference, StatusSyncError};

// https://github.com/orgs|users/<ownerName>/projects/<projectNumber>
static PROJECT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https://)?github\.com/(?P<owner_type>orgs|users)/(?P<owner_name>[^/]+)/projects/(?P<project_number>\d+)",
    )
    .expect("project URL pattern is valid")
});

/// Everything a run needs besides the API credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSyncRequest {
    /// Board to update.
    pub project: ProjectReference,
    /// Name of the status option to apply.
    pub status: String,
    /// Optional label allow-list.
    pub labels: LabelFilter,
}

/// Validates the raw inputs of a run.
///
/// `labeled` is the comma-separated label list; `None` and `""` both mean
/// "no filter".
pub fn resolve_request(
    project_url: &str,
    status: &str,
    labeled: Option<&str>,
) -> Result<StatusSyncRequest, StatusSyncError> {
    let project_url = require_input("project-url", project_url)?;
    let status = require_input("status", status)?;
    let project = parse_project_url(project_url)?;
    let labels = LabelFilter::parse(labeled.unwrap_or_default());

    debug!(
        %project_url,
        owner_name = %project.owner_name,
        project_number = %project.project_number,
        owner_type = %project.owner_type,
        %labels,
        "Resolved inputs"
    );

    Ok(StatusSyncRequest {
        project,
        status: status.to_owned(),
        labels,
    })
}

/// Returns the trimmed value, or [`StatusSyncError::InvalidInput`] if it is empty.
pub fn require_input<'a>(name: &str, value: &'a str) -> Result<&'a str, StatusSyncError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StatusSyncError::invalid_input(format!(
            "Input required and not supplied: {name}"
        )));
    }
    Ok(trimmed)
}

/// Parses `https://github.com/<orgs|users>/<owner>/projects/<number>`.
///
/// The scheme is optional and anything after the project number is ignored,
/// so links to a specific view (`.../projects/3/views/1`) are accepted.
pub fn parse_project_url(url: &str) -> Result<ProjectReference, StatusSyncError> {
    let invalid = || {
        StatusSyncError::invalid_input(format!(
            "Invalid project URL: {url}. Project URL should match the format \
             https://github.com/<orgs-or-users>/<ownerName>/projects/<projectNumber>"
        ))
    };

    let caps = PROJECT_URL.captures(url).ok_or_else(invalid)?;
    let owner_type = owner_type_from_segment(&caps["owner_type"])?;
    let owner_name = OwnerName::new(&caps["owner_name"]).ok_or_else(invalid)?;
    // Sent as a GraphQL `Int`, which is a signed 32-bit integer.
    let project_number = caps["project_number"]
        .parse::<i32>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .map(ProjectNumber::new)
        .ok_or_else(invalid)?;

    Ok(ProjectReference {
        owner_type,
        owner_name,
        project_number,
    })
}

/// Maps the owner segment of a project URL to its [`OwnerType`].
pub fn owner_type_from_segment(segment: &str) -> Result<OwnerType, StatusSyncError> {
    match segment {
        "orgs" => Ok(OwnerType::Organization),
        "users" => Ok(OwnerType::User),
        other => Err(StatusSyncError::UnsupportedOwnerType {
            owner_type: other.to_owned(),
        }),
    }
}
