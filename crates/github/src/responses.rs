//! Wire shapes of the GraphQL responses and their conversion into domain types.

use serde::Deserialize;

use project_status::{
    BoardError, FieldId, FieldValue, ItemId, OwnerType, ProjectField, ProjectId, ProjectItem,
    ProjectSnapshot,
};

/// Standard GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the project query. Only the root matching the owner type is set.
#[derive(Debug, Deserialize)]
pub struct ProjectData {
    organization: Option<OwnerNode>,
    user: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerNode {
    project_next: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    fields: Connection<FieldNode>,
    items: CountedConnection<ItemNode>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Connection<T> {
    #[serde(default)]
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
struct CountedConnection<T> {
    #[serde(default)]
    nodes: Vec<T>,
    #[serde(default)]
    total_count: usize,
}

#[derive(Debug, Deserialize)]
struct FieldNode {
    id: String,
    name: String,
    settings: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemNode {
    id: String,
    field_values: Connection<FieldValueNode>,
    content: Option<ContentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValueNode {
    value: Option<String>,
    project_field: ProjectFieldRef,
}

#[derive(Debug, Deserialize)]
struct ProjectFieldRef {
    id: String,
    name: String,
}

// Only issues expose labels; drafts and pull requests decode to `{}`.
#[derive(Debug, Deserialize)]
struct ContentNode {
    labels: Option<Connection<LabelNode>>,
}

#[derive(Debug, Deserialize)]
struct LabelNode {
    name: String,
}

/// `data` of the field-update mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemFieldData {
    pub update_project_next_item_field: Option<serde_json::Value>,
}

impl ProjectData {
    /// Converts the response into a snapshot.
    ///
    /// A missing owner or project gives an empty snapshot. Nodes with empty
    /// IDs are rejected as a decode error.
    pub fn into_snapshot(self, owner_type: OwnerType) -> Result<ProjectSnapshot, BoardError> {
        let owner = match owner_type {
            OwnerType::Organization => self.organization,
            OwnerType::User => self.user,
        };
        let Some(project) = owner.and_then(|o| o.project_next) else {
            return Ok(ProjectSnapshot::default());
        };

        let fields = project
            .fields
            .nodes
            .into_iter()
            .map(|f| {
                required(FieldId::new(f.id), "field").map(|id| ProjectField {
                    id,
                    name: f.name,
                    settings: f.settings,
                })
            })
            .collect::<Result<Vec<_>, BoardError>>()?;

        let items = project
            .items
            .nodes
            .into_iter()
            .map(ItemNode::into_item)
            .collect::<Result<Vec<_>, BoardError>>()?;

        Ok(ProjectSnapshot {
            project_id: ProjectId::new(project.id),
            fields,
            items,
            total_item_count: project.items.total_count,
        })
    }
}

impl ItemNode {
    fn into_item(self) -> Result<ProjectItem, BoardError> {
        let field_values = self
            .field_values
            .nodes
            .into_iter()
            .map(|fv| {
                required(FieldId::new(fv.project_field.id), "field value").map(|field_id| {
                    FieldValue {
                        field_id,
                        field_name: fv.project_field.name,
                        value: fv.value,
                    }
                })
            })
            .collect::<Result<Vec<_>, BoardError>>()?;

        let labels = self
            .content
            .and_then(|c| c.labels)
            .map(|l| l.nodes.into_iter().map(|n| n.name).collect())
            .unwrap_or_default();

        Ok(ProjectItem {
            id: required(ItemId::new(self.id), "item")?,
            field_values,
            labels,
        })
    }
}

fn required<T>(id: Option<T>, kind: &str) -> Result<T, BoardError> {
    id.ok_or_else(|| BoardError::Decode {
        message: format!("{kind} node has an empty id"),
    })
}
