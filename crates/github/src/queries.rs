//! GraphQL documents and their variables.

use serde::Serialize;

use project_status::{OwnerType, ProjectReference, StatusUpdate};

/// Page size for project fields.
pub const FIELDS_PAGE_SIZE: u32 = 50;
/// Page size for project items.
pub const ITEMS_PAGE_SIZE: u32 = 100;
/// Page size for each item's field values and labels.
pub const ITEM_DETAIL_PAGE_SIZE: u32 = 50;

/// Builds the project query for the given owner kind.
///
/// The root (`organization` or `user`) cannot be a variable, so it is spliced
/// into the document.
pub fn project_query(owner_type: OwnerType) -> String {
    let root = owner_type.query_root();
    format!(
        r"query getProject($ownerName: String!, $projectNumber: Int!) {{
  {root}(login: $ownerName) {{
    projectNext(number: $projectNumber) {{
      id
      fields(first: {FIELDS_PAGE_SIZE}) {{
        nodes {{
          id
          name
          settings
        }}
      }}
      items(first: {ITEMS_PAGE_SIZE}) {{
        nodes {{
          id
          fieldValues(first: {ITEM_DETAIL_PAGE_SIZE}) {{
            nodes {{
              id
              value
              projectField {{
                id
                name
              }}
            }}
            totalCount
          }}
          content {{
            ... on Issue {{
              labels(first: {ITEM_DETAIL_PAGE_SIZE}) {{
                nodes {{
                  name
                }}
              }}
            }}
          }}
        }}
        totalCount
      }}
    }}
  }}
}}"
    )
}

/// Sets a single field value on one project item.
pub const UPDATE_ITEM_FIELD_MUTATION: &str = r"mutation updateItemStatus($input: UpdateProjectNextItemFieldInput!) {
  updateProjectNextItemField(input: $input) {
    projectNextItem {
      id
    }
  }
}";

/// Variables of [`project_query`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVariables<'a> {
    pub owner_name: &'a str,
    pub project_number: u32,
}

impl<'a> From<&'a ProjectReference> for ProjectVariables<'a> {
    fn from(project: &'a ProjectReference) -> Self {
        Self {
            owner_name: project.owner_name.as_str(),
            project_number: project.project_number.as_u32(),
        }
    }
}

/// Variables of [`UPDATE_ITEM_FIELD_MUTATION`].
#[derive(Debug, Serialize)]
pub struct UpdateItemFieldVariables<'a> {
    pub input: UpdateItemFieldInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemFieldInput<'a> {
    pub project_id: &'a str,
    pub item_id: &'a str,
    pub field_id: &'a str,
    pub value: &'a str,
}

impl<'a> From<&'a StatusUpdate> for UpdateItemFieldVariables<'a> {
    fn from(update: &'a StatusUpdate) -> Self {
        Self {
            input: UpdateItemFieldInput {
                project_id: update.project_id.as_str(),
                item_id: update.item_id.as_str(),
                field_id: update.field_id.as_str(),
                value: update.option_id.as_str(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use project_status::{FieldId, ItemId, OptionId, OwnerName, ProjectId, ProjectNumber};
    use serde_json::json;

    #[test]
    fn organization_query_uses_organization_root() {
        let query = project_query(OwnerType::Organization);
        assert!(query.contains("organization(login: $ownerName)"));
        assert!(!query.contains("user(login"));
    }

    #[test]
    fn user_query_uses_user_root() {
        let query = project_query(OwnerType::User);
        assert!(query.contains("user(login: $ownerName)"));
        assert!(!query.contains("organization(login"));
    }

    #[test]
    fn query_requests_documented_page_sizes() {
        let query = project_query(OwnerType::Organization);
        assert!(query.contains("fields(first: 50)"));
        assert!(query.contains("items(first: 100)"));
        assert!(query.contains("fieldValues(first: 50)"));
        assert!(query.contains("labels(first: 50)"));
        assert!(query.contains("projectNext(number: $projectNumber)"));
    }

    #[test]
    fn project_variables_serialize_in_camel_case() {
        let project = ProjectReference {
            owner_type: OwnerType::User,
            owner_name: OwnerName::new("octocat").unwrap(),
            project_number: ProjectNumber::new(4),
        };
        let value = serde_json::to_value(ProjectVariables::from(&project)).unwrap();
        assert_eq!(value, json!({ "ownerName": "octocat", "projectNumber": 4 }));
    }

    #[test]
    fn mutation_input_carries_option_id_as_value() {
        let update = StatusUpdate {
            project_id: ProjectId::new("PN_1").unwrap(),
            item_id: ItemId::new("PNI_2").unwrap(),
            field_id: FieldId::new("PNF_3").unwrap(),
            option_id: OptionId::new("opt-done").unwrap(),
        };
        let value = serde_json::to_value(UpdateItemFieldVariables::from(&update)).unwrap();
        assert_eq!(
            value,
            json!({
                "input": {
                    "projectId": "PN_1",
                    "itemId": "PNI_2",
                    "fieldId": "PNF_3",
                    "value": "opt-done"
                }
            })
        );
        assert!(UPDATE_ITEM_FIELD_MUTATION.contains("updateProjectNextItemField(input: $input)"));
    }
}
