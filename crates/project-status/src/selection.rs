//! Status resolution and candidate selection.
//!
//! Both steps are pure functions over a [`crate::ProjectSnapshot`]; nothing
//! here talks to the network.

use serde::Deserialize;

use crate::{
    FieldId, LabelFilter, OptionId, ProjectField, ProjectItem, StatusOption, StatusSyncError,
    UpdateCandidate,
};

/// Name of the single-select field that holds an item's workflow state.
pub const STATUS_FIELD_NAME: &str = "Status";

/// The status field together with the option a run will apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatus {
    /// ID of the status field.
    pub field_id: FieldId,
    /// The target option.
    pub option: StatusOption,
}

// Shape of a single-select field's `settings` JSON. Extra keys
// (`name_html`, `width`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct FieldSettings {
    options: Vec<SettingsOption>,
}

#[derive(Debug, Deserialize)]
struct SettingsOption {
    id: String,
    name: String,
}

/// Decodes the options of a single-select field.
pub fn decode_status_options(field: &ProjectField) -> Result<Vec<StatusOption>, StatusSyncError> {
    let malformed = |reason: String| StatusSyncError::MalformedFieldSettings {
        field_name: field.name.clone(),
        reason,
    };

    let raw = field
        .settings
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| malformed("field has no settings".to_owned()))?;

    let settings: FieldSettings =
        serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;

    settings
        .options
        .into_iter()
        .map(|o| match OptionId::new(o.id) {
            Some(id) => Ok(StatusOption { id, name: o.name }),
            None => Err(malformed(format!("option '{}' has an empty id", o.name))),
        })
        .collect()
}

/// Finds the first field named `field_name` and the option called `status` on it.
pub fn resolve_status(
    fields: &[ProjectField],
    field_name: &str,
    status: &str,
) -> Result<ResolvedStatus, StatusSyncError> {
    let field = fields
        .iter()
        .find(|f| f.name == field_name)
        .ok_or_else(|| StatusSyncError::StatusFieldNotFound {
            field_name: field_name.to_owned(),
        })?;

    let options = decode_status_options(field)?;
    let available = options
        .iter()
        .map(|o| o.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let option = options
        .into_iter()
        .find(|o| o.name == status)
        .ok_or_else(|| StatusSyncError::StatusOptionNotFound {
            status: status.to_owned(),
            field_name: field.name.clone(),
            available,
        })?;

    Ok(ResolvedStatus {
        field_id: field.id.clone(),
        option,
    })
}

/// Picks the items whose status should change to `target`.
///
/// An item qualifies when it has a value for `field_name`, passes the label
/// filter, and its current value is not already `target`. Fetch order is kept.
pub fn select_candidates(
    items: &[ProjectItem],
    field_name: &str,
    target: &OptionId,
    labels: &LabelFilter,
) -> Vec<UpdateCandidate> {
    items
        .iter()
        .filter_map(|item| {
            let current = item.field_value(field_name)?.value.as_deref()?;
            if !labels.allows(&item.labels) || current == target.as_str() {
                return None;
            }
            Some(UpdateCandidate {
                item_id: item.id.clone(),
                current_status: current.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, ItemId};

    const SETTINGS: &str = r#"{"width":120,"options":[
        {"id":"opt-todo","name":"Todo","name_html":"Todo"},
        {"id":"opt-wip","name":"In Progress","name_html":"In Progress"},
        {"id":"opt-done","name":"Done","name_html":"Done"}
    ]}"#;

    fn field(id: &str, name: &str, settings: Option<&str>) -> ProjectField {
        ProjectField {
            id: FieldId::new(id).unwrap(),
            name: name.to_owned(),
            settings: settings.map(str::to_owned),
        }
    }

    fn item(id: &str, status: Option<&str>, labels: &[&str]) -> ProjectItem {
        let mut field_values = vec![FieldValue {
            field_id: FieldId::new("f-title").unwrap(),
            field_name: "Title".to_owned(),
            value: Some(format!("Item {id}")),
        }];
        if let Some(status) = status {
            field_values.push(FieldValue {
                field_id: FieldId::new("f-status").unwrap(),
                field_name: STATUS_FIELD_NAME.to_owned(),
                value: Some(status.to_owned()),
            });
        }
        ProjectItem {
            id: ItemId::new(id).unwrap(),
            field_values,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(candidates: &[UpdateCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.item_id.as_str()).collect()
    }

    fn opt(id: &str) -> OptionId {
        OptionId::new(id).unwrap()
    }

    #[test]
    fn resolves_option_on_first_status_field() {
        let fields = vec![
            field("f-title", "Title", None),
            field("f-status", "Status", Some(SETTINGS)),
            field("f-status-2", "Status", Some(r#"{"options":[]}"#)),
        ];
        let resolved = resolve_status(&fields, STATUS_FIELD_NAME, "In Progress").unwrap();
        assert_eq!(resolved.field_id.as_str(), "f-status");
        assert_eq!(resolved.option.id.as_str(), "opt-wip");
        assert_eq!(resolved.option.name, "In Progress");
    }

    #[test]
    fn missing_status_field_is_reported() {
        let fields = vec![field("f-title", "Title", None)];
        let err = resolve_status(&fields, STATUS_FIELD_NAME, "Done").unwrap_err();
        assert!(matches!(err, StatusSyncError::StatusFieldNotFound { .. }));

        let err = resolve_status(&[], STATUS_FIELD_NAME, "Done").unwrap_err();
        assert!(matches!(err, StatusSyncError::StatusFieldNotFound { .. }));
    }

    #[test]
    fn missing_option_is_reported_with_alternatives() {
        let fields = vec![field("f-status", "Status", Some(SETTINGS))];
        let err = resolve_status(&fields, STATUS_FIELD_NAME, "Blocked").unwrap_err();
        assert!(matches!(err, StatusSyncError::StatusOptionNotFound { .. }));
        assert!(err.to_string().contains("Todo, In Progress, Done"));
    }

    #[test]
    fn option_names_match_exactly() {
        let fields = vec![field("f-status", "Status", Some(SETTINGS))];
        assert!(resolve_status(&fields, STATUS_FIELD_NAME, "done").is_err());
    }

    #[test]
    fn malformed_settings_fail_explicitly() {
        for settings in [None, Some(""), Some("not json"), Some(r#"{"choices":[]}"#)] {
            let fields = vec![field("f-status", "Status", settings)];
            let err = resolve_status(&fields, STATUS_FIELD_NAME, "Done").unwrap_err();
            assert!(
                matches!(err, StatusSyncError::MalformedFieldSettings { .. }),
                "expected MalformedFieldSettings for {settings:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn empty_option_id_is_malformed() {
        let fields = vec![field(
            "f-status",
            "Status",
            Some(r#"{"options":[{"id":"","name":"Done"}]}"#),
        )];
        let err = resolve_status(&fields, STATUS_FIELD_NAME, "Done").unwrap_err();
        assert!(matches!(err, StatusSyncError::MalformedFieldSettings { .. }));
    }

    #[test]
    fn items_without_status_value_are_never_selected() {
        let mut null_status = item("b", Some("opt-todo"), &[]);
        null_status.field_values[1].value = None;
        let items = vec![item("a", None, &[]), null_status];
        let candidates =
            select_candidates(&items, STATUS_FIELD_NAME, &opt("opt-done"), &LabelFilter::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn items_already_at_target_are_skipped() {
        let items = vec![item("a", Some("opt-done"), &[]), item("b", Some("opt-done"), &["bug"])];
        let candidates =
            select_candidates(&items, STATUS_FIELD_NAME, &opt("opt-done"), &LabelFilter::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn selection_is_idempotent_once_applied() {
        let items = vec![item("a", Some("opt-todo"), &[])];
        let target = opt("opt-done");
        let first = select_candidates(&items, STATUS_FIELD_NAME, &target, &LabelFilter::default());
        assert_eq!(ids(&first), vec!["a"]);

        let updated = vec![item("a", Some("opt-done"), &[])];
        let second = select_candidates(&updated, STATUS_FIELD_NAME, &target, &LabelFilter::default());
        assert!(second.is_empty());
    }

    #[test]
    fn label_filter_rules() {
        let items = vec![
            item("bug", Some("opt-todo"), &["bug"]),
            item("chore", Some("opt-todo"), &["chore"]),
            item("none", Some("opt-todo"), &[]),
        ];

        let candidates = select_candidates(
            &items,
            STATUS_FIELD_NAME,
            &opt("opt-wip"),
            &LabelFilter::parse("bug,docs"),
        );
        assert_eq!(ids(&candidates), vec!["bug", "none"]);

        let candidates =
            select_candidates(&items, STATUS_FIELD_NAME, &opt("opt-wip"), &LabelFilter::parse("bug"));
        assert_eq!(ids(&candidates), vec!["bug", "none"]);
    }

    #[test]
    fn candidates_keep_fetch_order_and_current_value() {
        let items = vec![
            item("a", Some("opt-todo"), &[]),
            item("b", Some("opt-done"), &["bug"]),
            item("c", Some("opt-todo"), &["docs"]),
        ];
        let candidates =
            select_candidates(&items, STATUS_FIELD_NAME, &opt("opt-wip"), &LabelFilter::parse("bug"));
        assert_eq!(ids(&candidates), vec!["a", "b"]);
        assert_eq!(candidates[0].current_status, "opt-todo");
        assert_eq!(candidates[1].current_status, "opt-done");
    }
}
