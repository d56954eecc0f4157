//! Wire Model
//!
//! Records exchanged with the checklist backend. The server owns every
//! checklist and item; the client only ever holds a copy that is replaced
//! wholesale on each fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope wrapping every data-bearing response (`{"data": ...}`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// A named, server-owned todo list
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub checklist_completion_status: bool,
    #[serde(default)]
    pub items: Option<Vec<ChecklistItem>>,
}

impl Checklist {
    /// Items of this checklist, empty when the server sent none
    pub fn items(&self) -> &[ChecklistItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Look up an item by id
    pub fn item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items().iter().find(|item| item.id == item_id)
    }

    pub fn status_label(&self) -> &'static str {
        if self.checklist_completion_status {
            "Completed"
        } else {
            "Incomplete"
        }
    }
}

/// A single entry within a checklist
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub item_completion_status: bool,
}

/// Payload of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChecklistRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItemRequest {
    pub item_name: String,
}

/// Backends disagree on whether ids are JSON strings or numbers
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_camel_case_fields() {
        let json = r#"{
            "id": "7",
            "name": "Groceries",
            "checklistCompletionStatus": true,
            "items": [{"id": "1", "name": "Milk", "itemCompletionStatus": false}]
        }"#;

        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert_eq!(checklist.id, "7");
        assert!(checklist.checklist_completion_status);
        assert_eq!(checklist.items().len(), 1);
        assert_eq!(checklist.items()[0].name, "Milk");
        assert_eq!(checklist.status_label(), "Completed");
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let json = r#"{"id": 12, "name": "Work", "checklistCompletionStatus": false,
                       "items": [{"id": 40, "name": "Report", "itemCompletionStatus": true}]}"#;

        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert_eq!(checklist.id, "12");
        assert_eq!(checklist.item("40").map(|i| i.item_completion_status), Some(true));
    }

    #[test]
    fn test_wide_and_fractional_ids() {
        let json = r#"{"id": 18446744073709551615, "name": "Big",
                       "items": [{"id": 2.5, "name": "Half"}]}"#;

        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert_eq!(checklist.id, "18446744073709551615");
        assert_eq!(checklist.items()[0].id, "2.5");
    }

    #[test]
    fn test_missing_or_null_items() {
        let missing: Checklist =
            serde_json::from_str(r#"{"id": "1", "name": "A", "checklistCompletionStatus": false}"#)
                .unwrap();
        let null: Checklist = serde_json::from_str(
            r#"{"id": "2", "name": "B", "checklistCompletionStatus": false, "items": null}"#,
        )
        .unwrap();

        assert!(missing.items().is_empty());
        assert!(null.items().is_empty());
        assert_eq!(null.status_label(), "Incomplete");
    }

    #[test]
    fn test_envelope_and_requests() {
        let envelope: ApiEnvelope<LoginData> =
            serde_json::from_str(r#"{"data": {"token": "abc"}}"#).unwrap();
        assert_eq!(envelope.data.token.as_deref(), Some("abc"));

        let body = serde_json::to_value(NewItemRequest {
            item_name: "Eggs".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"itemName": "Eggs"}));
    }
}
