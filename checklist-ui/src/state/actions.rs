//! Dashboard Actions
//!
//! Mutations the user can trigger from the dashboard, with the toast text
//! shown for each outcome.

use crate::api;

pub const FETCH_FAILED: &str = "There was an error fetching the checklists!";

/// What the dashboard does once an action's request has settled
#[derive(Clone, Debug, PartialEq)]
pub struct Settled {
    pub message: &'static str,
    pub is_error: bool,
    /// Only a successful mutation re-fetches the collection
    pub refetch: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    CreateChecklist { name: String },
    DeleteChecklist { checklist_id: String },
    AddItem { checklist_id: String, item_name: String },
    DeleteItem { checklist_id: String, item_id: String },
    ToggleItem { checklist_id: String, item_id: String },
}

impl Action {
    /// Empty checklist names and blank item names are never sent
    pub fn is_noop(&self) -> bool {
        match self {
            Action::CreateChecklist { name } => name.is_empty(),
            Action::AddItem { item_name, .. } => item_name.trim().is_empty(),
            _ => false,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::CreateChecklist { .. } => "Checklist created successfully!",
            Action::DeleteChecklist { .. } => "Checklist deleted successfully!",
            Action::AddItem { .. } => "Item added successfully!",
            Action::DeleteItem { .. } => "Item deleted successfully!",
            Action::ToggleItem { .. } => "Item updated successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::CreateChecklist { .. } => "There was an error creating the checklist!",
            Action::DeleteChecklist { .. } => "Unable to delete checklist!",
            Action::AddItem { .. } => "There was an error adding the item!",
            Action::DeleteItem { .. } => "There was an error deleting the item!",
            Action::ToggleItem { .. } => "There was an error updating the item!",
        }
    }

    pub fn settle<E>(&self, result: &Result<(), E>) -> Settled {
        match result {
            Ok(()) => Settled {
                message: self.success_message(),
                is_error: false,
                refetch: true,
            },
            Err(_) => Settled {
                message: self.failure_message(),
                is_error: true,
                refetch: false,
            },
        }
    }

    /// Issue the request for this action
    pub async fn send(&self) -> Result<(), String> {
        match self {
            Action::CreateChecklist { name } => api::create_checklist(name).await,
            Action::DeleteChecklist { checklist_id } => api::delete_checklist(checklist_id).await,
            Action::AddItem {
                checklist_id,
                item_name,
            } => api::add_item(checklist_id, item_name).await,
            Action::DeleteItem {
                checklist_id,
                item_id,
            } => api::delete_item(checklist_id, item_id).await,
            Action::ToggleItem {
                checklist_id,
                item_id,
            } => api::toggle_item(checklist_id, item_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_detection() {
        assert!(Action::CreateChecklist { name: String::new() }.is_noop());
        assert!(!Action::CreateChecklist { name: " ".to_string() }.is_noop());
        assert!(Action::AddItem {
            checklist_id: "1".to_string(),
            item_name: "  ".to_string(),
        }
        .is_noop());
        assert!(!Action::ToggleItem {
            checklist_id: "1".to_string(),
            item_id: "2".to_string(),
        }
        .is_noop());
    }

    #[test]
    fn test_success_refetches() {
        let action = Action::CreateChecklist {
            name: "Groceries".to_string(),
        };

        let settled = action.settle::<String>(&Ok(()));
        assert_eq!(
            settled,
            Settled {
                message: "Checklist created successfully!",
                is_error: false,
                refetch: true,
            }
        );
    }

    #[test]
    fn test_failure_skips_refetch() {
        let action = Action::ToggleItem {
            checklist_id: "1".to_string(),
            item_id: "2".to_string(),
        };

        let settled = action.settle(&Err("500 Internal Server Error".to_string()));
        assert!(settled.is_error);
        assert!(!settled.refetch);
        assert_eq!(settled.message, "There was an error updating the item!");
    }

    #[test]
    fn test_messages() {
        let delete = Action::DeleteChecklist {
            checklist_id: "1".to_string(),
        };
        assert_eq!(delete.success_message(), "Checklist deleted successfully!");
        assert_eq!(delete.failure_message(), "Unable to delete checklist!");
    }
}
