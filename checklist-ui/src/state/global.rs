//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api;
use crate::state::actions::{Action, FETCH_FAILED};
use crate::state::session;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Checklists as last fetched from the API
    pub checklists: RwSignal<Vec<Checklist>>,
    /// Whether a token is stored
    pub authenticated: RwSignal<bool>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// A named, server-owned todo list
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
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
    pub fn items(&self) -> Vec<ChecklistItem> {
        self.items.clone().unwrap_or_default()
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
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub item_completion_status: bool,
}

/// Ids arrive as JSON strings or numbers depending on the backend
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        match <RawId as serde::Deserialize>::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        },
    )
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        checklists: create_rw_signal(Vec::new()),
        authenticated: create_rw_signal(session::is_authenticated()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Replace the local collection with the server's
    pub async fn reload_checklists(self) {
        self.loading.set(true);

        match api::fetch_checklists().await {
            Ok(checklists) => self.checklists.set(checklists),
            Err(e) => {
                web_sys::console::error_1(
                    &format!("There was an error fetching the checklists! {}", e).into(),
                );
                self.show_error(FETCH_FAILED);
            }
        }

        self.loading.set(false);
    }

    /// Send one mutation, then re-fetch the whole collection if it succeeded
    ///
    /// Overlapping calls are not coordinated; whichever re-fetch lands last
    /// is what gets rendered.
    pub fn apply(self, action: Action) {
        if action.is_noop() {
            return;
        }

        spawn_local(async move {
            let result = action.send().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("{} {}", action.failure_message(), e).into());
            }

            let settled = action.settle(&result);
            if settled.is_error {
                self.show_error(settled.message);
            } else {
                self.show_success(settled.message);
            }
            if settled.refetch {
                self.reload_checklists().await;
            }
        });
    }

    /// Record a freshly issued token
    pub fn sign_in(&self, token: &str) {
        session::store_token(token);
        self.authenticated.set(true);
    }

    /// Forget the token and the fetched collection
    pub fn sign_out(&self) {
        session::clear_token();
        self.authenticated.set(false);
        self.checklists.set(Vec::new());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_wire_format() {
        let json = r#"{"id": 3, "name": "Groceries", "checklistCompletionStatus": false,
                       "items": [{"id": "9", "name": "Milk", "itemCompletionStatus": true}]}"#;

        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert_eq!(checklist.id, "3");
        assert_eq!(checklist.status_label(), "Incomplete");
        assert_eq!(checklist.items().len(), 1);
        assert!(checklist.items()[0].item_completion_status);
    }

    #[test]
    fn test_unsigned_id_beyond_i64() {
        let checklist: Checklist =
            serde_json::from_str(r#"{"id": 9223372036854775808, "name": "Work"}"#).unwrap();
        assert_eq!(checklist.id, "9223372036854775808");
    }

    #[test]
    fn test_null_items() {
        let checklist: Checklist =
            serde_json::from_str(r#"{"id": "1", "name": "Work", "items": null}"#).unwrap();
        assert!(checklist.items().is_empty());
    }
}
