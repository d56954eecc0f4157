//! Dashboard Controller
//!
//! Holds the fetched checklist collection and applies user actions. Every
//! successful mutation is followed by exactly one full re-fetch; the local
//! copy is never patched in place.

use crate::client::ClientError;
use crate::models::Checklist;
use crate::notice::Notice;
use crate::session::{Session, SessionError};

pub const FETCH_FAILED: &str = "There was an error fetching the checklists!";

/// A mutation the user can trigger from the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateChecklist { name: String },
    DeleteChecklist { checklist_id: String },
    AddItem { checklist_id: String, item_name: String },
    DeleteItem { checklist_id: String, item_id: String },
    ToggleItem { checklist_id: String, item_id: String },
}

impl Action {
    /// Whether the action has nothing to send
    ///
    /// An empty checklist name or a blank item name is dropped without a
    /// request.
    pub fn is_noop(&self) -> bool {
        match self {
            Action::CreateChecklist { name } => name.is_empty(),
            Action::AddItem { item_name, .. } => item_name.trim().is_empty(),
            _ => false,
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Action::CreateChecklist { .. } => "Checklist created successfully!",
            Action::DeleteChecklist { .. } => "Checklist deleted successfully!",
            Action::AddItem { .. } => "Item added successfully!",
            Action::DeleteItem { .. } => "Item deleted successfully!",
            Action::ToggleItem { .. } => "Item updated successfully!",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Action::CreateChecklist { .. } => "There was an error creating the checklist!",
            Action::DeleteChecklist { .. } => "Unable to delete checklist!",
            Action::AddItem { .. } => "There was an error adding the item!",
            Action::DeleteItem { .. } => "There was an error deleting the item!",
            Action::ToggleItem { .. } => "There was an error updating the item!",
        }
    }
}

/// The signed-in user's view of their checklists
pub struct Dashboard {
    session: Session,
    checklists: Vec<Checklist>,
}

impl Dashboard {
    /// Open the dashboard and load the collection
    ///
    /// Fails with [`SessionError::NotAuthenticated`] when no token is stored;
    /// callers send the user to the login page in that case. A failed initial
    /// fetch leaves the collection empty and is reported as a notice.
    pub async fn open(session: Session) -> Result<(Self, Option<Notice>), SessionError> {
        let mut dashboard = Self::connect(session)?;

        let notice = match dashboard.refresh().await {
            Ok(_) => None,
            Err(SessionError::Client(e)) => {
                tracing::error!("There was an error fetching the checklists: {}", e);
                Some(Notice::error(FETCH_FAILED))
            }
            Err(e) => return Err(e),
        };

        Ok((dashboard, notice))
    }

    /// Attach to the session without fetching
    ///
    /// The collection stays empty until the first [`Dashboard::apply`] or
    /// [`Dashboard::refresh`].
    pub fn connect(session: Session) -> Result<Self, SessionError> {
        if !session.is_authenticated() {
            tracing::debug!("No token stored, dashboard needs login");
            return Err(SessionError::NotAuthenticated);
        }

        Ok(Self {
            session,
            checklists: Vec::new(),
        })
    }

    pub fn checklists(&self) -> &[Checklist] {
        &self.checklists
    }

    pub fn checklist(&self, checklist_id: &str) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.id == checklist_id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the local collection with the server's
    pub async fn refresh(&mut self) -> Result<&[Checklist], SessionError> {
        let token = self.session.token()?;
        let checklists = self.session.api().list_checklists(&token).await?;
        self.checklists = checklists;
        Ok(&self.checklists)
    }

    /// Apply one action, then re-fetch if it succeeded
    ///
    /// Returns `None` when the action was a no-op.
    pub async fn apply(&mut self, action: Action) -> Result<Option<Notice>, SessionError> {
        if action.is_noop() {
            tracing::debug!("Ignoring empty {:?}", action);
            return Ok(None);
        }

        let token = self.session.token()?;

        if let Err(e) = self.send(&token, &action).await {
            tracing::error!("{} ({:?}): {}", action.failure_message(), action, e);
            return Ok(Some(Notice::error(action.failure_message())));
        }

        tracing::info!("{}", action.success_message());

        match self.refresh().await {
            Ok(_) => Ok(Some(Notice::success(action.success_message()))),
            Err(SessionError::Client(e)) => {
                tracing::error!("There was an error fetching the checklists: {}", e);
                Ok(Some(Notice::error(FETCH_FAILED)))
            }
            Err(e) => Err(e),
        }
    }

    async fn send(&self, token: &str, action: &Action) -> Result<(), ClientError> {
        let api = self.session.api();
        match action {
            Action::CreateChecklist { name } => api.create_checklist(token, name).await,
            Action::DeleteChecklist { checklist_id } => {
                api.delete_checklist(token, checklist_id).await
            }
            Action::AddItem {
                checklist_id,
                item_name,
            } => api.add_item(token, checklist_id, item_name).await,
            Action::DeleteItem {
                checklist_id,
                item_id,
            } => api.delete_item(token, checklist_id, item_id).await,
            Action::ToggleItem {
                checklist_id,
                item_id,
            } => api.toggle_item(token, checklist_id, item_id).await,
        }
    }

    /// Forget the token and leave the dashboard
    pub fn logout(self) -> Result<crate::session::Route, SessionError> {
        self.session.logout()
    }
}
