//! # Checklist
//!
//! Native client for a token-authenticated checklist/todo REST API.
//!
//! The backend owns every checklist and item. This crate signs the user in,
//! keeps the bearer token in a single storage slot, and drives the
//! dashboard's fetch-then-render cycle: each mutation is one request followed
//! by a full re-fetch of the collection.
//!
//! ## Modules
//!
//! - [`models`]: Wire records (`Checklist`, `ChecklistItem`, request bodies)
//! - [`validation`]: Login and registration form checks
//! - [`storage`]: Token slot (file-backed or in-memory)
//! - [`client`]: `ChecklistApi` trait and its reqwest implementation
//! - [`session`]: Login, registration, logout
//! - [`dashboard`]: Checklist collection and user actions
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use checklist::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let api = Arc::new(HttpChecklistClient::new(config.api.client_config())?);
//!     let tokens = Arc::new(FileTokenStore::new(config.storage.resolved_token_path()));
//!     let session = Session::new(api, tokens);
//!
//!     session.login(&LoginForm::new("alice", "Secret12!")).await?;
//!
//!     let (mut dashboard, _) = Dashboard::open(session).await?;
//!     dashboard
//!         .apply(Action::CreateChecklist { name: "Groceries".to_string() })
//!         .await?;
//!
//!     for checklist in dashboard.checklists() {
//!         println!("{} ({} items)", checklist.name, checklist.items().len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod notice;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod fake;

pub use client::{ChecklistApi, ClientConfig, ClientError, HttpChecklistClient};
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};
pub use dashboard::{Action, Dashboard};
pub use models::{Checklist, ChecklistItem};
pub use notice::{Notice, NoticeLevel};
pub use session::{Route, Session, SessionError};
pub use storage::{FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
pub use validation::{LoginErrors, LoginForm, RegisterErrors, RegisterForm};
