//! UI Components
//!
//! Reusable Leptos components for the checklist pages.

pub mod checklist_card;
pub mod form;
pub mod loading;
pub mod nav;
pub mod toast;

pub use checklist_card::ChecklistCard;
pub use form::{FieldError, TextField};
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use toast::Toast;
