//! State Management
//!
//! Global application state, dashboard actions and the browser token slot.

pub mod actions;
pub mod global;
pub mod session;

pub use actions::Action;
pub use global::{provide_global_state, Checklist, ChecklistItem, GlobalState};
