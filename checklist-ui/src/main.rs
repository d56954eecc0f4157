//! Checklist Dashboard
//!
//! Browser front-end for the checklist/todo API, built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration with client-side form validation
//! - Checklist dashboard: create/delete checklists, add/delete/check items
//! - Toast notifications for every action
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It keeps only the bearer token in browser storage; the
//! checklist collection is re-fetched from the API after every change.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod validation;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
