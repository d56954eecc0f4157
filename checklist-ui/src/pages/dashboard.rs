//! Dashboard Page
//!
//! Lists every checklist and hosts the new-checklist input.

use leptos::*;
use leptos_router::*;

use crate::components::{ChecklistCard, Loading};
use crate::state::{Action, GlobalState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let new_checklist = create_rw_signal(String::new());

    // Fetch on mount, or bounce to login without a token
    create_effect(move |_| {
        if !state.authenticated.get() {
            navigate("/login", Default::default());
            return;
        }
        spawn_local(state.reload_checklists());
    });

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.apply(Action::CreateChecklist {
            name: new_checklist.get_untracked(),
        });
        new_checklist.set(String::new());
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Your checklists"</p>
            </div>

            <form on:submit=on_create class="flex items-center space-x-3">
                <label for="new-checklist" class="text-gray-300">"Checklist:"</label>
                <input
                    id="new-checklist"
                    type="text"
                    placeholder="New Checklist"
                    prop:value=move || new_checklist.get()
                    on:input=move |ev| new_checklist.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-2
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    type="submit"
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+"
                </button>
            </form>

            <Show when=move || state.loading.get() && state.checklists.with(Vec::is_empty)>
                <Loading />
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                // Keyed by content so an edited checklist is rebuilt
                <For
                    each=move || state.checklists.get()
                    key=|checklist| checklist.clone()
                    children=|checklist| view! { <ChecklistCard checklist=checklist /> }
                />
            </div>
        </div>
    }
}
