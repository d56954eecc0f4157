//! Checklist Card Component
//!
//! One card per checklist: its items, per-item toggle and delete, and a
//! local input for adding new items.

use leptos::*;

use crate::state::{Action, Checklist, ChecklistItem, GlobalState};

/// Card rendering a single checklist
#[component]
pub fn ChecklistCard(checklist: Checklist) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let new_item = create_rw_signal(String::new());

    let checklist_id = checklist.id.clone();
    let on_delete = {
        let checklist_id = checklist_id.clone();
        move |_| {
            state.apply(Action::DeleteChecklist {
                checklist_id: checklist_id.clone(),
            })
        }
    };

    let on_add = {
        let checklist_id = checklist_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            state.apply(Action::AddItem {
                checklist_id: checklist_id.clone(),
                item_name: new_item.get_untracked(),
            });
            new_item.set(String::new());
        }
    };

    let items = checklist
        .items()
        .into_iter()
        .map(|item| view! { <ItemRow checklist_id=checklist_id.clone() item=item /> })
        .collect_view();

    view! {
        <div class="bg-gray-800 rounded-xl p-6 border border-gray-700 space-y-4">
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="text-xl font-semibold">{checklist.name.clone()}</h3>
                    <p class="text-sm text-gray-400">
                        "Status: " {checklist.status_label()}
                    </p>
                </div>
                <button
                    on:click=on_delete
                    class="px-3 py-1 text-sm bg-red-600 hover:bg-red-700 rounded-lg transition-colors"
                >
                    "Delete ToDo"
                </button>
            </div>

            <ul class="space-y-2">{items}</ul>

            <form on:submit=on_add class="flex space-x-2">
                <input
                    type="text"
                    placeholder="New Item"
                    prop:value=move || new_item.get()
                    on:input=move |ev| new_item.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 text-sm
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    type="submit"
                    class="px-3 py-2 text-sm bg-primary-600 hover:bg-primary-700 rounded-lg transition-colors"
                >
                    "Add Item"
                </button>
            </form>
        </div>
    }
}

#[component]
fn ItemRow(checklist_id: String, item: ChecklistItem) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let completed = item.item_completion_status;
    let on_toggle = {
        let checklist_id = checklist_id.clone();
        let item_id = item.id.clone();
        move |ev: web_sys::Event| {
            // Controlled: only the re-fetched collection may flip the box
            event_target::<web_sys::HtmlInputElement>(&ev).set_checked(completed);
            state.apply(Action::ToggleItem {
                checklist_id: checklist_id.clone(),
                item_id: item_id.clone(),
            })
        }
    };

    let on_delete = {
        let item_id = item.id.clone();
        move |_| {
            state.apply(Action::DeleteItem {
                checklist_id: checklist_id.clone(),
                item_id: item_id.clone(),
            })
        }
    };

    let label_class = if completed {
        "flex-1 line-through text-gray-500"
    } else {
        "flex-1"
    };

    view! {
        <li class="flex items-center space-x-3">
            <input
                type="checkbox"
                prop:checked=completed
                on:change=on_toggle
                class="w-4 h-4"
            />
            <span class=label_class>{item.name}</span>
            <button
                on:click=on_delete
                class="px-2 py-1 text-xs text-red-400 hover:text-red-300 transition-colors"
            >
                "Delete"
            </button>
        </li>
    }
}
