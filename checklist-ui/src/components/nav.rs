//! Navigation Component
//!
//! Header bar with the brand and, once signed in, the logout button.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let on_logout = move |_| {
        state.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"☑"</span>
                        <span class="text-xl font-bold text-white">"Checklist"</span>
                    </A>

                    <Show when=move || state.authenticated.get()>
                        <button
                            on:click=on_logout.clone()
                            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                        >
                            "Logout"
                        </button>
                    </Show>
                </div>
            </div>
        </nav>
    }
}
