//! Login Page

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{FieldError, InlineLoading, TextField};
use crate::state::GlobalState;
use crate::validation::{validate_login, LoginErrors};

pub const LOGIN_FAILED: &str = "There was an error logging in!";

/// Login form page
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(LoginErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    // Already signed in, or just signed in: go home
    create_effect(move |_| {
        if state.authenticated.get() {
            navigate("/", Default::default());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let u = username.get_untracked();
        let p = password.get_untracked();

        let found = validate_login(&u, &p);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            match api::login(&u, &p).await {
                Ok(token) => state.sign_in(&token),
                Err(e) => {
                    web_sys::console::error_1(&format!("{} {}", LOGIN_FAILED, e).into());
                    state.show_error(LOGIN_FAILED);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 border border-gray-700">
            <h1 class="text-2xl font-bold mb-6">"Login"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div class="space-y-1">
                    <TextField name="username" placeholder="Username" value=username />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.username.clone())) />
                </div>

                <div class="space-y-1">
                    <TextField name="password" placeholder="Password" input_type="password" value=password />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.password.clone())) />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:opacity-50
                           rounded-lg font-medium transition-colors"
                >
                    <Show when=move || submitting.get()>
                        <InlineLoading />
                        " "
                    </Show>
                    "Login"
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "Don't have an account? "
                <A href="/register" class="text-primary-400 hover:text-primary-300">"Register"</A>
            </p>
        </div>
    }
}
