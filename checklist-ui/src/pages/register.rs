//! Registration Page

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{FieldError, InlineLoading, TextField};
use crate::state::GlobalState;
use crate::validation::{validate_register, RegisterErrors};

pub const REGISTERED: &str = "Registered successfully!";
pub const REGISTER_FAILED: &str = "There was an error registering!";

/// Registration form page
#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let re_enter_password = create_rw_signal(String::new());
    let errors = create_rw_signal(RegisterErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let go_home = navigate.clone();
    create_effect(move |_| {
        if state.authenticated.get() {
            go_home("/", Default::default());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let u = username.get_untracked();
        let e = email.get_untracked();
        let p = password.get_untracked();

        let found = validate_register(&u, &e, &p, &re_enter_password.get_untracked());
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&u, &e, &p).await {
                Ok(()) => {
                    state.show_success(REGISTERED);
                    navigate("/login", Default::default());
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("{} {}", REGISTER_FAILED, err).into());
                    state.show_error(REGISTER_FAILED);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 border border-gray-700">
            <h1 class="text-2xl font-bold mb-6">"Register"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div class="space-y-1">
                    <TextField name="username" placeholder="Username" value=username />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.username.clone())) />
                </div>

                <div class="space-y-1">
                    <TextField name="email" placeholder="Email" input_type="email" value=email />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.email.clone())) />
                </div>

                <div class="space-y-1">
                    <TextField name="password" placeholder="Password" input_type="password" value=password />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.password.clone())) />
                </div>

                <div class="space-y-1">
                    <TextField
                        name="re_enter_password"
                        placeholder="Re-enter Password"
                        input_type="password"
                        value=re_enter_password
                    />
                    <FieldError error=Signal::derive(move || errors.with(|e| e.re_enter_password.clone())) />
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
                    "Register"
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "Already have an account? "
                <A href="/login" class="text-primary-400 hover:text-primary-300">"Login"</A>
            </p>
        </div>
    }
}
