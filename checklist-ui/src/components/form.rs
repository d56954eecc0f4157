//! Form building blocks shared by the login and registration pages

use leptos::*;

/// Text input bound to a string signal
#[component]
pub fn TextField(
    name: &'static str,
    placeholder: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <input
            type=input_type
            name=name
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                   border border-gray-600 focus:border-primary-500 focus:outline-none"
        />
    }
}

/// Validation message under a field, if any
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| view! {
            <span class="text-red-500 text-xs">{message}</span>
        })
    }
}
