use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Labelled input with an inline error message
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Input name and id
    name: &'static str,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "off")]
    autocomplete: &'static str,
    /// Current value signal
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    #[prop(into, default = Signal::from(false))]
    disabled: Signal<bool>,
    /// Error message to display, if any
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2">
            <label for=name class="shad-form_label">{label}</label>
            <input
                type=input_type
                id=name
                name=name
                autocomplete=autocomplete
                class="shad-input"
                class:border-red-500=move || error.get().is_some()
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            {move || {
                error.get().map(|err| view! {
                    <div class="flex items-center gap-1 shad-form_message">
                        <Icon name=icons::ALERT_CIRCLE class="w-4 h-4"/>
                        <span>{err}</span>
                    </div>
                })
            }}
        </div>
    }
}
