//! Sign-up form component
//!
//! Collects name, username, email and password and hands the draft to a
//! [`SignupOrchestrator`]. Notices, navigation and field errors come back
//! through [`FormEffects`].

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::client::AccountClient;
use super::context::use_auth_context;
use super::effects::FormEffects;
use crate::core::routes;
use crate::core::signup::SignupOrchestrator;
use crate::core::validation::{Field, FieldErrors, SignupDraft};
use crate::ui::common::FormField;
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;

/// Sign-up form component
#[component]
pub fn SignupForm() -> impl IntoView {
    let auth = use_auth_context();
    let notifications = use_notifications();

    // Form state
    let name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let field_errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let effects = FormEffects::new(
        notifications,
        busy,
        field_errors,
        vec![name, username, email, password],
        use_navigate(),
    );
    let orchestrator = StoredValue::new_local(
        SignupOrchestrator::new(AccountClient::new(auth), effects).with_config(&auth.config()),
    );

    // Inert while a run is in flight or the current user is being checked
    let is_busy = Signal::derive(move || busy.get() || auth.loading.get());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let draft = SignupDraft {
            name: name.get_untracked(),
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let orchestrator = orchestrator.get_value();

        spawn_local(async move {
            if let Err(err) = orchestrator.submit(&draft).await {
                leptos::logging::debug_warn!("Sign up did not complete: {}", err);
            }
        });
    };

    let error_for = move |field: Field| {
        Signal::derive(move || field_errors.with(|e| e.get(field).map(str::to_string)))
    };
    let input_for = move |field: Field, value: RwSignal<String>| {
        Callback::new(move |text: String| {
            value.set(text);
            field_errors.update(|e| e.clear(field));
        })
    };

    view! {
        <div class="sm:w-420 flex flex-col items-center">
            <Icon name=icons::LOGO class="h-9 w-auto" />

            <h2 class="pt-5 sm:pt-12 text-2xl font-bold">"Create a new account"</h2>
            <p class="text-light-3 text-sm md:text-base mt-2">
                "To use Snapgram, please enter your details"
            </p>

            <form on:submit=on_submit class="flex flex-col gap-5 w-full mt-4" novalidate=true>
                <FormField
                    label="Name"
                    name="name"
                    autocomplete="name"
                    value=name.into()
                    on_input=input_for(Field::Name, name)
                    disabled=is_busy
                    error=error_for(Field::Name)
                />
                <FormField
                    label="Username"
                    name="username"
                    autocomplete="username"
                    value=username.into()
                    on_input=input_for(Field::Username, username)
                    disabled=is_busy
                    error=error_for(Field::Username)
                />
                <FormField
                    label="Email"
                    name="email"
                    input_type="email"
                    autocomplete="email"
                    value=email.into()
                    on_input=input_for(Field::Email, email)
                    disabled=is_busy
                    error=error_for(Field::Email)
                />
                <FormField
                    label="Password"
                    name="password"
                    input_type="password"
                    autocomplete="new-password"
                    value=password.into()
                    on_input=input_for(Field::Password, password)
                    disabled=is_busy
                    error=error_for(Field::Password)
                />

                <button
                    type="submit"
                    class="shad-button_primary"
                    disabled=move || is_busy.get()
                    aria-busy=move || if is_busy.get() { "true" } else { "false" }
                >
                    {move || {
                        if is_busy.get() {
                            view! {
                                <span class="flex items-center justify-center gap-2">
                                    <Icon name=icons::LOADER class="animate-spin h-4 w-4" />
                                    "Loading..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span>"Sign Up"</span> }.into_any()
                        }
                    }}
                </button>

                <p class="text-sm text-light-1 text-center mt-2">
                    "Already have an account? "
                    <A href=routes::SIGN_IN attr:class="text-primary-500 font-semibold ml-1">
                        "Log in"
                    </A>
                </p>
            </form>
        </div>
    }
}
