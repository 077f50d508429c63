//! Sign-in form component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::client::AccountClient;
use super::context::use_auth_context;
use super::effects::FormEffects;
use crate::core::routes;
use crate::core::signup::SigninOrchestrator;
use crate::core::validation::{Field, FieldErrors, SigninDraft};
use crate::ui::common::FormField;
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;

#[component]
pub fn SigninForm() -> impl IntoView {
    let auth = use_auth_context();
    let notifications = use_notifications();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let effects = FormEffects::new(
        notifications,
        busy,
        field_errors,
        vec![email, password],
        use_navigate(),
    );
    let orchestrator = StoredValue::new_local(
        SigninOrchestrator::new(AccountClient::new(auth), effects).with_config(&auth.config()),
    );

    let is_busy = Signal::derive(move || busy.get() || auth.loading.get());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let draft = SigninDraft {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let orchestrator = orchestrator.get_value();

        spawn_local(async move {
            if let Err(err) = orchestrator.submit(&draft).await {
                leptos::logging::debug_warn!("Sign in did not complete: {}", err);
            }
        });
    };

    let on_email = Callback::new(move |text: String| {
        email.set(text);
        field_errors.update(|e| e.clear(Field::Email));
    });
    let on_password = Callback::new(move |text: String| {
        password.set(text);
        field_errors.update(|e| e.clear(Field::Password));
    });

    view! {
        <div class="sm:w-420 flex flex-col items-center">
            <Icon name=icons::LOGO class="h-9 w-auto" />

            <h2 class="pt-5 sm:pt-12 text-2xl font-bold">"Log in to your account"</h2>
            <p class="text-light-3 text-sm md:text-base mt-2">
                "Welcome back! Please enter your details."
            </p>

            <form on:submit=on_submit class="flex flex-col gap-5 w-full mt-4" novalidate=true>
                <FormField
                    label="Email"
                    name="email"
                    input_type="email"
                    autocomplete="email"
                    value=email.into()
                    on_input=on_email
                    disabled=is_busy
                    error=Signal::derive(move || {
                        field_errors.with(|e| e.get(Field::Email).map(str::to_string))
                    })
                />
                <FormField
                    label="Password"
                    name="password"
                    input_type="password"
                    autocomplete="current-password"
                    value=password.into()
                    on_input=on_password
                    disabled=is_busy
                    error=Signal::derive(move || {
                        field_errors.with(|e| e.get(Field::Password).map(str::to_string))
                    })
                />

                <button type="submit" class="shad-button_primary" disabled=move || is_busy.get()>
                    {move || {
                        if is_busy.get() {
                            view! {
                                <span class="flex items-center justify-center gap-2">
                                    <Icon name=icons::LOADER class="animate-spin h-4 w-4" />
                                    "Loading..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span>"Log in"</span> }.into_any()
                        }
                    }}
                </button>

                <p class="text-sm text-light-1 text-center mt-2">
                    "Don't have an account? "
                    <A href=routes::SIGN_UP attr:class="text-primary-500 font-semibold ml-1">
                        "Sign up"
                    </A>
                </p>
            </form>
        </div>
    }
}
