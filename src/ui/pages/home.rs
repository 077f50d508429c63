//! Home page
//!
//! Landing spot after a successful sign-up or sign-in. Without a session the
//! visitor is sent to the sign-in page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::routes;
use crate::ui::auth::{AuthState, use_auth_context};
use crate::ui::icon::{Icon, icons};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();

    Effect::new(move |_| {
        if auth.checked.get() && auth.state.get() == AuthState::Unauthenticated {
            let navigate = use_navigate();
            navigate(routes::SIGN_IN, Default::default());
        }
    });

    view! {
        <main class="min-h-screen bg-dark-1 flex flex-col items-center justify-center gap-6 p-4">
            <Icon name=icons::LOGO class="h-9 w-auto" />
            {move || match auth.user() {
                Some(user) => view! {
                    <div class="text-center">
                        <h1 class="text-2xl font-bold text-light-1">
                            {format!("Welcome, {}", user.name)}
                        </h1>
                        <p class="text-light-3 mt-2">{user.email}</p>
                    </div>
                }.into_any(),
                None => view! {
                    <Icon name=icons::LOADER class="animate-spin h-6 w-6" />
                }.into_any(),
            }}
        </main>
    }
}
