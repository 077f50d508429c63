//! Not found page component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::routes;
use crate::ui::icon::{Icon, icons};

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-dark-1 flex flex-col items-center justify-center p-4">
            <div class="text-center">
                <Icon name=icons::LOGO class="h-9 w-auto mx-auto mb-6" />

                <h1 class="text-6xl font-bold text-light-1 mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold text-light-1 mb-2">"Page Not Found"</h2>
                <p class="text-light-3 mb-8 max-w-md mx-auto">
                    "The page you're looking for doesn't exist or has been moved."
                </p>

                <A href=routes::HOME attr:class="shad-button_primary">
                    "Go Home"
                </A>
            </div>
        </div>
    }
}
