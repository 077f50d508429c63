//! Shared layout of the sign-up and sign-in pages
//!
//! Visitors that already have a session when they arrive are sent to the
//! home page. A session opened from the page's own form is redirected by the
//! form's flow, not here.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::routes;
use crate::ui::auth::{AuthState, use_auth_context};

/// What an auth page does with its visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    /// First session check still running
    Pending,
    Stay,
    Redirect(&'static str),
}

/// Decided once, from the first completed session check
fn arrival(checked: bool, state: &AuthState) -> Arrival {
    match (checked, state) {
        (false, _) => Arrival::Pending,
        (true, AuthState::Authenticated(_)) => Arrival::Redirect(routes::HOME),
        (true, _) => Arrival::Stay,
    }
}

#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    let auth = use_auth_context();

    // Settles on the first completed check and stops tracking afterwards
    Effect::new(move |settled: Option<bool>| {
        if settled == Some(true) {
            return true;
        }
        match arrival(auth.checked.get(), &auth.state.get()) {
            Arrival::Pending => false,
            Arrival::Stay => true,
            Arrival::Redirect(path) => {
                let navigate = use_navigate();
                navigate(path, Default::default());
                true
            }
        }
    });

    view! {
        <div class="flex w-full min-h-screen bg-dark-1">
            <section class="flex flex-1 justify-center items-center flex-col py-10 px-4">
                {children()}
            </section>
            <img
                src="/images/side-img.svg"
                alt=""
                class="hidden xl:block h-screen w-1/2 object-cover bg-no-repeat"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::auth::User;

    fn user() -> User {
        User {
            id: "64f0c1".to_string(),
            name: "Al".to_string(),
            email: "al@x.com".to_string(),
        }
    }

    #[test]
    fn test_waits_for_first_check() {
        assert_eq!(arrival(false, &AuthState::Loading), Arrival::Pending);
        assert_eq!(arrival(false, &AuthState::Authenticated(user())), Arrival::Pending);
    }

    #[test]
    fn test_signed_in_visitor_goes_home() {
        assert_eq!(
            arrival(true, &AuthState::Authenticated(user())),
            Arrival::Redirect(routes::HOME)
        );
    }

    #[test]
    fn test_signed_out_visitor_stays() {
        assert_eq!(arrival(true, &AuthState::Unauthenticated), Arrival::Stay);
    }
}
