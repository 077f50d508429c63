use leptos::prelude::*;
use leptos_meta::Title;

use super::auth_layout::AuthLayout;
use crate::ui::auth::SignupForm;

/// Sign-up page
#[component]
pub fn SignUpPage() -> impl IntoView {
    view! {
        <Title text="Sign up - Snapgram"/>
        <AuthLayout>
            <SignupForm />
        </AuthLayout>
    }
}
