use leptos::prelude::*;
use leptos_meta::Title;

use super::auth_layout::AuthLayout;
use crate::ui::auth::SigninForm;

/// Sign-in page
#[component]
pub fn SignInPage() -> impl IntoView {
    view! {
        <Title text="Log in - Snapgram"/>
        <AuthLayout>
            <SigninForm />
        </AuthLayout>
    }
}
