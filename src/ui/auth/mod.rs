//! Authentication UI module
//!
//! Account API client, auth context and the sign-up/sign-in forms.

mod api;
mod client;
mod context;
mod effects;
mod signin_form;
mod signup_form;

pub use api::{Account, ClientError, Session};
pub use client::AccountClient;
pub use context::{AuthContext, AuthState, User, provide_auth_context, use_auth_context};
pub use effects::FormEffects;
pub use signin_form::SigninForm;
pub use signup_form::SignupForm;
