//! Account backend over the REST API, bound to the auth context

use crate::core::signup::AccountBackend;
use crate::core::validation::{SigninInput, SignupInput};

use super::api::{self, Account, Session};
use super::context::{AuthContext, check_auth_user};

/// [`AccountBackend`] used by the signup and signin forms.
///
/// Errors are logged here and reported to the flow as absence.
#[derive(Clone, Copy)]
pub struct AccountClient {
    auth: AuthContext,
}

impl AccountClient {
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }
}

impl AccountBackend for AccountClient {
    type Account = Account;
    type Session = Session;

    async fn create_account(&self, input: &SignupInput) -> Option<Account> {
        match api::create_account(&self.auth.config(), input).await {
            Ok(account) => Some(account),
            Err(err) => {
                leptos::logging::warn!("Account creation failed: {}", err);
                None
            }
        }
    }

    async fn create_session(&self, credentials: &SigninInput) -> Option<Session> {
        match api::create_session(&self.auth.config(), credentials).await {
            Ok(session) => Some(session),
            Err(err) => {
                leptos::logging::warn!("Session creation failed: {}", err);
                None
            }
        }
    }

    async fn current_auth_status(&self) -> bool {
        check_auth_user(self.auth).await
    }

    fn is_checking_user(&self) -> bool {
        self.auth.is_checking()
    }
}
