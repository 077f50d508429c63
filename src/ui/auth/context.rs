//! Auth context for managing user authentication state
//!
//! This module provides a reactive authentication context that:
//! - Stores the current user
//! - Tracks whether a current-user check is in flight
//! - Checks the session once after hydration

use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};

use super::api::{self, Account};
use crate::core::BackendConfig;
use crate::core::signup::{UserCheck, with_timeout};

/// User information from the account API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Account> for User {
    fn from(account: Account) -> Self {
        User {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

/// Authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial state, session not checked yet
    #[default]
    Loading,
    /// User is not authenticated
    Unauthenticated,
    /// User is authenticated
    Authenticated(User),
}

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current authentication state
    pub state: RwSignal<AuthState>,
    /// A current-user check is in flight
    pub loading: RwSignal<bool>,
    /// At least one current-user check has completed
    pub checked: RwSignal<bool>,
    config: StoredValue<BackendConfig>,
}

impl AuthContext {
    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state.get(), AuthState::Authenticated(_))
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<User> {
        match self.state.get() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether a current-user check is in flight.
    /// Uses get_untracked() since this is called from async tasks
    pub fn is_checking(&self) -> bool {
        self.loading.get_untracked()
    }

    /// Backend settings
    pub fn config(&self) -> BackendConfig {
        self.config.get_value()
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context(config: BackendConfig) -> AuthContext {
    // Start with Unauthenticated on both server and client to avoid hydration mismatch
    let ctx = AuthContext {
        state: RwSignal::new(AuthState::Unauthenticated),
        loading: RwSignal::new(false),
        checked: RwSignal::new(false),
        config: StoredValue::new(config),
    };

    // Check the session after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            ctx.state.set(AuthState::Loading);
            spawn_local(async move {
                check_auth_user(ctx).await;
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Ask the backend for the current user and update the context.
///
/// Returns whether the session is valid. `loading` is set while the call is
/// outstanding, and cleared even if this future is dropped early. The call
/// is bounded by the configured call timeout.
pub async fn check_auth_user(ctx: AuthContext) -> bool {
    let _checking = UserCheck::start(move |on| {
        ctx.loading.try_set(on);
    });

    let config = ctx.config();
    let result = with_timeout(config.call_timeout, api::fetch_current_account(&config)).await;

    let authenticated = match result {
        Some(Ok(account)) => {
            ctx.state.set(AuthState::Authenticated(account.into()));
            true
        }
        Some(Err(err)) => {
            leptos::logging::debug_warn!("No current user: {}", err);
            ctx.state.set(AuthState::Unauthenticated);
            false
        }
        None => {
            leptos::logging::warn!(
                "Current user check timed out after {:?}",
                config.call_timeout
            );
            ctx.state.set(AuthState::Unauthenticated);
            false
        }
    };

    ctx.checked.set(true);
    authenticated
}
