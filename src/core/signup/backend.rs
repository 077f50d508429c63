//! Collaborators the signup and signin flows drive
//!
//! The account backend and the UI surface are owned elsewhere; the flows only
//! see them through these two traits.

use crate::core::validation::{FieldErrors, SigninInput, SignupInput};

/// Account service: account creation, session creation, session query.
///
/// Failures are reported as absence (`None` or `false`), never as errors;
/// implementations log the underlying cause themselves.
#[allow(async_fn_in_trait)]
pub trait AccountBackend {
    /// Opaque account record returned on successful creation
    type Account;
    /// Opaque session record returned on successful sign-in
    type Session;

    /// Create a new account. Not idempotent.
    async fn create_account(&self, input: &SignupInput) -> Option<Self::Account>;

    /// Exchange credentials for a session
    async fn create_session(&self, credentials: &SigninInput) -> Option<Self::Session>;

    /// Whether the current session is valid and usable
    async fn current_auth_status(&self) -> bool;

    /// Whether a current-user check is in flight, e.g. one started at page
    /// load. Submissions are refused while it is.
    fn is_checking_user(&self) -> bool {
        false
    }
}

/// User-visible side effects of a flow: notices, navigation, form state.
pub trait SignupEffects {
    /// Show a transient notice
    fn notify(&self, message: &str);

    /// Navigate to a client-side path
    fn go_to(&self, path: &str);

    /// Restore the empty form
    fn reset_form(&self);

    /// Busy state changed; the submit control follows it
    fn busy_changed(&self, _busy: bool) {}

    /// Replace the field-level messages; empty clears them
    fn show_field_errors(&self, _errors: &FieldErrors) {}
}
