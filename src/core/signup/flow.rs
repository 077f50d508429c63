//! The signup and signin flows as input to the shared orchestrator
//!
//! A [`Flow`] says how a draft is validated and how each network step is
//! advanced. Gate handling, timeouts and terminal effects are the
//! orchestrator's job and are the same for every flow.

use std::time::Duration;

use crate::core::validation::{Schema, SigninDraft, SigninInput, SignupDraft, SignupInput};

use super::backend::AccountBackend;
use super::machine::{FlowError, FlowStep, SigninError, SigninStep, SignupError, SignupStep};
use super::timeout::with_timeout;

#[allow(async_fn_in_trait)]
pub trait Flow {
    type Draft;
    type Error: FlowError;
    type Step: FlowStep<Error = Self::Error>;

    /// Name used in log lines
    const NAME: &'static str;

    /// Rules applied when no custom schema is given
    fn schema() -> Schema;

    /// First state: the validated draft, or a terminal validation failure
    fn start(draft: &Self::Draft, schema: &Schema) -> Self::Step;

    /// Perform the call the current step waits on and return the next step
    async fn advance<B: AccountBackend>(calls: &Calls<'_, B>, step: Self::Step) -> Self::Step;
}

/// Create account → sign in → verify session
#[derive(Debug, Clone, Copy, Default)]
pub struct Signup;

/// Sign in → verify session
#[derive(Debug, Clone, Copy, Default)]
pub struct Signin;

/// Backend calls of one run, each bounded by the call timeout.
///
/// A timed-out call reads as a failed one: `false` for every method here.
pub struct Calls<'a, B> {
    backend: &'a B,
    schema: &'a Schema,
    limit: Duration,
    flow: &'static str,
}

impl<'a, B: AccountBackend> Calls<'a, B> {
    pub(crate) fn new(
        backend: &'a B,
        schema: &'a Schema,
        limit: Duration,
        flow: &'static str,
    ) -> Self {
        Self {
            backend,
            schema,
            limit,
            flow,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub async fn create_account(&self, input: &SignupInput) -> bool {
        tracing::info!("{}: creating account for {}", self.flow, input.email());
        self.bounded("create account", self.backend.create_account(input))
            .await
            .flatten()
            .is_some()
    }

    pub async fn create_session(&self, credentials: &SigninInput) -> bool {
        tracing::info!("{}: opening session for {}", self.flow, credentials.email());
        self.bounded("create session", self.backend.create_session(credentials))
            .await
            .flatten()
            .is_some()
    }

    pub async fn current_auth_status(&self) -> bool {
        self.bounded("verify session", self.backend.current_auth_status())
            .await
            .unwrap_or(false)
    }

    async fn bounded<T>(&self, what: &str, future: impl Future<Output = T>) -> Option<T> {
        let output = with_timeout(self.limit, future).await;
        if output.is_none() {
            tracing::warn!("{}: {} timed out after {:?}", self.flow, what, self.limit);
        }
        output
    }
}

impl Flow for Signup {
    type Draft = SignupDraft;
    type Error = SignupError;
    type Step = SignupStep;

    const NAME: &'static str = "Signup";

    fn schema() -> Schema {
        Schema::signup()
    }

    fn start(draft: &SignupDraft, schema: &Schema) -> SignupStep {
        SignupStep::validate(draft, schema)
    }

    async fn advance<B: AccountBackend>(calls: &Calls<'_, B>, step: SignupStep) -> SignupStep {
        match step {
            SignupStep::Start(draft) => SignupStep::validate(&draft, calls.schema()),
            SignupStep::CreateAccount(input) => {
                let created = calls.create_account(&input).await;
                SignupStep::after_create_account(&input, created)
            }
            SignupStep::EstablishSession(credentials) => {
                SignupStep::after_create_session(calls.create_session(&credentials).await)
            }
            SignupStep::VerifySession => {
                SignupStep::after_verify_session(calls.current_auth_status().await)
            }
            done @ SignupStep::Done(_) => done,
        }
    }
}

impl Flow for Signin {
    type Draft = SigninDraft;
    type Error = SigninError;
    type Step = SigninStep;

    const NAME: &'static str = "Signin";

    fn schema() -> Schema {
        Schema::signin()
    }

    fn start(draft: &SigninDraft, schema: &Schema) -> SigninStep {
        SigninStep::validate(draft, schema)
    }

    async fn advance<B: AccountBackend>(calls: &Calls<'_, B>, step: SigninStep) -> SigninStep {
        match step {
            SigninStep::Start(draft) => SigninStep::validate(&draft, calls.schema()),
            SigninStep::EstablishSession(credentials) => {
                SigninStep::after_create_session(calls.create_session(&credentials).await)
            }
            SigninStep::VerifySession => {
                SigninStep::after_verify_session(calls.current_auth_status().await)
            }
            done @ SigninStep::Done(_) => done,
        }
    }
}
