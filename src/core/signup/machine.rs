//! Signup and signin state machines
//!
//! Each flow is a linear sequence of named states. Transitions are plain
//! synchronous functions over the result of the previous call, so the same
//! machine can be driven by futures, callbacks or channels. The async driver
//! lives in [`orchestrator`](super::orchestrator).

use std::fmt;
use std::ops::ControlFlow;

use crate::core::routes;
use crate::core::validation::{FieldErrors, Schema, SigninDraft, SigninInput, SignupDraft, SignupInput};

use super::gate::StepKind;

/// Terminal failure of a flow, as the user gets to see it
pub trait FlowError: fmt::Debug {
    /// Per-field messages, for failures caught before any network call
    fn field_errors(&self) -> Option<&FieldErrors>;

    /// Notice for the notice surface
    fn notice(&self) -> Option<String>;

    /// Where the user is sent after this failure, if anywhere
    fn redirect(&self) -> Option<&'static str> {
        None
    }
}

/// One state of a linear flow
pub trait FlowStep: Sized {
    type Error: FlowError;

    fn kind(&self) -> StepKind;

    /// `Break` with the outcome at a terminal state, `Continue` otherwise
    fn settle(self) -> ControlFlow<Result<(), Self::Error>, Self>;
}

/// Why a signup run ended without signing the user in.
///
/// `Display` is the notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    /// Input rejected before any network call
    #[error("Please fix the highlighted fields: {0}")]
    Validation(FieldErrors),

    /// The account was not created; nothing to resume
    #[error("Sign up failed. Please try again.")]
    AccountCreation,

    /// The account exists but no session could be opened
    #[error("Something went wrong. Please log in to your new account.")]
    SessionEstablishment,

    /// A session was created but does not validate
    #[error("Login failed. Please try again.")]
    SessionVerification,
}

impl FlowError for SignupError {
    fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SignupError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    // Validation failures are shown per field instead
    fn notice(&self) -> Option<String> {
        match self {
            SignupError::Validation(_) => None,
            other => Some(other.to_string()),
        }
    }

    fn redirect(&self) -> Option<&'static str> {
        match self {
            SignupError::SessionEstablishment => Some(routes::SIGN_IN),
            _ => None,
        }
    }
}

/// States of the signup flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupStep {
    /// Draft awaiting validation
    Start(SignupDraft),
    /// Validated input awaiting account creation
    CreateAccount(SignupInput),
    /// Account created; credentials awaiting a session
    EstablishSession(SigninInput),
    /// Session created; awaiting the status query
    VerifySession,
    /// Terminal
    Done(Result<(), SignupError>),
}

impl FlowStep for SignupStep {
    type Error = SignupError;

    fn kind(&self) -> StepKind {
        match self {
            SignupStep::Start(_) => StepKind::Validating,
            SignupStep::CreateAccount(_) => StepKind::CreatingAccount,
            SignupStep::EstablishSession(_) => StepKind::EstablishingSession,
            SignupStep::VerifySession => StepKind::VerifyingSession,
            SignupStep::Done(_) => StepKind::Finished,
        }
    }

    fn settle(self) -> ControlFlow<Result<(), SignupError>, Self> {
        match self {
            SignupStep::Done(result) => ControlFlow::Break(result),
            step => ControlFlow::Continue(step),
        }
    }
}

impl SignupStep {
    /// Start: invalid input ends the run before any network call
    pub fn validate(draft: &SignupDraft, schema: &Schema) -> Self {
        match schema.validate_signup(draft) {
            Ok(input) => SignupStep::CreateAccount(input),
            Err(errors) => SignupStep::Done(Err(SignupError::Validation(errors))),
        }
    }

    /// CreateAccount: continue with the same credentials, or stop (A)
    pub fn after_create_account(input: &SignupInput, account_created: bool) -> Self {
        if account_created {
            SignupStep::EstablishSession(input.credentials())
        } else {
            SignupStep::Done(Err(SignupError::AccountCreation))
        }
    }

    /// EstablishSession: verify, or hand over to manual sign-in (B)
    pub fn after_create_session(session_created: bool) -> Self {
        if session_created {
            SignupStep::VerifySession
        } else {
            SignupStep::Done(Err(SignupError::SessionEstablishment))
        }
    }

    /// VerifySession: signed in, or stay on the form (C)
    pub fn after_verify_session(authenticated: bool) -> Self {
        if authenticated {
            SignupStep::Done(Ok(()))
        } else {
            SignupStep::Done(Err(SignupError::SessionVerification))
        }
    }
}

/// Why a signin run ended without signing the user in
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigninError {
    #[error("Please fix the highlighted fields: {0}")]
    Validation(FieldErrors),

    #[error("Sign in failed. Please try again.")]
    SessionEstablishment,

    #[error("Login failed. Please try again.")]
    SessionVerification,
}

impl FlowError for SigninError {
    fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SigninError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    fn notice(&self) -> Option<String> {
        match self {
            SigninError::Validation(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// States of the signin flow: the session tail of the signup flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninStep {
    Start(SigninDraft),
    EstablishSession(SigninInput),
    VerifySession,
    Done(Result<(), SigninError>),
}

impl FlowStep for SigninStep {
    type Error = SigninError;

    fn kind(&self) -> StepKind {
        match self {
            SigninStep::Start(_) => StepKind::Validating,
            SigninStep::EstablishSession(_) => StepKind::EstablishingSession,
            SigninStep::VerifySession => StepKind::VerifyingSession,
            SigninStep::Done(_) => StepKind::Finished,
        }
    }

    fn settle(self) -> ControlFlow<Result<(), SigninError>, Self> {
        match self {
            SigninStep::Done(result) => ControlFlow::Break(result),
            step => ControlFlow::Continue(step),
        }
    }
}

impl SigninStep {
    pub fn validate(draft: &SigninDraft, schema: &Schema) -> Self {
        match schema.validate_signin(draft) {
            Ok(credentials) => SigninStep::EstablishSession(credentials),
            Err(errors) => SigninStep::Done(Err(SigninError::Validation(errors))),
        }
    }

    pub fn after_create_session(session_created: bool) -> Self {
        if session_created {
            SigninStep::VerifySession
        } else {
            SigninStep::Done(Err(SigninError::SessionEstablishment))
        }
    }

    pub fn after_verify_session(authenticated: bool) -> Self {
        if authenticated {
            SigninStep::Done(Ok(()))
        } else {
            SigninStep::Done(Err(SigninError::SessionVerification))
        }
    }
}
