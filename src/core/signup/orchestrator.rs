//! Async driver for the signup and signin flows
//!
//! An orchestrator belongs to one form instance. It owns the single-flight
//! gate, bounds every backend call with a timeout, and applies the terminal
//! state's effects (notice, navigation, form reset).

use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::core::config::{BackendConfig, DEFAULT_CALL_TIMEOUT};
use crate::core::routes;
use crate::core::validation::{FieldErrors, Schema};

use super::backend::{AccountBackend, SignupEffects};
use super::flow::{Calls, Flow, Signin, Signup};
use super::gate::{FlowStatus, StepKind, SubmitGate};
use super::machine::{FlowError, FlowStep};

/// Why `submit` did not run to completion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError<E> {
    /// Another submission from this form is in flight; nothing was done
    #[error("A submission is already in progress")]
    Busy,

    /// The flow ran and ended in a failure state
    #[error(transparent)]
    Failed(#[from] E),
}

/// Drives create account → sign in → verify session for one signup form.
pub type SignupOrchestrator<B, E> = Orchestrator<Signup, B, E>;

/// Drives sign in → verify session for one signin form.
pub type SigninOrchestrator<B, E> = Orchestrator<Signin, B, E>;

/// Runs flow `F` against backend `B`, surfacing outcomes through `E`.
#[derive(Debug, Clone)]
pub struct Orchestrator<F, B, E> {
    backend: B,
    effects: E,
    schema: Schema,
    call_timeout: Duration,
    gate: SubmitGate,
    flow: PhantomData<F>,
}

impl<F: Flow, B: AccountBackend, E: SignupEffects> Orchestrator<F, B, E> {
    pub fn new(backend: B, effects: E) -> Self {
        Self {
            backend,
            effects,
            schema: F::schema(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            gate: SubmitGate::new(),
            flow: PhantomData,
        }
    }

    /// Use the configured call timeout
    pub fn with_config(self, config: &BackendConfig) -> Self {
        self.with_call_timeout(config.call_timeout)
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Validate with custom rules or messages
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the submit control must be inert: a run is in flight or the
    /// backend is checking the current user.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy() || self.backend.is_checking_user()
    }

    pub fn status(&self) -> FlowStatus {
        self.gate.status()
    }

    /// Run the whole flow for `draft`.
    ///
    /// Every terminal state has already been surfaced through the effects
    /// when this returns; the result only reports which one was reached.
    pub async fn submit(&self, draft: &F::Draft) -> Result<(), SubmitError<F::Error>> {
        if self.is_busy() {
            tracing::debug!("{} submit ignored, form is busy", F::NAME);
            return Err(SubmitError::Busy);
        }

        self.gate.reset_messages();
        self.gate.set_step(StepKind::Validating);

        let mut step = match F::start(draft, &self.schema).settle() {
            ControlFlow::Continue(step) => step,
            ControlFlow::Break(result) => {
                self.finish(&result);
                return result.map_err(SubmitError::Failed);
            }
        };

        self.effects.show_field_errors(&FieldErrors::new());
        let Some(in_flight) = self.gate.begin_with(&self.effects) else {
            return Err(SubmitError::Busy);
        };

        let calls = Calls::new(&self.backend, &self.schema, self.call_timeout, F::NAME);
        let result = loop {
            self.gate.set_step(step.kind());
            tracing::debug!("{} step: {:?}", F::NAME, step.kind());

            match F::advance(&calls, step).await.settle() {
                ControlFlow::Continue(next) => step = next,
                ControlFlow::Break(result) => break result,
            }
        };

        // Releases the gate and reports busy off before the terminal effects
        in_flight.finish();
        self.finish(&result);

        result.map_err(SubmitError::Failed)
    }

    fn finish(&self, result: &Result<(), F::Error>) {
        self.gate.set_step(StepKind::Finished);

        let err = match result {
            Ok(()) => {
                tracing::info!("{} complete", F::NAME);
                self.effects.reset_form();
                self.effects.go_to(routes::HOME);
                return;
            }
            Err(err) => err,
        };

        if let Some(errors) = err.field_errors() {
            tracing::debug!("{} rejected: {}", F::NAME, errors);
            self.gate.set_field_errors(errors.clone());
            self.effects.show_field_errors(errors);
            return;
        }

        tracing::warn!("{} failed: {:?}", F::NAME, err);
        if let Some(notice) = err.notice() {
            self.gate.set_notice(notice.clone());
            self.effects.notify(&notice);
        }
        if let Some(path) = err.redirect() {
            self.effects.go_to(path);
        }
    }
}
