//! Single-flight submit gate and the observable flow status

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::validation::FieldErrors;

use super::backend::SignupEffects;

/// Coarse position of a flow, for progress display and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepKind {
    /// Nothing submitted yet, or the last run finished
    #[default]
    Idle,
    Validating,
    CreatingAccount,
    EstablishingSession,
    VerifyingSession,
    Finished,
}

impl StepKind {
    /// Whether this step waits on the network
    pub fn is_network(self) -> bool {
        matches!(
            self,
            StepKind::CreatingAccount | StepKind::EstablishingSession | StepKind::VerifyingSession
        )
    }
}

/// Snapshot of a form's flow, polled by callers that do not subscribe to
/// [`SignupEffects`](super::SignupEffects) callbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowStatus {
    pub busy: bool,
    pub step: StepKind,
    pub field_errors: FieldErrors,
    pub notice: Option<String>,
}

/// Flow state shared by every clone of one form's orchestrator.
///
/// The client is single-threaded and no borrow is held across an await, so
/// `Rc<RefCell<_>>` is enough.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    status: Rc<RefCell<FlowStatus>>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.status.borrow().busy
    }

    pub fn status(&self) -> FlowStatus {
        self.status.borrow().clone()
    }

    /// Claim the gate for one run. Returns `None` if a run is in flight.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.claim(None)
    }

    /// Claim the gate and report busy through `effects` until the run is
    /// released, however it ends.
    pub fn begin_with<'a>(&'a self, effects: &'a dyn SignupEffects) -> Option<InFlight<'a>> {
        let in_flight = self.claim(Some(effects))?;
        effects.busy_changed(true);
        Some(in_flight)
    }

    fn claim<'a>(&'a self, effects: Option<&'a dyn SignupEffects>) -> Option<InFlight<'a>> {
        let mut status = self.status.borrow_mut();
        if status.busy {
            return None;
        }
        status.busy = true;
        status.notice = None;
        Some(InFlight {
            gate: self,
            effects,
        })
    }

    /// Start of a new submission: stale messages go away
    pub(crate) fn reset_messages(&self) {
        let mut status = self.status.borrow_mut();
        status.notice = None;
        status.field_errors = FieldErrors::new();
    }

    pub(crate) fn set_step(&self, step: StepKind) {
        self.status.borrow_mut().step = step;
    }

    pub(crate) fn set_field_errors(&self, errors: FieldErrors) {
        self.status.borrow_mut().field_errors = errors;
    }

    pub(crate) fn set_notice(&self, notice: impl Into<String>) {
        self.status.borrow_mut().notice = Some(notice.into());
    }

    fn release(&self) {
        self.status.borrow_mut().busy = false;
    }
}

/// Proof that the gate is held. Dropping it releases the gate and reports
/// `busy_changed(false)`, so a run that is abandoned mid-flight cannot leave
/// the form busy.
pub struct InFlight<'a> {
    gate: &'a SubmitGate,
    effects: Option<&'a dyn SignupEffects>,
}

impl fmt::Debug for InFlight<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("status", &self.gate.status())
            .field("reports_busy", &self.effects.is_some())
            .finish()
    }
}

impl InFlight<'_> {
    /// Release the gate at a terminal state
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.release();
        if let Some(effects) = self.effects {
            effects.busy_changed(false);
        }
    }
}

/// Raises a "checking current user" flag for as long as it lives.
///
/// The flag drops back when the check returns and also when its future is
/// dropped part-way, e.g. by a call timeout.
pub struct UserCheck<F: Fn(bool)> {
    set: F,
}

impl<F: Fn(bool)> UserCheck<F> {
    pub fn start(set: F) -> Self {
        set(true);
        Self { set }
    }
}

impl<F: Fn(bool)> Drop for UserCheck<F> {
    fn drop(&mut self) {
        (self.set)(false);
    }
}
