//! Signup orchestration
//!
//! Validated input drives three dependent backend calls (create account,
//! create session, verify session). Each call's outcome selects the next state
//! or one of the terminal failures, and every terminal state is surfaced to the
//! user through [`SignupEffects`]. The signin flow reuses the session tail.

mod backend;
mod flow;
mod gate;
mod machine;
mod orchestrator;
mod timeout;

pub use backend::{AccountBackend, SignupEffects};
pub use flow::{Calls, Flow, Signin, Signup};
pub use gate::{FlowStatus, InFlight, StepKind, SubmitGate, UserCheck};
pub use machine::{FlowError, FlowStep, SigninError, SigninStep, SignupError, SignupStep};
pub use orchestrator::{Orchestrator, SigninOrchestrator, SignupOrchestrator, SubmitError};
pub use timeout::with_timeout;
