//! Core signup logic: validation rules, backend configuration and the
//! signup/signin orchestration. Nothing here touches the DOM.

pub mod config;
pub mod routes;
pub mod signup;
pub mod validation;

pub use config::BackendConfig;
pub use signup::{
    AccountBackend, FlowError, FlowStatus, SigninError, SigninOrchestrator, SignupEffects,
    SignupError, SignupOrchestrator, StepKind, SubmitError, UserCheck,
};
pub use validation::{
    Field, FieldErrors, Schema, SigninDraft, SigninInput, SignupDraft, SignupInput,
    validate_signin, validate_signup,
};
