//! Client-side paths the auth flows navigate to

/// Application home, the destination after a successful signup or signin
pub const HOME: &str = "/";

/// Manual sign-in entry point
pub const SIGN_IN: &str = "/sign-in";

/// Signup form
pub const SIGN_UP: &str = "/sign-up";
