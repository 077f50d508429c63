//! Snapgram - account sign-up and sign-in
//!
//! Leptos front end for an Appwrite-style account backend. Form rules and the
//! submission flows live in [`core`]; components and the REST client in [`ui`].

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
