//! Form-side effects of the auth flows: notices, navigation, signals

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::core::signup::SignupEffects;
use crate::core::validation::FieldErrors;
use crate::ui::notifications::NotificationManager;

/// Binds a flow's effects to one form's signals.
#[derive(Clone)]
pub struct FormEffects<N> {
    notifications: NotificationManager,
    busy: RwSignal<bool>,
    field_errors: RwSignal<FieldErrors>,
    fields: Vec<RwSignal<String>>,
    navigate: N,
}

impl<N> FormEffects<N>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    pub fn new(
        notifications: NotificationManager,
        busy: RwSignal<bool>,
        field_errors: RwSignal<FieldErrors>,
        fields: Vec<RwSignal<String>>,
        navigate: N,
    ) -> Self {
        Self {
            notifications,
            busy,
            field_errors,
            fields,
            navigate,
        }
    }
}

impl<N> SignupEffects for FormEffects<N>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    fn notify(&self, message: &str) {
        self.notifications.notify(message);
    }

    fn go_to(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }

    fn reset_form(&self) {
        // The form may already be unmounted by the time a run ends
        for field in &self.fields {
            field.try_set(String::new());
        }
        self.field_errors.try_set(FieldErrors::new());
    }

    fn busy_changed(&self, busy: bool) {
        self.busy.try_set(busy);
    }

    fn show_field_errors(&self, errors: &FieldErrors) {
        self.field_errors.try_set(errors.clone());
    }
}
