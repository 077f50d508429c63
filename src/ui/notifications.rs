//! Toast notifications
//!
//! The notice surface of the auth flows: short, transient messages shown in
//! the corner of the page.

use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// How long a notice stays on screen
const AUTO_DISMISS_MS: u32 = 5000;

/// Notification item with unique ID for tracking
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationItem {
    pub id: u64,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

/// Notifications container component
/// Place this once at the application root
#[component]
pub fn NotificationsContainer(
    /// Signal containing the list of notifications
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm" role="status" aria-live="polite">
            {move || {
                notifications.get().into_iter().map(|item| {
                    view! {
                        <NotificationToast item=item notifications=notifications />
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Single notification toast component
#[component]
fn NotificationToast(
    item: NotificationItem,
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    let id = item.id;
    let (is_exiting, _set_is_exiting) = signal(false);

    // Auto-dismiss if specified
    if let Some(_ms) = item.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                _set_is_exiting.set(true);
                // Wait for exit animation
                TimeoutFuture::new(300).await;
                notifications.update(|n| {
                    n.retain(|i| i.id != id);
                });
            });
        }
    }

    view! {
        <div
            class="flex items-start gap-3 p-4 rounded-lg border border-dark-4 bg-dark-2 shadow-lg transition-all duration-300"
            style=move || if is_exiting.get() { "opacity: 0; transform: translateX(1rem);" } else { "opacity: 1; transform: translateX(0);" }
        >
            <p class="flex-1 min-w-0 text-sm font-medium text-light-1">{item.message.clone()}</p>
            <button
                class="text-light-3 hover:text-light-1 transition-colors"
                aria-label="Dismiss"
                on:click=move |_| {
                    notifications.update(|n| {
                        n.retain(|i| i.id != id);
                    });
                }
            >
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                </svg>
            </button>
        </div>
    }
}

/// Handle to the notification list
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Get the notifications signal for the container
    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    /// Show a notice that dismisses itself
    pub fn notify(&self, message: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let item = NotificationItem {
            id,
            message: message.into(),
            auto_dismiss_ms: Some(AUTO_DISMISS_MS),
        };

        self.notifications.update(|n| {
            n.push_back(item);

            // Remove oldest if we exceed max
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });
    }

    /// Clear all notifications
    pub fn clear(&self) {
        self.notifications.set(VecDeque::new());
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Provide the notification manager to the component tree
pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

/// Get the notification manager from the component tree
pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;

    #[test]
    fn test_notify_appends_in_order() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = NotificationManager::new();
            manager.notify("first");
            manager.notify("second");

            let items = manager.notifications().get_untracked();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].message, "first");
            assert_eq!(items[1].message, "second");
            assert_ne!(items[0].id, items[1].id);
            assert_eq!(items[0].auto_dismiss_ms, Some(AUTO_DISMISS_MS));
        });
    }

    #[test]
    fn test_oldest_dropped_beyond_max() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = NotificationManager::new();
            for i in 0..MAX_NOTIFICATIONS + 2 {
                manager.notify(format!("notice {}", i));
            }

            let items = manager.notifications().get_untracked();
            assert_eq!(items.len(), MAX_NOTIFICATIONS);
            assert_eq!(items[0].message, "notice 2");

            manager.clear();
            assert!(manager.notifications().get_untracked().is_empty());
        });
    }
}
