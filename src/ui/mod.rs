pub mod auth;
pub mod common;
pub mod icon;
pub mod notifications;
pub mod pages;

pub use icon::{Icon, icons};
pub use notifications::{NotificationsContainer, provide_notifications, use_notifications};
