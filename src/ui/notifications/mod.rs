// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for recoverable failures and completed actions.
//!
//! Success and info toasts disappear after 3s, warnings after 5s; errors stay
//! until dismissed. At most three are visible, the rest are queued.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
