//! Display collaborators.
//!
//! The actual UI tree is outside this crate. The pipeline hands
//! finished views and notifications to these traits and takes no
//! further interest in them.

use nagex_sdk::objects::{NotificationEvent, OrderId};

use crate::view::StatusView;

/// Receives the rendered status view for an order.
pub trait StatusSurface: Send + Sync {
    /// Show `view` for `order_id`, replacing whatever was shown before.
    fn render(&self, order_id: &OrderId, view: &StatusView);
}

/// Receives transient notifications (toasts).
pub trait NotificationSurface: Send + Sync {
    /// Display the notification once. Events arrive in channel order.
    fn notify(&self, event: NotificationEvent);
}
