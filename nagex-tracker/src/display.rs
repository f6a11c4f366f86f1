//! Console rendering surface.

use nagex_core::surface::{NotificationSurface, StatusSurface};
use nagex_core::view::StatusView;
use nagex_sdk::objects::{NotificationEvent, OrderId};

/// Renders pipeline output as structured log lines.
///
/// The board already settled which result wins, so the surface prints
/// whatever it is handed, one line per render and one per notification.
pub struct ConsoleSurface;

impl StatusSurface for ConsoleSurface {
    fn render(&self, order_id: &OrderId, view: &StatusView) {
        tracing::info!(
            target: "nagex_tracker::display",
            %order_id,
            class = %view.class,
            "{}",
            view.label
        );
    }
}

impl NotificationSurface for ConsoleSurface {
    fn notify(&self, event: NotificationEvent) {
        tracing::info!(
            target: "nagex_tracker::display",
            kind = ?event.kind,
            "{}: {}",
            event.title,
            event.message
        );
    }
}
