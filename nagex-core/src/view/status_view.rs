//! Rendered representation of an order status.

use compact_str::{CompactString, format_compact};
use nagex_sdk::objects::StatusResult;

/// What the display surface shows for one order: a single status class
/// and the localized label.
///
/// Building a view *replaces* the class rather than appending to it, so
/// re-rendering any number of results leaves exactly one `status-…`
/// class in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    /// Display class, always of the form `status-<code>`.
    pub class: CompactString,
    /// Localized display text from the server. Never parsed.
    pub label: CompactString,
}

impl StatusView {
    /// Build the view for a status result.
    pub fn for_result(result: &StatusResult) -> Self {
        Self {
            class: format_compact!("status-{}", result.status),
            label: result.status_display.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nagex_sdk::objects::OrderStatus;

    #[test]
    fn view_carries_one_status_class() {
        let result = StatusResult {
            status: OrderStatus::Delivered,
            status_display: "ডেলিভারি সম্পন্ন".into(),
        };
        let view = StatusView::for_result(&result);
        assert_eq!(view.class, "status-delivered");
        assert_eq!(view.label, "ডেলিভারি সম্পন্ন");

        // Rendering the same result again replaces, never accumulates.
        assert_eq!(StatusView::for_result(&result), view);
    }
}
