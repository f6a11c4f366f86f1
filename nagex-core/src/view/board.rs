//! Registry of per-order view-models.

use std::collections::HashMap;

use nagex_sdk::objects::{OrderId, StatusResult};

use super::status_view::StatusView;

/// View-model for a single tracked order.
#[derive(Debug, Clone, Default)]
pub struct OrderViewModel {
    last_seq: u64,
    view: Option<StatusView>,
}

impl OrderViewModel {
    /// The currently rendered view, if any result has been applied yet.
    pub fn view(&self) -> Option<&StatusView> {
        self.view.as_ref()
    }

    /// Sequence of the last applied result.
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }
}

/// Registry of view-models keyed by order id.
///
/// The board is the single authority on what each order currently
/// shows. Results carry the sequence stamped when their request was
/// issued; anything not newer than the last applied sequence is
/// discarded, which settles the poll-versus-update race in favor of the
/// most recently issued request.
#[derive(Debug, Default)]
pub struct OrderBoard {
    orders: HashMap<OrderId, OrderViewModel>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a fetched result.
    ///
    /// Returns the new view when the result was fresh, or `None` when it
    /// was stale and left the existing view untouched.
    pub fn apply(
        &mut self,
        order_id: &OrderId,
        seq: u64,
        result: &StatusResult,
    ) -> Option<&StatusView> {
        let entry = self.orders.entry(order_id.clone()).or_default();
        if seq <= entry.last_seq {
            return None;
        }
        entry.last_seq = seq;
        entry.view = Some(StatusView::for_result(result));
        entry.view.as_ref()
    }

    /// Look up the view-model for an order.
    pub fn get(&self, order_id: &OrderId) -> Option<&OrderViewModel> {
        self.orders.get(order_id)
    }
}
