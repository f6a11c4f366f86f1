//! Event type definitions for the tracking pipeline.
//!
//! Events are ephemeral and carry the full result they describe.
//! Ordering between competing results for the same order is resolved by
//! the sequence number stamped when the originating request was issued,
//! not by arrival order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use nagex_sdk::objects::{OrderId, OrderStatus, StatusResult};

/// Stamps every status request with a monotonically increasing sequence.
///
/// The stamp is taken when the request is *issued*, so a poll that was
/// already in flight when an operator update started can never
/// overwrite the update's result, regardless of response arrival order.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    next: Arc<AtomicU64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next sequence number. Starts at 1; 0 means "nothing
    /// applied yet".
    pub fn next_seq(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// A status result obtained from the order service, stamped with the
/// sequence of the request that produced it.
#[derive(Debug, Clone)]
pub struct StatusFetched {
    pub order_id: OrderId,
    pub seq: u64,
    pub result: StatusResult,
}

/// An operator-initiated request to change an order's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub order_id: OrderId,
    pub new_status: OrderStatus,
}

/// Commands that change the set of orders the poller keeps in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Start polling an order.
    Track(OrderId),
    /// Stop polling an order; its tick loop is aborted.
    Untrack(OrderId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencer_is_monotonic_across_clones() {
        let sequencer = Sequencer::new();
        let other = sequencer.clone();
        let a = sequencer.next_seq();
        let b = other.next_seq();
        let c = sequencer.next_seq();
        assert!(a < b && b < c);
        assert_eq!(a, 1);
    }
}
