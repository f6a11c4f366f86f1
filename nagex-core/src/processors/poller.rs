//! StatusPoller processor.
//!
//! The StatusPoller is responsible for:
//! - Spawning one tick-loop task per tracked order
//! - Fetching the order's status every [`POLL_PERIOD`]
//! - Stamping successful results and forwarding them as `StatusFetched`
//! - Skipping failed ticks silently (the next tick retries)
//! - Reconciling the tracked set on `TrackerCommand` events

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::{
    Sequencer, StatusFetched, StatusFetchedSender, TrackerCommand, TrackerCommandReceiver,
    TrackerCommandSender,
};
use crate::source::StatusSource;
use nagex_sdk::objects::OrderId;

/// Fixed polling period for tracked orders.
pub const POLL_PERIOD: Duration = Duration::from_secs(30);

/// StatusPoller keeps every tracked order's status in sync with the
/// server.
pub struct StatusPoller<S> {
    client: S,
    sequencer: Sequencer,
    fetched_tx: StatusFetchedSender,
    period: Duration,
}

impl<S> StatusPoller<S>
where
    S: StatusSource + Clone + 'static,
{
    /// Create a new StatusPoller.
    ///
    /// # Arguments
    ///
    /// * `client` - Source of order statuses
    /// * `sequencer` - Shared sequence stamp, also used by the updater
    /// * `fetched_tx` - Sender for StatusFetched events
    pub fn new(client: S, sequencer: Sequencer, fetched_tx: StatusFetchedSender) -> Self {
        Self {
            client,
            sequencer,
            fetched_tx,
            period: POLL_PERIOD,
        }
    }

    /// Override the polling period. Production uses the fixed
    /// [`POLL_PERIOD`]; this exists for tests.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Run until shutdown, polling every order in `initial` plus
    /// whatever [`TrackerCommand`]s add later.
    ///
    /// No loop is spawned when the tracked set is empty at start; the
    /// first `Track` command spawns one.
    pub async fn run(
        self,
        initial: Vec<OrderId>,
        mut command_rx: TrackerCommandReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut active: Vec<(OrderId, JoinHandle<()>)> = Vec::new();
        for order_id in initial {
            self.track(&mut active, order_id);
        }
        info!(orders = active.len(), "StatusPoller started");

        loop {
            tokio::select! {
                biased;

                // Shutdown has highest priority.
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("StatusPoller received shutdown signal");
                        break;
                    }
                }

                Some(command) = command_rx.recv() => match command {
                    TrackerCommand::Track(order_id) => self.track(&mut active, order_id),
                    TrackerCommand::Untrack(order_id) => untrack(&mut active, &order_id),
                },

                else => {
                    info!("TrackerCommand channel closed");
                    break;
                }
            }
        }

        for (_, handle) in active {
            handle.abort();
        }
        info!("StatusPoller shutdown complete");
    }

    /// Spawn a tick loop for `order_id` unless one is already running.
    fn track(&self, active: &mut Vec<(OrderId, JoinHandle<()>)>, order_id: OrderId) {
        if active.iter().any(|(id, _)| *id == order_id) {
            debug!(%order_id, "Order already tracked");
            return;
        }
        info!(%order_id, "Tracking order");
        let handle = self.spawn_tick_loop(order_id.clone());
        active.push((order_id, handle));
    }

    /// Spawn the per-order tick loop.
    ///
    /// Each iteration sleeps one period, stamps a sequence, fetches the
    /// status and forwards it. A failed fetch only skips the tick; the
    /// loop itself never fails, so one order's outages cannot disturb
    /// another order's schedule.
    fn spawn_tick_loop(&self, order_id: OrderId) -> JoinHandle<()> {
        let client = self.client.clone();
        let sequencer = self.sequencer.clone();
        let fetched_tx = self.fetched_tx.clone();
        let period = self.period;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;

                // Stamp before issuing so a later-issued update always
                // outranks this tick's result.
                let seq = sequencer.next_seq();
                match client.fetch_status(&order_id).await {
                    Ok(result) => {
                        let fetched = StatusFetched {
                            order_id: order_id.clone(),
                            seq,
                            result,
                        };
                        if fetched_tx.send(fetched).await.is_err() {
                            warn!(%order_id, "StatusFetched receiver dropped, stopping tick loop");
                            return;
                        }
                        debug!(%order_id, seq, "Poll tick forwarded");
                    }
                    Err(e) => {
                        // Read failures are silent: skip this tick and
                        // retry unconditionally on the next one.
                        debug!(%order_id, seq, error = %e, "Poll tick failed");
                    }
                }
            }
        })
    }
}

/// Abort and remove the tick loop for `order_id`.
fn untrack(active: &mut Vec<(OrderId, JoinHandle<()>)>, order_id: &OrderId) {
    active.retain(|(id, handle)| {
        let keep = id != order_id;
        if !keep {
            info!(%order_id, "Untracking order");
            handle.abort();
        }
        keep
    });
}

/// Keeps an order tracked for the guard's lifetime.
///
/// Dropping the guard asks the poller to stop that order's tick loop,
/// so polling ends together with the scope that owns the tracked
/// element.
#[derive(Debug)]
pub struct TrackingGuard {
    order_id: OrderId,
    commands: TrackerCommandSender,
}

impl TrackingGuard {
    /// Register `order_id` with the poller and return the guard.
    pub async fn track(order_id: OrderId, commands: TrackerCommandSender) -> Self {
        let _ = commands
            .send(TrackerCommand::Track(order_id.clone()))
            .await;
        Self { order_id, commands }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        // Best effort: if the channel is closed the poller is already
        // shutting down and will abort the loop itself.
        let _ = self
            .commands
            .try_send(TrackerCommand::Untrack(self.order_id.clone()));
    }
}
