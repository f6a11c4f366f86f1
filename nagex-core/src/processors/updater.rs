//! UpdateController processor.
//!
//! The UpdateController is responsible for:
//! - Receiving operator `UpdateRequest`s
//! - Issuing the status-update call, one request in flight per action
//! - On success, emitting the stamped `StatusFetched` (so the new
//!   status renders ahead of the next poll tick) and exactly one
//!   success notification
//! - On failure, leaving the rendered status alone and emitting exactly
//!   one danger notification; no automatic retry

use std::convert::Infallible;

use compact_str::format_compact;
use kanau::processor::Processor;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::events::{
    NotificationSender, Sequencer, StatusFetched, StatusFetchedSender, UpdateRequest,
    UpdateRequestReceiver,
};
use crate::source::StatusSource;
use nagex_sdk::objects::{NotificationEvent, NotificationKind, OrderId};

/// Notification text for a successful update.
const UPDATE_OK_MESSAGE: &str = "অর্ডার অবস্থা সফলভাবে আপডেট হয়েছে";
/// Notification text for a rejected update.
const UPDATE_FAILED_MESSAGE: &str = "অর্ডার অবস্থা আপডেট করতে ব্যর্থ";

/// UpdateController applies operator-initiated status changes.
#[derive(Clone)]
pub struct UpdateController<S> {
    client: S,
    sequencer: Sequencer,
    fetched_tx: StatusFetchedSender,
    notification_tx: NotificationSender,
}

impl<S> UpdateController<S>
where
    S: StatusSource + Clone + 'static,
{
    /// Create a new UpdateController.
    pub fn new(
        client: S,
        sequencer: Sequencer,
        fetched_tx: StatusFetchedSender,
        notification_tx: NotificationSender,
    ) -> Self {
        Self {
            client,
            sequencer,
            fetched_tx,
            notification_tx,
        }
    }

    /// Run until shutdown.
    ///
    /// Each request is handled in its own task so updates for different
    /// orders stay independent of each other and of polling.
    pub async fn run(
        self,
        mut request_rx: UpdateRequestReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        info!("UpdateController started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("UpdateController received shutdown signal");
                        break;
                    }
                }

                Some(request) = request_rx.recv() => {
                    debug!(
                        order_id = %request.order_id,
                        new_status = %request.new_status,
                        "Received UpdateRequest"
                    );
                    let controller = self.clone();
                    tokio::spawn(async move {
                        let _ = controller.process(request).await;
                    });
                }

                else => {
                    info!("UpdateRequest channel closed");
                    break;
                }
            }
        }

        info!("UpdateController shutdown complete");
    }

    async fn notify(&self, order_id: &OrderId, kind: NotificationKind, message: &str) {
        let event = NotificationEvent {
            title: format_compact!("অর্ডার {order_id}"),
            message: message.into(),
            kind,
        };
        if self.notification_tx.send(event).await.is_err() {
            warn!(%order_id, "Notification receiver dropped");
        }
    }
}

impl<S> Processor<UpdateRequest> for UpdateController<S>
where
    S: StatusSource + Clone + 'static,
{
    type Output = ();
    type Error = Infallible;

    async fn process(&self, request: UpdateRequest) -> Result<(), Infallible> {
        // Stamp before issuing so a poll response already in flight can
        // never overwrite this update's result.
        let seq = self.sequencer.next_seq();

        match self
            .client
            .update_status(&request.order_id, request.new_status)
            .await
        {
            Ok(result) => {
                info!(
                    order_id = %request.order_id,
                    seq,
                    status = %result.status,
                    "Order status updated"
                );
                let fetched = StatusFetched {
                    order_id: request.order_id.clone(),
                    seq,
                    result,
                };
                if self.fetched_tx.send(fetched).await.is_err() {
                    warn!(order_id = %request.order_id, "StatusFetched receiver dropped");
                }
                self.notify(&request.order_id, NotificationKind::Success, UPDATE_OK_MESSAGE)
                    .await;
            }
            Err(e) => {
                warn!(
                    order_id = %request.order_id,
                    error = %e,
                    "Status update rejected"
                );
                self.notify(
                    &request.order_id,
                    NotificationKind::Danger,
                    UPDATE_FAILED_MESSAGE,
                )
                .await;
            }
        }

        Ok(())
    }
}
