//! SurfaceBinder processor.
//!
//! The SurfaceBinder is responsible for:
//! - Owning the [`OrderBoard`] and applying every `StatusFetched` to it
//! - Pushing fresh views to the status surface and dropping stale ones
//! - Forwarding pushed notifications to the notification surface in
//!   arrival order
//!
//! All rendering goes through this single task, so the surfaces never
//! see two results for the same order race each other.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::events::{NotificationReceiver, StatusFetched, StatusFetchedReceiver};
use crate::surface::{NotificationSurface, StatusSurface};
use crate::view::OrderBoard;

/// SurfaceBinder funnels pipeline output onto the display surfaces.
pub struct SurfaceBinder {
    board: OrderBoard,
    status_surface: Arc<dyn StatusSurface>,
    notification_surface: Arc<dyn NotificationSurface>,
}

impl SurfaceBinder {
    /// Create a new SurfaceBinder with an empty board.
    pub fn new(
        status_surface: Arc<dyn StatusSurface>,
        notification_surface: Arc<dyn NotificationSurface>,
    ) -> Self {
        Self {
            board: OrderBoard::new(),
            status_surface,
            notification_surface,
        }
    }

    /// Run until shutdown or until both input channels close.
    pub async fn run(
        mut self,
        mut fetched_rx: StatusFetchedReceiver,
        mut notification_rx: NotificationReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        info!("SurfaceBinder started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("SurfaceBinder received shutdown signal");
                        break;
                    }
                }

                Some(fetched) = fetched_rx.recv() => self.apply(fetched),

                Some(event) = notification_rx.recv() => {
                    debug!(title = %event.title, kind = ?event.kind, "Forwarding notification");
                    self.notification_surface.notify(event);
                }

                else => {
                    info!("SurfaceBinder input channels closed");
                    break;
                }
            }
        }

        info!("SurfaceBinder shutdown complete");
    }

    fn apply(&mut self, fetched: StatusFetched) {
        let StatusFetched {
            order_id,
            seq,
            result,
        } = fetched;
        match self.board.apply(&order_id, seq, &result) {
            Some(view) => {
                debug!(%order_id, seq, class = %view.class, "Rendering status");
                self.status_surface.render(&order_id, view);
            }
            None => {
                debug!(%order_id, seq, "Dropped stale status result");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::{notification_channel, status_fetched_channel};
    use crate::view::StatusView;
    use nagex_sdk::objects::{
        NotificationEvent, NotificationKind, OrderId, OrderStatus, StatusResult,
    };
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        renders: Mutex<Vec<(OrderId, StatusView)>>,
        notifications: Mutex<Vec<NotificationEvent>>,
    }

    impl StatusSurface for Recorder {
        fn render(&self, order_id: &OrderId, view: &StatusView) {
            self.renders
                .lock()
                .unwrap()
                .push((order_id.clone(), view.clone()));
        }
    }

    impl NotificationSurface for Recorder {
        fn notify(&self, event: NotificationEvent) {
            self.notifications.lock().unwrap().push(event);
        }
    }

    fn fetched(order_id: &str, seq: u64, status: OrderStatus, display: &str) -> StatusFetched {
        StatusFetched {
            order_id: OrderId::new(order_id),
            seq,
            result: StatusResult {
                status,
                status_display: display.into(),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn later_issued_update_beats_stale_poll_response() {
        let recorder = Arc::new(Recorder::default());
        let (fetched_tx, fetched_rx) = status_fetched_channel();
        let (_notification_tx, notification_rx) = notification_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let binder = SurfaceBinder::new(recorder.clone(), recorder.clone());
        let handle = tokio::spawn(binder.run(fetched_rx, notification_rx, shutdown_rx));

        // The update (seq 2) lands first; the poll issued before it
        // (seq 1) arrives late and must not overwrite it.
        fetched_tx
            .send(fetched("42", 2, OrderStatus::Delivered, "ডেলিভারি সম্পন্ন"))
            .await
            .unwrap();
        fetched_tx
            .send(fetched("42", 1, OrderStatus::Processing, "প্রক্রিয়াধীন"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        let renders = recorder.renders.lock().unwrap();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].0, OrderId::new("42"));
        assert_eq!(renders[0].1.class, "status-delivered");
        assert_eq!(renders[0].1.label, "ডেলিভারি সম্পন্ন");
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_result_renders_once() {
        let recorder = Arc::new(Recorder::default());
        let (fetched_tx, fetched_rx) = status_fetched_channel();
        let (_notification_tx, notification_rx) = notification_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let binder = SurfaceBinder::new(recorder.clone(), recorder.clone());
        let handle = tokio::spawn(binder.run(fetched_rx, notification_rx, shutdown_rx));

        let event = fetched("7", 3, OrderStatus::Dispatched, "প্রেরিত");
        fetched_tx.send(event.clone()).await.unwrap();
        fetched_tx.send(event).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(recorder.renders.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn notifications_pass_through_unmodified_in_order() {
        let recorder = Arc::new(Recorder::default());
        let (_fetched_tx, fetched_rx) = status_fetched_channel();
        let (notification_tx, notification_rx) = notification_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let binder = SurfaceBinder::new(recorder.clone(), recorder.clone());
        let handle = tokio::spawn(binder.run(fetched_rx, notification_rx, shutdown_rx));

        let first = NotificationEvent {
            title: "অর্ডার আপডেট".into(),
            message: "আপনার অর্ডার প্রেরিত হয়েছে".into(),
            kind: NotificationKind::Info,
        };
        let second = NotificationEvent {
            title: "সতর্কতা".into(),
            message: "ডেলিভারি বিলম্বিত".into(),
            kind: NotificationKind::Warning,
        };
        notification_tx.send(first.clone()).await.unwrap();
        notification_tx.send(second.clone()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        let notifications = recorder.notifications.lock().unwrap();
        assert_eq!(notifications.as_slice(), &[first, second]);
    }
}
