//! NotificationRelay processor.
//!
//! The NotificationRelay is responsible for:
//! - Draining the push notification stream
//! - Forwarding decoded events into the notification channel
//! - Skipping malformed payloads without dropping the stream
//! - Ending when the transport ends the stream

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::events::NotificationSender;
use crate::source::NotificationSource;
use nagex_sdk::client::StreamError;

/// NotificationRelay pumps pushed events into the pipeline.
pub struct NotificationRelay<N> {
    stream: N,
    notification_tx: NotificationSender,
}

impl<N> NotificationRelay<N>
where
    N: NotificationSource + 'static,
{
    /// Create a new NotificationRelay over an open stream.
    pub fn new(stream: N, notification_tx: NotificationSender) -> Self {
        Self {
            stream,
            notification_tx,
        }
    }

    /// Run until shutdown, a transport error, or the end of the stream.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("NotificationRelay started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("NotificationRelay received shutdown signal");
                        break;
                    }
                }

                event = self.stream.next_event() => match event {
                    Some(Ok(event)) => {
                        if self.notification_tx.send(event).await.is_err() {
                            warn!("Notification receiver dropped, stopping relay");
                            break;
                        }
                    }
                    // A malformed payload poisons only itself.
                    Some(Err(StreamError::Decode { payload, source })) => {
                        warn!(%payload, error = %source, "Skipping undecodable notification");
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "Notification stream failed");
                        break;
                    }
                    None => {
                        info!("Notification stream ended");
                        break;
                    }
                },
            }
        }

        info!("NotificationRelay shutdown complete");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::notification_channel;
    use async_trait::async_trait;
    use nagex_sdk::objects::{NotificationEvent, NotificationKind};
    use std::collections::VecDeque;
    use std::time::Duration;

    struct ScriptedStream {
        events: VecDeque<Result<NotificationEvent, StreamError>>,
    }

    #[async_trait]
    impl NotificationSource for ScriptedStream {
        async fn next_event(&mut self) -> Option<Result<NotificationEvent, StreamError>> {
            self.events.pop_front()
        }
    }

    fn event(title: &str) -> NotificationEvent {
        NotificationEvent {
            title: title.into(),
            message: "আপনার অর্ডার আপডেট হয়েছে".into(),
            kind: NotificationKind::Info,
        }
    }

    fn decode_error() -> StreamError {
        let source = serde_json::from_str::<NotificationEvent>("{").unwrap_err();
        StreamError::Decode {
            payload: "{".into(),
            source,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_payload_does_not_break_the_stream() {
        let (notification_tx, mut notification_rx) = notification_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let stream = ScriptedStream {
            events: VecDeque::from([
                Ok(event("প্রথম")),
                Err(decode_error()),
                Ok(event("দ্বিতীয়")),
            ]),
        };
        let relay = NotificationRelay::new(stream, notification_tx);
        let handle = tokio::spawn(relay.run(shutdown_rx));

        assert_eq!(notification_rx.recv().await.unwrap(), event("প্রথম"));
        assert_eq!(notification_rx.recv().await.unwrap(), event("দ্বিতীয়"));

        // Stream end stops the relay and closes the channel.
        handle.await.unwrap();
        assert!(notification_rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_an_idle_relay() {
        let (notification_tx, _notification_rx) = notification_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        struct PendingStream;

        #[async_trait]
        impl NotificationSource for PendingStream {
            async fn next_event(&mut self) -> Option<Result<NotificationEvent, StreamError>> {
                // Models a quiet connection with nothing pushed yet.
                tokio::time::sleep(Duration::from_secs(3600)).await;
                None
            }
        }

        let relay = NotificationRelay::new(PendingStream, notification_tx);
        let handle = tokio::spawn(relay.run(shutdown_rx));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
