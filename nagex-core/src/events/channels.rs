//! Event channel factories and handles.
//!
//! Factory functions create the pipeline's channels with a shared
//! buffer size; the type aliases keep processor signatures readable.

use nagex_sdk::objects::NotificationEvent;
use tokio::sync::mpsc;

use super::types::{StatusFetched, TrackerCommand, UpdateRequest};

/// Default buffer size for event channels.
///
/// Enough to absorb bursts (a poll tick for every order landing at
/// once) while keeping memory bounded.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for StatusFetched events.
pub type StatusFetchedSender = mpsc::Sender<StatusFetched>;
/// Receiver handle for StatusFetched events.
pub type StatusFetchedReceiver = mpsc::Receiver<StatusFetched>;

/// Sender handle for UpdateRequest commands.
pub type UpdateRequestSender = mpsc::Sender<UpdateRequest>;
/// Receiver handle for UpdateRequest commands.
pub type UpdateRequestReceiver = mpsc::Receiver<UpdateRequest>;

/// Sender handle for TrackerCommand commands.
pub type TrackerCommandSender = mpsc::Sender<TrackerCommand>;
/// Receiver handle for TrackerCommand commands.
pub type TrackerCommandReceiver = mpsc::Receiver<TrackerCommand>;

/// Sender handle for NotificationEvent events.
pub type NotificationSender = mpsc::Sender<NotificationEvent>;
/// Receiver handle for NotificationEvent events.
pub type NotificationReceiver = mpsc::Receiver<NotificationEvent>;

/// Create a new StatusFetched channel.
///
/// Both the poller and the update controller hold senders; the surface
/// binder holds the receiver.
pub fn status_fetched_channel() -> (StatusFetchedSender, StatusFetchedReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new UpdateRequest channel.
pub fn update_request_channel() -> (UpdateRequestSender, UpdateRequestReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new TrackerCommand channel.
pub fn tracker_command_channel() -> (TrackerCommandSender, TrackerCommandReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new NotificationEvent channel.
///
/// Events queue here in arrival order when the display falls behind.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
