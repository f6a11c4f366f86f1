//! Push notification payloads from the notification stream.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Severity of a push notification, mirroring the alert styling levels
/// used by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Danger,
    Info,
    Warning,
}

/// A single transient notification.
///
/// Rendered once by the display surface and discarded; the pipeline
/// forwards it unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: CompactString,
    pub message: CompactString,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}
