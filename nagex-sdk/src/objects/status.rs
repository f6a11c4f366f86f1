//! Order identity and status types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque identifier for an order.
///
/// The pipeline never interprets the id; it only keys per-order state
/// and builds endpoint paths with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(CompactString);

impl OrderId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order status codes as defined by the order service.
///
/// The set is owned by the server; a code outside it fails
/// deserialization instead of being carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Dispatched,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Wire code for this status, also the `<code>` part of the
    /// `status-<code>` display class.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status code.
#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub CompactString);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "dispatched" => Ok(OrderStatus::Dispatched),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "returned" => Ok(OrderStatus::Returned),
            other => Err(UnknownStatus(other.into())),
        }
    }
}

/// Response returned by both the status read and the status update
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// Current status code.
    pub status: OrderStatus,
    /// Localized human-readable label. Advisory only, never parsed.
    pub status_display: CompactString,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_through_from_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Dispatched,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_result_decodes_localized_display() {
        let result: StatusResult = serde_json::from_str(
            r#"{"status":"delivered","status_display":"ডেলিভারি সম্পন্ন"}"#,
        )
        .unwrap();
        assert_eq!(result.status, OrderStatus::Delivered);
        assert_eq!(result.status_display, "ডেলিভারি সম্পন্ন");
    }

    #[test]
    fn unknown_status_code_fails_deserialization() {
        let result = serde_json::from_str::<StatusResult>(
            r#"{"status":"teleported","status_display":"?"}"#,
        );
        assert!(result.is_err());
    }
}
