//! Delivery-agent location report.

use serde::{Deserialize, Serialize};

/// One geolocation sample reported by a delivery agent's device.
///
/// Fire-and-forget: the server does not answer with anything the
/// pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub latitude: f64,
    pub longitude: f64,
}
