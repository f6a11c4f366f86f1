//! Wire objects shared between the tracking pipeline and the order
//! service.

pub mod location;
pub mod notification;
pub mod status;

pub use location::LocationReport;
pub use notification::{NotificationEvent, NotificationKind};
pub use status::{OrderId, OrderStatus, StatusResult};
