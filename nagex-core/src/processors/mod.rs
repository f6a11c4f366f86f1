//! Long-running pipeline processors.
//!
//! Each processor is a struct with a `run()` method driving a
//! `tokio::select!` loop until the shutdown signal fires or its input
//! channels close.

mod binder;
mod poller;
mod relay;
mod updater;

pub use binder::SurfaceBinder;
pub use poller::{POLL_PERIOD, StatusPoller, TrackingGuard};
pub use relay::NotificationRelay;
pub use updater::UpdateController;
