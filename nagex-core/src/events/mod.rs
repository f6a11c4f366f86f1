//! Event types and channels for the tracking pipeline.

mod channels;
mod types;

pub use channels::*;
pub use types::*;
