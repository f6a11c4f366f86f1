//! Per-order view-models.
//!
//! The board is the explicit stand-in for what the page's DOM used to
//! be: one view-model per order, mutated only through
//! [`OrderBoard::apply`], with a binding layer pushing finished views
//! out to the real display.

mod board;
mod status_view;

pub use board::{OrderBoard, OrderViewModel};
pub use status_view::StatusView;
