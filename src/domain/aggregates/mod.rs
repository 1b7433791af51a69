//! Aggregates module
pub mod order;

pub use order::{project_order, OrderChannel, OrderParties, OrderPayload, OrderRecord, OrderStatus};
