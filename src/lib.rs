//! OpenSASE Chat Commerce
//!
//! Order intake from seller chat messages.
//!
//! ## Features
//! - Sell-command parsing (`sell 599 x2 10% off red medium cod`)
//! - Order payload projection with discounts and payment defaults
//! - Order store port with an in-memory implementation
//! - HTTP surface for the chat client

pub mod api;
pub mod config;
pub mod domain;
pub mod store;
pub mod telemetry;

pub use domain::aggregates::{project_order, OrderParties, OrderPayload, OrderRecord, OrderStatus};
pub use domain::sell_command::{is_sell_command, parse_sell_command, SellCommand, SellCommandError, SellCommandResult};
pub use domain::value_objects::{Color, Discount, Material, Money, PaymentMethod, Size, Variants};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ChatCommerceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, ChatCommerceError>;
