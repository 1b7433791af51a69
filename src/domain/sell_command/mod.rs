//! Sell-command interpreter
//!
//! Reads chat messages such as `sell 599 x2 10% off red medium cod` into a
//! structured order intent. Parsing never fails loudly: a message that is
//! not a well-formed command comes back as an invalid [`SellCommandResult`]
//! and the chat layer treats it as ordinary text.

pub mod stages;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{Discount, Money, PaymentMethod, Variants};
use crate::ChatCommerceError;

/// Why a message was not accepted as a sell command.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellCommandError {
    #[error("Not a sell command")]
    NotASellCommand,

    #[error("Price is required")]
    MissingPrice,

    #[error("Price must be positive")]
    NonPositivePrice,

    #[error("Price is out of range")]
    PriceOutOfRange,
}

/// A well-formed sell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellCommand {
    pub price: Money,
    pub quantity: u32,
    pub variants: Option<Variants>,
    pub discount: Option<Discount>,
    pub payment_method: Option<PaymentMethod>,
}

impl SellCommand {
    pub fn parse(text: &str) -> Result<Self, SellCommandError> {
        let body = stages::keyword(text)?;
        let (price, rest) = stages::price(body)?;
        let (quantity, rest) = stages::quantity(rest);
        let (variants, rest) = stages::variants(rest);
        let (discount, rest) = stages::discount(rest);
        let payment_method = stages::payment_method(&rest);
        Ok(Self { price, quantity: quantity.unwrap_or(1), variants, discount, payment_method })
    }
}

/// Flat parse outcome as handed to the chat layer and serialized over the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellCommandResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Variants>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<SellCommand, SellCommandError>> for SellCommandResult {
    fn from(parsed: Result<SellCommand, SellCommandError>) -> Self {
        match parsed {
            Ok(cmd) => Self {
                is_valid: true,
                price: Some(cmd.price),
                quantity: cmd.quantity,
                variants: cmd.variants,
                discount: cmd.discount,
                payment_method: cmd.payment_method,
                error: None,
            },
            Err(e) => Self {
                is_valid: false,
                price: None,
                quantity: 1,
                variants: None,
                discount: None,
                payment_method: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl TryFrom<&SellCommandResult> for SellCommand {
    type Error = ChatCommerceError;

    fn try_from(result: &SellCommandResult) -> Result<Self, Self::Error> {
        if !result.is_valid {
            return Err(ChatCommerceError::InvalidArgument("sell command result is not valid".into()));
        }
        let price = result.price.filter(Money::is_positive)
            .ok_or_else(|| ChatCommerceError::InvalidArgument("sell command result has no price".into()))?;
        if result.quantity == 0 {
            return Err(ChatCommerceError::InvalidArgument("quantity must be at least 1".into()));
        }
        Ok(Self {
            price,
            quantity: result.quantity,
            variants: result.variants.clone(),
            discount: result.discount,
            payment_method: result.payment_method,
        })
    }
}

/// Parses one chat message. Pure; calling it twice on the same text gives
/// identical results.
pub fn parse_sell_command(text: &str) -> SellCommandResult {
    let parsed = SellCommand::parse(text);
    match &parsed {
        Ok(cmd) => tracing::debug!(price = %cmd.price, quantity = cmd.quantity, "parsed sell command"),
        Err(e) => tracing::debug!(reason = %e, "message is not a sell command"),
    }
    parsed.into()
}

pub fn is_sell_command(text: &str) -> bool {
    stages::keyword(text).is_ok()
}
