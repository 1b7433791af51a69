//! Order Aggregate
//!
//! Projects a parsed sell command onto the payload the order store accepts,
//! and the record the store hands back once the order is placed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::sell_command::{SellCommand, SellCommandResult};
use crate::domain::value_objects::{Money, PaymentMethod, Variants};
use crate::{ChatCommerceError, Result};

/// Identifiers the chat layer supplies alongside a command
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct OrderParties {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub buyer_id: String,
    #[validate(length(min = 1))]
    pub seller_id: String,
}

impl OrderParties {
    pub fn new(product_id: impl Into<String>, buyer_id: impl Into<String>, seller_id: impl Into<String>) -> Self {
        Self { product_id: product_id.into(), buyer_id: buyer_id.into(), seller_id: seller_id.into() }
    }

    fn check(&self) -> Result<()> {
        self.validate()?;
        for (field, value) in [("product_id", &self.product_id), ("buyer_id", &self.buyer_id), ("seller_id", &self.seller_id)] {
            if value.trim().is_empty() {
                return Err(ChatCommerceError::InvalidArgument(format!("{field} must not be blank")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderChannel {
    #[default]
    Chat,
}

/// Order creation payload. `total_amount = unit_price * quantity - discount_amount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub product_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub discount_amount: Money,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub variants: Option<Variants>,
    pub created_via: OrderChannel,
}

impl OrderPayload {
    pub fn from_command(cmd: &SellCommand, parties: OrderParties) -> Result<Self> {
        parties.check()?;
        let out_of_range = || ChatCommerceError::InvalidArgument("order amount is out of range".into());
        let subtotal = cmd.price.checked_multiply(cmd.quantity).ok_or_else(out_of_range)?;
        let total = match cmd.discount {
            Some(discount) => Money::new(discount.apply(subtotal.amount()).ok_or_else(out_of_range)?),
            None => subtotal,
        };
        Ok(Self {
            product_id: parties.product_id,
            buyer_id: parties.buyer_id,
            seller_id: parties.seller_id,
            quantity: cmd.quantity,
            unit_price: cmd.price,
            discount_amount: subtotal.saturating_sub(total),
            total_amount: total,
            payment_method: cmd.payment_method.unwrap_or_default(),
            variants: cmd.variants.clone(),
            created_via: OrderChannel::Chat,
        })
    }

    pub fn subtotal(&self) -> Option<Money> { self.unit_price.checked_multiply(self.quantity) }
}

/// Builds the order payload for a valid parse result. Handing in an invalid
/// result is a caller bug and is reported as [`ChatCommerceError::InvalidArgument`].
pub fn project_order(result: &SellCommandResult, parties: OrderParties) -> Result<OrderPayload> {
    let cmd = SellCommand::try_from(result)?;
    OrderPayload::from_command(&cmd, parties)
}

/// Status set at intake; later transitions belong to the order store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus { #[default] Pending }

/// A placed order as returned by the order store
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,
    pub order_number: String,
    #[serde(flatten)]
    pub payload: OrderPayload,
    pub status: OrderStatus,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn place(payload: OrderPayload, currency: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            order_number: format!("ORD-{:08}", rand::random::<u32>() % 100_000_000),
            payload, status: OrderStatus::Pending, currency: currency.to_string(),
            created_at: now, updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sell_command::parse_sell_command;
    use rust_decimal::Decimal;

    fn parties() -> OrderParties { OrderParties::new("p1", "b1", "s1") }

    #[test]
    fn test_percentage_projection() {
        let o = project_order(&parse_sell_command("sell 500 x2 10% off"), parties()).unwrap();
        assert_eq!(o.unit_price.amount(), Decimal::new(500, 0));
        assert_eq!(o.quantity, 2);
        assert_eq!(o.total_amount.amount(), Decimal::new(900, 0));
        assert_eq!(o.discount_amount.amount(), Decimal::new(100, 0));
        assert_eq!(o.payment_method, PaymentMethod::Upi);
        assert_eq!(o.created_via, OrderChannel::Chat);
    }

    #[test]
    fn test_fixed_discount_clamped() {
        let o = project_order(&parse_sell_command("sell 40 900 off cod"), parties()).unwrap();
        assert_eq!(o.total_amount.amount(), Decimal::ZERO);
        assert_eq!(o.discount_amount.amount(), Decimal::new(40, 0));
        assert_eq!(o.payment_method, PaymentMethod::Cod);
    }

    #[test]
    fn test_overflowing_amount_rejected() {
        let r = parse_sell_command("sell 99999999999999999999 x999999999");
        assert!(r.is_valid);
        let err = project_order(&r, parties()).unwrap_err();
        assert!(matches!(err, ChatCommerceError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_result_rejected() {
        let err = project_order(&parse_sell_command("hi"), parties()).unwrap_err();
        assert!(matches!(err, ChatCommerceError::InvalidArgument(_)));
    }

    #[test]
    fn test_blank_party_rejected() {
        let r = parse_sell_command("sell 10");
        assert!(project_order(&r, OrderParties::new("", "b1", "s1")).is_err());
        assert!(project_order(&r, OrderParties::new("p1", "  ", "s1")).is_err());
    }

    #[test]
    fn test_record_flattens_payload() {
        let payload = project_order(&parse_sell_command("sell 10"), parties()).unwrap();
        let record = OrderRecord::place(payload, "INR");
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["product_id"], "p1");
        assert_eq!(v["status"], "pending");
        assert_eq!(v["created_via"], "chat");
        assert!(v["variants"].is_null());
        assert!(record.order_number.starts_with("ORD-"));
    }
}
