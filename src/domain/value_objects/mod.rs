//! Value Objects for chat commerce

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed keyword set searched for inside a command
pub trait Vocabulary: Copy + 'static {
    fn vocabulary() -> &'static [Self];
    fn keyword(&self) -> &'static str;
}

/// Colour vocabulary, in matching order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color { Red, Blue, Green, Yellow, Black, White, Pink, Purple, Orange, Brown, Grey, Gray }

impl Color {
    pub const ALL: [Color; 12] = [
        Self::Red, Self::Blue, Self::Green, Self::Yellow, Self::Black, Self::White,
        Self::Pink, Self::Purple, Self::Orange, Self::Brown, Self::Grey, Self::Gray,
    ];
}

impl Vocabulary for Color {
    fn vocabulary() -> &'static [Self] { &Self::ALL }

    fn keyword(&self) -> &'static str {
        match self {
            Self::Red => "red", Self::Blue => "blue", Self::Green => "green", Self::Yellow => "yellow",
            Self::Black => "black", Self::White => "white", Self::Pink => "pink", Self::Purple => "purple",
            Self::Orange => "orange", Self::Brown => "brown", Self::Grey => "grey", Self::Gray => "gray",
        }
    }
}

/// Size vocabulary, in matching order. Multi-letter sizes come before the
/// single-letter ones so `medium` is not read as `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size { Xs, Small, Medium, Large, Xl, Xxl, Xxxl, S, M, L }

impl Size {
    pub const ALL: [Size; 10] = [
        Self::Xs, Self::Small, Self::Medium, Self::Large, Self::Xl,
        Self::Xxl, Self::Xxxl, Self::S, Self::M, Self::L,
    ];
}

impl Vocabulary for Size {
    fn vocabulary() -> &'static [Self] { &Self::ALL }

    fn keyword(&self) -> &'static str {
        match self {
            Self::Xs => "xs", Self::Small => "small", Self::Medium => "medium", Self::Large => "large",
            Self::Xl => "xl", Self::Xxl => "xxl", Self::Xxxl => "xxxl", Self::S => "s", Self::M => "m", Self::L => "l",
        }
    }
}

/// Material vocabulary, in matching order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material { Cotton, Silk, Polyester, Wool, Leather, Denim, Linen }

impl Material {
    pub const ALL: [Material; 7] = [
        Self::Cotton, Self::Silk, Self::Polyester, Self::Wool, Self::Leather, Self::Denim, Self::Linen,
    ];
}

impl Vocabulary for Material {
    fn vocabulary() -> &'static [Self] { &Self::ALL }

    fn keyword(&self) -> &'static str {
        match self {
            Self::Cotton => "cotton", Self::Silk => "silk", Self::Polyester => "polyester", Self::Wool => "wool",
            Self::Leather => "leather", Self::Denim => "denim", Self::Linen => "linen",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.keyword()) }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.keyword().to_uppercase()) }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.keyword()) }
}

/// Variant attributes detected in a command, at most one per category
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
}

impl Variants {
    pub fn is_empty(&self) -> bool { self.color.is_none() && self.size.is_none() && self.material.is_none() }
}

/// Discount value object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Discount {
    Percentage { value: u32 },
    Fixed { value: u32 },
}

impl Discount {
    /// Amount left after applying the discount to `subtotal`, never below zero.
    /// `None` when the arithmetic leaves the `Decimal` range.
    pub fn apply(&self, subtotal: Decimal) -> Option<Decimal> {
        let discounted = match self {
            Self::Percentage { value } => {
                subtotal.checked_mul(Decimal::ONE - Decimal::from(*value) / Decimal::ONE_HUNDRED)?
            }
            Self::Fixed { value } => subtotal.checked_sub(Decimal::from(*value))?,
        };
        Some(discounted.max(Decimal::ZERO))
    }
}

/// Payment method, in matching priority order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    #[default]
    Upi,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Cod, Self::Upi, Self::Card];

    pub fn keyword(&self) -> &'static str {
        match self { Self::Cod => "cod", Self::Upi => "upi", Self::Card => "card" }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.keyword()) }
}

/// Money amount in minor-unit precision
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
    pub fn zero() -> Self { Self(Decimal::ZERO) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn checked_multiply(&self, qty: u32) -> Option<Money> { self.0.checked_mul(Decimal::from(qty)).map(Money::new) }
    pub fn saturating_sub(&self, other: Money) -> Money { Money::new((self.0 - other.0).max(Decimal::ZERO)) }
    pub fn is_positive(&self) -> bool { self.0 > Decimal::ZERO }
}

impl Default for Money { fn default() -> Self { Self::zero() } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_serializes_upper_case() {
        assert_eq!(serde_json::to_value(Size::Medium).unwrap(), "MEDIUM");
        assert_eq!(serde_json::to_value(Size::Xxl).unwrap(), "XXL");
        assert_eq!(Size::S.to_string(), "S");
    }

    #[test]
    fn test_discount_tagged_shape() {
        let v = serde_json::to_value(Discount::Percentage { value: 10 }).unwrap();
        assert_eq!(v, serde_json::json!({"kind": "percentage", "value": 10}));
    }

    #[test]
    fn test_discount_apply_floors_at_zero() {
        assert_eq!(Discount::Fixed { value: 50 }.apply(Decimal::new(30, 0)), Some(Decimal::ZERO));
        assert_eq!(Discount::Percentage { value: 150 }.apply(Decimal::new(30, 0)), Some(Decimal::ZERO));
        assert_eq!(Discount::Percentage { value: 10 }.apply(Decimal::new(1000, 0)), Some(Decimal::new(900, 0)));
    }

    #[test]
    fn test_discount_apply_out_of_range() {
        assert_eq!(Discount::Percentage { value: 4_000_000_000 }.apply(Decimal::MAX), None);
        assert_eq!(Discount::Fixed { value: 10 }.apply(Decimal::MIN), None);
    }

    #[test]
    fn test_checked_multiply_overflow() {
        let price = Money::new(Decimal::new(99_999_999_999_999_999, 0) * Decimal::new(1000, 0));
        assert_eq!(price.checked_multiply(999_999_999), None);
        assert_eq!(Money::new(Decimal::new(250, 0)).checked_multiply(3), Some(Money::new(Decimal::new(750, 0))));
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(Money::new(Decimal::new(15299745, 4)).amount(), Decimal::new(152997, 2));
        assert_eq!(Money::new(Decimal::new(1005, 3)).amount(), Decimal::new(101, 2));
    }

    #[test]
    fn test_variants_skip_absent() {
        let v = Variants { color: Some(Color::Red), ..Default::default() };
        assert_eq!(serde_json::to_value(&v).unwrap(), serde_json::json!({"color": "red"}));
        assert!(Variants::default().is_empty());
    }
}
