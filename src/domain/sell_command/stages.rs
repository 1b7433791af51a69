//! Extraction stages of the sell-command pipeline.
//!
//! Each stage takes the unconsumed [`Remainder`] by value and hands back what
//! it found together with the remainder it leaves for the next stage.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use super::SellCommandError;
use crate::domain::value_objects::{Color, Discount, Material, Money, PaymentMethod, Size, Variants, Vocabulary};

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^sell\s+").expect("keyword pattern"));
static PRICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d{1,2})?)").expect("price pattern"));
static QUANTITY: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"x(\d+)", r"qty\s*(\d+)", r"(\d+)\s*pcs", r"(\d+)\s*pieces?"]
        .map(|p| Regex::new(p).expect("quantity pattern"))
});
static PERCENT_OFF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*%\s*off").expect("percent pattern"));
static FIXED_OFF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*off").expect("fixed pattern"));

/// Text not yet claimed by an earlier stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remainder(String);

impl Remainder {
    pub fn as_str(&self) -> &str { &self.0 }

    /// Drops the first occurrence of `needle`.
    fn without(self, needle: &str) -> Self {
        Self(self.0.replacen(needle, "", 1))
    }
}

/// Lower-cases and trims `text`, then strips the leading `sell` keyword.
pub fn keyword(text: &str) -> Result<Remainder, SellCommandError> {
    let normalized = text.trim().to_lowercase();
    let matched = KEYWORD.find(&normalized).ok_or(SellCommandError::NotASellCommand)?;
    Ok(Remainder(normalized[matched.end()..].to_string()))
}

pub fn price(body: Remainder) -> Result<(Money, Remainder), SellCommandError> {
    let matched = PRICE.find(body.as_str()).ok_or(SellCommandError::MissingPrice)?;
    let amount = Decimal::from_str(matched.as_str()).map_err(|_| SellCommandError::PriceOutOfRange)?;
    if amount <= Decimal::ZERO {
        return Err(SellCommandError::NonPositivePrice);
    }
    let rest = Remainder(body.as_str()[matched.end()..].to_string());
    Ok((Money::new(amount), rest))
}

/// First pattern in priority order wins; a zero count is not a match.
pub fn quantity(rest: Remainder) -> (Option<u32>, Remainder) {
    for pattern in QUANTITY.iter() {
        match captured_number(pattern, rest.as_str()) {
            Some((qty, token)) if qty > 0 => return (Some(qty), rest.without(&token)),
            _ => continue,
        }
    }
    (None, rest)
}

/// Number captured by `pattern`'s first group, plus the whole matched token.
fn captured_number(pattern: &Regex, text: &str) -> Option<(u32, String)> {
    let caps = pattern.captures(text)?;
    let count = caps[1].parse().ok()?;
    Some((count, caps[0].to_string()))
}

/// First vocabulary member contained anywhere in the remainder.
fn vocabulary_member<T: Vocabulary>(rest: Remainder) -> (Option<T>, Remainder) {
    match T::vocabulary().iter().find(|member| rest.as_str().contains(member.keyword())) {
        Some(member) => (Some(*member), rest.without(member.keyword())),
        None => (None, rest),
    }
}

pub fn variants(rest: Remainder) -> (Option<Variants>, Remainder) {
    let (color, rest) = vocabulary_member::<Color>(rest);
    let (size, rest) = vocabulary_member::<Size>(rest);
    let (material, rest) = vocabulary_member::<Material>(rest);
    let found = Variants { color, size, material };
    (if found.is_empty() { None } else { Some(found) }, rest)
}

pub fn discount(rest: Remainder) -> (Option<Discount>, Remainder) {
    if let Some((value, token)) = captured_number(&PERCENT_OFF, rest.as_str()) {
        return (Some(Discount::Percentage { value }), rest.without(&token));
    }
    if let Some((value, token)) = captured_number(&FIXED_OFF, rest.as_str()) {
        return (Some(Discount::Fixed { value }), rest.without(&token));
    }
    (None, rest)
}

pub fn payment_method(rest: &Remainder) -> Option<PaymentMethod> {
    PaymentMethod::ALL.into_iter().find(|method| rest.as_str().contains(method.keyword()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(s: &str) -> Remainder { Remainder(s.to_string()) }

    #[test]
    fn test_keyword_requires_whitespace() {
        assert_eq!(keyword("  SELL   599 ").unwrap().as_str(), "599");
        assert_eq!(keyword("sell599"), Err(SellCommandError::NotASellCommand));
        assert_eq!(keyword("sell"), Err(SellCommandError::NotASellCommand));
        assert_eq!(keyword("reseller 599"), Err(SellCommandError::NotASellCommand));
    }

    #[test]
    fn test_price_two_decimals() {
        let (price, rest) = price(rest("19.99 x2")).unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));
        assert_eq!(rest.as_str(), " x2");
    }

    #[test]
    fn test_price_must_lead_the_body() {
        assert_eq!(price(rest("red 599")), Err(SellCommandError::MissingPrice));
        assert_eq!(price(rest("0.00 red")), Err(SellCommandError::NonPositivePrice));
    }

    #[test]
    fn test_price_beyond_decimal_range() {
        assert_eq!(price(rest("99999999999999999999999999999")), Err(SellCommandError::PriceOutOfRange));
    }

    #[test]
    fn test_quantity_pattern_priority() {
        let (qty, rest) = quantity(rest(" qty 3 x2"));
        assert_eq!(qty, Some(2));
        assert_eq!(rest.as_str(), " qty 3 ");
        assert_eq!(quantity(super::tests::rest(" 4 pieces")).0, Some(4));
        assert_eq!(quantity(super::tests::rest(" 5pcs")).0, Some(5));
    }

    #[test]
    fn test_zero_quantity_falls_through() {
        assert_eq!(quantity(rest(" x0 qty 2")).0, Some(2));
        assert_eq!(quantity(rest(" x0")).0, None);
    }

    #[test]
    fn test_variants_one_per_category() {
        let (found, rest) = variants(rest(" blue red large"));
        let found = found.unwrap();
        assert_eq!(found.color, Some(Color::Red));
        assert_eq!(found.size, Some(Size::Large));
        assert!(rest.as_str().contains("blue"));
    }

    #[test]
    fn test_discount_percentage_first() {
        let (d, rest) = discount(rest(" 50 off 10% off"));
        assert_eq!(d, Some(Discount::Percentage { value: 10 }));
        assert_eq!(rest.as_str(), " 50 off ");
        assert_eq!(discount(super::tests::rest(" 50 off")).0, Some(Discount::Fixed { value: 50 }));
    }

    #[test]
    fn test_payment_priority() {
        assert_eq!(payment_method(&rest(" card upi")), Some(PaymentMethod::Upi));
        assert_eq!(payment_method(&rest(" cardamom")), Some(PaymentMethod::Card));
        assert_eq!(payment_method(&rest(" cash")), None);
    }
}
