//! Amount type for handling rupee values entered by hand.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a currency sign and commas.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// The currency sign used when displaying amounts.
pub const CURRENCY: char = '₹';

/// The key `serde_json` uses to hand over a number as its original text.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Represents a monetary amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization so that the stored
/// document keeps plain JSON numbers, while user input may carry a currency sign or commas.
///
/// # Examples
///
/// Parsing with a currency sign and commas:
/// ```
/// # use moneypath::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("₹1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "₹1,250.50");
/// ```
///
/// Parsing a bare number:
/// ```
/// # use moneypath::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("42").unwrap();
/// assert_eq!(amount.to_string(), "₹42.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest amount a single transaction or shared expense may carry: ₹1,000,000,000,000,000.
    pub const MAX_ENTRY: Amount = Amount(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// True when the magnitude is above `MAX_ENTRY`.
    pub fn exceeds_entry_limit(&self) -> bool {
        self.0.abs() > Self::MAX_ENTRY.0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiplies the amount by a whole count, saturating at the bounds of `Decimal`.
    pub fn times(&self, count: usize) -> Self {
        Self(self.0.saturating_mul(Decimal::from(count)))
    }

    /// Divides the amount evenly between `count` parts. Returns zero when `count` is zero.
    pub fn split(&self, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        Self(self.0 / Decimal::from(count))
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(String, Option<rust_decimal::Error>);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.1 {
            Some(e) => Debug::fmt(e, f),
            None => write!(f, "AmountError({:?})", self.0),
        }
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.1 {
            Some(e) => write!(f, "'{}' is not a valid amount: {e}", self.0),
            None => write!(f, "'{}' is not a valid amount", self.0),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.1.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError(s.to_string(), None));
        }

        // Remove the currency sign if present, keeping a leading minus
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let without_sign = unsigned
            .strip_prefix(CURRENCY)
            .or_else(|| unsigned.strip_prefix('$'))
            .unwrap_or(unsigned)
            .trim_start();

        // Remove commas (thousand separators)
        let without_commas = without_sign.replace(',', "");
        if without_commas.is_empty() {
            return Err(AmountError(s.to_string(), None));
        }

        let value = Decimal::from_str(&without_commas)
            .or_else(|_| Decimal::from_scientific(&without_commas))
            .map_err(|e| AmountError(s.to_string(), Some(e)))?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.0.abs().round_dp(2);
        write!(
            f,
            "{sign}{CURRENCY}{}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

// Sums and differences saturate at the bounds of `Decimal` instead of panicking.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Written as the exact decimal text, so 33.333333333333333333333333333 comes back as itself
        let number = serde_json::Number::from_str(&self.0.normalize().to_string())
            .map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Amount, E> {
        // Going through the shortest float text keeps 12.3 as 12.3 rather than 12.2999...
        Decimal::from_str(&v.to_string())
            .or_else(|_| Decimal::from_scientific(&format!("{v:e}")))
            .map(Amount)
            .map_err(|_| E::custom(format!("{v} is out of range for an amount")))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Amount, A::Error> {
        use serde::de::Error;
        match map.next_key::<String>()? {
            Some(key) if key == JSON_NUMBER_TOKEN => {
                let text: String = map.next_value()?;
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map(Amount)
                    .map_err(|_| A::Error::custom(format!("{text} is out of range for an amount")))
            }
            _ => Err(A::Error::custom("expected a number, found a map")),
        }
    }
}

/// Deserializes the amount of a single record, rejecting magnitudes above `Amount::MAX_ENTRY`.
pub(crate) fn deserialize_entry<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = Amount::deserialize(deserializer)?;
    if amount.exceeds_entry_limit() {
        return Err(serde::de::Error::custom(format!(
            "{} is larger than the largest allowed amount {}",
            amount.value(),
            Amount::MAX_ENTRY
        )));
    }
    Ok(amount)
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), dec("50"));
    }

    #[test]
    fn test_parse_with_rupee_sign() {
        let amount = Amount::from_str("₹50.25").unwrap();
        assert_eq!(amount.value(), dec("50.25"));
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), dec("50"));
    }

    #[test]
    fn test_parse_negative_with_sign() {
        let amount = Amount::from_str("-₹50.00").unwrap();
        assert_eq!(amount.value(), dec("-50"));
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  ₹ 50.00  ").unwrap();
        assert_eq!(amount.value(), dec("50"));
    }

    #[test]
    fn test_parse_commas() {
        let amount = Amount::from_str("₹1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
        assert!(Amount::from_str("₹").is_err());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let err = Amount::from_str("twelve").unwrap_err();
        assert!(err.to_string().contains("twelve"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from(0).to_string(), "₹0.00");
        assert_eq!(Amount::new(dec("1234.5")).to_string(), "₹1,234.50");
        assert_eq!(Amount::new(dec("-50")).to_string(), "-₹50.00");
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        let third = Amount::from(100).split(3);
        assert_eq!(third.to_string(), "₹33.33");
    }

    #[test]
    fn test_serialize_integer_and_float() {
        assert_eq!(serde_json::to_string(&Amount::from(50)).unwrap(), "50");
        assert_eq!(
            serde_json::to_string(&Amount::new(dec("50.00"))).unwrap(),
            "50"
        );
        assert_eq!(
            serde_json::to_string(&Amount::new(dec("12.5"))).unwrap(),
            "12.5"
        );
    }

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let a: Amount = serde_json::from_str("12").unwrap();
        assert_eq!(a.value(), dec("12"));
        let b: Amount = serde_json::from_str("0.1").unwrap();
        assert_eq!(b.value(), dec("0.1"));
        let c: Amount = serde_json::from_str("\"₹1,000\"").unwrap();
        assert_eq!(c.value(), dec("1000"));
        assert!(serde_json::from_str::<Amount>("true").is_err());
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Amount::from(5).is_positive());
        assert!(Amount::from(-5).is_negative());
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn test_split_and_times() {
        assert_eq!(Amount::from(90).split(3), Amount::from(30));
        assert_eq!(Amount::from(90).split(0), Amount::ZERO);
        assert_eq!(Amount::from(-15).abs().times(2), Amount::from(30));
    }

    #[test]
    fn test_entry_limit() {
        assert_eq!(Amount::MAX_ENTRY.value(), dec("1000000000000000"));
        assert!(!Amount::MAX_ENTRY.exceeds_entry_limit());
        assert!(Amount::from_str("1000000000000000.01")
            .unwrap()
            .exceeds_entry_limit());
        assert!(Amount::new(dec("-50000000000000000000000000000")).exceeds_entry_limit());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Amount::new(Decimal::MAX);
        let min = Amount::new(Decimal::MIN);
        assert_eq!(max + Amount::from(1), max);
        assert_eq!(min - Amount::from(1), min);
        assert_eq!(max.times(3), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let huge = Amount::from_str("50000000000000000000000000000").unwrap();
        let sum: Amount = [huge, huge, huge].iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_serialize_keeps_full_precision() {
        let entered = Amount::from_str("123456789.123456789").unwrap();
        let json = serde_json::to_string(&entered).unwrap();
        assert_eq!(json, "123456789.123456789");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), entered);

        let third = Amount::from(-100).split(3);
        let json = serde_json::to_string(&third).unwrap();
        assert_eq!(json, "-33.333333333333333333333333333");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), third);
    }

    #[test]
    fn test_deserialize_entry_limit() {
        #[derive(Debug, serde::Deserialize)]
        struct Entry {
            #[serde(deserialize_with = "deserialize_entry")]
            amount: Amount,
        }
        let ok: Entry = serde_json::from_str(r#"{"amount": 1000000000000000}"#).unwrap();
        assert_eq!(ok.amount, Amount::MAX_ENTRY);
        let err = serde_json::from_str::<Entry>(r#"{"amount": 50000000000000000000000000000}"#)
            .unwrap_err();
        assert!(err.to_string().contains("larger than the largest allowed amount"));
    }

    #[test]
    fn test_sum() {
        let amounts = [Amount::from(1), Amount::from(2), Amount::new(dec("0.5"))];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.value(), dec("3.5"));
    }
}
