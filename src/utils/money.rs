//! Exact decimal amounts
//!
//! Every monetary value and every distance that feeds a booking invariant is a
//! `Money`. It wraps `rust_decimal::Decimal`, stores as `NUMERIC` and never
//! passes through `f64`. Arithmetic is checked: a result outside the decimal
//! range is an `InvalidAmount` error.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::field::Field;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a JSON number or numeric string
    ///
    /// Numbers are read through their textual form so `120.1` stays exactly
    /// `120.1`.
    pub fn parse(field: &str, value: &Value) -> Result<Self, AppError> {
        let text = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => {
                return Err(AppError::InvalidAmount(format!(
                    "{} must be numeric, got {}",
                    field, value
                )))
            }
        };

        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Money)
            .map_err(|_| AppError::InvalidAmount(format!("{} must be numeric, got '{}'", field, text)))
    }

    /// Like [`Money::parse`] but rejects values below zero
    pub fn parse_non_negative(field: &str, value: &Value) -> Result<Self, AppError> {
        let amount = Self::parse(field, value)?;
        if amount.is_negative() {
            return Err(AppError::InvalidAmount(format!(
                "{} must be greater than or equal to 0, got {}",
                field, amount
            )));
        }
        Ok(amount)
    }

    /// Parses a raw body field that may be absent or cleared with `null`
    pub fn parse_field(field: &str, value: Field<Value>, non_negative: bool) -> AppResult<Field<Money>> {
        value.try_map(|value| {
            if non_negative {
                Self::parse_non_negative(field, &value)
            } else {
                Self::parse(field, &value)
            }
        })
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_greater_than(&self, other: Money) -> bool {
        self.0 > other.0
    }

    pub fn plus(self, rhs: Money) -> AppResult<Money> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .ok_or_else(|| out_of_range(self, "+", rhs))
    }

    pub fn minus(self, rhs: Money) -> AppResult<Money> {
        self.0
            .checked_sub(rhs.0)
            .map(Money)
            .ok_or_else(|| out_of_range(self, "-", rhs))
    }

    /// Multiplies by a plain scalar (a rate, the round-trip factor, ...)
    pub fn times<S: Into<Decimal>>(self, factor: S) -> AppResult<Money> {
        self.scaled_by(Money(factor.into()))
    }

    /// Multiplies by another amount used as a scalar, e.g. extra km × per-km rate
    pub fn scaled_by(self, factor: Money) -> AppResult<Money> {
        self.0
            .checked_mul(factor.0)
            .map(Money)
            .ok_or_else(|| out_of_range(self, "*", factor))
    }

    pub fn or_zero(value: Option<Money>) -> Money {
        value.unwrap_or(Money::ZERO)
    }

    /// Rejects a negative amount already parsed from a typed body
    pub fn check_non_negative(field: &str, value: Option<&Money>) -> Result<(), AppError> {
        match value {
            Some(amount) if amount.is_negative() => Err(AppError::InvalidAmount(format!(
                "{} must be greater than or equal to 0, got {}",
                field, amount
            ))),
            _ => Ok(()),
        }
    }
}

fn out_of_range(lhs: Money, op: &str, rhs: Money) -> AppError {
    AppError::InvalidAmount(format!("{} {} {} is out of range", lhs, op, rhs))
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(Decimal::from(value))
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
