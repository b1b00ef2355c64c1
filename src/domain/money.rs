use crate::error::ReservationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// A non-negative monetary value, kept at cent precision for display.
///
/// This wraps `rust_decimal::Decimal` so that balances and seat prices can
/// never go below zero through ordinary arithmetic: construction clamps, and
/// subtraction is only available through [`Money::checked_sub`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

/// A strictly positive monetary amount, used for charges and refunds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ReservationError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ReservationError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ReservationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Money> for Amount {
    type Error = ReservationError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Negative values clamp to zero.
    pub fn new(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtracts `rhs` unless doing so would make the value negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if self.0 >= rhs.0 {
            Some(Self(self.0 - rhs.0))
        } else {
            None
        }
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let m1 = Money::new(dec!(10.0));
        let m2 = Money::new(dec!(5.0));
        assert_eq!(m1 + m2, Money::new(dec!(15.0)));
        assert_eq!(m1.checked_sub(m2), Some(Money::new(dec!(5.0))));
        assert_eq!(m2.checked_sub(m1), None);
    }

    #[test]
    fn test_money_clamps_negative() {
        assert_eq!(Money::new(dec!(-3.5)), Money::ZERO);
        assert!(Money::from(dec!(-0.01)).is_zero());
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(ReservationError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(ReservationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(dec!(50)).to_string(), "$50.00");
        assert_eq!(Money::new(dec!(1500.5)).to_string(), "$1500.50");
    }
}
