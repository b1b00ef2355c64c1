use super::money::{Amount, Money};
use crate::error::ReservationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A paying customer.
///
/// The balance is a [`Money`], so it can never be negative: direct sets clamp
/// at zero and [`Customer::charge`] refuses to overdraw.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Customer {
    person_id: String,
    name: String,
    age: u32,
    money: Money,
}

impl Customer {
    pub fn new(
        person_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        money: Decimal,
    ) -> Self {
        Self {
            person_id: person_id.into(),
            name: name.into(),
            age,
            money: Money::new(money),
        }
    }

    pub fn person_id(&self) -> &str {
        &self.person_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn set_money(&mut self, amount: Decimal) {
        self.money = Money::new(amount);
    }

    /// Debits `amount` if it is positive and fully covered by the balance.
    pub fn charge(&mut self, amount: Decimal) -> Result<(), ReservationError> {
        let amount = Amount::new(amount)?;
        match self.money.checked_sub(amount.into()) {
            Some(remaining) => {
                self.money = remaining;
                Ok(())
            }
            None => Err(ReservationError::InsufficientFunds {
                required: amount.value(),
                available: self.money.value(),
            }),
        }
    }

    /// Credits a positive `amount`; used for refunds.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), ReservationError> {
        let amount = Amount::new(amount)?;
        self.money += amount.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer(money: Decimal) -> Customer {
        Customer::new("CUST0001", "Alice Wonderland", 30, money)
    }

    #[test]
    fn test_charge_success() {
        let mut c = customer(dec!(150));
        assert!(c.charge(dec!(100)).is_ok());
        assert_eq!(c.money(), Money::new(dec!(50)));
    }

    #[test]
    fn test_charge_exact_balance() {
        let mut c = customer(dec!(100));
        assert!(c.charge(dec!(100)).is_ok());
        assert!(c.money().is_zero());
    }

    #[test]
    fn test_charge_insufficient() {
        let mut c = customer(dec!(150));
        let result = c.charge(dec!(200));
        assert!(matches!(
            result,
            Err(ReservationError::InsufficientFunds { .. })
        ));
        assert_eq!(c.money(), Money::new(dec!(150)));
    }

    #[test]
    fn test_charge_rejects_non_positive() {
        let mut c = customer(dec!(150));
        assert!(matches!(
            c.charge(dec!(0)),
            Err(ReservationError::ValidationError(_))
        ));
        assert!(c.charge(dec!(-5)).is_err());
        assert_eq!(c.money(), Money::new(dec!(150)));
    }

    #[test]
    fn test_add_money() {
        let mut c = customer(dec!(10));
        assert!(c.add_money(dec!(5.5)).is_ok());
        assert_eq!(c.money(), Money::new(dec!(15.5)));
        assert!(c.add_money(dec!(0)).is_err());
        assert!(c.add_money(dec!(-1)).is_err());
        assert_eq!(c.money(), Money::new(dec!(15.5)));
    }

    #[test]
    fn test_set_money_clamps() {
        let mut c = customer(dec!(10));
        c.set_money(dec!(-20));
        assert!(c.money().is_zero());
        c.set_money(dec!(42.42));
        assert_eq!(c.money(), Money::new(dec!(42.42)));
    }

    #[test]
    fn test_negative_initial_money_clamps() {
        let c = customer(dec!(-1));
        assert!(c.money().is_zero());
    }
}
