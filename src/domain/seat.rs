use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum SeatClass {
    Economy,
    Business,
}

impl SeatClass {
    /// Price factor applied to the economy base price.
    pub fn multiplier(&self) -> Decimal {
        match self {
            SeatClass::Economy => Decimal::ONE,
            SeatClass::Business => Decimal::TWO,
        }
    }
}

impl std::fmt::Display for SeatClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatClass::Economy => write!(f, "Economy"),
            SeatClass::Business => write!(f, "Business"),
        }
    }
}

/// A single seat on an airplane.
///
/// The price is fixed at construction from the base price and the class
/// multiplier; occupancy is toggled only through [`Seat::book`] and
/// [`Seat::unbook`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Seat {
    id: String,
    class: SeatClass,
    price: Money,
    booked: bool,
}

impl Seat {
    pub fn new(id: impl Into<String>, class: SeatClass, base_price: Money) -> Self {
        Self {
            id: id.into(),
            class,
            price: Money::new(base_price.value() * class.multiplier()),
            booked: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> SeatClass {
        self.class
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn is_booked(&self) -> bool {
        self.booked
    }

    /// Negative prices are ignored.
    pub fn set_price(&mut self, price: Decimal) -> bool {
        if price >= Decimal::ZERO {
            self.price = Money::new(price);
            true
        } else {
            false
        }
    }

    pub fn book(&mut self) -> bool {
        if self.booked {
            return false;
        }
        self.booked = true;
        true
    }

    pub fn unbook(&mut self) -> bool {
        if !self.booked {
            return false;
        }
        self.booked = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_business_price_doubles_base() {
        let seat = Seat::new("1B", SeatClass::Business, Money::new(dec!(100)));
        assert_eq!(seat.price(), Money::new(dec!(200)));
        assert_eq!(seat.class(), SeatClass::Business);
        assert!(!seat.is_booked());
    }

    #[test]
    fn test_economy_price_is_base() {
        let seat = Seat::new("5C", SeatClass::Economy, Money::new(dec!(50)));
        assert_eq!(seat.price(), Money::new(dec!(50)));
        assert_eq!(seat.id(), "5C");
    }

    #[test]
    fn test_book_and_unbook() {
        let mut seat = Seat::new("2A", SeatClass::Economy, Money::new(dec!(50)));
        assert!(seat.book());
        assert!(seat.is_booked());
        assert!(!seat.book());

        assert!(seat.unbook());
        assert!(!seat.is_booked());
        assert!(!seat.unbook());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut seat = Seat::new("3A", SeatClass::Economy, Money::new(dec!(50)));
        assert!(!seat.set_price(dec!(-10)));
        assert_eq!(seat.price(), Money::new(dec!(50)));

        assert!(seat.set_price(dec!(0)));
        assert!(seat.price().is_zero());
    }
}
