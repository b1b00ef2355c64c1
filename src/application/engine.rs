use crate::domain::airplane::{Airplane, DEFAULT_ECONOMY_PRICE, MAX_ROWS, MAX_SEATS_PER_ROW};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::customer::Customer;
use crate::domain::money::Money;
use crate::domain::ports::ProfileGeneratorBox;
use crate::domain::seat::Seat;
use crate::error::{ReservationError, Result, SwapSide};
use crate::infrastructure::random_profiles::RandomProfileGenerator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, error, info, warn};

/// Settings the reservation system is built with.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Price of an economy seat; business seats cost twice as much.
    pub economy_price: Money,
    /// Whether to start with the default fleet and customers.
    pub seed_defaults: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            economy_price: Money::new(DEFAULT_ECONOMY_PRICE),
            seed_defaults: true,
        }
    }
}

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationReceipt {
    pub booking_id: String,
    pub customer_id: String,
    pub refunded: Money,
}

/// Outcome of a successful seat swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapReceipt {
    pub first_booking_id: String,
    pub second_booking_id: String,
    /// Seat held by the first booking before the swap (now the second's).
    pub first_previous_seat: String,
    /// Seat held by the second booking before the swap (now the first's).
    pub second_previous_seat: String,
}

/// The reservation transaction engine.
///
/// `ReservationSystem` owns every airplane, customer and booking. Each
/// transaction resolves the entities it needs by identifier, checks all of its
/// preconditions before touching anything, and then updates seats, balances
/// and bookings together so that no failed call leaves a partial change
/// behind.
pub struct ReservationSystem {
    airplanes: Vec<Airplane>,
    customers: Vec<Customer>,
    bookings: Vec<Booking>,
    next_customer_number: u32,
    economy_price: Money,
    profiles: ProfileGeneratorBox,
    /// Books the requested seat behind the engine's back right after the
    /// charge, so the refund path can be exercised.
    #[cfg(test)]
    claim_seat_after_charge: bool,
}

impl ReservationSystem {
    /// Creates a system that draws auto-generated customers at random.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_profile_generator(config, Box::new(RandomProfileGenerator::new()))
    }

    pub fn with_profile_generator(config: SystemConfig, profiles: ProfileGeneratorBox) -> Self {
        let mut system = Self {
            airplanes: Vec::new(),
            customers: Vec::new(),
            bookings: Vec::new(),
            next_customer_number: 1,
            economy_price: config.economy_price,
            profiles,
            #[cfg(test)]
            claim_seat_after_charge: false,
        };
        if config.seed_defaults {
            system.seed_defaults();
        }
        system
    }

    fn seed_defaults(&mut self) {
        self.airplanes
            .push(Airplane::new("FL101", 15, 6, self.economy_price));
        self.airplanes
            .push(Airplane::new("FL202", 20, 6, self.economy_price));
        self.add_customer("Alice Wonderland", 30, dec!(1500.00), false);
        self.add_customer("Bob The Builder", 45, dec!(800.00), false);
        info!(
            "System initialized with {} airplanes and {} customers",
            self.airplanes.len(),
            self.customers.len()
        );
    }

    /// Drops every entity and restarts customer numbering at `CUST0001`.
    pub fn reset(&mut self) {
        self.airplanes.clear();
        self.customers.clear();
        self.bookings.clear();
        self.next_customer_number = 1;
        debug!("Reservation system reset");
    }

    fn next_customer_id(&mut self) -> String {
        let id = format!("CUST{:04}", self.next_customer_number);
        self.next_customer_number += 1;
        id
    }

    pub fn airplanes(&self) -> &[Airplane] {
        &self.airplanes
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn airplane(&self, flight_number: &str) -> Option<&Airplane> {
        self.airplanes
            .iter()
            .find(|a| a.flight_number() == flight_number)
    }

    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.person_id() == customer_id)
    }

    pub fn booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.booking_id() == booking_id)
    }

    /// Every booking the customer has made, cancelled ones included.
    pub fn bookings_for_customer(&self, customer_id: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.customer_id() == customer_id)
            .collect()
    }

    /// The confirmed booking currently assigned to the seat, if any.
    pub fn seat_owner(&self, flight_number: &str, seat_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| {
            b.is_confirmed() && b.flight_number() == flight_number && b.seat_id() == seat_id
        })
    }

    /// Cheaper free seats on a flight that the customer can pay for.
    pub fn suggest_seats(
        &self,
        customer_id: &str,
        flight_number: &str,
        max_price: Decimal,
    ) -> Result<Vec<&Seat>> {
        let airplane = self
            .airplane(flight_number)
            .ok_or_else(|| ReservationError::AirplaneNotFound(flight_number.to_string()))?;
        let customer = self
            .customer(customer_id)
            .ok_or_else(|| ReservationError::CustomerNotFound(customer_id.to_string()))?;
        Ok(airplane.suggest_lower_price_seats(Some(customer), max_price))
    }

    /// Registers a customer under the next `CUSTnnnn` id.
    ///
    /// With `auto_generate`, a blank name and a non-positive age or balance are
    /// replaced by generated values. Otherwise a negative age becomes 0 and a
    /// negative balance is clamped to 0.
    pub fn add_customer(
        &mut self,
        name: &str,
        age: i64,
        money: Decimal,
        auto_generate: bool,
    ) -> &Customer {
        let person_id = self.next_customer_id();
        let (name, age, money) = if auto_generate {
            let name = if name.trim().is_empty() {
                self.profiles.name(&person_id)
            } else {
                name.to_string()
            };
            let age = if age <= 0 {
                self.profiles.age()
            } else {
                clamp_age(age)
            };
            let money = if money <= Decimal::ZERO {
                self.profiles.money().value()
            } else {
                money
            };
            (name, age, money)
        } else {
            (name.to_string(), clamp_age(age), money)
        };

        info!("Customer {} ({}) added", person_id, name);
        self.customers
            .push(Customer::new(person_id, name, age, money));
        &self.customers[self.customers.len() - 1]
    }

    /// Adds an airplane with a fresh seat map.
    ///
    /// Non-positive dimensions are coerced to 1. More than [`MAX_ROWS`] rows
    /// or [`MAX_SEATS_PER_ROW`] seats per row is rejected.
    pub fn add_airplane(
        &mut self,
        flight_number: &str,
        rows: i64,
        seats_per_row: i64,
    ) -> Result<&Airplane> {
        if self.airplane(flight_number).is_some() {
            warn!("Rejected duplicate flight number {}", flight_number);
            return Err(ReservationError::DuplicateFlightNumber(
                flight_number.to_string(),
            ));
        }
        if rows > i64::from(MAX_ROWS) || seats_per_row > i64::from(MAX_SEATS_PER_ROW) {
            warn!(
                "Rejected airplane {} with {} rows of {} seats",
                flight_number, rows, seats_per_row
            );
            return Err(ReservationError::ValidationError(format!(
                "airplane dimensions must be at most {MAX_ROWS} rows of {MAX_SEATS_PER_ROW} seats"
            )));
        }
        let airplane = Airplane::new(flight_number, rows, seats_per_row, self.economy_price);
        info!(
            "Airplane {} added with {} seats",
            flight_number,
            airplane.capacity()
        );
        self.airplanes.push(airplane);
        Ok(&self.airplanes[self.airplanes.len() - 1])
    }

    /// Charges the customer, books the seat and records a confirmed booking.
    ///
    /// Every precondition is checked before anything is mutated. If the seat
    /// cannot be booked after the charge went through, the charge is refunded.
    pub fn create_booking(
        &mut self,
        customer_id: &str,
        flight_number: &str,
        seat_id: &str,
    ) -> Result<Booking> {
        let customer_index = self
            .customer_index(customer_id)
            .ok_or_else(|| ReservationError::CustomerNotFound(customer_id.to_string()))?;
        let airplane_index = self
            .airplane_index(flight_number)
            .ok_or_else(|| ReservationError::AirplaneNotFound(flight_number.to_string()))?;
        let seat = self.airplanes[airplane_index]
            .find_seat(seat_id)
            .ok_or_else(|| ReservationError::SeatNotFound {
                flight_number: flight_number.to_string(),
                seat_id: seat_id.to_string(),
            })?;
        if seat.is_booked() {
            return Err(ReservationError::SeatAlreadyBooked {
                flight_number: flight_number.to_string(),
                seat_id: seat_id.to_string(),
            });
        }
        let price = seat.price();
        let available = self.customers[customer_index].money();
        if available < price {
            return Err(ReservationError::InsufficientFunds {
                required: price.value(),
                available: available.value(),
            });
        }

        if let Err(e) = self.customers[customer_index].charge(price.value()) {
            error!("Charging {} for seat {} failed: {}", customer_id, seat_id, e);
            return Err(ReservationError::ChargeFailed(customer_id.to_string()));
        }

        #[cfg(test)]
        self.claim_seat_if_requested(airplane_index, seat_id);

        if !self.airplanes[airplane_index].book_specific_seat(seat_id) {
            if let Err(e) = self.customers[customer_index].add_money(price.value()) {
                error!("Refund to {} after failed seat booking failed: {}", customer_id, e);
            }
            error!(
                "Seat {} on {} could not be booked after charging {}",
                seat_id, flight_number, customer_id
            );
            return Err(ReservationError::InternalBookingFailure {
                flight_number: flight_number.to_string(),
                seat_id: seat_id.to_string(),
            });
        }

        let mut booking = Booking::new(customer_id, flight_number, seat_id);
        booking.set_status(BookingStatus::Confirmed);
        info!(
            "Booking {} confirmed: {} on {} seat {} for {}",
            booking.booking_id(),
            customer_id,
            flight_number,
            seat_id,
            price
        );
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Refunds the seat's current price, frees the seat and marks the booking
    /// cancelled.
    pub fn cancel_booking(&mut self, booking_id: &str) -> Result<CancellationReceipt> {
        let booking_index = self
            .booking_index(booking_id)
            .ok_or_else(|| ReservationError::BookingNotFound(booking_id.to_string()))?;
        let booking = &self.bookings[booking_index];
        if booking.status() == BookingStatus::Cancelled {
            return Err(ReservationError::AlreadyCancelled(booking_id.to_string()));
        }

        let customer_id = booking.customer_id().to_string();
        let flight_number = booking.flight_number().to_string();
        let seat_id = booking.seat_id().to_string();

        let customer_index = self
            .customer_index(&customer_id)
            .ok_or_else(|| integrity_error(booking_id, "customer", &customer_id))?;
        let airplane_index = self
            .airplane_index(&flight_number)
            .ok_or_else(|| integrity_error(booking_id, "airplane", &flight_number))?;
        let refund = self.airplanes[airplane_index]
            .find_seat(&seat_id)
            .map(Seat::price)
            .ok_or_else(|| integrity_error(booking_id, "seat", &seat_id))?;

        if !refund.is_zero() {
            self.customers[customer_index].add_money(refund.value())?;
        }
        if !self.airplanes[airplane_index].unbook_specific_seat(&seat_id) {
            warn!(
                "Seat {} on {} was already free while cancelling {}",
                seat_id, flight_number, booking_id
            );
        }
        self.bookings[booking_index].set_status(BookingStatus::Cancelled);

        info!(
            "Booking {} cancelled, {} refunded to {}",
            booking_id, refund, customer_id
        );
        Ok(CancellationReceipt {
            booking_id: booking_id.to_string(),
            customer_id,
            refunded: refund,
        })
    }

    /// Exchanges the seats of two confirmed bookings on the same flight.
    ///
    /// Only the booking-to-seat links change: both seats stay booked and no
    /// money moves, whatever the price difference between them.
    pub fn swap_seats(&mut self, first_id: &str, second_id: &str) -> Result<SwapReceipt> {
        let first = self.confirmed_booking_index(first_id, SwapSide::First)?;
        let second = self.confirmed_booking_index(second_id, SwapSide::Second)?;
        if first == second {
            return Err(ReservationError::SelfSwap);
        }
        let first_flight = self.bookings[first].flight_number();
        let second_flight = self.bookings[second].flight_number();
        if first_flight != second_flight {
            return Err(ReservationError::CrossFlightSwap {
                first: first_flight.to_string(),
                second: second_flight.to_string(),
            });
        }

        let first_seat = self.bookings[first].seat_id().to_string();
        let second_seat = self.bookings[second].seat_id().to_string();
        self.bookings[first].set_seat_id(second_seat.clone());
        self.bookings[second].set_seat_id(first_seat.clone());

        info!(
            "Swapped seats: {} {} -> {}, {} {} -> {}",
            first_id, first_seat, second_seat, second_id, second_seat, first_seat
        );
        Ok(SwapReceipt {
            first_booking_id: first_id.to_string(),
            second_booking_id: second_id.to_string(),
            first_previous_seat: first_seat,
            second_previous_seat: second_seat,
        })
    }

    fn customer_index(&self, customer_id: &str) -> Option<usize> {
        self.customers
            .iter()
            .position(|c| c.person_id() == customer_id)
    }

    fn airplane_index(&self, flight_number: &str) -> Option<usize> {
        self.airplanes
            .iter()
            .position(|a| a.flight_number() == flight_number)
    }

    fn booking_index(&self, booking_id: &str) -> Option<usize> {
        self.bookings
            .iter()
            .position(|b| b.booking_id() == booking_id)
    }

    fn confirmed_booking_index(&self, booking_id: &str, side: SwapSide) -> Result<usize> {
        self.booking_index(booking_id)
            .filter(|i| self.bookings[*i].is_confirmed())
            .ok_or_else(|| ReservationError::BookingNotFoundOrNotConfirmed {
                side,
                booking_id: booking_id.to_string(),
            })
    }

    #[cfg(test)]
    pub(crate) fn push_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    #[cfg(test)]
    pub(crate) fn claim_seat_after_next_charge(&mut self) {
        self.claim_seat_after_charge = true;
    }

    #[cfg(test)]
    fn claim_seat_if_requested(&mut self, airplane_index: usize, seat_id: &str) {
        if std::mem::take(&mut self.claim_seat_after_charge) {
            self.airplanes[airplane_index].book_specific_seat(seat_id);
        }
    }
}

fn clamp_age(age: i64) -> u32 {
    u32::try_from(age.max(0)).unwrap_or(u32::MAX)
}

fn integrity_error(booking_id: &str, entity: &str, id: &str) -> ReservationError {
    error!(
        "Booking {} references missing {} {}",
        booking_id, entity, id
    );
    ReservationError::DataIntegrity(format!(
        "booking {booking_id} references missing {entity} {id}"
    ))
}
