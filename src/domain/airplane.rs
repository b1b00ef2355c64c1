use super::customer::Customer;
use super::money::Money;
use super::seat::{Seat, SeatClass};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Economy base price used when the caller does not configure one.
pub const DEFAULT_ECONOMY_PRICE: Decimal = dec!(50.00);

/// Largest accepted number of rows.
pub const MAX_ROWS: u32 = 999;

/// Largest accepted row width; seat letters run from A to Z.
pub const MAX_SEATS_PER_ROW: u32 = 26;

/// Share of rows, counted from the front, that are business class.
const BUSINESS_ROW_SHARE: Decimal = dec!(0.2);

/// An airplane and its seats.
///
/// The seat layout is derived once from `rows` × `seats_per_row`. The booked
/// counter is a cache of the number of booked seats and is only changed
/// together with a seat's flag.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Airplane {
    flight_number: String,
    seats: Vec<Seat>,
    rows: u32,
    seats_per_row: u32,
    booked_seats_count: u32,
}

impl Airplane {
    /// Builds the seat map. Non-positive dimensions are coerced to 1 and
    /// oversized ones are capped at [`MAX_ROWS`] and [`MAX_SEATS_PER_ROW`].
    pub fn new(
        flight_number: impl Into<String>,
        rows: i64,
        seats_per_row: i64,
        economy_price: Money,
    ) -> Self {
        let rows = clamp_dimension(rows, MAX_ROWS);
        let seats_per_row = clamp_dimension(seats_per_row, MAX_SEATS_PER_ROW);
        Self {
            flight_number: flight_number.into(),
            seats: layout(rows, seats_per_row, economy_price),
            rows,
            seats_per_row,
            booked_seats_count: 0,
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    pub fn capacity(&self) -> u32 {
        capacity_of(self.rows, self.seats_per_row)
    }

    pub fn booked_seats_count(&self) -> u32 {
        self.booked_seats_count
    }

    pub fn is_full(&self) -> bool {
        self.booked_seats_count >= self.capacity()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn find_seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id() == seat_id)
    }

    fn find_seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id() == seat_id)
    }

    /// Books the seat if it exists and is free.
    pub fn book_specific_seat(&mut self, seat_id: &str) -> bool {
        let booked = self
            .find_seat_mut(seat_id)
            .map(Seat::book)
            .unwrap_or(false);
        if booked {
            self.booked_seats_count += 1;
        }
        booked
    }

    /// Frees the seat if it exists and is booked.
    pub fn unbook_specific_seat(&mut self, seat_id: &str) -> bool {
        let freed = self
            .find_seat_mut(seat_id)
            .map(Seat::unbook)
            .unwrap_or(false);
        if freed {
            self.booked_seats_count -= 1;
        }
        freed
    }

    pub fn available_seats(&self) -> Vec<&Seat> {
        self.seats.iter().filter(|s| !s.is_booked()).collect()
    }

    pub fn available_seats_by_class(&self, class: SeatClass) -> Vec<&Seat> {
        self.seats
            .iter()
            .filter(|s| !s.is_booked() && s.class() == class)
            .collect()
    }

    /// Free seats the customer can afford at or below `max_price`, cheapest
    /// first. Seats of equal price keep their layout order.
    pub fn suggest_lower_price_seats(
        &self,
        customer: Option<&Customer>,
        max_price: Decimal,
    ) -> Vec<&Seat> {
        let Some(customer) = customer else {
            return Vec::new();
        };
        let budget = customer.money().value();
        let mut suggestions: Vec<&Seat> = self
            .seats
            .iter()
            .filter(|s| {
                let price = s.price().value();
                !s.is_booked() && price <= max_price && price <= budget
            })
            .collect();
        suggestions.sort_by_key(|s| s.price());
        suggestions
    }

    /// One line per row: `X` booked, `B` free business, `E` free economy.
    pub fn seating_map(&self) -> String {
        let mut map = String::from("   ");
        for letter in seat_letters(self.seats_per_row) {
            map.push(letter);
            map.push(' ');
        }
        map.push('\n');
        for (row_index, row) in self.seats.chunks(self.seats_per_row as usize).enumerate() {
            map.push_str(&format!("{:<3}", row_index + 1));
            for seat in row {
                let marker = match (seat.is_booked(), seat.class()) {
                    (true, _) => 'X',
                    (false, SeatClass::Business) => 'B',
                    (false, SeatClass::Economy) => 'E',
                };
                map.push(marker);
                map.push(' ');
            }
            map.push('\n');
        }
        map.push_str("Legend: X=Booked, B=Available Business, E=Available Economy\n");
        map
    }
}

fn clamp_dimension(value: i64, max: u32) -> u32 {
    if value <= 0 {
        return 1;
    }
    u32::try_from(value).map_or(max, |v| v.min(max))
}

fn capacity_of(rows: u32, seats_per_row: u32) -> u32 {
    rows.checked_mul(seats_per_row).unwrap_or(u32::MAX)
}

fn business_rows(rows: u32) -> u32 {
    let share = (Decimal::from(rows) * BUSINESS_ROW_SHARE).floor();
    share.to_u32().unwrap_or(0).max(1)
}

fn seat_letters(seats_per_row: u32) -> impl Iterator<Item = char> {
    (0..seats_per_row).map(|i| char::from_u32('A' as u32 + i).unwrap_or('?'))
}

fn layout(rows: u32, seats_per_row: u32, economy_price: Money) -> Vec<Seat> {
    let business_rows = business_rows(rows);
    let mut seats = Vec::with_capacity(capacity_of(rows, seats_per_row) as usize);
    for row in 1..=rows {
        let class = if row <= business_rows {
            SeatClass::Business
        } else {
            SeatClass::Economy
        };
        for letter in seat_letters(seats_per_row) {
            seats.push(Seat::new(format!("{row}{letter}"), class, economy_price));
        }
    }
    seats
}
