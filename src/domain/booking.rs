use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

static BOOKING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// `BK<unix-seconds>-<sequence>`; the sequence never repeats within a process.
fn next_booking_id(now: DateTime<Utc>) -> String {
    let sequence = BOOKING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("BK{}-{:04}", now.timestamp(), sequence)
}

/// Links a customer to a seat on a flight.
///
/// All references are identifiers resolved through the reservation system's
/// collections. The mutators are unconstrained; keeping them consistent with
/// seats and balances is the transaction layer's job.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Booking {
    booking_id: String,
    customer_id: String,
    flight_number: String,
    seat_id: String,
    created_at: DateTime<Utc>,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        customer_id: impl Into<String>,
        flight_number: impl Into<String>,
        seat_id: impl Into<String>,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            booking_id: next_booking_id(created_at),
            customer_id: customer_id.into(),
            flight_number: flight_number.into(),
            seat_id: seat_id.into(),
            created_at,
            status: BookingStatus::Pending,
        }
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn seat_id(&self) -> &str {
        &self.seat_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Local time as `YYYY-MM-DD HH:MM:SS`.
    pub fn booking_date_string(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
    }

    pub fn set_seat_id(&mut self, seat_id: impl Into<String>) {
        self.seat_id = seat_id.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_booking_is_pending() {
        let booking = Booking::new("CUST0001", "FL101", "4A");
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.customer_id(), "CUST0001");
        assert_eq!(booking.flight_number(), "FL101");
        assert_eq!(booking.seat_id(), "4A");
        assert!(booking.booking_id().starts_with("BK"));
    }

    #[test]
    fn test_booking_ids_are_unique() {
        let ids: HashSet<String> = (0..500)
            .map(|_| Booking::new("CUST0001", "FL101", "1A").booking_id().to_string())
            .collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_mutators() {
        let mut booking = Booking::new("CUST0001", "FL101", "6A");
        booking.set_status(BookingStatus::Confirmed);
        assert!(booking.is_confirmed());
        booking.set_seat_id("6B");
        assert_eq!(booking.seat_id(), "6B");
        booking.set_status(BookingStatus::Cancelled);
        assert_eq!(booking.status().to_string(), "Cancelled");
    }

    #[test]
    fn test_booking_date_format() {
        let booking = Booking::new("CUST0001", "FL101", "1A");
        let date = booking.booking_date_string();
        assert_eq!(date.len(), 19);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[10..11], " ");
    }
}
