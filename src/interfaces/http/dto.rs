//! JSON shapes of the HTTP API. Field names are camelCase.

use crate::domain::airplane::Airplane;
use crate::domain::booking::Booking;
use crate::domain::customer::Customer;
use crate::domain::seat::Seat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirplaneSummary {
    pub flight_number: String,
    pub capacity: u32,
    pub booked_seats_count: u32,
    pub is_full: bool,
}

impl From<&Airplane> for AirplaneSummary {
    fn from(airplane: &Airplane) -> Self {
        Self {
            flight_number: airplane.flight_number().to_string(),
            capacity: airplane.capacity(),
            booked_seats_count: airplane.booked_seats_count(),
            is_full: airplane.is_full(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat_id: String,
    pub is_booked: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub seat_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_by_customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

impl SeatView {
    pub fn new(seat: &Seat, owner: Option<&Booking>) -> Self {
        Self {
            seat_id: seat.id().to_string(),
            is_booked: seat.is_booked(),
            price: seat.price().value(),
            seat_class: seat.class().to_string(),
            booked_by_customer_id: owner.map(|b| b.customer_id().to_string()),
            booking_id: owner.map(|b| b.booking_id().to_string()),
        }
    }
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self::new(seat, None)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirplaneDetail {
    #[serde(flatten)]
    pub summary: AirplaneSummary,
    pub seats: Vec<SeatView>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub person_id: String,
    pub name: String,
    pub age: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub money: Decimal,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            person_id: customer.person_id().to_string(),
            name: customer.name().to_string(),
            age: customer.age(),
            money: customer.money().value(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: CustomerView,
    pub bookings: Vec<BookingView>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub booking_id: String,
    pub customer_id: String,
    pub flight_number: String,
    pub seat_id: String,
    pub booking_date: String,
    pub status: String,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id().to_string(),
            customer_id: booking.customer_id().to_string(),
            flight_number: booking.flight_number().to_string(),
            seat_id: booking.seat_id().to_string(),
            booking_date: booking.booking_date_string(),
            status: booking.status().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub money: Option<Decimal>,
    #[serde(default)]
    pub auto_generate: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAirplaneRequest {
    pub flight_number: String,
    pub rows: i64,
    pub seats_per_row: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    pub customer_id: String,
    pub flight_number: String,
    pub seat_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub booking_id1: String,
    pub booking_id2: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionQuery {
    pub customer_id: String,
    pub max_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::seat::SeatClass;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_seat_view_omits_owner_when_free() {
        let seat = Seat::new("1A", SeatClass::Business, Money::new(dec!(50)));
        let value = serde_json::to_value(SeatView::from(&seat)).unwrap();
        assert_eq!(
            value,
            json!({
                "seatId": "1A",
                "isBooked": false,
                "price": 100.0,
                "seatClass": "Business"
            })
        );
    }

    #[test]
    fn test_airplane_detail_flattens_summary() {
        let airplane = Airplane::new("FL101", 1, 1, Money::new(dec!(50)));
        let detail = AirplaneDetail {
            summary: AirplaneSummary::from(&airplane),
            seats: airplane.seats().iter().map(SeatView::from).collect(),
        };
        let value = serde_json::to_value(detail).unwrap();
        assert_eq!(value["flightNumber"], "FL101");
        assert_eq!(value["capacity"], 1);
        assert_eq!(value["isFull"], false);
        assert_eq!(value["seats"][0]["seatId"], "1A");
    }

    #[test]
    fn test_new_customer_request_defaults() {
        let request: NewCustomerRequest =
            serde_json::from_value(json!({ "autoGenerate": true })).unwrap();
        assert!(request.auto_generate);
        assert!(request.name.is_none());

        let request: NewCustomerRequest =
            serde_json::from_value(json!({ "name": "Zed", "age": 31, "money": 250.5 })).unwrap();
        assert!(!request.auto_generate);
        assert_eq!(request.money, Some(dec!(250.5)));
    }

    #[test]
    fn test_swap_request_field_names() {
        let request: SwapRequest =
            serde_json::from_value(json!({ "bookingId1": "a", "bookingId2": "b" })).unwrap();
        assert_eq!(request.booking_id1, "a");
        assert_eq!(request.booking_id2, "b");
    }
}
