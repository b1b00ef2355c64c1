use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of a [`ReservationError`], used by the outer layers
/// to decide presentation (HTTP status, console wording, log level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyBooked,
    AlreadyCancelled,
    InsufficientFunds,
    InvalidOperation,
    InternalInconsistency,
    InvalidInput,
}

/// Which side of a seat swap a booking was supplied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapSide {
    First,
    Second,
}

impl std::fmt::Display for SwapSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapSide::First => write!(f, "First"),
            SwapSide::Second => write!(f, "Second"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Customer {0} not found")]
    CustomerNotFound(String),
    #[error("Airplane {0} not found")]
    AirplaneNotFound(String),
    #[error("Seat {seat_id} not found on flight {flight_number}")]
    SeatNotFound {
        flight_number: String,
        seat_id: String,
    },
    #[error("Booking {0} not found")]
    BookingNotFound(String),
    #[error("Seat {seat_id} on flight {flight_number} is already booked")]
    SeatAlreadyBooked {
        flight_number: String,
        seat_id: String,
    },
    #[error("Booking {0} is already cancelled")]
    AlreadyCancelled(String),
    #[error("Insufficient funds: seat costs {required}, customer has {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
    #[error("{side} booking ID ({booking_id}) not found or not confirmed")]
    BookingNotFoundOrNotConfirmed { side: SwapSide, booking_id: String },
    #[error("Cannot swap a booking with itself")]
    SelfSwap,
    #[error("Seat swaps only supported for bookings on the same flight ({first} vs {second})")]
    CrossFlightSwap { first: String, second: String },
    #[error("An airplane with flight number {0} already exists")]
    DuplicateFlightNumber(String),
    #[error("Could not charge customer {0}")]
    ChargeFailed(String),
    #[error("Seat {seat_id} on flight {flight_number} could not be booked; charge refunded")]
    InternalBookingFailure {
        flight_number: String,
        seat_id: String,
    },
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReservationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::CustomerNotFound(_)
            | ReservationError::AirplaneNotFound(_)
            | ReservationError::SeatNotFound { .. }
            | ReservationError::BookingNotFound(_)
            | ReservationError::BookingNotFoundOrNotConfirmed { .. } => ErrorKind::NotFound,
            ReservationError::SeatAlreadyBooked { .. } => ErrorKind::AlreadyBooked,
            ReservationError::AlreadyCancelled(_) => ErrorKind::AlreadyCancelled,
            ReservationError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            ReservationError::SelfSwap
            | ReservationError::CrossFlightSwap { .. }
            | ReservationError::DuplicateFlightNumber(_) => ErrorKind::InvalidOperation,
            ReservationError::ChargeFailed(_)
            | ReservationError::InternalBookingFailure { .. }
            | ReservationError::DataIntegrity(_)
            | ReservationError::IoError(_) => ErrorKind::InternalInconsistency,
            ReservationError::ValidationError(_) | ReservationError::CsvError(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
