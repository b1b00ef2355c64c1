//! JSON HTTP API over the reservation system.
//!
//! Handlers never touch entities directly: reads go through the system's
//! accessors under the read lock, and every mutation is one transaction call
//! under the write lock.

pub mod dto;
pub mod error;

use crate::application::SharedReservations;
use crate::error::ReservationError;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode, header},
    routing::{delete, get, post},
};
use dto::{
    AirplaneDetail, AirplaneSummary, BookingView, CustomerDetail, CustomerView, MessageResponse,
    NewAirplaneRequest, NewBookingRequest, NewCustomerRequest, SeatView, SuggestionQuery,
    SwapRequest,
};
use error::ApiError;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const DEFAULT_CUSTOMER_NAME: &str = "DefaultName";

#[derive(Clone)]
pub struct AppState {
    pub reservations: SharedReservations,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: [u8; 4],
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [0, 0, 0, 0],
            port: 8080,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/airplanes", get(list_airplanes).post(create_airplane))
        .route("/api/airplanes/{flight_number}", get(get_airplane))
        .route(
            "/api/airplanes/{flight_number}/suggestions",
            get(suggest_seats),
        )
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/{customer_id}", get(get_customer))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/swap", post(swap_seats))
        .route("/api/bookings/{booking_id}", delete(cancel_booking))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn serve(config: ServerConfig, state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from((config.host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await
}

async fn list_airplanes(State(state): State<AppState>) -> Json<Vec<AirplaneSummary>> {
    let system = state.reservations.read().await;
    Json(system.airplanes().iter().map(AirplaneSummary::from).collect())
}

async fn get_airplane(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<AirplaneDetail>, ApiError> {
    let system = state.reservations.read().await;
    let airplane = system
        .airplane(&flight_number)
        .ok_or_else(|| ReservationError::AirplaneNotFound(flight_number.clone()))?;

    let seats = airplane
        .seats()
        .iter()
        .map(|seat| {
            let owner = seat
                .is_booked()
                .then(|| system.seat_owner(&flight_number, seat.id()))
                .flatten();
            SeatView::new(seat, owner)
        })
        .collect();

    Ok(Json(AirplaneDetail {
        summary: AirplaneSummary::from(airplane),
        seats,
    }))
}

async fn create_airplane(
    State(state): State<AppState>,
    payload: Result<Json<NewAirplaneRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AirplaneSummary>), ApiError> {
    let Json(req) = payload?;
    if req.flight_number.trim().is_empty() {
        return Err(ApiError::BadRequest("flightNumber must not be empty".into()));
    }
    let mut system = state.reservations.write().await;
    let airplane = system.add_airplane(&req.flight_number, req.rows, req.seats_per_row)?;
    Ok((StatusCode::CREATED, Json(AirplaneSummary::from(airplane))))
}

async fn suggest_seats(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<Vec<SeatView>>, ApiError> {
    let Query(query) = query?;
    let system = state.reservations.read().await;
    let seats = system.suggest_seats(&query.customer_id, &flight_number, query.max_price)?;
    Ok(Json(seats.into_iter().map(SeatView::from).collect()))
}

async fn list_customers(State(state): State<AppState>) -> Json<Vec<CustomerView>> {
    let system = state.reservations.read().await;
    Json(system.customers().iter().map(CustomerView::from).collect())
}

async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerDetail>, ApiError> {
    let system = state.reservations.read().await;
    let customer = system
        .customer(&customer_id)
        .ok_or_else(|| ReservationError::CustomerNotFound(customer_id.clone()))?;

    Ok(Json(CustomerDetail {
        customer: CustomerView::from(customer),
        bookings: system
            .bookings_for_customer(&customer_id)
            .into_iter()
            .map(BookingView::from)
            .collect(),
    }))
}

async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerView>), ApiError> {
    let Json(req) = payload?;
    let name = match req.name {
        Some(name) if !name.trim().is_empty() => name,
        _ if req.auto_generate => String::new(),
        _ => DEFAULT_CUSTOMER_NAME.to_string(),
    };
    let mut system = state.reservations.write().await;
    let customer = system.add_customer(
        &name,
        req.age.unwrap_or(0),
        req.money.unwrap_or(Decimal::ZERO),
        req.auto_generate,
    );
    Ok((StatusCode::CREATED, Json(CustomerView::from(customer))))
}

async fn list_bookings(State(state): State<AppState>) -> Json<Vec<BookingView>> {
    let system = state.reservations.read().await;
    Json(system.bookings().iter().map(BookingView::from).collect())
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<NewBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingView>), ApiError> {
    let Json(req) = payload?;
    let mut system = state.reservations.write().await;
    let booking = system.create_booking(&req.customer_id, &req.flight_number, &req.seat_id)?;
    Ok((StatusCode::CREATED, Json(BookingView::from(&booking))))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut system = state.reservations.write().await;
    let receipt = system.cancel_booking(&booking_id)?;
    Ok(Json(MessageResponse {
        message: format!(
            "Booking {} cancelled successfully. {} refunded.",
            receipt.booking_id, receipt.refunded
        ),
    }))
}

async fn swap_seats(
    State(state): State<AppState>,
    payload: Result<Json<SwapRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let mut system = state.reservations.write().await;
    let receipt = system.swap_seats(&req.booking_id1, &req.booking_id2)?;
    Ok(Json(MessageResponse {
        message: format!(
            "Seat swap successful. Booking {} now has seat {} (was {}). Booking {} now has seat {} (was {}).",
            receipt.first_booking_id,
            receipt.second_previous_seat,
            receipt.first_previous_seat,
            receipt.second_booking_id,
            receipt.first_previous_seat,
            receipt.second_previous_seat,
        ),
    }))
}
