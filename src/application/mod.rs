//! Application layer containing the reservation transaction engine.
//!
//! [`engine::ReservationSystem`] is synchronous and single-owner. Callers that
//! serve concurrent requests share it through [`SharedReservations`], taking
//! the write lock for the whole of any mutating operation and the read lock
//! for snapshots that must be consistent.

pub mod engine;

use engine::ReservationSystem;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedReservations = Arc<RwLock<ReservationSystem>>;

pub fn shared(system: ReservationSystem) -> SharedReservations {
    Arc::new(RwLock::new(system))
}
