//! Domain entities of the reservation system.
//!
//! Entities here only guard their own state. Anything that has to keep two of
//! them consistent lives in [`crate::application`].

pub mod airplane;
pub mod booking;
pub mod customer;
pub mod money;
pub mod ports;
pub mod seat;
