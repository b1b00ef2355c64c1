//! Adapters for the domain ports.

pub mod random_profiles;
