// --- File: crates/calproxy_calcom/src/lib.rs ---

// Declare modules within this crate
pub mod availability;
pub mod avatar;
pub mod booking;
#[cfg(test)]
mod booking_test;
pub mod doc;
#[cfg(test)]
mod fake_client;
pub mod handlers;
pub mod models;
pub mod profile;
#[cfg(test)]
mod profile_test;
pub mod routes;

// Re-export for the backend service
pub use handlers::CalcomState;
pub use models::{BookingPayload, ProfileData};
pub use routes::{routes, routes_with_client};
