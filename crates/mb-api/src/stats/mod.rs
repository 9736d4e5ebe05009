//! Dashboard statistics derived from a user's topics and goals.
//!
//! Nothing here is stored. Every request re-fetches both collections and
//! recomputes the aggregates, so the numbers are never staler than the call.

pub mod model;
pub mod routes;

pub use model::{CategoryProgress, DashboardStats};
pub use routes::routes;
