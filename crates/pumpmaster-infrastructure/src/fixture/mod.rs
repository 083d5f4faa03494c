//! Seeded fixture backend.
//!
//! In-memory implementations of the auth and pump service traits, backed
//! by the deterministic dataset the console ships for demos and tests.

mod auth;
mod pump_service;
mod pumps;
mod users;

pub use auth::FixtureAuthService;
pub use pump_service::FixturePumpService;
pub use pumps::seeded_pumps;
pub use users::{FixtureUser, seeded_users};
