pub mod auth;
pub mod config;
pub mod error;
pub mod list;
pub mod pump;

// Re-export common error type
pub use error::PumpMasterError;
