//! Pump device model and data-source traits.

pub mod model;
pub mod service;

pub use model::{Measurement, PumpDevice};
pub use service::{FilterOptionsSource, PumpService};
