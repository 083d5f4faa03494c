//! Application layer for the PumpMaster console.
//!
//! This crate provides use case implementations that coordinate between
//! the core domain state and the injected collaborator traits.

pub mod pump_list_usecase;
pub mod session_usecase;

pub use pump_list_usecase::{ListSnapshot, PumpListUseCase};
pub use session_usecase::SessionUseCase;
