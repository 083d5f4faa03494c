//! Pump device domain model.

use serde::{Deserialize, Serialize};

/// A measured quantity with its display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// A physical pump device record, the entity the list view manages.
///
/// The wire form is camelCase to stay compatible with the device registry
/// export format this console consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpDevice {
    /// Unique device identifier (used as the selection key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Pump category (e.g., "Centrifugal", "Submersible")
    #[serde(rename = "type")]
    pub pump_type: String,
    /// Site area the device is installed in
    pub area_block: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Rated flow, GPM
    pub flow_rate: Measurement,
    /// Configured offset (seconds or feet depending on installation)
    pub offset: Measurement,
    /// Latest pressure reading, psi
    pub current_pressure: Measurement,
    /// Alarm floor, psi
    pub min_pressure: Measurement,
    /// Alarm ceiling, psi
    pub max_pressure: Measurement,
}
