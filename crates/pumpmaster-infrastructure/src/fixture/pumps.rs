//! Seeded pump dataset.
//!
//! Ten pumps across five type categories and ten area blocks, with
//! plausible flow and pressure readings around downtown Los Angeles.

use once_cell::sync::Lazy;
use pumpmaster_core::pump::{Measurement, PumpDevice};

#[allow(clippy::too_many_arguments)]
fn pump(
    id: &str,
    name: &str,
    pump_type: &str,
    area: &str,
    latitude: f64,
    longitude: f64,
    flow_gpm: f64,
    offset_value: f64,
    offset_unit: &str,
    current_psi: f64,
    min_psi: f64,
    max_psi: f64,
) -> PumpDevice {
    PumpDevice {
        id: id.to_string(),
        name: name.to_string(),
        pump_type: pump_type.to_string(),
        area_block: area.to_string(),
        latitude,
        longitude,
        flow_rate: Measurement::new(flow_gpm, "GPM"),
        offset: Measurement::new(offset_value, offset_unit),
        current_pressure: Measurement::new(current_psi, "psi"),
        min_pressure: Measurement::new(min_psi, "psi"),
        max_pressure: Measurement::new(max_psi, "psi"),
    }
}

static SEEDED_PUMPS: Lazy<Vec<PumpDevice>> = Lazy::new(|| {
    vec![
        pump("pump-001", "Pump 1", "Centrifugal", "Area A", 34.0522, -118.2437, 1000.0, 5.0, "sec", 150.0, 120.0, 180.0),
        pump("pump-002", "Pump 2", "Submersible", "Area B", 34.0525, -118.244, 800.0, 3.0, "ft", 130.0, 100.0, 160.0),
        pump("pump-003", "Pump 3", "Diaphragm", "Area C", 34.053, -118.2445, 600.0, 2.0, "sec", 110.0, 80.0, 140.0),
        pump("pump-004", "Pump 4", "Rotary", "Area D", 34.0535, -118.245, 750.0, 1.0, "ft", 140.0, 110.0, 170.0),
        pump("pump-005", "Pump 5", "Peristaltic", "Area E", 34.054, -118.2455, 500.0, 0.0, "sec", 90.0, 60.0, 120.0),
        pump("pump-006", "Pump 6", "Centrifugal", "Area F", 34.0545, -118.246, 1200.0, 6.0, "ft", 160.0, 130.0, 190.0),
        pump("pump-007", "Pump 7", "Submersible", "Area G", 34.055, -118.2465, 900.0, 4.0, "sec", 135.0, 105.0, 165.0),
        pump("pump-008", "Pump 8", "Diaphragm", "Area H", 34.0555, -118.247, 650.0, 3.0, "ft", 115.0, 85.0, 145.0),
        pump("pump-009", "Pump 9", "Rotary", "Area I", 34.056, -118.2475, 800.0, 2.0, "sec", 145.0, 115.0, 175.0),
        pump("pump-010", "Pump 10", "Peristaltic", "Area J", 34.0565, -118.248, 550.0, 1.0, "ft", 95.0, 65.0, 125.0),
    ]
});

/// Returns a fresh copy of the seeded dataset.
pub fn seeded_pumps() -> Vec<PumpDevice> {
    SEEDED_PUMPS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_dataset_shape() {
        let pumps = seeded_pumps();
        assert_eq!(pumps.len(), 10);
        assert_eq!(pumps[0].id, "pump-001");
        assert_eq!(pumps[9].id, "pump-010");

        let types: BTreeSet<&str> = pumps.iter().map(|p| p.pump_type.as_str()).collect();
        assert_eq!(types.len(), 5);
        let areas: BTreeSet<&str> = pumps.iter().map(|p| p.area_block.as_str()).collect();
        assert_eq!(areas.len(), 10);
    }

    #[test]
    fn test_pressures_within_bounds() {
        for pump in seeded_pumps() {
            assert!(pump.min_pressure.value <= pump.current_pressure.value);
            assert!(pump.current_pressure.value <= pump.max_pressure.value);
            assert_eq!(pump.current_pressure.unit, "psi");
        }
    }
}
