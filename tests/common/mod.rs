//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_sizer::sizing::{
    BatteryChemistry, EnergyModel, PanelSpec, PhaseCount, SizingConstants, SizingInputs,
};

/// 5 A single-phase load, 6 h day + 6 h night, 2.4 kWh lead-acid, 550 W panels.
pub fn reference_inputs() -> SizingInputs {
    SizingInputs {
        ampere_per_phase: 5.0,
        energy_model: EnergyModel::DayNight {
            day_hours: 6.0,
            night_hours: 6.0,
        },
        phases: PhaseCount::Single,
        chemistry: BatteryChemistry::LeadAcid,
        battery_unit_kwh: 2.4,
        panel: reference_panel(),
    }
}

/// 550 W module, 2.27 m x 1.13 m.
pub fn reference_panel() -> PanelSpec {
    PanelSpec {
        rated_watts: 550.0,
        length_m: 2.27,
        width_m: 1.13,
    }
}

/// Default design constants (5 sun hours, 80 %, 1.25).
pub fn default_constants() -> SizingConstants {
    SizingConstants::default()
}

/// Same load as [`reference_inputs`] on integrated 48 V lithium units.
pub fn lithium_inputs(unit_kwh: f64) -> SizingInputs {
    SizingInputs {
        chemistry: BatteryChemistry::Lithium48V,
        battery_unit_kwh: unit_kwh,
        ..reference_inputs()
    }
}
