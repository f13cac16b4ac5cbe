//! Electrical load and daily energy demand.

use serde::Serialize;

use super::types::{EnergyModel, NOMINAL_VOLTAGE_V, PhaseCount};

/// Continuous electrical load seen by the inverter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadSpec {
    /// Supply voltage per phase (V).
    pub voltage_nominal: f64,
    /// Total load across all phases (W).
    pub load_watts: f64,
}

impl LoadSpec {
    /// Builds the load from the per-phase current and phase count.
    pub fn from_current(ampere_per_phase: f64, phases: PhaseCount) -> Self {
        Self {
            voltage_nominal: NOMINAL_VOLTAGE_V,
            load_watts: ampere_per_phase * NOMINAL_VOLTAGE_V * phases.multiplier(),
        }
    }
}

/// Energy the system must deliver per day, and the part the battery must hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyProfile {
    /// Total energy consumed per day (Wh); drives the panel array.
    pub daily_energy_wh: f64,
    /// Energy served from storage (Wh); drives the battery bank.
    pub night_energy_wh: f64,
}

impl EnergyProfile {
    pub fn new(load: &LoadSpec, model: EnergyModel) -> Self {
        match model {
            EnergyModel::DayNight {
                day_hours,
                night_hours,
            } => Self {
                daily_energy_wh: load.load_watts * (day_hours + night_hours),
                night_energy_wh: load.load_watts * night_hours,
            },
            EnergyModel::TotalHours { operating_hours } => {
                let wh = load.load_watts * operating_hours;
                Self {
                    daily_energy_wh: wh,
                    night_energy_wh: wh,
                }
            }
        }
    }

    pub fn daily_energy_kwh(&self) -> f64 {
        self.daily_energy_wh / 1000.0
    }
}
