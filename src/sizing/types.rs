//! Calculator inputs, constants, and validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SizingError;

/// Nominal single-phase supply voltage (V).
pub const NOMINAL_VOLTAGE_V: f64 = 220.0;

/// Battery bank voltage every configuration is wired up to (V).
pub const BANK_VOLTAGE_V: f64 = 48.0;

/// Lead-acid units per 48 V series string.
pub const LEAD_ACID_STRING_LEN: u32 = 4;

/// Number of supply phases feeding the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PhaseCount {
    Single,
    Three,
}

impl PhaseCount {
    /// Multiplier applied to the per-phase load.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Three => 3.0,
        }
    }
}

impl TryFrom<u8> for PhaseCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            3 => Ok(Self::Three),
            other => Err(format!("phase count must be 1 or 3, got {other}")),
        }
    }
}

impl From<PhaseCount> for u8 {
    fn from(p: PhaseCount) -> Self {
        match p {
            PhaseCount::Single => 1,
            PhaseCount::Three => 3,
        }
    }
}

impl fmt::Display for PhaseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single-phase"),
            Self::Three => write!(f, "three-phase"),
        }
    }
}

/// Battery technology, which fixes depth of discharge, C-rate, and unit voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryChemistry {
    /// 12 V flooded, gel, or AGM units wired four in series.
    LeadAcid,
    /// Integrated 48 V lithium units wired in parallel.
    #[serde(rename = "lithium_48v")]
    Lithium48V,
}

impl BatteryChemistry {
    /// Usable fraction of rated capacity.
    pub fn depth_of_discharge(self) -> f64 {
        match self {
            Self::LeadAcid => 0.5,
            Self::Lithium48V => 0.8,
        }
    }

    /// Charge rate as a multiple of capacity per hour.
    pub fn c_rate(self) -> f64 {
        match self {
            Self::LeadAcid => 0.2,
            Self::Lithium48V => 0.5,
        }
    }

    /// Terminal voltage of a single unit (V).
    pub fn unit_voltage(self) -> f64 {
        match self {
            Self::LeadAcid => 12.0,
            Self::Lithium48V => 48.0,
        }
    }

    /// Units wired in series to reach the bank voltage.
    pub fn series_per_string(self) -> u32 {
        match self {
            Self::LeadAcid => LEAD_ACID_STRING_LEN,
            Self::Lithium48V => 1,
        }
    }

    /// Typical unit capacity when none is given: a 200 Ah 12 V block, or a 5 kWh rack module.
    pub fn default_unit_kwh(self) -> f64 {
        match self {
            Self::LeadAcid => 2.4,
            Self::Lithium48V => 5.0,
        }
    }
}

impl fmt::Display for BatteryChemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadAcid => write!(f, "lead-acid/gel/AGM 12V"),
            Self::Lithium48V => write!(f, "lithium 48V"),
        }
    }
}

/// How operating hours translate into daily and battery-backed energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EnergyModel {
    /// Separate daytime and night-time hours; only night energy is stored.
    DayNight { day_hours: f64, night_hours: f64 },
    /// A single total; the whole load is treated as battery-backed.
    TotalHours { operating_hours: f64 },
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::DayNight {
            day_hours: 6.0,
            night_hours: 6.0,
        }
    }
}

/// Tunable design constants (the "advanced" overrides).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConstants {
    /// Equivalent full-intensity sun hours per day.
    pub peak_sun_hours: f64,
    /// Overall system efficiency, in percent.
    pub system_efficiency_pct: f64,
    /// Headroom multiplier applied to the load when sizing the inverter.
    pub inverter_safety_factor: f64,
}

impl Default for SizingConstants {
    fn default() -> Self {
        Self {
            peak_sun_hours: 5.0,
            system_efficiency_pct: 80.0,
            inverter_safety_factor: 1.25,
        }
    }
}

impl SizingConstants {
    /// System efficiency as a fraction.
    pub fn system_efficiency(&self) -> f64 {
        self.system_efficiency_pct / 100.0
    }
}

/// Solar module datasheet values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSpec {
    /// Rated peak power (W).
    pub rated_watts: f64,
    /// Module length (m).
    pub length_m: f64,
    /// Module width (m).
    pub width_m: f64,
}

impl PanelSpec {
    /// Footprint of one module (m²).
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self {
            rated_watts: 550.0,
            length_m: 2.27,
            width_m: 1.13,
        }
    }
}

/// Complete input record for one sizing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInputs {
    /// Load current on each phase (A).
    pub ampere_per_phase: f64,
    pub energy_model: EnergyModel,
    pub phases: PhaseCount,
    pub chemistry: BatteryChemistry,
    /// Capacity of one battery unit (kWh).
    pub battery_unit_kwh: f64,
    pub panel: PanelSpec,
}

impl Default for SizingInputs {
    fn default() -> Self {
        Self {
            ampere_per_phase: 5.0,
            energy_model: EnergyModel::default(),
            phases: PhaseCount::Single,
            chemistry: BatteryChemistry::LeadAcid,
            battery_unit_kwh: BatteryChemistry::LeadAcid.default_unit_kwh(),
            panel: PanelSpec::default(),
        }
    }
}

impl SizingInputs {
    /// Checks every range constraint and returns all violations.
    ///
    /// Returns an empty vector when the inputs and constants can be computed
    /// without dividing by zero or leaving the physical range.
    pub fn validate(&self, constants: &SizingConstants) -> Vec<SizingError> {
        let mut errors = Vec::new();

        require_positive(&mut errors, "load.ampere_per_phase", self.ampere_per_phase);

        match self.energy_model {
            EnergyModel::DayNight {
                day_hours,
                night_hours,
            } => {
                require_hours(&mut errors, "load.day_hours", day_hours);
                require_hours(&mut errors, "load.night_hours", night_hours);
                if day_hours + night_hours > 24.0 {
                    errors.push(SizingError::invalid(
                        "load.night_hours",
                        format!("day + night hours must be <= 24, got {}", day_hours + night_hours),
                    ));
                }
            }
            EnergyModel::TotalHours { operating_hours } => {
                require_hours(&mut errors, "load.operating_hours", operating_hours);
            }
        }

        require_positive(&mut errors, "battery.unit_kwh", self.battery_unit_kwh);
        require_positive(&mut errors, "panel.rated_watts", self.panel.rated_watts);
        require_positive(&mut errors, "panel.length_m", self.panel.length_m);
        require_positive(&mut errors, "panel.width_m", self.panel.width_m);

        require_positive(&mut errors, "constants.peak_sun_hours", constants.peak_sun_hours);
        if constants.peak_sun_hours > 24.0 {
            errors.push(SizingError::invalid(
                "constants.peak_sun_hours",
                "must be <= 24",
            ));
        }
        let eff = constants.system_efficiency_pct;
        if !(eff.is_finite() && eff > 0.0 && eff <= 100.0) {
            errors.push(SizingError::invalid(
                "constants.system_efficiency_pct",
                format!("must be in (0, 100], got {eff}"),
            ));
        }
        require_positive(
            &mut errors,
            "constants.inverter_safety_factor",
            constants.inverter_safety_factor,
        );

        errors
    }
}

fn require_positive(errors: &mut Vec<SizingError>, field: &'static str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(SizingError::invalid(field, format!("must be > 0, got {value}")));
    }
}

/// Rounds a non-negative quantity up to a whole count of `u32` items.
pub(crate) fn ceil_count(value: f64, field: &'static str) -> Result<u32, SizingError> {
    let count = value.ceil();
    if count.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&count) {
        Ok(count as u32)
    } else {
        Err(SizingError::invalid(
            field,
            format!("needs {count} units, more than {} can be counted", u32::MAX),
        ))
    }
}

fn require_hours(errors: &mut Vec<SizingError>, field: &'static str, value: f64) {
    if !(value.is_finite() && (0.0..=24.0).contains(&value)) {
        errors.push(SizingError::invalid(
            field,
            format!("must be in [0, 24], got {value}"),
        ));
    }
}
