//! The sizing pass: load, energy, storage, inverter, and array, in that order.

use serde::Serialize;
use tracing::debug;

use super::battery::BatteryBank;
use super::error::SizingError;
use super::inverter::InverterSizing;
use super::load::{EnergyProfile, LoadSpec};
use super::panel::{PanelArray, PanelEfficiency};
use super::types::{SizingConstants, SizingInputs};

/// Everything one sizing run produces.
///
/// Values are recomputed from scratch on every call to [`compute`]; nothing
/// here is cached or carried between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    pub inputs: SizingInputs,
    pub constants: SizingConstants,
    pub load: LoadSpec,
    pub energy: EnergyProfile,
    pub panel_efficiency: PanelEfficiency,
    pub battery: BatteryBank,
    pub inverter: InverterSizing,
    pub panels: PanelArray,
}

/// Sizes inverter, battery bank, and panel array for the given load.
///
/// # Arguments
///
/// * `inputs` - Load, hours, battery, and panel choices
/// * `constants` - Design constants
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] for the first range violation found
/// by [`SizingInputs::validate`], or when a unit or panel count does not fit
/// in a `u32`; no partial result is produced.
///
/// # Examples
///
/// ```
/// use solar_sizer::sizing::{SizingConstants, SizingInputs, compute};
///
/// let result = compute(&SizingInputs::default(), &SizingConstants::default()).unwrap();
/// assert_eq!(result.load.load_watts, 1100.0);
/// assert_eq!(result.battery.unit_count, 8);
/// ```
pub fn compute(
    inputs: &SizingInputs,
    constants: &SizingConstants,
) -> Result<SizingResult, SizingError> {
    if let Some(err) = inputs.validate(constants).into_iter().next() {
        return Err(err);
    }

    let load = LoadSpec::from_current(inputs.ampere_per_phase, inputs.phases);
    debug!(load_watts = load.load_watts, phases = %inputs.phases, "load");

    let energy = EnergyProfile::new(&load, inputs.energy_model);
    debug!(
        daily_wh = energy.daily_energy_wh,
        night_wh = energy.night_energy_wh,
        "energy profile"
    );

    let panel_efficiency = PanelEfficiency::of(&inputs.panel);
    debug!(
        efficiency_pct = panel_efficiency.efficiency_pct,
        band = %panel_efficiency.band,
        "panel efficiency"
    );

    let battery = BatteryBank::size(&energy, inputs.chemistry, inputs.battery_unit_kwh)?;
    debug!(
        chemistry = %battery.chemistry,
        required_wh = battery.required_capacity_wh,
        raw_units = battery.raw_units,
        unit_count = battery.unit_count,
        bank_kwh = battery.bank_kwh,
        "battery bank"
    );

    let inverter = InverterSizing::size(&load, &battery, constants.inverter_safety_factor);
    debug!(
        kva_load = inverter.kva_load,
        kva_charge = inverter.kva_charge,
        kva = inverter.kva_display,
        basis = %inverter.basis,
        "inverter"
    );

    let panels = PanelArray::size(&energy, &inputs.panel, constants)?;
    debug!(
        required_w = panels.required_array_watts,
        panel_count = panels.panel_count,
        "panel array"
    );

    Ok(SizingResult {
        inputs: *inputs,
        constants: *constants,
        load,
        energy,
        panel_efficiency,
        battery,
        inverter,
        panels,
    })
}
