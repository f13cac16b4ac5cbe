use serde::Serialize;

use super::error::SizingError;
use super::load::EnergyProfile;
use super::types::{BANK_VOLTAGE_V, BatteryChemistry, ceil_count};

/// Battery bank sized to carry the stored share of the daily energy.
///
/// Lead-acid banks are built from whole 4 x 12 V strings, so `unit_count` is
/// always a multiple of four for that chemistry. Lithium units are integrated
/// 48 V modules wired in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryBank {
    pub chemistry: BatteryChemistry,
    /// Depth of discharge used for sizing (fraction).
    pub dod: f64,
    /// Charge-rate multiple used for inverter sizing (1/h).
    pub c_rate: f64,
    /// Rated capacity needed so the stored energy stays within `dod` (Wh).
    pub required_capacity_wh: f64,
    /// Units needed before rounding to whole strings.
    pub raw_units: u32,
    pub unit_count: u32,
    /// Capacity of one unit (kWh).
    pub unit_kwh: f64,
    pub series_per_string: u32,
    pub parallel_strings: u32,
    pub bank_voltage: f64,
    /// Installed capacity, `unit_count * unit_kwh` (kWh).
    pub bank_kwh: f64,
}

impl BatteryBank {
    /// Sizes the bank for `energy.night_energy_wh`.
    ///
    /// `unit_kwh` must be positive; callers validate before reaching here.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] on `battery.unit_kwh` when the
    /// unit is so small that the bank needs more units than fit in a `u32`.
    pub fn size(
        energy: &EnergyProfile,
        chemistry: BatteryChemistry,
        unit_kwh: f64,
    ) -> Result<Self, SizingError> {
        let dod = chemistry.depth_of_discharge();
        let required_capacity_wh = energy.night_energy_wh / dod;
        let required_kwh = required_capacity_wh / 1000.0;

        let raw_units = ceil_count(required_kwh / unit_kwh, "battery.unit_kwh")?;
        let series = chemistry.series_per_string();
        let unit_count = round_up_to_multiple(raw_units, series).ok_or_else(|| {
            SizingError::invalid(
                "battery.unit_kwh",
                format!("{raw_units} units do not round up to whole strings of {series}"),
            )
        })?;

        Ok(Self {
            chemistry,
            dod,
            c_rate: chemistry.c_rate(),
            required_capacity_wh,
            raw_units,
            unit_count,
            unit_kwh,
            series_per_string: series,
            parallel_strings: unit_count / series,
            bank_voltage: BANK_VOLTAGE_V,
            bank_kwh: f64::from(unit_count) * unit_kwh,
        })
    }

    /// Rated capacity the load requires (kWh), before rounding to whole units.
    pub fn required_kwh(&self) -> f64 {
        self.required_capacity_wh / 1000.0
    }
}

fn round_up_to_multiple(n: u32, multiple: u32) -> Option<u32> {
    n.checked_next_multiple_of(multiple)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night(wh: f64) -> EnergyProfile {
        EnergyProfile {
            daily_energy_wh: wh,
            night_energy_wh: wh,
        }
    }

    fn sized(wh: f64, chemistry: BatteryChemistry, unit_kwh: f64) -> BatteryBank {
        BatteryBank::size(&night(wh), chemistry, unit_kwh).expect("unit count fits")
    }

    #[test]
    fn lead_acid_rounds_to_whole_strings() {
        // 6600 Wh / 0.5 = 13.2 kWh; 13.2 / 2.4 = 5.5 -> 6 -> 8
        let bank = sized(6_600.0, BatteryChemistry::LeadAcid, 2.4);
        assert!((bank.required_capacity_wh - 13_200.0).abs() < 1e-9);
        assert!((bank.required_kwh() - 13.2).abs() < 1e-9);
        assert_eq!(bank.raw_units, 6);
        assert_eq!(bank.unit_count, 8);
        assert_eq!(bank.parallel_strings, 2);
        assert_eq!(bank.series_per_string, 4);
        assert!((bank.bank_kwh - 19.2).abs() < 1e-9);
        assert_eq!(bank.bank_voltage, 48.0);
    }

    #[test]
    fn lead_acid_exact_multiple_is_kept() {
        // 4800 Wh / 0.5 = 9.6 kWh; 9.6 / 2.4 = 4
        let bank = sized(4_800.0, BatteryChemistry::LeadAcid, 2.4);
        assert_eq!(bank.raw_units, 4);
        assert_eq!(bank.unit_count, 4);
        assert_eq!(bank.parallel_strings, 1);
    }

    #[test]
    fn lithium_uses_raw_count_in_parallel() {
        // 6600 Wh / 0.8 = 8.25 kWh; 8.25 / 5 = 1.65 -> 2
        let bank = sized(6_600.0, BatteryChemistry::Lithium48V, 5.0);
        assert_eq!(bank.raw_units, 2);
        assert_eq!(bank.unit_count, 2);
        assert_eq!(bank.parallel_strings, 2);
        assert_eq!(bank.series_per_string, 1);
        assert_eq!(bank.bank_kwh, 10.0);
    }

    #[test]
    fn zero_night_energy_needs_no_units() {
        for chem in [BatteryChemistry::LeadAcid, BatteryChemistry::Lithium48V] {
            let bank = sized(0.0, chem, 2.4);
            assert_eq!(bank.unit_count, 0);
            assert_eq!(bank.bank_kwh, 0.0);
        }
    }

    #[test]
    fn round_up_helper() {
        assert_eq!(round_up_to_multiple(0, 4), Some(0));
        assert_eq!(round_up_to_multiple(1, 4), Some(4));
        assert_eq!(round_up_to_multiple(8, 4), Some(8));
        assert_eq!(round_up_to_multiple(9, 4), Some(12));
        assert_eq!(round_up_to_multiple(7, 1), Some(7));
        assert_eq!(round_up_to_multiple(u32::MAX, 4), None);
        assert_eq!(round_up_to_multiple(u32::MAX, 1), Some(u32::MAX));
    }

    #[test]
    fn tiny_lead_acid_unit_is_rejected() {
        // 13.2 kWh / 1e-10 kWh is far past u32::MAX units
        let err = BatteryBank::size(&night(6_600.0), BatteryChemistry::LeadAcid, 1e-10)
            .expect_err("unit count cannot fit");
        assert_eq!(err.field(), "battery.unit_kwh");
    }

    #[test]
    fn tiny_lithium_unit_is_rejected() {
        // 8.25 kWh / 1e-9 kWh = 8.25e9 units
        let err = BatteryBank::size(&night(6_600.0), BatteryChemistry::Lithium48V, 1e-9)
            .expect_err("unit count cannot fit");
        assert_eq!(err.field(), "battery.unit_kwh");
    }

    #[test]
    fn lead_acid_count_at_u32_limit_is_rejected() {
        // 2 kWh / 0.5 = 4 kWh; 4 / unit lands on u32::MAX, past the last whole string
        let unit_kwh = 4.0 / f64::from(u32::MAX);
        let result = BatteryBank::size(&night(2_000.0), BatteryChemistry::LeadAcid, unit_kwh);
        assert!(result.is_err(), "{result:?}");
    }
}
