use std::fmt;

use serde::Serialize;

use super::battery::BatteryBank;
use super::load::LoadSpec;
use super::types::BatteryChemistry;

/// Which lower bound decided the inverter rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingBasis {
    /// Continuous load times the safety factor.
    Load,
    /// Power needed to charge the installed bank at its C-rate.
    BatteryChargeRate,
}

/// Inverter rating chosen as the larger of the load and charge-rate bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterSizing {
    /// Load-based bound (kVA).
    pub kva_load: f64,
    /// Charge-rate-based bound (kVA).
    pub kva_charge: f64,
    /// `max(kva_load, kva_charge)` (kVA).
    pub kva: f64,
    /// `kva` rounded up to the next 0.1 kVA step.
    pub kva_display: f64,
    pub basis: SizingBasis,
    pub sizing_reason: String,
}

impl InverterSizing {
    pub fn size(load: &LoadSpec, bank: &BatteryBank, safety_factor: f64) -> Self {
        let kva_load = load.load_watts * safety_factor / 1000.0;
        let kva_charge = bank.bank_kwh * bank.c_rate;

        // Ties go to the load bound.
        let (kva, basis) = if kva_charge > kva_load {
            (kva_charge, SizingBasis::BatteryChargeRate)
        } else {
            (kva_load, SizingBasis::Load)
        };

        Self {
            kva_load,
            kva_charge,
            kva,
            kva_display: round_up_tenth(kva),
            basis,
            sizing_reason: reason(basis, bank.chemistry, bank.c_rate),
        }
    }
}

/// Next standard size in 0.1 kVA steps.
pub fn round_up_tenth(kva: f64) -> f64 {
    (kva * 10.0).ceil() / 10.0
}

fn reason(basis: SizingBasis, chemistry: BatteryChemistry, c_rate: f64) -> String {
    match basis {
        SizingBasis::Load => "sized from total operating load".to_string(),
        SizingBasis::BatteryChargeRate => {
            let kind = match chemistry {
                BatteryChemistry::LeadAcid => "flooded/gel bank",
                BatteryChemistry::Lithium48V => "lithium bank",
            };
            format!("enlarged to match battery capacity ({kind}, {c_rate}C charging)")
        }
    }
}

impl fmt::Display for SizingBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::BatteryChargeRate => write!(f, "battery charge rate"),
        }
    }
}
