use std::fmt;

use serde::Serialize;

use super::error::SizingError;
use super::load::EnergyProfile;
use super::types::{PanelSpec, SizingConstants, ceil_count};

/// Standard test irradiance (W/m²) used to rate module efficiency.
const STC_IRRADIANCE_W_PER_M2: f64 = 1000.0;

/// Advisory quality band for a module's conversion efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyBand {
    /// Above 21 %.
    Excellent,
    /// Above 19 %.
    VeryGood,
    /// Above 15 %.
    Average,
    Low,
}

impl EfficiencyBand {
    pub fn classify(efficiency_pct: f64) -> Self {
        if efficiency_pct > 21.0 {
            Self::Excellent
        } else if efficiency_pct > 19.0 {
            Self::VeryGood
        } else if efficiency_pct > 15.0 {
            Self::Average
        } else {
            Self::Low
        }
    }

    /// Cell technology typically found in this band.
    pub fn technology_hint(self) -> &'static str {
        match self {
            Self::Excellent => "Monocrystalline PERC/N-Type",
            Self::VeryGood => "Monocrystalline",
            Self::Average => "Polycrystalline",
            Self::Low => "possibly older technology",
        }
    }
}

impl fmt::Display for EfficiencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::VeryGood => write!(f, "very good"),
            Self::Average => write!(f, "average"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Module efficiency at standard test conditions. Not used in sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelEfficiency {
    pub efficiency_pct: f64,
    pub band: EfficiencyBand,
}

impl PanelEfficiency {
    pub fn of(panel: &PanelSpec) -> Self {
        let efficiency_pct = panel.rated_watts / (panel.area_m2() * STC_IRRADIANCE_W_PER_M2) * 100.0;
        Self {
            efficiency_pct,
            band: EfficiencyBand::classify(efficiency_pct),
        }
    }
}

/// Solar array sized to replace the daily energy within the peak sun hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelArray {
    /// Array rating needed after system losses (W).
    pub required_array_watts: f64,
    pub panel_count: u32,
    /// Area of one module (m²).
    pub panel_area_m2: f64,
    pub total_area_m2: f64,
    pub total_capacity_watts: f64,
    pub efficiency_pct: f64,
}

impl PanelArray {
    /// Smallest whole number of modules covering the required array rating.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] on `panel.rated_watts` when the
    /// module is so small that the count does not fit in a `u32`.
    pub fn size(
        energy: &EnergyProfile,
        panel: &PanelSpec,
        constants: &SizingConstants,
    ) -> Result<Self, SizingError> {
        let required_pv_energy_wh = energy.daily_energy_wh / constants.system_efficiency();
        let required_array_watts = required_pv_energy_wh / constants.peak_sun_hours;
        let panel_count = ceil_count(
            required_array_watts / panel.rated_watts,
            "panel.rated_watts",
        )?;
        let panel_area_m2 = panel.area_m2();

        Ok(Self {
            required_array_watts,
            panel_count,
            panel_area_m2,
            total_area_m2: f64::from(panel_count) * panel_area_m2,
            total_capacity_watts: f64::from(panel_count) * panel.rated_watts,
            efficiency_pct: PanelEfficiency::of(panel).efficiency_pct,
        })
    }
}
