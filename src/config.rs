//! TOML-based sizing configuration and preset definitions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::sizing::{
    BatteryChemistry, EnergyModel, PanelSpec, PhaseCount, SizingConstants, SizingError,
    SizingInputs, SizingResult, compute,
};

/// Top-level sizing configuration parsed from TOML (or JSON over the API).
///
/// All sections have defaults matching the `lead_acid_home` preset. Load
/// from TOML with [`SizingConfig::from_toml_file`] or pick a preset with
/// [`SizingConfig::from_preset`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizingConfig {
    /// Electrical load and operating hours.
    #[serde(default)]
    pub load: LoadConfig,
    /// Battery technology and unit size.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Solar module datasheet values.
    #[serde(default)]
    pub panel: PanelSpec,
    /// Design constants.
    #[serde(default)]
    pub constants: SizingConstants,
}

/// Electrical load and operating hours.
///
/// Setting `operating_hours` switches to the total-hours energy model, in
/// which the whole daily load is battery-backed. It cannot be combined with
/// `day_hours` or `night_hours`; an omitted split hour defaults to 6 h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Current drawn on each phase (A).
    pub ampere_per_phase: f64,
    /// `1` or `3`.
    pub phases: PhaseCount,
    /// Daytime operating hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_hours: Option<f64>,
    /// Night-time (battery-backed) operating hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_hours: Option<f64>,
    /// Total operating hours, all battery-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<f64>,
}

/// Hours assumed for an omitted half of the day/night split.
pub const DEFAULT_SPLIT_HOURS: f64 = 6.0;

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            ampere_per_phase: 5.0,
            phases: PhaseCount::Single,
            day_hours: None,
            night_hours: None,
            operating_hours: None,
        }
    }
}

impl LoadConfig {
    /// Energy model selected by the configured hours.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] on `load.operating_hours` when it
    /// is set together with `day_hours` or `night_hours`.
    pub fn energy_model(&self) -> Result<EnergyModel, SizingError> {
        match (self.operating_hours, self.day_hours, self.night_hours) {
            (Some(operating_hours), None, None) => Ok(EnergyModel::TotalHours { operating_hours }),
            (Some(_), _, _) => Err(SizingError::invalid(
                "load.operating_hours",
                "cannot be combined with load.day_hours or load.night_hours",
            )),
            (None, day, night) => Ok(EnergyModel::DayNight {
                day_hours: day.unwrap_or(DEFAULT_SPLIT_HOURS),
                night_hours: night.unwrap_or(DEFAULT_SPLIT_HOURS),
            }),
        }
    }
}

/// Battery technology and unit size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// `"lead_acid"` or `"lithium_48v"`.
    pub chemistry: BatteryChemistry,
    /// Capacity of one unit (kWh). Defaults per chemistry when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_kwh: Option<f64>,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            chemistry: BatteryChemistry::LeadAcid,
            unit_kwh: None,
        }
    }
}

impl BatteryConfig {
    /// Configured unit capacity, or the chemistry's typical unit.
    pub fn unit_kwh(&self) -> f64 {
        self.unit_kwh
            .unwrap_or_else(|| self.chemistry.default_unit_kwh())
    }
}

/// Failure to obtain a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: cannot read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config error: json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: preset: unknown preset \"{name}\", available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("config error: {0}")]
    Invalid(#[from] SizingError),
}

impl SizingConfig {
    /// Single-phase household on 12 V lead-acid blocks (the default).
    pub fn lead_acid_home() -> Self {
        Self {
            load: LoadConfig {
                day_hours: Some(DEFAULT_SPLIT_HOURS),
                night_hours: Some(DEFAULT_SPLIT_HOURS),
                ..LoadConfig::default()
            },
            ..Self::default()
        }
    }

    /// Household with a longer evening load on integrated 48 V lithium.
    pub fn lithium_home() -> Self {
        Self {
            load: LoadConfig {
                ampere_per_phase: 8.0,
                day_hours: Some(4.0),
                night_hours: Some(8.0),
                ..LoadConfig::default()
            },
            battery: BatteryConfig {
                chemistry: BatteryChemistry::Lithium48V,
                unit_kwh: Some(5.0),
            },
            ..Self::default()
        }
    }

    /// Three-phase workshop running entirely from storage.
    pub fn three_phase_workshop() -> Self {
        Self {
            load: LoadConfig {
                ampere_per_phase: 10.0,
                phases: PhaseCount::Three,
                operating_hours: Some(10.0),
                ..LoadConfig::default()
            },
            battery: BatteryConfig {
                chemistry: BatteryChemistry::Lithium48V,
                unit_kwh: Some(10.0),
            },
            panel: PanelSpec {
                rated_watts: 600.0,
                length_m: 2.38,
                width_m: 1.13,
            },
            constants: SizingConstants {
                peak_sun_hours: 5.5,
                ..SizingConstants::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["lead_acid_home", "lithium_home", "three_phase_workshop"];

    /// Loads a configuration from a named preset.
    ///
    /// # Arguments
    ///
    /// * `name` - One of [`Self::PRESETS`]
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] if the name is not in [`Self::PRESETS`].
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "lead_acid_home" => Ok(Self::lead_acid_home()),
            "lithium_home" => Ok(Self::lithium_home()),
            "three_phase_workshop" => Ok(Self::three_phase_workshop()),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
                available: Self::PRESETS.join(", "),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, the TOML is
    /// invalid, or the hours select two energy models at once.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, contains unknown
    /// fields, or sets `operating_hours` alongside the day/night split.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.load.energy_model()?;
        Ok(cfg)
    }

    /// Overlays a partial JSON configuration on this one.
    ///
    /// Fields present in `patch` replace the ones here. Setting either split
    /// hour drops an inherited `operating_hours` (and the reverse), and
    /// choosing a chemistry drops an inherited unit size unless `patch` names
    /// one, matching the command-line overrides.
    ///
    /// # Arguments
    ///
    /// * `patch` - JSON object shaped like a (partial) `SizingConfig`
    ///
    /// # Returns
    ///
    /// The merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the merged document is not a valid
    /// configuration and [`ConfigError::Invalid`] if its hours conflict.
    pub fn overlay_json(&self, patch: Value) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self)?;

        if let Some(load) = patch.get("load") {
            if load.get("day_hours").is_some() || load.get("night_hours").is_some() {
                remove_key(&mut base, "load", "operating_hours");
            }
            if load.get("operating_hours").is_some() {
                remove_key(&mut base, "load", "day_hours");
                remove_key(&mut base, "load", "night_hours");
            }
        }
        if patch
            .get("battery")
            .is_some_and(|battery| battery.get("chemistry").is_some())
        {
            remove_key(&mut base, "battery", "unit_kwh");
        }

        merge_json(&mut base, patch);
        let cfg: Self = serde_json::from_value(base)?;
        cfg.load.energy_model()?;
        Ok(cfg)
    }

    /// Renders the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Calculator inputs described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] if the hours select two energy
    /// models at once.
    pub fn inputs(&self) -> Result<SizingInputs, SizingError> {
        Ok(SizingInputs {
            ampere_per_phase: self.load.ampere_per_phase,
            energy_model: self.load.energy_model()?,
            phases: self.load.phases,
            chemistry: self.battery.chemistry,
            battery_unit_kwh: self.battery.unit_kwh(),
            panel: self.panel,
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration can be computed.
    pub fn validate(&self) -> Vec<SizingError> {
        match self.inputs() {
            Ok(inputs) => inputs.validate(&self.constants),
            Err(e) => vec![e],
        }
    }

    /// Runs the calculator on this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for conflicting hours or the first
    /// out-of-range field.
    pub fn compute(&self) -> Result<SizingResult, ConfigError> {
        Ok(compute(&self.inputs()?, &self.constants)?)
    }
}

fn remove_key(root: &mut Value, section: &str, key: &str) {
    if let Some(fields) = root.get_mut(section).and_then(Value::as_object_mut) {
        fields.remove(key);
    }
}

/// Recursively replaces `base` values with those in `patch`; objects merge key by key.
fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}
