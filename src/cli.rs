//! Command-line arguments and their mapping onto a [`SizingConfig`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigError, SizingConfig};
use crate::sizing::{BatteryChemistry, PhaseCount};

/// Sizes inverter, battery bank, and panel array for an off-grid solar system.
///
/// The base configuration comes from `--config`, else `--preset`, else the
/// `lead_acid_home` defaults. Individual flags then override single fields.
#[derive(Debug, Parser)]
#[command(name = "solar-sizer", version)]
pub struct Cli {
    /// Load configuration from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (lead_acid_home, lithium_home, three_phase_workshop)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Load current per phase (A)
    #[arg(long, value_name = "A")]
    pub amperes: Option<f64>,

    /// Number of phases (1 or 3)
    #[arg(long, value_parser = parse_phases)]
    pub phases: Option<PhaseCount>,

    /// Daytime operating hours
    #[arg(long, value_name = "H", conflicts_with = "hours")]
    pub day_hours: Option<f64>,

    /// Night-time operating hours
    #[arg(long, value_name = "H", conflicts_with = "hours")]
    pub night_hours: Option<f64>,

    /// Total operating hours, all battery-backed
    #[arg(long, value_name = "H")]
    pub hours: Option<f64>,

    /// Battery technology
    #[arg(long, value_enum)]
    pub battery: Option<ChemistryArg>,

    /// Capacity of one battery unit (kWh)
    #[arg(long, value_name = "KWH")]
    pub battery_kwh: Option<f64>,

    /// Panel rated power (W)
    #[arg(long, value_name = "W")]
    pub panel_watts: Option<f64>,

    /// Panel length (m)
    #[arg(long, value_name = "M")]
    pub panel_length: Option<f64>,

    /// Panel width (m)
    #[arg(long, value_name = "M")]
    pub panel_width: Option<f64>,

    /// Peak sun hours per day
    #[arg(long, value_name = "H")]
    pub peak_sun_hours: Option<f64>,

    /// Overall system efficiency (%)
    #[arg(long, value_name = "PCT")]
    pub efficiency_pct: Option<f64>,

    /// Inverter safety factor applied to the load
    #[arg(long, value_name = "X")]
    pub safety_factor: Option<f64>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write the result table to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Start the REST API server instead of printing a report
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Battery technology as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChemistryArg {
    LeadAcid,
    Lithium,
}

impl From<ChemistryArg> for BatteryChemistry {
    fn from(arg: ChemistryArg) -> Self {
        match arg {
            ChemistryArg::LeadAcid => Self::LeadAcid,
            ChemistryArg::Lithium => Self::Lithium48V,
        }
    }
}

fn parse_phases(s: &str) -> Result<PhaseCount, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("expected 1 or 3, got \"{s}\""))?;
    PhaseCount::try_from(n)
}

impl Cli {
    /// Resolves the base configuration and applies flag overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the config file cannot be loaded or the
    /// preset is unknown.
    pub fn resolve_config(&self) -> Result<SizingConfig, ConfigError> {
        let mut cfg = if let Some(ref path) = self.config {
            SizingConfig::from_toml_file(path)?
        } else if let Some(ref name) = self.preset {
            SizingConfig::from_preset(name)?
        } else {
            SizingConfig::default()
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut SizingConfig) {
        let load = &mut cfg.load;
        set(&mut load.ampere_per_phase, self.amperes);
        set(&mut load.phases, self.phases);
        if self.day_hours.is_some() || self.night_hours.is_some() {
            load.operating_hours = None;
        }
        if self.day_hours.is_some() {
            load.day_hours = self.day_hours;
        }
        if self.night_hours.is_some() {
            load.night_hours = self.night_hours;
        }
        if self.hours.is_some() {
            load.day_hours = None;
            load.night_hours = None;
            load.operating_hours = self.hours;
        }

        if let Some(chem) = self.battery {
            let chemistry = BatteryChemistry::from(chem);
            if chemistry != cfg.battery.chemistry {
                // a unit size picked for the other chemistry no longer applies
                cfg.battery.unit_kwh = None;
            }
            cfg.battery.chemistry = chemistry;
        }
        if self.battery_kwh.is_some() {
            cfg.battery.unit_kwh = self.battery_kwh;
        }

        set(&mut cfg.panel.rated_watts, self.panel_watts);
        set(&mut cfg.panel.length_m, self.panel_length);
        set(&mut cfg.panel.width_m, self.panel_width);

        let k = &mut cfg.constants;
        set(&mut k.peak_sun_hours, self.peak_sun_hours);
        set(&mut k.system_efficiency_pct, self.efficiency_pct);
        set(&mut k.inverter_safety_factor, self.safety_factor);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::EnergyModel;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("solar-sizer").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_uses_default_config() {
        let cli = parse(&[]).expect("parse should succeed");
        let cfg = cli.resolve_config().expect("default config");
        assert_eq!(cfg, SizingConfig::default());
    }

    #[test]
    fn supports_preset_cli() {
        let cli = parse(&["--preset", "lithium_home"]).expect("parse should succeed");
        assert_eq!(cli.preset.as_deref(), Some("lithium_home"));
        let cfg = cli.resolve_config().expect("preset should load");
        assert_eq!(cfg.battery.chemistry, BatteryChemistry::Lithium48V);
    }

    #[test]
    fn config_and_preset_are_exclusive() {
        assert!(parse(&["--config", "a.toml", "--preset", "lithium_home"]).is_err());
    }

    #[test]
    fn hours_conflicts_with_split() {
        assert!(parse(&["--hours", "10", "--night-hours", "4"]).is_err());
    }

    #[test]
    fn rejects_two_phases() {
        assert!(parse(&["--phases", "2"]).is_err());
    }

    #[test]
    fn overrides_replace_single_fields() {
        let cli = parse(&[
            "--amperes",
            "7.5",
            "--phases",
            "3",
            "--hours",
            "9",
            "--peak-sun-hours",
            "6",
        ])
        .expect("parse should succeed");
        let cfg = cli.resolve_config().expect("config");
        assert_eq!(cfg.load.ampere_per_phase, 7.5);
        assert_eq!(cfg.load.phases, PhaseCount::Three);
        assert_eq!(
            cfg.load.energy_model(),
            Ok(EnergyModel::TotalHours {
                operating_hours: 9.0
            })
        );
        assert_eq!(cfg.constants.peak_sun_hours, 6.0);
        // untouched fields keep their defaults
        assert_eq!(cfg.panel.rated_watts, 550.0);
    }

    #[test]
    fn split_hours_clear_preset_total_hours() {
        let cli = parse(&["--preset", "three_phase_workshop", "--night-hours", "5"])
            .expect("parse should succeed");
        let cfg = cli.resolve_config().expect("config");
        assert!(matches!(
            cfg.load.energy_model(),
            Ok(EnergyModel::DayNight { night_hours, .. }) if night_hours == 5.0
        ));
    }

    #[test]
    fn total_hours_clear_preset_split() {
        let cli = parse(&["--preset", "lithium_home", "--hours", "10"])
            .expect("parse should succeed");
        let cfg = cli.resolve_config().expect("config");
        assert_eq!(cfg.load.day_hours, None);
        assert_eq!(cfg.load.night_hours, None);
        assert_eq!(
            cfg.load.energy_model(),
            Ok(EnergyModel::TotalHours {
                operating_hours: 10.0
            })
        );
    }

    #[test]
    fn switching_chemistry_resets_unit_size() {
        let cli = parse(&["--preset", "lithium_home", "--battery", "lead-acid"])
            .expect("parse should succeed");
        let cfg = cli.resolve_config().expect("config");
        assert_eq!(cfg.battery.chemistry, BatteryChemistry::LeadAcid);
        assert_eq!(cfg.battery.unit_kwh(), 2.4);
    }
}
