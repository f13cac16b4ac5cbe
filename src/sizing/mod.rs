//! Off-grid system sizing: load, storage, inverter, and array.

/// Battery bank sizing.
pub mod battery;
pub mod calculator;
pub mod error;
/// Inverter rating from load and charge-rate bounds.
pub mod inverter;
pub mod load;
/// Panel efficiency and array sizing.
pub mod panel;
pub mod types;

pub use calculator::{SizingResult, compute};
pub use error::SizingError;
pub use types::{
    BatteryChemistry, EnergyModel, PanelSpec, PhaseCount, SizingConstants, SizingInputs,
};
