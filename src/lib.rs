//! Off-grid and hybrid solar system sizing calculator.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
pub mod logging;
/// Result table rendering.
pub mod report;
/// Load, battery, inverter, and panel sizing.
pub mod sizing;
