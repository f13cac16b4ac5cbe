//! API response types.

use serde::Serialize;

use crate::report::{ReportRow, table_rows};
use crate::sizing::SizingResult;

/// Successful sizing: the full structured result plus the rendered table.
#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub result: SizingResult,
    pub table: Vec<ReportRow>,
    /// Daily energy demand (kWh).
    pub daily_energy_kwh: f64,
    /// Rated battery capacity the load needs (kWh).
    pub required_battery_kwh: f64,
}

impl From<SizingResult> for SizeResponse {
    fn from(result: SizingResult) -> Self {
        Self {
            table: table_rows(&result),
            daily_energy_kwh: result.energy.daily_energy_kwh(),
            required_battery_kwh: result.battery.required_kwh(),
            result,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Offending field path, when the error concerns one input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::{SizingConstants, SizingInputs, compute};

    #[test]
    fn response_carries_summary_values() {
        let result = compute(&SizingInputs::default(), &SizingConstants::default())
            .expect("defaults should compute");
        let resp = SizeResponse::from(result);
        assert_eq!(resp.table.len(), 6);
        assert!((resp.daily_energy_kwh - 13.2).abs() < 1e-9);
        assert!((resp.required_battery_kwh - 13.2).abs() < 1e-9);
    }
}
