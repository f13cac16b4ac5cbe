//! Human-readable result table and summary.

use std::fmt;

use serde::Serialize;

use crate::sizing::{BatteryChemistry, SizingResult};

/// One labeled line of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub item: String,
    pub value: String,
    pub notes: String,
}

impl ReportRow {
    fn new(item: impl Into<String>, value: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            value: value.into(),
            notes: notes.into(),
        }
    }
}

/// Builds the Item / Value / Notes table for a sizing result.
pub fn table_rows(r: &SizingResult) -> Vec<ReportRow> {
    let bank = &r.battery;
    let (battery_item, battery_value, battery_notes, voltage_desc) = match bank.chemistry {
        BatteryChemistry::Lithium48V => (
            format!("Lithium units ({}kWh/48V)", bank.unit_kwh),
            format!("{} units", bank.unit_count),
            format!("{} units connected in parallel", bank.unit_count),
            "48 Volt (integrated)",
        ),
        BatteryChemistry::LeadAcid => (
            format!("Batteries ({}kWh/12V)", bank.unit_kwh),
            format!("{} batteries", bank.unit_count),
            format!(
                "{} strings in parallel, {} batteries in series per string",
                bank.parallel_strings, bank.series_per_string
            ),
            "48 Volt (4x12V series)",
        ),
    };
    let voltage_notes = match bank.chemistry {
        BatteryChemistry::Lithium48V => "each unit is a complete 48 V bank".to_string(),
        BatteryChemistry::LeadAcid => {
            format!("{} batteries in series per string", bank.series_per_string)
        }
    };

    vec![
        ReportRow::new(
            "Inverter size (kVA)",
            format!("{} kVA", r.inverter.kva_display),
            format!(
                "choose the next standard size up ({})",
                r.inverter.sizing_reason
            ),
        ),
        ReportRow::new(battery_item, battery_value, battery_notes),
        ReportRow::new(
            format!("Solar panels ({}W)", r.inputs.panel.rated_watts),
            format!("{} panels", r.panels.panel_count),
            format!("total array capacity: {} Watt", r.panels.total_capacity_watts),
        ),
        ReportRow::new(
            "Array area (m²)",
            format!("{:.2} m²", r.panels.total_area_m2),
            format!("single panel area: {:.2} m²", r.panels.panel_area_m2),
        ),
        ReportRow::new("Battery system voltage", voltage_desc, voltage_notes),
        ReportRow::new(
            "Total load (Watt)",
            format!("{} Watt", r.load.load_watts),
            format!("at {} Volt, {}", r.load.voltage_nominal, r.inputs.phases),
        ),
    ]
}

/// Renders the table, the efficiency check, and the summary lines.
pub struct Report<'a>(pub &'a SizingResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let rows = table_rows(r);
        let item_w = rows.iter().map(|row| row.item.chars().count()).max().unwrap_or(0);
        let value_w = rows.iter().map(|row| row.value.chars().count()).max().unwrap_or(0);

        writeln!(f, "--- Sizing Report ---")?;
        for row in &rows {
            writeln!(
                f,
                "{:<item_w$}  {:<value_w$}  {}",
                row.item, row.value, row.notes
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Panel efficiency:      {:.2}% ({}, {})",
            r.panel_efficiency.efficiency_pct,
            r.panel_efficiency.band,
            r.panel_efficiency.band.technology_hint()
        )?;
        writeln!(
            f,
            "Daily energy:          {:.2} kWh",
            r.energy.daily_energy_kwh()
        )?;
        write!(
            f,
            "Required battery:      {:.2} kWh",
            r.battery.required_kwh()
        )
    }
}
