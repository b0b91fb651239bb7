use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::result::{CalculationResult, SELF_DISCHARGE_ID},
    quantity::{charge::MilliampHours, time::Hours},
};

/// Entries drawing at least this share of the daily total are highlighted.
const DOMINANT_SHARE: f64 = 0.5;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_summary_table(result: &CalculationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Average current",
        "Per day",
        "Runtime",
        "Weeks",
        "Months",
        "Years",
    ]);
    table.add_row(vec![
        Cell::new(result.average_current).set_alignment(CellAlignment::Right),
        Cell::new(result.total_mah_per_day).set_alignment(CellAlignment::Right),
        Cell::new(result.runtime.days).set_alignment(CellAlignment::Right).fg(Color::Green),
        Cell::new(format!("{:.1}", result.runtime.weeks)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.1}", result.runtime.months)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", result.runtime.years)).set_alignment(CellAlignment::Right),
    ]);
    table
}

#[must_use]
pub fn build_breakdown_table(result: &CalculationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Phase", "Per day", "Share", "Events/day", "Active/day"]);
    for phase_result in &result.phase_results {
        let share = if result.total_mah_per_day > MilliampHours::ZERO {
            phase_result.mah_per_day / result.total_mah_per_day
        } else {
            0.0
        };
        let name = Cell::new(&phase_result.phase_name);
        let events = if phase_result.events_per_day > 0.0 {
            Cell::new(format!("{:.1}", phase_result.events_per_day))
        } else {
            Cell::new("N/A").add_attribute(Attribute::Dim)
        };
        table.add_row(vec![
            if phase_result.phase_id == SELF_DISCHARGE_ID {
                name.add_attribute(Attribute::Italic)
            } else {
                name
            },
            Cell::new(phase_result.mah_per_day).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", share * 100.0))
                .set_alignment(CellAlignment::Right)
                .fg(if share >= DOMINANT_SHARE { Color::Red } else { Color::Reset }),
            events.set_alignment(CellAlignment::Right),
            Cell::new(Hours::from(phase_result.active_time_per_day))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
