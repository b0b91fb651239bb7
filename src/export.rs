//! CSV export of the KPIs and the phase breakdown.

use itertools::Itertools;

use crate::{core::result::CalculationResult, prelude::*, quantity::time::Hours};

pub fn to_csv(result: &CalculationResult) -> Result<String> {
    ensure!(result.is_valid(), "cannot export: there are errors in the calculation");

    let mut rows: Vec<Vec<String>> = vec![
        row(["Metric", "Value", "Unit"]),
        row(["Average Current", &format!("{:.3}", result.average_current.0), "mA"]),
        row([
            "Total Consumption per Day",
            &format!("{:.2}", result.total_mah_per_day.0),
            "mAh/day",
        ]),
        row(["Runtime", &format!("{:.1}", result.runtime.days.0), "days"]),
        row(["Runtime", &format!("{:.1}", result.runtime.weeks), "weeks"]),
        row(["Runtime", &format!("{:.1}", result.runtime.months), "months"]),
        Vec::new(),
        row(["Phase", "mAh/day", "Events/day", "Active Time/day (h)"]),
    ];
    for phase_result in &result.phase_results {
        let events = if phase_result.events_per_day > 0.0 {
            format!("{:.1}", phase_result.events_per_day)
        } else {
            "N/A".to_string()
        };
        let active_time = Hours::from(phase_result.active_time_per_day);
        let active_time =
            if active_time.0 > 0.0 { format!("{:.2}", active_time.0) } else { "Auto".to_string() };
        rows.push(vec![
            phase_result.phase_name.clone(),
            format!("{:.3}", phase_result.mah_per_day.0),
            events,
            active_time,
        ]);
    }

    Ok(rows.iter().map(|row| row.iter().map(|cell| quote(cell)).join(",")).join("\n"))
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.into_iter().map(str::to_string).collect()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{diagnostics::ValidationError, result::CalculationResult},
        profile::Profile,
    };

    #[test]
    fn test_esp32() {
        let csv = to_csv(&Profile::esp32().estimate()).unwrap();
        let lines = csv.lines().collect_vec();
        assert_eq!(
            lines,
            [
                r#""Metric","Value","Unit""#,
                r#""Average Current","0.014","mA""#,
                r#""Total Consumption per Day","0.35","mAh/day""#,
                r#""Runtime","2307.8","days""#,
                r#""Runtime","329.7","weeks""#,
                r#""Runtime","75.8","months""#,
                "",
                r#""Phase","mAh/day","Events/day","Active Time/day (h)""#,
                r#""Active","0.107","24.0","0.00""#,
                r#""DeepSleep","0.240","N/A","24.00""#,
            ]
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(r#"Radio "TX""#), r#""Radio ""TX""""#);
    }

    #[test]
    fn test_refuses_errors() {
        let result = CalculationResult::invalid(vec![ValidationError::Capacity], Vec::new());
        assert!(to_csv(&result).is_err());
    }
}
