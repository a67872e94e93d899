use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::engine_system::results::EngineResults;
use crate::errors::{EngineError, EngineResult};
use crate::report_system::parser::{Quantities, ReportFields};
use crate::utils::formatting::{format_quantity, markdown_table};

/// Relative difference of a comparison row, undefined for a zero reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Percentage {
    Value(f64),
    Undefined,
}

impl Percentage {
    pub fn value(&self) -> Option<f64> {
        match self {
            Percentage::Value(value) => Some(*value),
            Percentage::Undefined => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Value(value) => write!(f, "{:.2} %", value),
            Percentage::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub reference: f64,
    pub computed: f64,
    pub difference: f64,
    pub percentage: Percentage,
}

impl ComparisonRow {
    pub fn new(key: impl Into<String>, reference: f64, computed: f64) -> Self {
        let difference = computed - reference;
        let percentage = if reference == 0.0 {
            Percentage::Undefined
        } else {
            Percentage::Value(difference / reference * 100.0)
        };

        ComparisonRow {
            key: key.into(),
            reference,
            computed,
            difference,
            percentage,
        }
    }
}

/// Compares two quantity maps key by key over the union of their keys.
///
/// A key present on only one side yields a `MissingKey` entry in its place
/// instead of aborting the whole comparison.
pub fn compare(reference: &Quantities, computed: &Quantities) -> Vec<EngineResult<ComparisonRow>> {
    let keys: BTreeSet<&String> = reference.keys().chain(computed.keys()).collect();

    keys.into_iter()
        .map(|key| match (reference.get(key), computed.get(key)) {
            (Some(reference), Some(computed)) => Ok(ComparisonRow::new(key.as_str(), *reference, *computed)),
            _ => Err(EngineError::MissingKey(key.clone())),
        })
        .collect()
}

/// Report values against the computed results, in the report's units.
pub fn compare_report(report: &ReportFields, results: &EngineResults) -> Vec<EngineResult<ComparisonRow>> {
    compare(&report.to_quantities(), &results.report_quantities())
}

/// Markdown table of the comparison; skipped keys are listed as such.
pub fn render_table(rows: &[EngineResult<ComparisonRow>]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| match row {
            Ok(row) => vec![
                row.key.clone(),
                format_quantity(row.reference),
                format_quantity(row.computed),
                format_quantity(row.difference),
                row.percentage.to_string(),
            ],
            Err(EngineError::MissingKey(key)) => vec![
                key.clone(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "skipped".to_string(),
            ],
            Err(error) => vec![
                error.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        })
        .collect();

    markdown_table(
        &["Quantity", "Reference", "Computed", "Difference", "Difference %"],
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quantities(entries: &[(&str, f64)]) -> Quantities {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_row_differences() {
        let row = ComparisonRow::new("throat_diameter", 30.88, 31.82);

        assert_relative_eq!(row.difference, 0.94, epsilon = 1e-9);
        assert_relative_eq!(
            row.percentage.value().unwrap(),
            0.94 / 30.88 * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_reference_is_undefined() {
        let rows = compare(&quantities(&[("thrust", 0.0)]), &quantities(&[("thrust", 12.0)]));

        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.percentage, Percentage::Undefined);
        assert_eq!(row.difference, 12.0);
        assert_eq!(row.percentage.to_string(), "undefined");
    }

    #[test]
    fn test_missing_key_is_a_skipped_row() {
        let reference = quantities(&[("a", 1.0), ("b", 2.0)]);
        let computed = quantities(&[("b", 2.5), ("c", 3.0)]);

        let rows = compare(&reference, &computed);

        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[0], Err(EngineError::MissingKey(key)) if key == "a"));
        assert_eq!(rows[1].as_ref().unwrap().key, "b");
        assert!(matches!(&rows[2], Err(EngineError::MissingKey(key)) if key == "c"));
    }

    #[test]
    fn test_identical_maps_have_zero_differences() {
        let values = quantities(&[("isp", 300.0), ("cf", 1.6)]);

        for row in compare(&values, &values) {
            let row = row.unwrap();
            assert_eq!(row.difference, 0.0);
            assert_eq!(row.percentage, Percentage::Value(0.0));
        }
    }

    #[test]
    fn test_render_table_marks_skipped_rows() {
        let rows = compare(
            &quantities(&[("nozzle_length", 112.35), ("throat_diameter", 30.88)]),
            &quantities(&[("throat_diameter", 31.0)]),
        );
        let table = render_table(&rows);

        assert!(table.starts_with("| Quantity | Reference | Computed | Difference | Difference % |"));
        assert!(table.contains("| nozzle_length | - | - | - | skipped |"));
        assert!(table.contains("| throat_diameter |"));
    }
}
