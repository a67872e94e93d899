use super::fields::ReportField;
use super::parser::ReportFields;

/// Renders report fields in the label layout the parser expects.
///
/// Values are written with `f64`'s shortest round-trip representation so
/// parsing the output recovers them exactly.
pub fn format_report(fields: &ReportFields) -> String {
    ReportField::ALL
        .iter()
        .map(|field| format_line(*field, fields.get(*field)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_line(field: ReportField, value: f64) -> String {
    format!("{:>24}  {}  {}", field.label(), value, field.unit_token())
}
