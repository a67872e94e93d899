use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::fields::ReportField;
use crate::errors::{EngineError, EngineResult};

pub type Quantities = BTreeMap<String, f64>;

static REPORT_PARSER: Lazy<Result<ReportParser, regex::Error>> = Lazy::new(ReportParser::new);

/// Values extracted from a combustion-analysis report, in the report's units.
///
/// Either every field is present or the report was rejected, so the
/// accessors never fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    pub specific_impulse_vac: f64, // s
    pub specific_impulse_opt: f64, // s
    pub thrust_coefficient_vac: f64,
    pub chamber_thrust_vac: f64, // kN
    pub chamber_thrust_opt: f64, // kN
    pub oxidizer_flow_rate: f64, // kg/s
    pub fuel_flow_rate: f64,     // kg/s
    pub chamber_diameter: f64,   // mm
    pub throat_diameter: f64,    // mm
    pub exit_diameter: f64,      // mm
    pub chamber_length: f64,     // mm
    pub nozzle_length: f64,      // mm
}

impl ReportFields {
    /// Builds the record from a field map, failing on the first absent field.
    pub fn from_values(values: &BTreeMap<ReportField, f64>) -> EngineResult<Self> {
        let take = |field: ReportField| {
            values
                .get(&field)
                .copied()
                .ok_or(EngineError::MissingField {
                    field: field.name(),
                })
        };

        Ok(ReportFields {
            specific_impulse_vac: take(ReportField::SpecificImpulseVac)?,
            specific_impulse_opt: take(ReportField::SpecificImpulseOpt)?,
            thrust_coefficient_vac: take(ReportField::ThrustCoefficientVac)?,
            chamber_thrust_vac: take(ReportField::ChamberThrustVac)?,
            chamber_thrust_opt: take(ReportField::ChamberThrustOpt)?,
            oxidizer_flow_rate: take(ReportField::OxidizerFlowRate)?,
            fuel_flow_rate: take(ReportField::FuelFlowRate)?,
            chamber_diameter: take(ReportField::ChamberDiameter)?,
            throat_diameter: take(ReportField::ThroatDiameter)?,
            exit_diameter: take(ReportField::ExitDiameter)?,
            chamber_length: take(ReportField::ChamberLength)?,
            nozzle_length: take(ReportField::NozzleLength)?,
        })
    }

    pub fn get(&self, field: ReportField) -> f64 {
        match field {
            ReportField::SpecificImpulseVac => self.specific_impulse_vac,
            ReportField::SpecificImpulseOpt => self.specific_impulse_opt,
            ReportField::ThrustCoefficientVac => self.thrust_coefficient_vac,
            ReportField::ChamberThrustVac => self.chamber_thrust_vac,
            ReportField::ChamberThrustOpt => self.chamber_thrust_opt,
            ReportField::OxidizerFlowRate => self.oxidizer_flow_rate,
            ReportField::FuelFlowRate => self.fuel_flow_rate,
            ReportField::ChamberDiameter => self.chamber_diameter,
            ReportField::ThroatDiameter => self.throat_diameter,
            ReportField::ExitDiameter => self.exit_diameter,
            ReportField::ChamberLength => self.chamber_length,
            ReportField::NozzleLength => self.nozzle_length,
        }
    }

    /// Reference side of a comparison, keyed by field name.
    pub fn to_quantities(&self) -> Quantities {
        ReportField::ALL
            .iter()
            .map(|field| (field.name().to_string(), self.get(*field)))
            .collect()
    }
}

/// Per-field outcome of a validate-only pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportValidation {
    pub entries: Vec<(ReportField, Option<f64>)>,
}

impl ReportValidation {
    pub fn is_present(&self, field: ReportField) -> bool {
        self.value(field).is_some()
    }

    pub fn value(&self, field: ReportField) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .and_then(|(_, value)| *value)
    }

    pub fn missing(&self) -> Vec<ReportField> {
        self.entries
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|(_, value)| value.is_some())
    }

    /// Field name to presence flag.
    pub fn presence(&self) -> BTreeMap<&'static str, bool> {
        self.entries
            .iter()
            .map(|(field, value)| (field.name(), value.is_some()))
            .collect()
    }
}

/// Label-anchored extractor: one compiled pattern per report field.
#[derive(Debug, Clone)]
pub struct ReportParser {
    patterns: Vec<(ReportField, Regex)>,
}

impl ReportParser {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_fields(&ReportField::ALL)
    }

    pub fn with_fields(fields: &[ReportField]) -> Result<Self, regex::Error> {
        let patterns = fields
            .iter()
            .map(|field| Regex::new(&field.pattern()).map(|regex| (*field, regex)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReportParser { patterns })
    }

    pub fn fields(&self) -> impl Iterator<Item = ReportField> + '_ {
        self.patterns.iter().map(|(field, _)| *field)
    }

    /// First match of the field's pattern, if its numeric token parses.
    pub fn extract(&self, text: &str, field: ReportField) -> Option<f64> {
        let (_, regex) = self.patterns.iter().find(|(f, _)| *f == field)?;
        Self::capture(regex, text)
    }

    fn capture(regex: &Regex, text: &str) -> Option<f64> {
        regex
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|token| token.as_str().parse::<f64>().ok())
    }

    /// Extracts every field; any absent field rejects the whole report.
    pub fn parse(&self, text: &str) -> EngineResult<ReportFields> {
        let mut values = BTreeMap::new();
        for (field, regex) in &self.patterns {
            let value = Self::capture(regex, text).ok_or(EngineError::MissingField {
                field: field.name(),
            })?;
            values.insert(*field, value);
        }

        ReportFields::from_values(&values)
    }

    /// Reports presence of every field without failing.
    pub fn validate(&self, text: &str) -> ReportValidation {
        ReportValidation {
            entries: self
                .patterns
                .iter()
                .map(|(field, regex)| (*field, Self::capture(regex, text)))
                .collect(),
        }
    }
}

fn shared_parser() -> EngineResult<&'static ReportParser> {
    REPORT_PARSER
        .as_ref()
        .map_err(|e| EngineError::Pattern(e.to_string()))
}

pub fn parse_report(text: &str) -> EngineResult<ReportFields> {
    shared_parser()?.parse(text)
}

pub fn validate_report(text: &str) -> EngineResult<ReportValidation> {
    Ok(shared_parser()?.validate(text))
}
