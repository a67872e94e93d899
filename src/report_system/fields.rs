use serde::{Deserialize, Serialize};

/// Numeric token accepted by every field pattern: digits with an optional
/// decimal point, no sign or exponent.
const NUMBER: &str = r"(\d+\.?\d*)";

/// One physical quantity extracted from a combustion-analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    SpecificImpulseVac,
    SpecificImpulseOpt,
    ThrustCoefficientVac,
    ChamberThrustVac,
    ChamberThrustOpt,
    OxidizerFlowRate,
    FuelFlowRate,
    ChamberDiameter,
    ThroatDiameter,
    ExitDiameter,
    ChamberLength,
    NozzleLength,
}

impl ReportField {
    pub const ALL: [ReportField; 12] = [
        ReportField::SpecificImpulseVac,
        ReportField::SpecificImpulseOpt,
        ReportField::ThrustCoefficientVac,
        ReportField::ChamberThrustVac,
        ReportField::ChamberThrustOpt,
        ReportField::OxidizerFlowRate,
        ReportField::FuelFlowRate,
        ReportField::ChamberDiameter,
        ReportField::ThroatDiameter,
        ReportField::ExitDiameter,
        ReportField::ChamberLength,
        ReportField::NozzleLength,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportField::SpecificImpulseVac => "specific_impulse_vac",
            ReportField::SpecificImpulseOpt => "specific_impulse_opt",
            ReportField::ThrustCoefficientVac => "thrust_coefficient_vac",
            ReportField::ChamberThrustVac => "chamber_thrust_vac",
            ReportField::ChamberThrustOpt => "chamber_thrust_opt",
            ReportField::OxidizerFlowRate => "oxidizer_flow_rate",
            ReportField::FuelFlowRate => "fuel_flow_rate",
            ReportField::ChamberDiameter => "chamber_diameter",
            ReportField::ThroatDiameter => "throat_diameter",
            ReportField::ExitDiameter => "exit_diameter",
            ReportField::ChamberLength => "chamber_length",
            ReportField::NozzleLength => "nozzle_length",
        }
    }

    pub fn from_name(name: &str) -> Option<ReportField> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    /// Label text as it appears in the report, up to the numeric token.
    pub fn label(&self) -> &'static str {
        match self {
            ReportField::SpecificImpulseVac => "Specific impulse (vac):",
            ReportField::SpecificImpulseOpt => "Specific impulse (opt):",
            ReportField::ThrustCoefficientVac => "Thrust coefficient:",
            ReportField::ChamberThrustVac => "Chamber thrust (vac):",
            ReportField::ChamberThrustOpt => "Chamber thrust (opt):",
            ReportField::OxidizerFlowRate => "Oxidizer mass flow rate:",
            ReportField::FuelFlowRate => "Fuel mass flow rate:",
            ReportField::ChamberDiameter => "Dc =",
            ReportField::ThroatDiameter => "Dt =",
            ReportField::ExitDiameter => "De =",
            ReportField::ChamberLength => "Lc =",
            ReportField::NozzleLength => "Le =",
        }
    }

    /// Token that must follow the number. Units are those of the report,
    /// the thrust coefficient carries its `(vac)` qualifier instead.
    pub fn unit_token(&self) -> &'static str {
        match self {
            ReportField::SpecificImpulseVac | ReportField::SpecificImpulseOpt => "s",
            ReportField::ThrustCoefficientVac => "(vac)",
            ReportField::ChamberThrustVac | ReportField::ChamberThrustOpt => "kN",
            ReportField::OxidizerFlowRate | ReportField::FuelFlowRate => "kg/s",
            ReportField::ChamberDiameter
            | ReportField::ThroatDiameter
            | ReportField::ExitDiameter
            | ReportField::ChamberLength
            | ReportField::NozzleLength => "mm",
        }
    }

    /// Physical unit of the extracted value, empty for dimensionless fields.
    pub fn unit(&self) -> &'static str {
        match self {
            ReportField::ThrustCoefficientVac => "",
            _ => self.unit_token(),
        }
    }

    /// Regular expression anchored to the label, capturing the numeric token.
    pub fn pattern(&self) -> String {
        let label = regex::escape(self.label());
        // Short geometry labels must not match inside longer words.
        let prefix = match self {
            ReportField::ChamberDiameter
            | ReportField::ThroatDiameter
            | ReportField::ExitDiameter
            | ReportField::ChamberLength
            | ReportField::NozzleLength => r"\b",
            _ => "",
        };
        let label = label.replace(' ', r"\s*");
        let unit = regex::escape(self.unit_token());
        let unit_end = if unit.ends_with(')') { "" } else { r"(?:\s|$)" };

        format!(r"{prefix}{label}\s*{NUMBER}\s+{unit}{unit_end}")
    }
}

impl std::fmt::Display for ReportField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
