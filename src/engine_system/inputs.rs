use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{EngineError, EngineResult};

/// Where the propellant mass flow rates of a run come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MassFlowSource {
    /// Fuel flow given, oxidizer flow from the mixture ratio.
    FuelAndMixtureRatio { fuel_kg_s: f64 },
    /// Both flows given.
    Explicit { oxidizer_kg_s: f64, fuel_kg_s: f64 },
    /// Both flows read from the combustion-analysis report.
    Report,
    /// Total flow from the report's throat diameter, split by the mixture ratio.
    ThroatFromReport,
}

impl MassFlowSource {
    pub fn name(&self) -> &'static str {
        match self {
            MassFlowSource::FuelAndMixtureRatio { .. } => "fuel_and_mixture_ratio",
            MassFlowSource::Explicit { .. } => "explicit",
            MassFlowSource::Report => "report",
            MassFlowSource::ThroatFromReport => "throat_from_report",
        }
    }

    pub fn needs_report(&self) -> bool {
        matches!(
            self,
            MassFlowSource::Report | MassFlowSource::ThroatFromReport
        )
    }
}

/// Design inputs of one calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineInputs {
    pub chamber_pressure_pa: f64,
    pub atmosphere_pressure_pa: f64,
    pub thrust_target_n: f64,
    pub expansion_ratio: f64,
    pub chamber_to_throat_diameter_ratio: f64,
    pub characteristic_length_m: f64,
    pub characteristic_velocity_m_s: f64,
    pub gas_constant_j_per_kgk: f64,
    pub specific_heat_ratio: f64,
    pub mixture_ratio: f64,
    pub mach_guess: f64,
    pub mass_flow: MassFlowSource,
}

impl Default for EngineInputs {
    fn default() -> Self {
        EngineInputs {
            chamber_pressure_pa: CHAMBER_PRESSURE,
            atmosphere_pressure_pa: STANDARD_ATMOSPHERE,
            thrust_target_n: DESIGN_THRUST,
            expansion_ratio: EXPANSION_RATIO,
            chamber_to_throat_diameter_ratio: CHAMBER_TO_THROAT_DIAMETER_RATIO,
            characteristic_length_m: CHARACTERISTIC_LENGTH,
            characteristic_velocity_m_s: CHARACTERISTIC_VELOCITY,
            gas_constant_j_per_kgk: GAS_CONSTANT,
            specific_heat_ratio: SPECIFIC_HEAT_RATIO,
            mixture_ratio: MIXTURE_RATIO,
            mach_guess: MACH_GUESS,
            mass_flow: MassFlowSource::Explicit {
                oxidizer_kg_s: OXIDIZER_FLOW_RATE,
                fuel_kg_s: FUEL_FLOW_RATE,
            },
        }
    }
}

impl EngineInputs {
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let inputs: Self = serde_json::from_str(json)?;
        Ok(inputs)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_mass_flow(mut self, mass_flow: MassFlowSource) -> Self {
        self.mass_flow = mass_flow;
        self
    }

    /// Rejects out-of-domain parameters before any computation starts.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.specific_heat_ratio > 1.0) {
            return Err(invalid("specific_heat_ratio", self.specific_heat_ratio, "> 1"));
        }
        if !(self.expansion_ratio > 1.0) {
            return Err(invalid("expansion_ratio", self.expansion_ratio, "> 1"));
        }
        if !(self.chamber_to_throat_diameter_ratio > 1.0) {
            return Err(invalid(
                "chamber_to_throat_diameter_ratio",
                self.chamber_to_throat_diameter_ratio,
                "> 1",
            ));
        }

        let positive = [
            ("chamber_pressure_pa", self.chamber_pressure_pa),
            ("atmosphere_pressure_pa", self.atmosphere_pressure_pa),
            ("thrust_target_n", self.thrust_target_n),
            ("characteristic_length_m", self.characteristic_length_m),
            ("characteristic_velocity_m_s", self.characteristic_velocity_m_s),
            ("gas_constant_j_per_kgk", self.gas_constant_j_per_kgk),
            ("mixture_ratio", self.mixture_ratio),
            ("mach_guess", self.mach_guess),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(name, value, "> 0"));
            }
        }

        let all = [
            self.chamber_pressure_pa,
            self.atmosphere_pressure_pa,
            self.thrust_target_n,
            self.expansion_ratio,
            self.chamber_to_throat_diameter_ratio,
            self.characteristic_length_m,
            self.characteristic_velocity_m_s,
            self.gas_constant_j_per_kgk,
            self.specific_heat_ratio,
            self.mixture_ratio,
            self.mach_guess,
        ];
        if all.iter().any(|value| !value.is_finite()) {
            return Err(EngineError::InvalidInput(
                "all design inputs must be finite".to_string(),
            ));
        }

        if self.chamber_pressure_pa <= self.atmosphere_pressure_pa {
            return Err(EngineError::InvalidInput(format!(
                "chamber_pressure_pa ({}) must exceed atmosphere_pressure_pa ({})",
                self.chamber_pressure_pa, self.atmosphere_pressure_pa
            )));
        }

        match self.mass_flow {
            MassFlowSource::FuelAndMixtureRatio { fuel_kg_s } => {
                require_flow("fuel_kg_s", fuel_kg_s)?;
            }
            MassFlowSource::Explicit {
                oxidizer_kg_s,
                fuel_kg_s,
            } => {
                require_flow("oxidizer_kg_s", oxidizer_kg_s)?;
                require_flow("fuel_kg_s", fuel_kg_s)?;
            }
            MassFlowSource::Report | MassFlowSource::ThroatFromReport => {}
        }

        Ok(())
    }
}

fn invalid(name: &str, value: f64, bound: &str) -> EngineError {
    EngineError::InvalidInput(format!("{} must be {}, got {}", name, bound, value))
}

fn require_flow(name: &str, value: f64) -> EngineResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "> 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(inputs: EngineInputs, parameter: &str) {
        match inputs.validate() {
            Err(EngineError::InvalidInput(message)) => assert!(
                message.contains(parameter),
                "message '{}' should name {}",
                message,
                parameter
            ),
            other => panic!("expected InvalidInput for {}, got {:?}", parameter, other),
        }
    }

    #[test]
    fn test_default_inputs_are_valid() {
        assert!(EngineInputs::default().validate().is_ok());
    }

    #[test]
    fn test_specific_heat_ratio_must_exceed_one() {
        let mut inputs = EngineInputs::default();
        inputs.specific_heat_ratio = 1.0;
        assert_invalid(inputs, "specific_heat_ratio");
    }

    #[test]
    fn test_expansion_ratio_must_exceed_one() {
        let mut inputs = EngineInputs::default();
        inputs.expansion_ratio = 0.9;
        assert_invalid(inputs, "expansion_ratio");
    }

    #[test]
    fn test_chamber_pressure_must_be_positive() {
        let mut inputs = EngineInputs::default();
        inputs.chamber_pressure_pa = 0.0;
        assert_invalid(inputs, "chamber_pressure_pa");
    }

    #[test]
    fn test_chamber_pressure_must_exceed_ambient() {
        let mut inputs = EngineInputs::default();
        inputs.chamber_pressure_pa = 90_000.0;
        assert_invalid(inputs, "atmosphere_pressure_pa");
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut inputs = EngineInputs::default();
        inputs.gas_constant_j_per_kgk = f64::NAN;
        assert_invalid(inputs, "gas_constant_j_per_kgk");
    }

    #[test]
    fn test_manual_flow_must_be_positive() {
        let inputs = EngineInputs::default()
            .with_mass_flow(MassFlowSource::FuelAndMixtureRatio { fuel_kg_s: -1.0 });
        assert_invalid(inputs, "fuel_kg_s");
    }

    #[test]
    fn test_json_round_trip() {
        let inputs = EngineInputs::default().with_mass_flow(MassFlowSource::ThroatFromReport);
        let json = inputs.to_json().unwrap();

        assert!(json.contains("\"source\": \"throat_from_report\""));
        assert_eq!(EngineInputs::from_json(&json).unwrap(), inputs);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs = EngineInputs::from_json(
            r#"{
                "gas_constant_j_per_kgk": 380.4,
                "mass_flow": { "source": "fuel_and_mixture_ratio", "fuel_kg_s": 1.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(inputs.gas_constant_j_per_kgk, 380.4);
        assert_eq!(inputs.chamber_pressure_pa, CHAMBER_PRESSURE);
        assert_eq!(
            inputs.mass_flow,
            MassFlowSource::FuelAndMixtureRatio { fuel_kg_s: 1.0 }
        );
    }

    #[test]
    fn test_unknown_mass_flow_source_is_rejected() {
        let result = EngineInputs::from_json(r#"{ "mass_flow": { "source": "guess" } }"#);
        assert!(matches!(result, Err(EngineError::Json(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = EngineInputs::from_file("/nonexistent/engine.json");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_report_sources_need_report() {
        assert!(MassFlowSource::Report.needs_report());
        assert!(MassFlowSource::ThroatFromReport.needs_report());
        assert!(!EngineInputs::default().mass_flow.needs_report());
        assert_eq!(MassFlowSource::ThroatFromReport.name(), "throat_from_report");
    }
}
