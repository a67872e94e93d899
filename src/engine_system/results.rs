use serde::Serialize;

use crate::constants::{MM_PER_M, N_PER_KN};
use crate::report_system::fields::ReportField;
use crate::report_system::parser::Quantities;

/// Every quantity derived in one calculation run, in SI units unless the
/// name says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineResults {
    pub oxidizer_flow_rate: f64,
    pub fuel_flow_rate: f64,
    pub total_flow_rate: f64,
    pub mixture_ratio: f64,

    pub throat_area: f64,
    pub throat_diameter: f64,
    pub chamber_volume: f64,
    pub chamber_diameter: f64,
    pub chamber_length: f64,
    pub exit_area: f64,
    pub exit_diameter: f64,

    pub exit_mach: f64,
    pub mach_iterations: usize,
    pub exit_pressure: f64,
    pub optimal_mach: f64,
    pub optimal_expansion_ratio: f64,
    pub optimal_exit_area: f64,
    pub optimal_exit_diameter: f64,

    pub temperature_function: f64,
    pub chamber_temperature: f64,
    pub exhaust_velocity: f64,
    pub optimal_exhaust_velocity: f64,

    pub pressure_thrust: f64,
    pub thrust: f64,
    pub optimal_thrust: f64,
    pub vacuum_thrust: f64,
    pub thrust_margin: f64,
    pub thrust_coefficient: f64,
    pub optimal_thrust_coefficient: f64,
    pub vacuum_thrust_coefficient: f64,

    pub specific_impulse: f64,         // N·s/kg
    pub optimal_specific_impulse: f64, // N·s/kg
    pub vacuum_specific_impulse: f64,  // N·s/kg
    pub specific_impulse_s: f64,
    pub optimal_specific_impulse_s: f64,
    pub vacuum_specific_impulse_s: f64,
}

impl EngineResults {
    /// All quantities keyed by field name, SI units.
    pub fn quantities(&self) -> Quantities {
        [
            ("oxidizer_flow_rate", self.oxidizer_flow_rate),
            ("fuel_flow_rate", self.fuel_flow_rate),
            ("total_flow_rate", self.total_flow_rate),
            ("mixture_ratio", self.mixture_ratio),
            ("throat_area", self.throat_area),
            ("throat_diameter", self.throat_diameter),
            ("chamber_volume", self.chamber_volume),
            ("chamber_diameter", self.chamber_diameter),
            ("chamber_length", self.chamber_length),
            ("exit_area", self.exit_area),
            ("exit_diameter", self.exit_diameter),
            ("exit_mach", self.exit_mach),
            ("exit_pressure", self.exit_pressure),
            ("optimal_mach", self.optimal_mach),
            ("optimal_expansion_ratio", self.optimal_expansion_ratio),
            ("optimal_exit_area", self.optimal_exit_area),
            ("optimal_exit_diameter", self.optimal_exit_diameter),
            ("temperature_function", self.temperature_function),
            ("chamber_temperature", self.chamber_temperature),
            ("exhaust_velocity", self.exhaust_velocity),
            ("optimal_exhaust_velocity", self.optimal_exhaust_velocity),
            ("pressure_thrust", self.pressure_thrust),
            ("thrust", self.thrust),
            ("optimal_thrust", self.optimal_thrust),
            ("vacuum_thrust", self.vacuum_thrust),
            ("thrust_margin", self.thrust_margin),
            ("thrust_coefficient", self.thrust_coefficient),
            ("optimal_thrust_coefficient", self.optimal_thrust_coefficient),
            ("vacuum_thrust_coefficient", self.vacuum_thrust_coefficient),
            ("specific_impulse", self.specific_impulse),
            ("optimal_specific_impulse", self.optimal_specific_impulse),
            ("vacuum_specific_impulse", self.vacuum_specific_impulse),
            ("specific_impulse_s", self.specific_impulse_s),
            ("optimal_specific_impulse_s", self.optimal_specific_impulse_s),
            ("vacuum_specific_impulse_s", self.vacuum_specific_impulse_s),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }

    /// The computed counterpart of a report field, converted to the report's
    /// unit. The nozzle length has no counterpart.
    pub fn report_value(&self, field: ReportField) -> Option<f64> {
        match field {
            ReportField::SpecificImpulseVac => Some(self.vacuum_specific_impulse_s),
            ReportField::SpecificImpulseOpt => Some(self.optimal_specific_impulse_s),
            ReportField::ThrustCoefficientVac => Some(self.vacuum_thrust_coefficient),
            ReportField::ChamberThrustVac => Some(self.vacuum_thrust / N_PER_KN),
            ReportField::ChamberThrustOpt => Some(self.optimal_thrust / N_PER_KN),
            ReportField::OxidizerFlowRate => Some(self.oxidizer_flow_rate),
            ReportField::FuelFlowRate => Some(self.fuel_flow_rate),
            ReportField::ChamberDiameter => Some(self.chamber_diameter * MM_PER_M),
            ReportField::ThroatDiameter => Some(self.throat_diameter * MM_PER_M),
            ReportField::ExitDiameter => Some(self.exit_diameter * MM_PER_M),
            ReportField::ChamberLength => Some(self.chamber_length * MM_PER_M),
            ReportField::NozzleLength => None,
        }
    }

    /// Computed side of a report comparison, keyed by report field name.
    pub fn report_quantities(&self) -> Quantities {
        ReportField::ALL
            .iter()
            .filter_map(|field| {
                self.report_value(*field)
                    .map(|value| (field.name().to_string(), value))
            })
            .collect()
    }
}
