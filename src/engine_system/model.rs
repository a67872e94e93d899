use crate::constants::{MM_PER_M, STANDARD_GRAVITY};
use crate::engine_system::inputs::{EngineInputs, MassFlowSource};
use crate::engine_system::results::EngineResults;
use crate::errors::{EngineError, EngineResult};
use crate::nozzle_system::isentropic::{self, circle_area, circle_diameter};
use crate::nozzle_system::mach_solver::{area_ratio, MachSolver};
use crate::report_system::parser::ReportFields;

/// Ideal-engine formula pipeline: one set of inputs in, one set of results out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnginePerformanceModel {
    pub solver: MachSolver,
}

impl EnginePerformanceModel {
    pub fn new(solver: MachSolver) -> Self {
        EnginePerformanceModel { solver }
    }

    pub fn compute(
        &self,
        inputs: &EngineInputs,
        report: Option<&ReportFields>,
    ) -> EngineResult<EngineResults> {
        inputs.validate()?;

        let p = inputs.chamber_pressure_pa;
        let pa = inputs.atmosphere_pressure_pa;
        let kappa = inputs.specific_heat_ratio;
        let gas_constant = inputs.gas_constant_j_per_kgk;
        let c_star = inputs.characteristic_velocity_m_s;

        // Mass flow
        let (oxidizer_flow_rate, fuel_flow_rate) = Self::mass_flows(inputs, report)?;
        let total_flow_rate = oxidizer_flow_rate + fuel_flow_rate;

        // Chamber and nozzle geometry
        let throat_area = c_star * total_flow_rate / p;
        let throat_diameter = circle_diameter(throat_area);
        let chamber_volume = inputs.characteristic_length_m * throat_area;
        let chamber_diameter = throat_diameter * inputs.chamber_to_throat_diameter_ratio;
        let chamber_length = chamber_volume / circle_area(chamber_diameter);
        let exit_area = inputs.expansion_ratio * throat_area;
        let exit_diameter = circle_diameter(exit_area);

        // Exit conditions at the given and the optimal expansion ratio
        let solution = self
            .solver
            .solve(kappa, inputs.expansion_ratio, inputs.mach_guess)?;
        let exit_mach = solution.mach;
        let exit_pressure = isentropic::exit_pressure(p, kappa, exit_mach);
        let optimal_mach = isentropic::optimal_mach(p, pa, kappa);
        let optimal_expansion_ratio = area_ratio(kappa, optimal_mach);
        let optimal_exit_area = optimal_expansion_ratio * throat_area;
        let optimal_exit_diameter = circle_diameter(optimal_exit_area);

        // Chamber temperature and exhaust velocity
        let temperature_function = isentropic::temperature_function(kappa);
        let chamber_temperature = isentropic::chamber_temperature(c_star, kappa, gas_constant);
        let exhaust_velocity =
            isentropic::exhaust_velocity(kappa, gas_constant, chamber_temperature, p, exit_pressure);
        // The optimal nozzle exits at ambient pressure.
        let optimal_exhaust_velocity =
            isentropic::exhaust_velocity(kappa, gas_constant, chamber_temperature, p, pa);

        // Thrust; the pressure term vanishes at the optimum since p_exit = p_a there.
        let pressure_thrust = exit_area * (exit_pressure - pa);
        let thrust = total_flow_rate * exhaust_velocity + pressure_thrust;
        let optimal_thrust = total_flow_rate * optimal_exhaust_velocity;
        let vacuum_thrust = total_flow_rate * exhaust_velocity + exit_area * exit_pressure;

        let nozzle_force = p * throat_area;
        let specific_impulse = thrust / total_flow_rate;
        let optimal_specific_impulse = optimal_thrust / total_flow_rate;
        let vacuum_specific_impulse = vacuum_thrust / total_flow_rate;

        Ok(EngineResults {
            oxidizer_flow_rate,
            fuel_flow_rate,
            total_flow_rate,
            mixture_ratio: oxidizer_flow_rate / fuel_flow_rate,
            throat_area,
            throat_diameter,
            chamber_volume,
            chamber_diameter,
            chamber_length,
            exit_area,
            exit_diameter,
            exit_mach,
            mach_iterations: solution.iterations,
            exit_pressure,
            optimal_mach,
            optimal_expansion_ratio,
            optimal_exit_area,
            optimal_exit_diameter,
            temperature_function,
            chamber_temperature,
            exhaust_velocity,
            optimal_exhaust_velocity,
            pressure_thrust,
            thrust,
            optimal_thrust,
            vacuum_thrust,
            thrust_margin: thrust - inputs.thrust_target_n,
            thrust_coefficient: thrust / nozzle_force,
            optimal_thrust_coefficient: optimal_thrust / nozzle_force,
            vacuum_thrust_coefficient: vacuum_thrust / nozzle_force,
            specific_impulse,
            optimal_specific_impulse,
            vacuum_specific_impulse,
            specific_impulse_s: specific_impulse / STANDARD_GRAVITY,
            optimal_specific_impulse_s: optimal_specific_impulse / STANDARD_GRAVITY,
            vacuum_specific_impulse_s: vacuum_specific_impulse / STANDARD_GRAVITY,
        })
    }

    /// Oxidizer and fuel mass flow rates (kg/s) for the configured source.
    fn mass_flows(
        inputs: &EngineInputs,
        report: Option<&ReportFields>,
    ) -> EngineResult<(f64, f64)> {
        let mixture_ratio = inputs.mixture_ratio;
        let require_report = || {
            report.ok_or_else(|| {
                EngineError::InvalidInput(format!(
                    "mass flow source '{}' requires report fields",
                    inputs.mass_flow.name()
                ))
            })
        };

        let (oxidizer, fuel) = match inputs.mass_flow {
            MassFlowSource::FuelAndMixtureRatio { fuel_kg_s } => {
                (mixture_ratio * fuel_kg_s, fuel_kg_s)
            }
            MassFlowSource::Explicit {
                oxidizer_kg_s,
                fuel_kg_s,
            } => (oxidizer_kg_s, fuel_kg_s),
            MassFlowSource::Report => {
                let report = require_report()?;
                (report.oxidizer_flow_rate, report.fuel_flow_rate)
            }
            MassFlowSource::ThroatFromReport => {
                let report = require_report()?;
                let throat_area = circle_area(report.throat_diameter / MM_PER_M);
                let total = inputs.chamber_pressure_pa * throat_area
                    / inputs.characteristic_velocity_m_s;
                let fuel = total / (1.0 + mixture_ratio);
                (total - fuel, fuel)
            }
        };

        if !(oxidizer > 0.0 && fuel > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "mass flow source '{}' produced non-positive flow rates (oxidizer {}, fuel {})",
                inputs.mass_flow.name(),
                oxidizer,
                fuel
            )));
        }

        Ok((oxidizer, fuel))
    }
}

/// Runs the pipeline with the default solver settings.
pub fn compute(inputs: &EngineInputs, report_fields: Option<&ReportFields>) -> EngineResult<EngineResults> {
    EnginePerformanceModel::default().compute(inputs, report_fields)
}
