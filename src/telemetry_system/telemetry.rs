use crate::engine_system::inputs::EngineInputs;
use crate::engine_system::results::EngineResults;
use crate::utils::formatting::{format_quantity, markdown_table};

/// One formula evaluated by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub title: &'static str,
    pub symbol: &'static str,
    pub formula: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// Ordered trace of a calculation run, for display by a report renderer.
pub struct Telemetry {
    pub log: Vec<StepRecord>,
    summary: Vec<(&'static str, String)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            summary: Vec::new(),
        }
    }

    fn format_pressure(pressure: f64) -> String {
        if pressure >= 1e5 {
            format!("{:.2} bar", pressure / 1e5)
        } else {
            format!("{:.0} Pa", pressure)
        }
    }

    fn format_thrust(thrust: f64) -> String {
        if thrust.abs() >= 1000.0 {
            format!("{:.3} kN", thrust / 1000.0)
        } else {
            format!("{:.2} N", thrust)
        }
    }

    fn record(
        &mut self,
        step: usize,
        title: &'static str,
        symbol: &'static str,
        formula: &'static str,
        value: f64,
        unit: &'static str,
    ) {
        self.log.push(StepRecord {
            step,
            title,
            symbol,
            formula,
            value,
            unit,
        });
    }

    pub fn collect_data(&mut self, inputs: &EngineInputs, results: &EngineResults) {
        let r = results;

        self.record(1, "Oxidizer mass flow rate", "m_ox", "m_ox", r.oxidizer_flow_rate, "kg/s");
        self.record(1, "Fuel mass flow rate", "m_g", "m_g", r.fuel_flow_rate, "kg/s");
        self.record(1, "Total mass flow rate", "m", "m_ox + m_g", r.total_flow_rate, "kg/s");
        self.record(2, "Throat area", "A_kr", "C* · (m_g + m_ox) / P", r.throat_area, "m²");
        self.record(2, "Throat diameter", "d_kr", "sqrt(4 · A_kr / π)", r.throat_diameter, "m");
        self.record(3, "Chamber volume", "V_k", "L* · A_kr", r.chamber_volume, "m³");
        self.record(4, "Chamber diameter", "d_k", "d_kr · D_k/d_kr", r.chamber_diameter, "m");
        self.record(4, "Chamber length", "l_k", "V_k / (π/4 · d_k²)", r.chamber_length, "m");
        self.record(5, "Exit area", "A_i", "ε · A_kr", r.exit_area, "m²");
        self.record(5, "Exit diameter", "d_i", "sqrt(4 · A_i / π)", r.exit_diameter, "m");
        self.record(
            6,
            "Exit Mach number",
            "M_i",
            "ε(M_i) = ε, Newton iteration",
            r.exit_mach,
            "",
        );
        self.record(
            7,
            "Static exit pressure",
            "p_i",
            "P / (1 + (κ-1)/2 · M_i²)^(κ/(κ-1))",
            r.exit_pressure,
            "Pa",
        );
        self.record(
            8,
            "Optimal exit Mach number",
            "M_opt",
            "sqrt([(P/P_a)^((κ-1)/κ) - 1] · 2/(κ-1))",
            r.optimal_mach,
            "",
        );
        self.record(
            9,
            "Optimal expansion ratio",
            "ε_opt",
            "(1 + (κ-1)/2 · M_opt²)^((κ+1)/(2(κ-1))) / (M_opt · ((κ+1)/2)^((κ+1)/(2(κ-1))))",
            r.optimal_expansion_ratio,
            "",
        );
        self.record(9, "Optimal exit area", "A_opt", "ε_opt · A_kr", r.optimal_exit_area, "m²");
        self.record(
            9,
            "Optimal exit diameter",
            "d_opt",
            "sqrt(4 · A_opt / π)",
            r.optimal_exit_diameter,
            "m",
        );
        self.record(
            10,
            "Temperature function",
            "Γ(κ)",
            "sqrt(κ) · (2/(κ+1))^((κ+1)/(2(κ-1)))",
            r.temperature_function,
            "",
        );
        self.record(
            11,
            "Chamber temperature",
            "T",
            "(C* · Γ(κ))² / R",
            r.chamber_temperature,
            "K",
        );
        self.record(
            12,
            "Exhaust velocity",
            "V_i",
            "sqrt(2κ/(κ-1) · R · T · [1 - (p_i/P)^((κ-1)/κ)])",
            r.exhaust_velocity,
            "m/s",
        );
        self.record(
            12,
            "Optimal exhaust velocity",
            "V_opt",
            "sqrt(2κ/(κ-1) · R · T · [1 - (P_a/P)^((κ-1)/κ)])",
            r.optimal_exhaust_velocity,
            "m/s",
        );
        self.record(13, "Thrust", "F", "m · V_i + A_i · (p_i - P_a)", r.thrust, "N");
        self.record(13, "Optimal thrust", "F_opt", "m · V_opt", r.optimal_thrust, "N");
        self.record(13, "Vacuum thrust", "F_vac", "m · V_i + A_i · p_i", r.vacuum_thrust, "N");
        self.record(
            14,
            "Thrust coefficient",
            "C_f",
            "F / (P · A_kr)",
            r.thrust_coefficient,
            "",
        );
        self.record(
            15,
            "Specific impulse",
            "I_sp",
            "F / m",
            r.specific_impulse,
            "N·s/kg",
        );
        self.record(
            15,
            "Optimal specific impulse",
            "I_sp,opt",
            "F_opt / m",
            r.optimal_specific_impulse,
            "N·s/kg",
        );
        self.record(15, "Specific impulse", "I_sp", "F / (m · g0)", r.specific_impulse_s, "s");
        self.record(
            15,
            "Optimal specific impulse",
            "I_sp,opt",
            "F_opt / (m · g0)",
            r.optimal_specific_impulse_s,
            "s",
        );

        self.summary = vec![
            (
                "Chamber pressure",
                Self::format_pressure(inputs.chamber_pressure_pa),
            ),
            (
                "Ambient pressure",
                Self::format_pressure(inputs.atmosphere_pressure_pa),
            ),
            ("Design thrust", Self::format_thrust(inputs.thrust_target_n)),
            ("Thrust", Self::format_thrust(r.thrust)),
            ("Thrust margin", Self::format_thrust(r.thrust_margin)),
            (
                "Mach solver iterations",
                r.mach_iterations.to_string(),
            ),
            ("Mixture ratio", format!("{:.4}", r.mixture_ratio)),
        ];
    }

    pub fn to_markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .log
            .iter()
            .map(|entry| {
                vec![
                    entry.step.to_string(),
                    entry.title.to_string(),
                    format!("{} = {}", entry.symbol, entry.formula),
                    format_quantity(entry.value),
                    entry.unit.to_string(),
                ]
            })
            .collect();

        markdown_table(&["Step", "Quantity", "Formula", "Value", "Unit"], &rows)
    }

    pub fn display_data(&self) {
        println!("--- Calculation Steps ---");
        for entry in &self.log {
            println!(
                "{:>2}. {}: {} = {} = {} {}",
                entry.step,
                entry.title,
                entry.symbol,
                entry.formula,
                format_quantity(entry.value),
                entry.unit
            );
        }
        println!("--- End of Calculation ---");

        println!("\n--- Summary ---");
        for (label, value) in &self.summary {
            println!("{}: {}", label, value);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
