use rocket_engine::{
    compare, compare_report, compute, errors::EngineError, parse_report, validate_report,
    EngineInputs, MassFlowSource, Percentage, ReportField, Telemetry,
};

const RPA_REPORT: &str = include_str!("data/rpa_report.txt");

// Helper function to build the assignment design point
fn create_test_inputs() -> EngineInputs {
    EngineInputs {
        chamber_pressure_pa: 1.8e7,
        atmosphere_pressure_pa: 101_325.0,
        characteristic_velocity_m_s: 2000.0,
        gas_constant_j_per_kgk: 546.0,
        specific_heat_ratio: 1.2,
        expansion_ratio: 7.0,
        mass_flow: MassFlowSource::Explicit {
            oxidizer_kg_s: 4.1401,
            fuel_kg_s: 3.0117,
        },
        ..EngineInputs::default()
    }
}

#[test]
fn test_end_to_end_design_point() {
    println!("INTEGRATION TEST: LOX / hydrazine design point");

    let results = compute(&create_test_inputs(), None).expect("design point should compute");

    println!("  - Throat area: {:.4e} m²", results.throat_area);
    println!("  - Exit Mach: {:.4}", results.exit_mach);
    println!("  - Optimal Mach: {:.4}", results.optimal_mach);
    println!("  - Chamber temperature: {:.1} K", results.chamber_temperature);
    println!("  - Isp (opt): {:.1} s", results.optimal_specific_impulse_s);

    // Same order of magnitude as the report figures, not exact agreement.
    assert!(
        results.throat_area > 5.0e-4 && results.throat_area < 1.5e-3,
        "A_kr = {}",
        results.throat_area
    );
    assert!(results.optimal_mach > 3.0 && results.optimal_mach < 4.5);
    assert!(
        results.chamber_temperature > 2500.0 && results.chamber_temperature < 3500.0,
        "T = {} K",
        results.chamber_temperature
    );
    assert!(
        results.optimal_specific_impulse_s > 250.0 && results.optimal_specific_impulse_s < 400.0,
        "Isp_opt = {} s",
        results.optimal_specific_impulse_s
    );
    assert!(results.thrust > 15_000.0 && results.thrust < 30_000.0);
}

#[test]
fn test_report_driven_calculation_and_comparison() {
    println!("INTEGRATION TEST: Report parsing, calculation and comparison");

    let report = parse_report(RPA_REPORT).expect("sample report should parse");
    let inputs = create_test_inputs().with_mass_flow(MassFlowSource::Report);
    let results = compute(&inputs, Some(&report)).expect("report-driven run should compute");

    assert_eq!(results.oxidizer_flow_rate, report.oxidizer_flow_rate);
    assert_eq!(results.fuel_flow_rate, report.fuel_flow_rate);

    let rows = compare_report(&report, &results);
    assert_eq!(rows.len(), ReportField::ALL.len());

    let mut skipped = Vec::new();
    for row in &rows {
        match row {
            Ok(row) => {
                println!(
                    "  - {:<24} ref {:>10.3} | calc {:>10.3} | {}",
                    row.key, row.reference, row.computed, row.percentage
                );
                // Ideal-engine figures stay within 25% of the report.
                let percentage = row.percentage.value().expect("report values are non-zero");
                assert!(
                    percentage.abs() < 25.0,
                    "{} differs by {:.1}%",
                    row.key,
                    percentage
                );
            }
            Err(EngineError::MissingKey(key)) => skipped.push(key.clone()),
            Err(other) => panic!("unexpected comparison error: {}", other),
        }
    }

    assert_eq!(skipped, vec!["nozzle_length".to_string()]);

    let flow = rows
        .iter()
        .filter_map(|row| row.as_ref().ok())
        .find(|row| row.key == "oxidizer_flow_rate")
        .unwrap();
    assert_eq!(flow.difference, 0.0);
}

#[test]
fn test_incomplete_report_is_rejected_with_field_name() {
    let text: String = RPA_REPORT
        .lines()
        .filter(|line| !line.contains("Fuel mass flow rate"))
        .map(|line| format!("{}\n", line))
        .collect();

    match parse_report(&text) {
        Err(EngineError::MissingField { field }) => assert_eq!(field, "fuel_flow_rate"),
        other => panic!("expected MissingField(fuel_flow_rate), got {:?}", other),
    }

    let validation = validate_report(&text).unwrap();
    let presence = validation.presence();
    assert_eq!(presence.get("fuel_flow_rate"), Some(&false));
    assert_eq!(presence.values().filter(|present| **present).count(), 11);
    assert_eq!(validation.value(ReportField::ThroatDiameter), Some(30.88));
}

#[test]
fn test_throat_sized_from_report() {
    let report = parse_report(RPA_REPORT).unwrap();
    let inputs = create_test_inputs().with_mass_flow(MassFlowSource::ThroatFromReport);

    let results = compute(&inputs, Some(&report)).unwrap();

    assert!((results.throat_diameter * 1000.0 - report.throat_diameter).abs() < 1e-9);
    assert!((results.mixture_ratio - inputs.mixture_ratio).abs() < 1e-9);
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "rocket_engine_inputs_{}.json",
        std::process::id()
    ));
    let inputs = create_test_inputs();
    std::fs::write(&path, inputs.to_json().unwrap()).unwrap();

    let loaded = EngineInputs::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, inputs);
    assert_eq!(
        compute(&loaded, None).unwrap(),
        compute(&inputs, None).unwrap()
    );
}

#[test]
fn test_different_combustion_runs_are_plain_inputs() {
    let mut previous_temperature = f64::MAX;

    for gas_constant in [380.4, 433.5, 546.0] {
        let mut inputs = create_test_inputs();
        inputs.gas_constant_j_per_kgk = gas_constant;
        let results = compute(&inputs, None).unwrap();

        // T = (C*·Γ)²/R falls as R grows.
        assert!(results.chamber_temperature < previous_temperature);
        previous_temperature = results.chamber_temperature;
    }
}

#[test]
fn test_comparison_against_zero_reference() {
    let reference = [("pressure_thrust".to_string(), 0.0)].into_iter().collect();
    let computed = [("pressure_thrust".to_string(), 1520.0)].into_iter().collect();

    let rows = compare(&reference, &computed);

    assert_eq!(rows[0].as_ref().unwrap().percentage, Percentage::Undefined);
}

#[test]
fn test_telemetry_trace() {
    let inputs = create_test_inputs();
    let results = compute(&inputs, None).unwrap();
    let mut telemetry = Telemetry::new();

    telemetry.collect_data(&inputs, &results);
    telemetry.display_data();

    assert!(telemetry.log.iter().any(|entry| entry.symbol == "M_opt"));
}
