use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rocket_engine::comparison_system::comparator::render_table;
use rocket_engine::*;

#[derive(Parser)]
#[command(name = "engine_calc")]
#[command(version = "0.1.0")]
#[command(about = "Ideal liquid rocket engine performance and preliminary geometry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the performance calculation
    Compute {
        /// Engine inputs (JSON); defaults to the LOX/hydrazine design point
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Combustion-analysis report text to read values from and compare against
        #[arg(short = 'r', long)]
        report: Option<PathBuf>,

        /// Print results as JSON instead of the step trace
        #[arg(long)]
        json: bool,
    },

    /// Check which fields a report provides
    Validate {
        /// Combustion-analysis report text
        #[arg(short = 'r', long)]
        report: PathBuf,
    },

    /// Print the default engine inputs as JSON
    Template,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Compute {
            config,
            report,
            json,
        } => run_compute(config, report, json),
        Commands::Validate { report } => run_validate(report),
        Commands::Template => run_template(),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_compute(
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let inputs = match config {
        Some(path) => EngineInputs::from_file(path)?,
        None => EngineInputs::default(),
    };

    let report_fields = match report {
        Some(path) => Some(parse_report(&fs::read_to_string(path)?)?),
        None => None,
    };

    let results = compute(&inputs, report_fields.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut telemetry = Telemetry::new();
    telemetry.collect_data(&inputs, &results);
    telemetry.display_data();

    if let Some(report_fields) = report_fields {
        println!("\n--- Comparison with report ---");
        print!("{}", render_table(&compare_report(&report_fields, &results)));
    }

    Ok(ExitCode::SUCCESS)
}

fn run_validate(report: PathBuf) -> Result<ExitCode, Box<dyn Error>> {
    let validation = validate_report(&fs::read_to_string(report)?)?;

    for (field, value) in &validation.entries {
        match value {
            Some(value) => println!("{:<24} ok       {} {}", field.name(), value, field.unit()),
            None => println!("{:<24} MISSING  ({})", field.name(), field.label()),
        }
    }

    if validation.is_complete() {
        println!("Report is complete.");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Report is missing {} field(s).", validation.missing().len());
        Ok(ExitCode::FAILURE)
    }
}

fn run_template() -> Result<ExitCode, Box<dyn Error>> {
    println!("{}", EngineInputs::default().to_json()?);
    Ok(ExitCode::SUCCESS)
}
