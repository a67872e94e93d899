pub mod comparison_system;
pub mod constants;
pub mod engine_system;
pub mod errors;
pub mod nozzle_system;
pub mod report_system;
pub mod telemetry_system;
pub mod utils;

pub use constants::*;
pub use errors::{EngineError, EngineResult};

// Re-export the calculation entry points
pub use comparison_system::comparator::{compare, compare_report, ComparisonRow, Percentage};
pub use engine_system::inputs::{EngineInputs, MassFlowSource};
pub use engine_system::model::{compute, EnginePerformanceModel};
pub use engine_system::results::EngineResults;
pub use nozzle_system::mach_solver::{area_ratio, solve_exit_mach, MachSolution, MachSolver};

// Re-export report parsing
pub use report_system::fields::ReportField;
pub use report_system::parser::{
    parse_report, validate_report, Quantities, ReportFields, ReportParser, ReportValidation,
};
pub use report_system::writer::format_report;

pub use telemetry_system::telemetry::Telemetry;
