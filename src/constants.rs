// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s²
pub const STANDARD_ATMOSPHERE: f64 = 101_325.0; // Pa

// Design Inputs (LOX / hydrazine assignment)
pub const CHAMBER_PRESSURE: f64 = 180.0e5; // Pa (180 bar)
pub const DESIGN_THRUST: f64 = 22_000.0; // N (2200 daN)
pub const EXPANSION_RATIO: f64 = 7.0;
pub const CHAMBER_TO_THROAT_DIAMETER_RATIO: f64 = 3.0;
pub const CHARACTERISTIC_LENGTH: f64 = 1.0; // m

// Combustion Products (from the combustion-analysis run)
pub const CHARACTERISTIC_VELOCITY: f64 = 2000.0; // m/s
pub const GAS_CONSTANT: f64 = 546.0; // J/(kg·K)
pub const SPECIFIC_HEAT_RATIO: f64 = 1.2;
pub const MIXTURE_RATIO: f64 = 1.3747;
pub const OXIDIZER_FLOW_RATE: f64 = 4.1401; // kg/s
pub const FUEL_FLOW_RATE: f64 = 3.0117; // kg/s

// Solver Parameters
pub const MACH_GUESS: f64 = 2.8;
pub const MACH_TOLERANCE: f64 = 1e-8;
pub const MACH_MAX_ITERATIONS: usize = 100;
pub const MACH_MAX_STEP_HALVINGS: usize = 30;

// Unit Conversions
pub const MM_PER_M: f64 = 1_000.0;
pub const N_PER_KN: f64 = 1_000.0;
