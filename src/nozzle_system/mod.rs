pub mod isentropic;
pub mod mach_solver;
