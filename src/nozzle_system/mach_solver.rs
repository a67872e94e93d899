use crate::constants::{MACH_GUESS, MACH_MAX_ITERATIONS, MACH_MAX_STEP_HALVINGS, MACH_TOLERANCE};
use crate::errors::{EngineError, EngineResult};

/// Isentropic area ratio A/A* reached at Mach number `mach`.
pub fn area_ratio(kappa: f64, mach: f64) -> f64 {
    let exponent = (kappa + 1.0) / (2.0 * (kappa - 1.0));
    let stagnation = 1.0 + (kappa - 1.0) / 2.0 * mach.powi(2);

    stagnation.powf(exponent) / (mach * ((kappa + 1.0) / 2.0).powf(exponent))
}

/// d(A/A*)/dM, zero at the sonic point.
pub fn area_ratio_derivative(kappa: f64, mach: f64) -> f64 {
    let stagnation = 1.0 + (kappa - 1.0) / 2.0 * mach.powi(2);
    area_ratio(kappa, mach) * (mach.powi(2) - 1.0) / (mach * stagnation)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachSolution {
    pub mach: f64,
    pub iterations: usize,
    pub residual: f64,
}

/// Newton iteration on the area-ratio relation in log-log form. The seed
/// selects the branch: a supersonic seed yields the supersonic root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub max_step_halvings: usize,
}

impl Default for MachSolver {
    fn default() -> Self {
        MachSolver {
            tolerance: MACH_TOLERANCE,
            max_iterations: MACH_MAX_ITERATIONS,
            max_step_halvings: MACH_MAX_STEP_HALVINGS,
        }
    }
}

impl MachSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        MachSolver {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn solve(&self, kappa: f64, expansion_ratio: f64, seed: f64) -> EngineResult<MachSolution> {
        validate(kappa, expansion_ratio, seed)?;

        let residual_at = |mach: f64| area_ratio(kappa, mach) - expansion_ratio;

        let mut mach = seed;
        let mut residual = residual_at(mach);
        if !residual.is_finite() {
            return Err(EngineError::NoConvergence {
                iterations: 0,
                residual,
            });
        }

        for iteration in 0..=self.max_iterations {
            if residual.abs() < self.tolerance {
                return Ok(MachSolution {
                    mach,
                    iterations: iteration,
                    residual,
                });
            }
            if iteration == self.max_iterations {
                break;
            }

            // Newton step on ln(A/A*) against ln(M); iterates stay positive.
            let slope = (mach.powi(2) - 1.0) / (1.0 + (kappa - 1.0) / 2.0 * mach.powi(2));
            if slope == 0.0 || !slope.is_finite() {
                return Err(EngineError::NoConvergence {
                    iterations: iteration,
                    residual,
                });
            }

            let mut step = (area_ratio(kappa, mach).ln() - expansion_ratio.ln()) / slope;
            let mut accepted = None;
            for _ in 0..=self.max_step_halvings {
                let candidate = mach * (-step).exp();
                if candidate > 0.0 && candidate.is_finite() {
                    let candidate_residual = residual_at(candidate);
                    if candidate_residual.is_finite() {
                        accepted = Some((candidate, candidate_residual));
                        break;
                    }
                }
                step /= 2.0;
            }

            match accepted {
                Some((next_mach, next_residual)) => {
                    mach = next_mach;
                    residual = next_residual;
                }
                None => {
                    return Err(EngineError::NoConvergence {
                        iterations: iteration + 1,
                        residual,
                    })
                }
            }
        }

        Err(EngineError::NoConvergence {
            iterations: self.max_iterations,
            residual,
        })
    }
}

fn validate(kappa: f64, expansion_ratio: f64, seed: f64) -> EngineResult<()> {
    if !(kappa > 1.0) || !kappa.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "specific_heat_ratio must be greater than 1, got {}",
            kappa
        )));
    }
    if !(expansion_ratio > 1.0) || !expansion_ratio.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "expansion_ratio must be greater than 1, got {}",
            expansion_ratio
        )));
    }
    if !(seed > 0.0) || !seed.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "mach_guess must be positive, got {}",
            seed
        )));
    }
    Ok(())
}

/// Supersonic exit Mach number for `expansion_ratio`, seeded with the
/// default guess.
pub fn solve_exit_mach(kappa: f64, expansion_ratio: f64) -> EngineResult<f64> {
    MachSolver::default()
        .solve(kappa, expansion_ratio, MACH_GUESS)
        .map(|solution| solution.mach)
}
