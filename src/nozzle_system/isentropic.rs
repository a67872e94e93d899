//! Closed-form isentropic relations for an ideal rocket nozzle.

/// Static pressure at the nozzle exit for exit Mach number `mach`.
pub fn exit_pressure(chamber_pressure: f64, kappa: f64, mach: f64) -> f64 {
    chamber_pressure / (1.0 + (kappa - 1.0) / 2.0 * mach.powi(2)).powf(kappa / (kappa - 1.0))
}

/// Exit Mach number at which the flow expands exactly to `ambient_pressure`.
pub fn optimal_mach(chamber_pressure: f64, ambient_pressure: f64, kappa: f64) -> f64 {
    let pressure_ratio = chamber_pressure / ambient_pressure;
    ((pressure_ratio.powf((kappa - 1.0) / kappa) - 1.0) * 2.0 / (kappa - 1.0)).sqrt()
}

/// Temperature function Γ(κ).
pub fn temperature_function(kappa: f64) -> f64 {
    kappa.sqrt() * (2.0 / (kappa + 1.0)).powf((kappa + 1.0) / (2.0 * (kappa - 1.0)))
}

/// Stagnation temperature in the chamber from the characteristic velocity.
pub fn chamber_temperature(characteristic_velocity: f64, kappa: f64, gas_constant: f64) -> f64 {
    (characteristic_velocity * temperature_function(kappa)).powi(2) / gas_constant
}

/// Exhaust velocity after expanding from `chamber_pressure` to `pressure`.
pub fn exhaust_velocity(
    kappa: f64,
    gas_constant: f64,
    chamber_temperature: f64,
    chamber_pressure: f64,
    pressure: f64,
) -> f64 {
    let expansion = 1.0 - (pressure / chamber_pressure).powf((kappa - 1.0) / kappa);
    (2.0 * kappa / (kappa - 1.0) * gas_constant * chamber_temperature * expansion).sqrt()
}

/// Area of a circle of diameter `diameter`.
pub fn circle_area(diameter: f64) -> f64 {
    diameter.powi(2) * std::f64::consts::PI / 4.0
}

/// Diameter of a circle of area `area`.
pub fn circle_diameter(area: f64) -> f64 {
    (4.0 * area / std::f64::consts::PI).sqrt()
}
