// src/analytics/mean_field.rs
//! Closed-form reference solutions
//!
//! # Mathematical Foundation
//!
//! Dropping noise and diffusion from the DP-Langevin equation leaves the
//! logistic mean-field equation
//! ```text
//! dρ/dt = aρ - bρ²
//! ```
//! with solution
//! ```text
//! ρ(t) = aρ₀e^(at) / (a + bρ₀(e^(at) - 1))
//! ```
//! which tends to `a/b` for `a > 0` and decays to zero for `a ≤ 0`.
//! At `a = 0` it reduces to `ρ₀ / (1 + bρ₀t)`.

/// Pure decay `dρ/dt = -rate ρ`
///
/// # Formula
/// ```text
/// ρ(t) = ρ₀ e^(-rate t)
/// ```
pub fn exponential_decay(rho0: f64, rate: f64, t: f64) -> f64 {
    rho0 * (-rate * t).exp()
}

/// Logistic mean-field density at time `t`
///
/// # Parameters
/// - `rho0`: Initial density (≥ 0)
/// - `linear`: Linear coefficient `a`
/// - `quadratic`: Quadratic coefficient `b` (≥ 0)
/// - `t`: Time
pub fn logistic_mean_field(rho0: f64, linear: f64, quadratic: f64, t: f64) -> f64 {
    if linear.abs() * t < 1e-12 {
        return rho0 / (1.0 + quadratic * rho0 * t);
    }
    // e^(at) - 1 via expm1 keeps precision for small at
    let growth = (linear * t).exp_m1();
    linear * rho0 * (growth + 1.0) / (linear + quadratic * rho0 * growth)
}
