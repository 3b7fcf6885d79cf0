//! # Kepler equation solver
//!
//! Solves the elliptic Kepler equation `M = E − e·sin(E)` for the eccentric anomaly `E`
//! with a Newton–Raphson iteration, and provides the anomaly helpers that turn `E`
//! into the true anomaly and the heliocentric distance.
//!
//! ## Convergence policy
//!
//! The iteration stops when the Newton step falls below
//! [`KeplerSolverConfig::tolerance`] or after [`KeplerSolverConfig::max_iterations`]
//! steps. Reaching the cap is **not** an error: the best estimate is returned together
//! with `converged = false` and its residual, so a frame loop never stalls on a
//! pathological orbit.
//!
//! With the default cap of 10 iterations the solver converges for every `e ≤ 0.95`.
use crate::constants::{Radian, DPI};

/// Default stopping threshold on `|ΔE|`, in radians.
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1e-6;

/// Default iteration cap of the Newton–Raphson loop.
pub const DEFAULT_KEPLER_MAX_ITERATIONS: usize = 10;

/// Tuning knobs of [`solve_eccentric_anomaly`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolverConfig {
    /// Stop when the Newton step `|ΔE|` is below this value (radians).
    pub tolerance: f64,
    /// Upper bound on the number of Newton steps.
    pub max_iterations: usize,
}

impl Default for KeplerSolverConfig {
    fn default() -> Self {
        KeplerSolverConfig {
            tolerance: DEFAULT_KEPLER_TOLERANCE,
            max_iterations: DEFAULT_KEPLER_MAX_ITERATIONS,
        }
    }
}

/// Outcome of a Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly `E` (radians).
    pub eccentric_anomaly: Radian,
    /// Number of Newton steps performed.
    pub iterations: usize,
    /// `|M − (E − e·sin E)|` at the returned `E`.
    pub residual: f64,
    /// `true` if the step criterion was met before the iteration cap.
    pub converged: bool,
}

/// Return the principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Solve `M = E − e·sin(E)` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` (radians), reduced to `[0, 2π)` internally.
/// * `eccentricity`: eccentricity `e ∈ [0, 1)`.
/// * `config`: tolerance and iteration cap.
///
/// Return
/// ------
/// * A [`KeplerSolution`]; inspect `converged`/`residual` for the quality of the estimate.
///
/// Notes
/// -----
/// * The initial guess is `E₀ = M`. For `e = 0` the first Newton step is exactly zero,
///   so `E = M` after one iteration.
/// * Each Newton iterate is kept inside `[M − e, M + e]`, and the iterate with the
///   smallest residual is returned, so the answer is never worse than `E₀` even for
///   `e → 1`.
pub fn solve_eccentric_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
    config: &KeplerSolverConfig,
) -> KeplerSolution {
    let m = principal_angle(mean_anomaly);
    let e = eccentricity;

    // |E − M| = e·|sin E| ≤ e, so the root lies in [M − e, M + e]
    let (lower, upper) = (m - e, m + e);
    let residual_at = |ecc_anom: f64| (m - (ecc_anom - e * ecc_anom.sin())).abs();

    let mut ecc_anom = m;
    let mut best = (ecc_anom, residual_at(ecc_anom));
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        let newton = ecc_anom - (ecc_anom - e * ecc_anom.sin() - m) / (1.0 - e * ecc_anom.cos());
        let next = newton.max(lower).min(upper);
        let step = next - ecc_anom;
        ecc_anom = next;
        iterations += 1;

        let residual = residual_at(ecc_anom);
        if residual <= best.1 {
            best = (ecc_anom, residual);
        }

        if step.abs() < config.tolerance {
            converged = true;
            break;
        }
    }

    KeplerSolution {
        eccentric_anomaly: best.0,
        iterations,
        residual: best.1,
        converged,
    }
}

/// True anomaly from the eccentric anomaly.
///
/// Uses the half-angle form `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`, which stays
/// well conditioned near `E = π`.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = 0.5 * eccentric_anomaly;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Distance to the focus from the eccentric anomaly: `r = a·(1 − e·cos E)`.
pub fn radius(semi_major_axis: f64, eccentricity: f64, eccentric_anomaly: Radian) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}
