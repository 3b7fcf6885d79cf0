//! # Special points and orbit paths
//!
//! - [`periapsis_position`] / [`apoapsis_position`]: closed forms at `ν = 0` (`E = 0`,
//!   `r = a(1−e)`) and `ν = π` (`E = π`, `r = a(1+e)`). No Kepler solve is needed.
//! - [`sample_path`]: closed polyline of one full orbit, for path-line rendering.
//!
//! All of them go through the shared [`orbital_to_reference`] transform.
use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::{
    constants::{DAYS_PER_JULIAN_YEAR, DPI, RADEG},
    elements::PropagatedElements,
    kepler::KeplerSolverConfig,
    orrery_errors::OrreryError,
    position::{position_from_elements, PositionMode},
    ref_system::orbital_to_reference,
};

fn apsis(elements: &PropagatedElements, true_anomaly: f64, radius: f64) -> Vector3<f64> {
    orbital_to_reference(
        radius,
        true_anomaly,
        elements.inclination * RADEG,
        elements.ascending_node_longitude * RADEG,
        elements.periapsis_argument * RADEG,
    )
}

/// Position of the periapsis, at distance `a(1−e)` from the focus.
pub fn periapsis_position(elements: &PropagatedElements) -> Vector3<f64> {
    apsis(
        elements,
        0.0,
        elements.semi_major_axis * (1.0 - elements.eccentricity),
    )
}

/// Position of the apoapsis, at distance `a(1+e)` from the focus.
pub fn apoapsis_position(elements: &PropagatedElements) -> Vector3<f64> {
    apsis(
        elements,
        PI,
        elements.semi_major_axis * (1.0 + elements.eccentricity),
    )
}

/// Sidereal period from Kepler's third law.
///
/// Arguments
/// ---------
/// * `semi_major_axis`: in AU.
/// * `central_mass`: mass of the central body in solar masses.
///
/// Return
/// ------
/// * The period in days; `a = 1 AU` around one solar mass gives 365.25 days.
pub fn orbital_period_days(semi_major_axis: f64, central_mass: f64) -> f64 {
    DAYS_PER_JULIAN_YEAR * (semi_major_axis.powi(3) / central_mass).sqrt()
}

/// Sample one full orbit as a closed polyline.
///
/// Arguments
/// ---------
/// * `elements`: elements at the moment the path is drawn for. They are held fixed over
///   the orbit so the path is the osculating ellipse of that moment.
/// * `num_samples`: number of distinct points; the returned vector has `num_samples + 1`
///   points, the last one equal to the first.
/// * `mode`:
///   - [`PositionMode::Elliptical`]: evenly spaced moments over one orbital period, i.e.
///     mean longitude advanced by `2π·k/num_samples`, each evaluated through
///     [`position_from_elements`].
///   - [`PositionMode::Circular`]: true anomaly uniform in `[0, 2π)` on a flat circle of
///     radius `a` in the reference plane.
/// * `config`: Kepler solver settings.
///
/// Return
/// ------
/// * The polyline, or [`OrreryError::InvalidSampleCount`] when `num_samples == 0`.
pub fn sample_path(
    elements: &PropagatedElements,
    num_samples: usize,
    mode: PositionMode,
    config: &KeplerSolverConfig,
) -> Result<Vec<Vector3<f64>>, OrreryError> {
    if num_samples == 0 {
        return Err(OrreryError::InvalidSampleCount(num_samples));
    }

    let step = DPI / num_samples as f64;
    let mut path: Vec<Vector3<f64>> = (0..num_samples)
        .map(|k| match mode {
            PositionMode::Elliptical => {
                let shifted = PropagatedElements {
                    mean_longitude: elements.mean_longitude + (step * k as f64) / RADEG,
                    ..*elements
                };
                position_from_elements(&shifted, config)
            }
            PositionMode::Circular => {
                let nu = step * k as f64;
                let a = elements.semi_major_axis;
                Vector3::new(a * nu.cos(), a * nu.sin(), 0.0)
            }
        })
        .collect();

    path.push(path[0]);
    Ok(path)
}
