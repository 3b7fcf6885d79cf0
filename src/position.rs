//! # Position from propagated elements
//!
//! Turns a set of [`PropagatedElements`] into a Cartesian position in the ecliptic frame
//! of the central body:
//!
//! 1. `M = (L − ϖ) mod 2π`
//! 2. `E` from Kepler's equation ([`solve_eccentric_anomaly`])
//! 3. `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`, `r = a·(1 − e·cos E)`
//! 4. [`orbital_to_reference`]`(r, ν, i, Ω, ω)`
//!
//! A lower-fidelity **circular** strategy is also available: the body is placed on a
//! circle of radius `a` in the reference plane, at an angle equal to its mean longitude.
//! The caller picks the strategy per call with [`PositionMode`].
use nalgebra::Vector3;

use crate::{
    constants::RADEG,
    elements::PropagatedElements,
    kepler::{
        principal_angle, radius, solve_eccentric_anomaly, true_anomaly, KeplerSolution,
        KeplerSolverConfig,
    },
    ref_system::orbital_to_reference,
};

/// Position strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Full Keplerian ellipse, inclined and eccentric.
    #[default]
    Elliptical,
    /// Flat circle of radius `a` in the reference plane.
    Circular,
}

/// Reduce an unreduced angle in degrees and convert it to radians in `[0, 2π)`.
pub(crate) fn reduced_radians(angle: f64) -> f64 {
    principal_angle(angle.rem_euclid(360.0) * RADEG)
}

/// Elliptical position together with the Kepler solution it was derived from.
///
/// Useful to callers that want to inspect `converged`/`residual` for extreme eccentricities.
pub fn position_with_solution(
    elements: &PropagatedElements,
    config: &KeplerSolverConfig,
) -> (Vector3<f64>, KeplerSolution) {
    let e = elements.eccentricity;
    let mean_anomaly = reduced_radians(elements.mean_anomaly());

    let solution = solve_eccentric_anomaly(mean_anomaly, e, config);
    let nu = true_anomaly(solution.eccentric_anomaly, e);
    let r = radius(elements.semi_major_axis, e, solution.eccentric_anomaly);

    let position = orbital_to_reference(
        r,
        nu,
        elements.inclination * RADEG,
        elements.ascending_node_longitude * RADEG,
        elements.periapsis_argument * RADEG,
    );
    (position, solution)
}

/// Elliptical position of a body from its propagated elements (AU, ecliptic frame).
pub fn position_from_elements(
    elements: &PropagatedElements,
    config: &KeplerSolverConfig,
) -> Vector3<f64> {
    position_with_solution(elements, config).0
}

/// Circular-approximation position: radius `a`, angle = mean longitude, `z = 0`.
pub fn circular_position(elements: &PropagatedElements) -> Vector3<f64> {
    let angle = reduced_radians(elements.mean_longitude);
    let a = elements.semi_major_axis;
    Vector3::new(a * angle.cos(), a * angle.sin(), 0.0)
}

/// Position of a body with the requested strategy.
pub fn position_in_mode(
    elements: &PropagatedElements,
    mode: PositionMode,
    config: &KeplerSolverConfig,
) -> Vector3<f64> {
    match mode {
        PositionMode::Elliptical => position_from_elements(elements, config),
        PositionMode::Circular => circular_position(elements),
    }
}

#[cfg(test)]
pub(crate) mod position_test {
    use super::*;
    use crate::elements::{elements_test::earth_like, propagate};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// Sum of the distances from `p` to both foci of the ellipse described by `elements`.
    pub(crate) fn focal_sum(p: &Vector3<f64>, elements: &PropagatedElements) -> f64 {
        let periapsis_dir = orbital_to_reference(
            1.0,
            0.0,
            elements.inclination * RADEG,
            elements.ascending_node_longitude * RADEG,
            elements.periapsis_argument * RADEG,
        );
        let second_focus = -2.0 * elements.semi_major_axis * elements.eccentricity * periapsis_dir;
        p.norm() + (p - second_focus).norm()
    }

    #[test]
    fn test_earth_at_j2000() {
        let earth = propagate(&earth_like(), 0.0).unwrap();
        let p = position_from_elements(&earth, &KeplerSolverConfig::default());

        // Heliocentric ecliptic J2000 coordinates of the Earth on 2000-01-01 12:00 TDB.
        let published = Vector3::new(-0.1771354, 0.9672416, -0.0000040);
        assert!((p - published).norm() < 1e-3, "computed {p}");
    }

    #[test]
    fn test_focal_property() {
        let config = KeplerSolverConfig::default();
        for t in [-2.0, -0.5, 0.0, 0.123, 0.77, 1.5] {
            let earth = propagate(&earth_like(), t).unwrap();
            let p = position_from_elements(&earth, &config);
            assert_relative_eq!(
                focal_sum(&p, &earth),
                2.0 * earth.semi_major_axis,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_circular_orbit_radius() {
        let config = KeplerSolverConfig::default();
        let mut elements = propagate(&earth_like(), 0.0).unwrap();
        elements.eccentricity = 0.0;

        for k in 0..24 {
            elements.mean_longitude = 15.0 * k as f64;
            let p = position_from_elements(&elements, &config);
            assert_relative_eq!(p.norm(), elements.semi_major_axis, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_solution_is_reported() {
        let earth = propagate(&earth_like(), 0.4).unwrap();
        let (p, solution) = position_with_solution(&earth, &KeplerSolverConfig::default());

        assert!(solution.converged);
        assert!(solution.residual < 1e-6);
        assert_eq!(p, position_from_elements(&earth, &KeplerSolverConfig::default()));
    }

    #[test]
    fn test_circular_mode() {
        let earth = propagate(&earth_like(), 0.3).unwrap();
        let p = position_in_mode(&earth, PositionMode::Circular, &KeplerSolverConfig::default());

        assert_eq!(p.z, 0.0);
        assert_relative_eq!(p.norm(), earth.semi_major_axis, max_relative = 1e-12);
        assert_abs_diff_eq!(
            principal_angle(p.y.atan2(p.x)),
            reduced_radians(earth.mean_longitude),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_reduced_radians() {
        use std::f64::consts::{FRAC_PI_4, PI};

        assert_abs_diff_eq!(reduced_radians(-90.0), 1.5 * PI, epsilon = 1e-15);
        assert_abs_diff_eq!(reduced_radians(3600.0 + 45.0), FRAC_PI_4, epsilon = 1e-12);
        assert_eq!(reduced_radians(720.0), 0.0);
    }
}
