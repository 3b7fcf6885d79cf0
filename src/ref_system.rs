//! # Orbital plane to reference frame
//!
//! Single shared routine turning a point of the orbital plane, given by its distance
//! to the focus and its true anomaly, into Cartesian coordinates of the ecliptic
//! reference frame centered on the central body.
//!
//! The perifocal frame has its X axis towards the periapsis and its Z axis along the
//! orbit normal. It is brought onto the reference frame by three active rotations:
//!
//! ```text
//! R = R_z(Ω) · R_x(i) · R_z(ω)
//! ```
//!
//! i.e. the argument of periapsis about the orbit normal, the inclination about the
//! line of nodes, then the longitude of the ascending node about the reference pole.
//!
//! Every caller that needs a point on an orbit (position query, apsides, path sampling)
//! goes through [`orbital_to_reference`].
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The rotation is **active** and counter-clockwise when looking down the axis
/// towards the origin.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians.
/// * `axis`: axis of rotation.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation matrix from the perifocal frame to the ecliptic reference frame.
///
/// Arguments
/// ---------
/// * `inclination`: `i` (radians).
/// * `ascending_node_longitude`: `Ω` (radians).
/// * `periapsis_argument`: `ω` (radians).
///
/// Return
/// ------
/// * `R_z(Ω) · R_x(i) · R_z(ω)`, such that `x_ref = R · x_perifocal`.
pub fn perifocal_to_ecliptic(
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}

/// Cartesian position in the reference frame of a point of the orbital plane.
///
/// Arguments
/// ---------
/// * `radius`: distance to the focus, in the unit of the semi-major axis.
/// * `true_anomaly`: `ν` (radians), angle from the periapsis seen from the focus.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`: orientation
///   angles `i`, `Ω`, `ω` (radians).
///
/// Return
/// ------
/// * The position vector in the reference frame, same unit as `radius`.
pub fn orbital_to_reference(
    radius: f64,
    true_anomaly: Radian,
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
) -> Vector3<f64> {
    let perifocal = Vector3::new(radius * true_anomaly.cos(), radius * true_anomaly.sin(), 0.0);
    perifocal_to_ecliptic(inclination, ascending_node_longitude, periapsis_argument) * perifocal
}
