use approx::assert_relative_eq;
use hifitime::{Epoch, TimeScale};
use nalgebra::Vector3;
use orrery::{
    constants::RADEG, elements::PropagatedElements, ref_system::orbital_to_reference,
};

pub fn j2000() -> Epoch {
    Epoch::from_gregorian(2000, 1, 1, 12, 0, 0, 0, TimeScale::TT)
}

/// Check that `p` lies on the ellipse described by `elements`: the distances to both
/// foci must add up to `2a`.
pub fn assert_on_ellipse(p: &Vector3<f64>, elements: &PropagatedElements, max_relative: f64) {
    let periapsis_dir = orbital_to_reference(
        1.0,
        0.0,
        elements.inclination * RADEG,
        elements.ascending_node_longitude * RADEG,
        elements.periapsis_argument * RADEG,
    );
    let second_focus = -2.0 * elements.semi_major_axis * elements.eccentricity * periapsis_dir;

    assert_relative_eq!(
        p.norm() + (p - second_focus).norm(),
        2.0 * elements.semi_major_axis,
        max_relative = max_relative
    );
}
