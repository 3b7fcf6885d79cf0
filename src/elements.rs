//! # Reference orbital elements and secular propagation
//!
//! This module defines [`OrbitalElementSet`], the immutable per-body reference data
//! (elements at J2000.0 plus one linear rate per element), and [`propagate`], which
//! applies the secular rates to obtain the [`PropagatedElements`] valid at a given
//! number of Julian centuries since J2000.0.
//!
//! ## Periapsis convention
//!
//! Published tables give the orientation of the periapsis either as the
//! **argument of periapsis** `ω` (measured from the ascending node) or as the
//! **longitude of periapsis** `ϖ = Ω + ω`. [`OrbitalElementSet::new`] takes a
//! [`PeriapsisConvention`] and normalizes everything to `ω` once, at load time, so the
//! position code never has to know which convention the source used.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Angles: **degrees** (converted to radians only where the trigonometry happens)
//! - Rates: **per Julian century**
//!
//! Angles are not wrapped when stored or propagated; reduction to `[0, 2π)` happens
//! at use time to avoid accumulating rounding from repeated wrapping.
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Degree, JulianCentury},
    orrery_errors::OrreryError,
};

/// Linear secular rates, one per element, per Julian century.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRates {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
    pub mean_longitude: Degree,
}

/// Orientation of the periapsis as given by a source table.
///
/// Each variant carries the value at epoch and its rate per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeriapsisConvention {
    /// Argument of periapsis `ω`, measured from the ascending node.
    Argument { value: Degree, rate: Degree },
    /// Longitude of periapsis `ϖ = Ω + ω`, measured from the reference direction.
    Longitude { value: Degree, rate: Degree },
}

/// Keplerian reference elements of a body at J2000.0, with their secular rates.
///
/// The periapsis is always stored as the argument `ω`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElementSet {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
    pub mean_longitude: Degree,
    pub rates: ElementRates,
}

/// Elements after secular correction for one moment.
///
/// Same shape as [`OrbitalElementSet`] without the rates. Recomputed for every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagatedElements {
    /// Julian centuries since J2000.0 these elements are valid at.
    pub centuries: JulianCentury,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
    pub mean_longitude: Degree,
}

fn check_eccentricity(eccentricity: f64, centuries: JulianCentury) -> Result<(), OrreryError> {
    // NaN fails the range test as well
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(OrreryError::EccentricityOutOfRange {
            eccentricity,
            centuries,
        })
    }
}

/// Argument of periapsis `ω` and its rate from either convention.
fn normalize_periapsis(
    periapsis: PeriapsisConvention,
    ascending_node_longitude: Degree,
    ascending_node_rate: Degree,
) -> (Degree, Degree) {
    match periapsis {
        PeriapsisConvention::Argument { value, rate } => (value, rate),
        PeriapsisConvention::Longitude { value, rate } => (
            value - ascending_node_longitude,
            rate - ascending_node_rate,
        ),
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), OrreryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrreryError::InvalidElement { name, value })
    }
}

impl OrbitalElementSet {
    /// Build a reference element set, normalizing the periapsis convention.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis`, `eccentricity`, `inclination`, `ascending_node_longitude`,
    ///   `mean_longitude`: values at J2000.0 (AU, unitless, degrees).
    /// * `periapsis`: periapsis orientation in either convention.
    /// * `rates`: secular rates. Its `periapsis_argument` field is ignored and replaced by
    ///   the rate carried in `periapsis`, converted to the argument convention.
    ///
    /// Return
    /// ------
    /// * The element set, or
    ///   - [`OrreryError::EccentricityOutOfRange`] if `e ∉ [0, 1)` at epoch,
    ///   - [`OrreryError::InvalidElement`] if the semi-major axis is not strictly positive
    ///     or any value or rate is not finite.
    pub fn new(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis: PeriapsisConvention,
        mean_longitude: Degree,
        rates: ElementRates,
    ) -> Result<Self, OrreryError> {
        let elements = Self::from_parts(
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis,
            mean_longitude,
            rates,
        );
        elements.validate()?;
        Ok(elements)
    }

    /// Check the invariants [`OrbitalElementSet::new`] enforces, for sets built field by field.
    pub fn validate(&self) -> Result<(), OrreryError> {
        check_eccentricity(self.eccentricity, 0.0)?;
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return Err(OrreryError::InvalidElement {
                name: "semi_major_axis",
                value: self.semi_major_axis,
            });
        }

        let r = &self.rates;
        for (name, value) in [
            ("inclination", self.inclination),
            ("ascending_node_longitude", self.ascending_node_longitude),
            ("periapsis_argument", self.periapsis_argument),
            ("mean_longitude", self.mean_longitude),
            ("semi_major_axis_rate", r.semi_major_axis),
            ("eccentricity_rate", r.eccentricity),
            ("inclination_rate", r.inclination),
            ("ascending_node_longitude_rate", r.ascending_node_longitude),
            ("periapsis_argument_rate", r.periapsis_argument),
            ("mean_longitude_rate", r.mean_longitude),
        ] {
            check_finite(name, value)?;
        }
        Ok(())
    }

    /// Element set from trusted values: convention normalization only, no validation.
    pub(crate) fn from_parts(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis: PeriapsisConvention,
        mean_longitude: Degree,
        rates: ElementRates,
    ) -> Self {
        let (periapsis_argument, periapsis_argument_rate) = normalize_periapsis(
            periapsis,
            ascending_node_longitude,
            rates.ascending_node_longitude,
        );

        OrbitalElementSet {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
            mean_longitude,
            rates: ElementRates {
                periapsis_argument: periapsis_argument_rate,
                ..rates
            },
        }
    }

    /// Longitude of periapsis `ϖ = Ω + ω` at J2000.0 (degrees).
    pub fn periapsis_longitude(&self) -> Degree {
        self.ascending_node_longitude + self.periapsis_argument
    }
}

/// Apply the secular rates to the reference elements.
///
/// Arguments
/// ---------
/// * `elements`: reference elements at J2000.0.
/// * `centuries`: Julian centuries since J2000.0 (`T`).
///
/// Return
/// ------
/// * `value(T) = value_at_epoch + rate · T` for each element, or
///   [`OrreryError::EccentricityOutOfRange`] when the propagated eccentricity leaves
///   `[0, 1)`. The eccentricity is never clamped.
pub fn propagate(
    elements: &OrbitalElementSet,
    centuries: JulianCentury,
) -> Result<PropagatedElements, OrreryError> {
    let rates = &elements.rates;
    let eccentricity = elements.eccentricity + rates.eccentricity * centuries;
    check_eccentricity(eccentricity, centuries)?;

    Ok(PropagatedElements {
        centuries,
        semi_major_axis: elements.semi_major_axis + rates.semi_major_axis * centuries,
        eccentricity,
        inclination: elements.inclination + rates.inclination * centuries,
        ascending_node_longitude: elements.ascending_node_longitude
            + rates.ascending_node_longitude * centuries,
        periapsis_argument: elements.periapsis_argument + rates.periapsis_argument * centuries,
        mean_longitude: elements.mean_longitude + rates.mean_longitude * centuries,
    })
}

impl PropagatedElements {
    /// Longitude of periapsis `ϖ = Ω + ω` (degrees, unreduced).
    pub fn periapsis_longitude(&self) -> Degree {
        self.ascending_node_longitude + self.periapsis_argument
    }

    /// Mean anomaly `M = L − ϖ` (degrees, unreduced).
    pub fn mean_anomaly(&self) -> Degree {
        self.mean_longitude - self.periapsis_longitude()
    }
}

impl fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.rates;
        writeln!(f, "Orbital elements @ J2000.0 (rate per century)")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.8} AU ({:+.8})",
            self.semi_major_axis, r.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.8} ({:+.8})",
            self.eccentricity, r.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}° ({:+.6})",
            self.inclination, r.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}° ({:+.6})",
            self.ascending_node_longitude, r.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}° ({:+.6})",
            self.periapsis_argument, r.periapsis_argument
        )?;
        writeln!(
            f,
            "  L   (mean longitude)        = {:.6}° ({:+.6})",
            self.mean_longitude, r.mean_longitude
        )
    }
}
