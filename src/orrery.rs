//! # Orrery: the position engine façade
//!
//! This module defines the [`Orrery`](crate::orrery::Orrery) struct, the single entry point used by
//! the rendering layer. It wires together:
//!
//! 1. **Reference data**: a [`BodyCatalog`] loaded once at startup.
//! 2. **Solver settings**: a [`KeplerSolverConfig`] shared by every query.
//!
//! and exposes the three queries the visualization needs:
//!
//! - [`position_at`](crate::orrery::Orrery::position_at): per-frame body placement,
//! - [`sample_path`](crate::orrery::Orrery::sample_path): orbit path lines,
//! - [`periapsis_position`](crate::orrery::Orrery::periapsis_position) /
//!   [`apoapsis_position`](crate::orrery::Orrery::apoapsis_position): apsis markers.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use hifitime::Epoch;
//! use orrery::orrery::Orrery;
//! use orrery::position::PositionMode;
//!
//! let orrery = Orrery::default();
//! let now = Epoch::from_gregorian_utc_hms(2024, 3, 20, 3, 6, 0);
//!
//! let mars = orrery.position_at("mars", &now).unwrap();
//! let path = orrery.sample_path("mars", &now, 256, PositionMode::Elliptical).unwrap();
//! ```
//!
//! ## Notes
//!
//! - Every query is a pure function of its arguments and of the immutable catalog, so an
//!   [`Orrery`] can be shared between threads without locking.
//! - The engine never logs: failures are returned to the caller, who decides whether to
//!   skip the body, log, or substitute a fallback position.
use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    bodies::BodyCatalog,
    elements::{propagate, PropagatedElements},
    kepler::KeplerSolverConfig,
    orrery_errors::OrreryError,
    position::{position_in_mode, PositionMode},
    sampling,
    time::{centuries_since_j2000, julian_date},
};

#[derive(Debug, Clone)]
pub struct Orrery {
    catalog: BodyCatalog,
    solver: KeplerSolverConfig,
}

impl Default for Orrery {
    /// Engine over the built-in J2000 table with the default solver settings.
    fn default() -> Self {
        Orrery::new(BodyCatalog::j2000())
    }
}

impl Orrery {
    /// Construct a new [`Orrery`] over a catalog, with the default solver settings.
    pub fn new(catalog: BodyCatalog) -> Self {
        Orrery {
            catalog,
            solver: KeplerSolverConfig::default(),
        }
    }

    /// Replace the Kepler solver settings.
    pub fn with_solver_config(mut self, solver: KeplerSolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn solver_config(&self) -> &KeplerSolverConfig {
        &self.solver
    }

    /// Elements of `body` propagated to `moment`.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::UnknownBody`] if the body is not in the catalog.
    /// * [`OrreryError::EccentricityOutOfRange`] if the secular model leaves `[0, 1)` at `moment`.
    pub fn elements_at(
        &self,
        body: &str,
        moment: &Epoch,
    ) -> Result<PropagatedElements, OrreryError> {
        let entry = self.catalog.get(body)?;
        let t = centuries_since_j2000(julian_date(moment));
        propagate(&entry.elements, t)
    }

    /// Position of `body` at `moment`, relative to its central body (AU, ecliptic J2000).
    pub fn position_at(&self, body: &str, moment: &Epoch) -> Result<Vector3<f64>, OrreryError> {
        self.position_at_with_mode(body, moment, PositionMode::Elliptical)
    }

    /// Same as [`Orrery::position_at`] with an explicit position strategy.
    pub fn position_at_with_mode(
        &self,
        body: &str,
        moment: &Epoch,
        mode: PositionMode,
    ) -> Result<Vector3<f64>, OrreryError> {
        let elements = self.elements_at(body, moment)?;
        Ok(position_in_mode(&elements, mode, &self.solver))
    }

    /// Positions of every catalog body at `moment`, in key order.
    ///
    /// Each body carries its own result so one bad entry does not hide the others.
    pub fn positions_at(
        &self,
        moment: &Epoch,
        mode: PositionMode,
    ) -> Vec<(String, Result<Vector3<f64>, OrreryError>)> {
        self.catalog
            .keys()
            .map(|key| (key.to_string(), self.position_at_with_mode(key, moment, mode)))
            .collect()
    }

    /// Position of `body` relative to the Sun, summing the positions along its
    /// central-body chain (e.g. Moon + Earth).
    pub fn heliocentric_position_at(
        &self,
        body: &str,
        moment: &Epoch,
        mode: PositionMode,
    ) -> Result<Vector3<f64>, OrreryError> {
        let mut position = self.position_at_with_mode(body, moment, mode)?;
        for parent in self.catalog.central_chain(body)? {
            position += self.position_at_with_mode(&parent.key(), moment, mode)?;
        }
        Ok(position)
    }

    /// Periapsis of the orbit of `body` as it is at `moment`.
    pub fn periapsis_position(
        &self,
        body: &str,
        moment: &Epoch,
    ) -> Result<Vector3<f64>, OrreryError> {
        let elements = self.elements_at(body, moment)?;
        Ok(sampling::periapsis_position(&elements))
    }

    /// Apoapsis of the orbit of `body` as it is at `moment`.
    pub fn apoapsis_position(
        &self,
        body: &str,
        moment: &Epoch,
    ) -> Result<Vector3<f64>, OrreryError> {
        let elements = self.elements_at(body, moment)?;
        Ok(sampling::apoapsis_position(&elements))
    }

    /// Closed polyline of the orbit of `body` as it is at `moment`
    /// (`num_samples + 1` points, first and last identical).
    pub fn sample_path(
        &self,
        body: &str,
        moment: &Epoch,
        num_samples: usize,
        mode: PositionMode,
    ) -> Result<Vec<Vector3<f64>>, OrreryError> {
        let elements = self.elements_at(body, moment)?;
        sampling::sample_path(&elements, num_samples, mode, &self.solver)
    }

    /// Sidereal period of `body` in days, from Kepler's third law.
    pub fn orbital_period_days(&self, body: &str) -> Result<f64, OrreryError> {
        Ok(self.catalog.get(body)?.orbital_period_days())
    }
}
