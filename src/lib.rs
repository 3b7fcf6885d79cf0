//! Keplerian position engine for a solar-system orrery.
//!
//! Given a moment in time, [`orrery::Orrery`] places every body of a [`bodies::BodyCatalog`]
//! on its secularly-propagated Keplerian ellipse, samples closed orbit paths and computes
//! the apsis markers used by the renderer.
pub mod bodies;
pub mod constants;
pub mod elements;
pub mod kepler;
pub mod orrery;
pub mod orrery_errors;
pub mod position;
pub mod ref_system;
pub mod sampling;
pub mod time;
