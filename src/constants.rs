//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, and
//! **unit aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians)
//! - Reference epoch J2000.0
//! - Day, year and century lengths used by the secular-rate model
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000_JD: JulianDate = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Time elapsed since J2000.0, in Julian centuries
pub type JulianCentury = f64;
