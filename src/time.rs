//! # Time conversion
//!
//! Maps an absolute moment ([`hifitime::Epoch`]) to a Julian Date and to the number
//! of Julian centuries elapsed since J2000.0, the argument of the secular-rate model.
//!
//! Julian Dates are expressed in the **TT** time scale: it is continuous (no leap
//! seconds), so equal durations always map to equal day counts.
use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::{
    constants::{JulianCentury, JulianDate, DAYS_PER_JULIAN_CENTURY, J2000_JD, JDTOMJD},
    orrery_errors::OrreryError,
};

/// Transformation from an epoch to a Julian Date (TT scale)
///
/// Argument
/// --------
/// * `epoch`: the moment to convert
///
/// Return
/// ------
/// * the Julian Date of `epoch`, in days
pub fn julian_date(epoch: &Epoch) -> JulianDate {
    // Going through the MJD keeps sub-second resolution before the large offset is added.
    epoch.to_mjd_tt_days() + JDTOMJD
}

/// Transformation from a Julian Date (TT scale) to an epoch
///
/// Argument
/// --------
/// * `jd`: a Julian Date in the TT scale
///
/// Return
/// ------
/// * the corresponding [`Epoch`]
pub fn epoch_from_julian_date(jd: JulianDate) -> Epoch {
    Epoch::from_mjd_in_time_scale(jd - JDTOMJD, TimeScale::TT)
}

/// Number of Julian centuries elapsed since J2000.0
///
/// Argument
/// --------
/// * `jd`: a Julian Date in the TT scale
///
/// Return
/// ------
/// * `T = (jd - 2451545.0) / 36525`, negative before J2000.0
pub fn centuries_since_j2000(jd: JulianDate) -> JulianCentury {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Transformation from a date string (e.g. `2024-03-20T03:06:00` or
/// `2024-03-20T03:06:00 TT`) to an epoch.
///
/// Strings without an explicit time scale are read as UTC.
pub fn date_to_epoch(date: &str) -> Result<Epoch, OrreryError> {
    Epoch::from_str(date.trim()).map_err(|err| OrreryError::InvalidDate(format!("{date}: {err}")))
}
