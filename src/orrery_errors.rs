use thiserror::Error;

use crate::constants::JulianCentury;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Eccentricity {eccentricity} out of range [0, 1) at T = {centuries} centuries")]
    EccentricityOutOfRange {
        eccentricity: f64,
        centuries: JulianCentury,
    },

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Central body chain of {0} contains a cycle")]
    CentralBodyCycle(String),

    #[error("Invalid sample count: {0} (at least one sample is required)")]
    InvalidSampleCount(usize),

    #[error("Invalid orbital element {name}: {value}")]
    InvalidElement { name: &'static str, value: f64 },

    #[error("Invalid orbital element table: {0}")]
    InvalidElementTable(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (
                EccentricityOutOfRange {
                    eccentricity: e1,
                    centuries: t1,
                },
                EccentricityOutOfRange {
                    eccentricity: e2,
                    centuries: t2,
                },
            ) => e1 == e2 && t1 == t2,
            (
                InvalidElement {
                    name: n1,
                    value: v1,
                },
                InvalidElement {
                    name: n2,
                    value: v2,
                },
            ) => n1 == n2 && (v1 == v2 || (v1.is_nan() && v2.is_nan())),
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (CentralBodyCycle(a), CentralBodyCycle(b)) => a == b,
            (InvalidSampleCount(a), InvalidSampleCount(b)) => a == b,
            (InvalidElementTable(a), InvalidElementTable(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,

            // Not comparable: equal if same variant
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
