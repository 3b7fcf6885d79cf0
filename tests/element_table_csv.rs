use approx::assert_abs_diff_eq;
use hifitime::{Epoch, TimeScale};

use orrery::{
    bodies::BodyCatalog, orrery::Orrery, orrery_errors::OrreryError, position::PositionMode,
};

mod common;
use common::j2000;

#[test]
fn test_loaded_table_matches_builtin() {
    let loaded = Orrery::new(BodyCatalog::from_csv_path("tests/data/inner_planets.csv").unwrap());
    let builtin = Orrery::default();

    assert_eq!(
        loaded.catalog().keys().collect::<Vec<_>>(),
        vec!["earth", "mars", "mercury", "moon", "venus"]
    );

    let t = Epoch::from_gregorian(2019, 6, 21, 15, 54, 0, 0, TimeScale::TT);
    for body in loaded.catalog().keys() {
        let a = loaded.position_at(body, &t).unwrap();
        let b = builtin.position_at(body, &t).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn test_loaded_moon_chain() {
    let orrery = Orrery::new(BodyCatalog::from_csv_path("tests/data/inner_planets.csv").unwrap());
    let t = j2000();

    let helio = orrery
        .heliocentric_position_at("Moon", &t, PositionMode::Elliptical)
        .unwrap();
    let earth = orrery.position_at("earth", &t).unwrap();
    let distance = (helio - earth).norm();
    assert!(distance > 0.0024 && distance < 0.0028, "moon at {distance} AU");
}

#[test]
fn test_missing_table() {
    let err = BodyCatalog::from_csv_path("tests/data/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, OrreryError::IoError(_)));
}

#[test]
fn test_missing_column() {
    let data = "name,a,e\nMars,1.5,0.09\n";
    let err = BodyCatalog::from_csv_reader(data.as_bytes()).unwrap_err();
    assert!(matches!(err, OrreryError::CsvError(_)));
}
