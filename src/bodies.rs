//! # Body catalog
//!
//! Static reference data: the orbital elements of every body the engine can place,
//! keyed by a lower-case name (`"earth"`, `"moon"`, …).
//!
//! The catalog is built once at startup, either from the built-in J2000 table
//! ([`BodyCatalog::j2000`]) or from a CSV file ([`BodyCatalog::from_csv_reader`]), and is
//! never mutated afterwards.
//!
//! Each entry names its **central body**: `None` means the Sun, otherwise the key of
//! another catalog entry (e.g. the Moon orbits `"earth"`). Positions computed from an
//! entry's elements are relative to that central body.
//!
//! ## CSV layout
//!
//! ```text
//! name,central_body,central_mass,a,a_rate,e,e_rate,i,i_rate,node,node_rate,periapsis_kind,periapsis,periapsis_rate,mean_longitude,mean_longitude_rate
//! Earth,,,1.00000261,0.00000562,0.01671123,-0.00004392,-0.00001531,-0.01294668,0.0,0.0,longitude,102.93768193,0.32327364,100.46457166,35999.37244981
//! ```
//!
//! `central_body` and `central_mass` (solar masses, default 1) may be left empty or omitted;
//! `periapsis_kind` is `longitude` (ϖ) or `argument` (ω). Lines starting with `#` are ignored.
use std::{fs::File, io::Read, path::Path};

use ahash::AHashMap;
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    constants::{AstronomicalUnit, Degree},
    elements::{ElementRates, OrbitalElementSet, PeriapsisConvention},
    orrery_errors::OrreryError,
    sampling::orbital_period_days,
};

/// Mass of the Earth–Moon system in solar masses.
pub const EARTH_MOON_MASS: f64 = 3.040_432e-6;

/// One body of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Display name, e.g. `"Earth"`.
    pub name: String,
    /// Key of the central body, `None` for the Sun.
    pub central_body: Option<String>,
    /// Mass of the central body in solar masses, used by Kepler's third law.
    pub central_mass: f64,
    pub elements: OrbitalElementSet,
}

impl CatalogEntry {
    pub fn new(
        name: &str,
        central_body: Option<&str>,
        central_mass: f64,
        elements: OrbitalElementSet,
    ) -> Self {
        CatalogEntry {
            name: name.to_string(),
            central_body: central_body.map(body_key),
            central_mass,
            elements,
        }
    }

    /// Lookup key of this entry.
    pub fn key(&self) -> String {
        body_key(&self.name)
    }

    /// Sidereal period at the reference semi-major axis (days).
    pub fn orbital_period_days(&self) -> f64 {
        orbital_period_days(self.elements.semi_major_axis, self.central_mass)
    }
}

/// Normalized lookup key of a body name.
pub fn body_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Immutable table of reference elements.
#[derive(Debug, Clone, Default)]
pub struct BodyCatalog {
    entries: AHashMap<String, CatalogEntry>,
}

impl BodyCatalog {
    /// Build a catalog from a list of entries.
    ///
    /// Return
    /// ------
    /// * The catalog, or an error if a key is empty or duplicated, a central mass is not
    ///   strictly positive, a central body is not part of the catalog
    ///   ([`OrreryError::InvalidElementTable`]), the elements of an entry break their
    ///   invariants ([`OrbitalElementSet::validate`]), or the central-body chain loops
    ///   ([`OrreryError::CentralBodyCycle`]).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, OrreryError> {
        let mut map = AHashMap::with_capacity(entries.len());
        for entry in entries {
            let key = entry.key();
            if key.is_empty() {
                return Err(OrreryError::InvalidElementTable("empty body name".into()));
            }
            if !(entry.central_mass.is_finite() && entry.central_mass > 0.0) {
                return Err(OrreryError::InvalidElementTable(format!(
                    "{}: central mass must be positive, got {}",
                    entry.name, entry.central_mass
                )));
            }
            entry.elements.validate()?;
            if map.insert(key.clone(), entry).is_some() {
                return Err(OrreryError::InvalidElementTable(format!("duplicate body {key}")));
            }
        }

        let catalog = BodyCatalog { entries: map };
        for entry in catalog.entries.values() {
            if let Some(parent) = &entry.central_body {
                if !catalog.entries.contains_key(parent) {
                    return Err(OrreryError::InvalidElementTable(format!(
                        "central body {parent} of {} is not in the table",
                        entry.name
                    )));
                }
            }
        }
        for key in catalog.entries.keys() {
            catalog.central_chain(key)?;
        }

        Ok(catalog)
    }

    /// Built-in table: planets and Pluto from the JPL approximate elements
    /// (Standish, valid 1800 AD – 2050 AD), the Moon from its mean geocentric elements.
    ///
    /// Positions are heliocentric ecliptic J2000 for the planets (the "earth" entry
    /// is the Earth–Moon barycenter) and geocentric ecliptic for the Moon.
    pub fn j2000() -> Self {
        // a, da, e, de, i, di, Ω, dΩ, ϖ, dϖ, L, dL
        #[rustfmt::skip]
        let planets: [(&str, [f64; 12]); 9] = [
            ("Mercury", [0.38709927, 0.00000037, 0.20563593, 0.00001906, 7.00497902, -0.00594749, 48.33076593, -0.12534081, 77.45779628, 0.16047689, 252.25032350, 149472.67411175]),
            ("Venus", [0.72333566, 0.00000390, 0.00677672, -0.00004107, 3.39467605, -0.00078890, 76.67984255, -0.27769418, 131.60246718, 0.00268329, 181.97909950, 58517.81538729]),
            ("Earth", [1.00000261, 0.00000562, 0.01671123, -0.00004392, -0.00001531, -0.01294668, 0.0, 0.0, 102.93768193, 0.32327364, 100.46457166, 35999.37244981]),
            ("Mars", [1.52371034, 0.00001847, 0.09339410, 0.00007882, 1.84969142, -0.00813131, 49.55953891, -0.29257343, -23.94362959, 0.44441088, -4.55343205, 19140.30268499]),
            ("Jupiter", [5.20288700, -0.00011607, 0.04838624, -0.00013253, 1.30439695, -0.00183714, 100.47390909, 0.20469106, 14.72847983, 0.21252668, 34.39644051, 3034.74612775]),
            ("Saturn", [9.53667594, -0.00125060, 0.05386179, -0.00050991, 2.48599187, 0.00193609, 113.66242448, -0.28867794, 92.59887831, -0.41897216, 49.95424423, 1222.49362201]),
            ("Uranus", [19.18916464, -0.00196176, 0.04725744, -0.00004397, 0.77263783, -0.00242939, 74.01692503, 0.04240589, 170.95427630, 0.40805281, 313.23810451, 428.48202785]),
            ("Neptune", [30.06992276, 0.00026291, 0.00859048, 0.00005105, 1.77004347, 0.00035372, 131.78422574, -0.00508664, 44.96476227, -0.32241464, -55.12002969, 218.45945325]),
            ("Pluto", [39.48211675, -0.00031596, 0.24882730, 0.00005170, 17.14001206, 0.00004818, 110.30393684, -0.01183482, 224.06891629, -0.04062942, 238.92903833, 145.20780515]),
        ];

        let mut entries = planets
            .iter()
            .map(|(name, [a, da, e, de, i, di, node, dnode, lp, dlp, l, dl])| {
                let elements = table_elements(
                    *a, *da, *e, *de, *i, *di, *node, *dnode, *lp, *dlp, *l, *dl,
                );
                CatalogEntry::new(name, None, 1.0, elements)
            })
            .collect_vec();

        // a = 384 400 km
        let moon = table_elements(
            0.00256955529, 0.0, 0.0549006, 0.0, 5.145396, 0.0, 125.0445479, -1934.1362891,
            83.3530513, 4069.0137287, 218.3164477, 481267.88123421,
        );
        entries.push(CatalogEntry::new("Moon", Some("earth"), EARTH_MOON_MASS, moon));

        let map = entries.into_iter().map(|entry| (entry.key(), entry)).collect();
        BodyCatalog { entries: map }
    }

    /// Load a catalog from CSV data (see the module documentation for the layout).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, OrreryError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in rdr.deserialize() {
            let row: ElementRow = record?;
            entries.push(row.into_entry()?);
        }

        Self::from_entries(entries)
    }

    /// Load a catalog from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, OrreryError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Look up a body by name (case insensitive).
    pub fn get(&self, body: &str) -> Result<&CatalogEntry, OrreryError> {
        self.entries
            .get(&body_key(body))
            .ok_or_else(|| OrreryError::UnknownBody(body.to_string()))
    }

    /// Keys of all bodies, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().sorted().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chain of central bodies of `body`, nearest first, excluding the Sun.
    ///
    /// For the Moon this is `["earth"]`, for a planet it is empty.
    pub fn central_chain(&self, body: &str) -> Result<Vec<&CatalogEntry>, OrreryError> {
        let mut chain = Vec::new();
        let mut current = self.get(body)?;

        while let Some(parent) = &current.central_body {
            if chain.len() >= self.entries.len() {
                return Err(OrreryError::CentralBodyCycle(body.to_string()));
            }
            current = self.get(parent)?;
            chain.push(current);
        }

        Ok(chain)
    }
}

#[allow(clippy::too_many_arguments)]
fn table_elements(
    a: AstronomicalUnit,
    a_rate: AstronomicalUnit,
    e: f64,
    e_rate: f64,
    i: Degree,
    i_rate: Degree,
    node: Degree,
    node_rate: Degree,
    periapsis_longitude: Degree,
    periapsis_longitude_rate: Degree,
    mean_longitude: Degree,
    mean_longitude_rate: Degree,
) -> OrbitalElementSet {
    let periapsis = PeriapsisConvention::Longitude {
        value: periapsis_longitude,
        rate: periapsis_longitude_rate,
    };
    let rates = ElementRates {
        semi_major_axis: a_rate,
        eccentricity: e_rate,
        inclination: i_rate,
        ascending_node_longitude: node_rate,
        periapsis_argument: 0.0,
        mean_longitude: mean_longitude_rate,
    };
    let elements = OrbitalElementSet::from_parts(a, e, i, node, periapsis, mean_longitude, rates);
    debug_assert!(elements.validate().is_ok());
    elements
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PeriapsisKind {
    Longitude,
    Argument,
}

#[derive(Debug, Deserialize)]
struct ElementRow {
    name: String,
    #[serde(default)]
    central_body: Option<String>,
    #[serde(default)]
    central_mass: Option<f64>,
    a: f64,
    a_rate: f64,
    e: f64,
    e_rate: f64,
    i: f64,
    i_rate: f64,
    node: f64,
    node_rate: f64,
    periapsis_kind: PeriapsisKind,
    periapsis: f64,
    periapsis_rate: f64,
    mean_longitude: f64,
    mean_longitude_rate: f64,
}

impl ElementRow {
    fn into_entry(self) -> Result<CatalogEntry, OrreryError> {
        let periapsis = match self.periapsis_kind {
            PeriapsisKind::Longitude => PeriapsisConvention::Longitude {
                value: self.periapsis,
                rate: self.periapsis_rate,
            },
            PeriapsisKind::Argument => PeriapsisConvention::Argument {
                value: self.periapsis,
                rate: self.periapsis_rate,
            },
        };
        let rates = ElementRates {
            semi_major_axis: self.a_rate,
            eccentricity: self.e_rate,
            inclination: self.i_rate,
            ascending_node_longitude: self.node_rate,
            periapsis_argument: 0.0,
            mean_longitude: self.mean_longitude_rate,
        };

        let elements = OrbitalElementSet::new(
            self.a,
            self.e,
            self.i,
            self.node,
            periapsis,
            self.mean_longitude,
            rates,
        )?;

        let central_body = self.central_body.filter(|c| !c.trim().is_empty());
        Ok(CatalogEntry::new(
            &self.name,
            central_body.as_deref(),
            self.central_mass.unwrap_or(1.0),
            elements,
        ))
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "name,central_body,central_mass,a,a_rate,e,e_rate,i,i_rate,node,node_rate,periapsis_kind,periapsis,periapsis_rate,mean_longitude,mean_longitude_rate\n";

    #[test]
    fn test_builtin_table() {
        let catalog = BodyCatalog::j2000();

        assert_eq!(catalog.len(), 10);
        assert_eq!(
            catalog.keys().collect_vec(),
            vec![
                "earth", "jupiter", "mars", "mercury", "moon", "neptune", "pluto", "saturn",
                "uranus", "venus"
            ]
        );

        let earth = catalog.get("Earth").unwrap();
        assert_eq!(earth.central_body, None);
        assert_relative_eq!(
            earth.elements.periapsis_longitude(),
            102.93768193,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_moon_orbits_earth() {
        let catalog = BodyCatalog::j2000();
        let chain = catalog.central_chain("moon").unwrap();

        assert_eq!(chain.iter().map(|e| e.key()).collect_vec(), vec!["earth"]);
        assert!(catalog.central_chain("mars").unwrap().is_empty());
        assert_relative_eq!(
            catalog.get("moon").unwrap().orbital_period_days(),
            27.32,
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_unknown_body() {
        let catalog = BodyCatalog::j2000();
        assert_eq!(
            catalog.get("Vulcan").unwrap_err(),
            OrreryError::UnknownBody("Vulcan".into())
        );
    }

    #[test]
    fn test_from_csv() {
        let data = format!(
            "{HEADER}\
# comment lines are skipped
Earth,,,1.00000261,0.00000562,0.01671123,-0.00004392,-0.00001531,-0.01294668,0.0,0.0,longitude,102.93768193,0.32327364,100.46457166,35999.37244981
Moon,Earth,3.040432e-6,0.00256955529,0,0.0549006,0,5.145396,0,125.0445479,-1934.1362891,argument,-41.6914966,6003.1500178,218.3164477,481267.88123421
"
        );
        let catalog = BodyCatalog::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let earth = catalog.get("earth").unwrap();
        assert_eq!(earth.central_mass, 1.0);
        assert_eq!(earth.central_body, None);

        let moon = catalog.get("moon").unwrap();
        assert_eq!(moon.central_body.as_deref(), Some("earth"));
        assert_eq!(moon.elements.periapsis_argument, -41.6914966);
        assert_eq!(moon.elements.rates.periapsis_argument, 6003.1500178);

        // same orbit as the built-in entry, given in the other convention
        let builtin = BodyCatalog::j2000();
        let reference = &builtin.get("moon").unwrap().elements;
        assert_relative_eq!(
            moon.elements.periapsis_longitude(),
            reference.periapsis_longitude(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_from_csv_without_optional_columns() {
        let data = "name,a,a_rate,e,e_rate,i,i_rate,node,node_rate,periapsis_kind,periapsis,periapsis_rate,mean_longitude,mean_longitude_rate\n\
Ceres,2.7675,0,0.0758,0,10.593,0,80.305,0,argument,73.597,0,95.989,7826.7\n";
        let catalog = BodyCatalog::from_csv_reader(data.as_bytes()).unwrap();
        let ceres = catalog.get("ceres").unwrap();

        assert_eq!(ceres.central_body, None);
        assert_eq!(ceres.central_mass, 1.0);
    }

    #[test]
    fn test_from_csv_rejects_bad_rows() {
        let bad_e = format!("{HEADER}Comet,,,10.0,0,1.2,0,0,0,0,0,argument,0,0,0,0\n");
        assert!(matches!(
            BodyCatalog::from_csv_reader(bad_e.as_bytes()),
            Err(OrreryError::EccentricityOutOfRange { .. })
        ));

        let bad_a = format!("{HEADER}Nowhere,,,-1.0,0,0.1,0,0,0,0,0,argument,0,0,0,0\n");
        assert!(matches!(
            BodyCatalog::from_csv_reader(bad_a.as_bytes()),
            Err(OrreryError::InvalidElement {
                name: "semi_major_axis",
                ..
            })
        ));

        let bad_mass = format!("{HEADER}Phobos,,0,1.0,0,0.1,0,0,0,0,0,argument,0,0,0,0\n");
        assert!(matches!(
            BodyCatalog::from_csv_reader(bad_mass.as_bytes()),
            Err(OrreryError::InvalidElementTable(_))
        ));

        let bad_kind = format!("{HEADER}Oops,,,1.0,0,0.1,0,0,0,0,0,perihelion,0,0,0,0\n");
        assert!(matches!(
            BodyCatalog::from_csv_reader(bad_kind.as_bytes()),
            Err(OrreryError::CsvError(_))
        ));
    }

    #[test]
    fn test_from_entries_validation() {
        let elements = BodyCatalog::j2000().get("mars").unwrap().elements.clone();

        let duplicated = BodyCatalog::from_entries(vec![
            CatalogEntry::new("Mars", None, 1.0, elements.clone()),
            CatalogEntry::new("mars ", None, 1.0, elements.clone()),
        ]);
        assert!(matches!(duplicated, Err(OrreryError::InvalidElementTable(_))));

        let orphan = BodyCatalog::from_entries(vec![CatalogEntry::new(
            "Phobos",
            Some("Mars"),
            3.2e-7,
            elements.clone(),
        )]);
        assert!(matches!(orphan, Err(OrreryError::InvalidElementTable(_))));

        for mass in [-1.0, 0.0, f64::NAN] {
            let res = BodyCatalog::from_entries(vec![CatalogEntry::new(
                "Mars",
                None,
                mass,
                elements.clone(),
            )]);
            assert!(matches!(res, Err(OrreryError::InvalidElementTable(_))));
        }

        let mut unchecked = elements.clone();
        unchecked.semi_major_axis = f64::NAN;
        let res = BodyCatalog::from_entries(vec![CatalogEntry::new("Mars", None, 1.0, unchecked)]);
        assert!(matches!(
            res,
            Err(OrreryError::InvalidElement {
                name: "semi_major_axis",
                ..
            })
        ));

        let cycle = BodyCatalog::from_entries(vec![
            CatalogEntry::new("A", Some("b"), 1.0, elements.clone()),
            CatalogEntry::new("B", Some("a"), 1.0, elements),
        ]);
        assert!(matches!(cycle, Err(OrreryError::CentralBodyCycle(_))));
    }
}
