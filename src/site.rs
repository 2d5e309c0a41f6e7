//! Telescope site resolution
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown telescope name \"{0}\"")]
    UnknownSite(String),
    #[error("failed to parse telescope table: {0}")]
    CsvError(#[from] csv::Error),
}

/// Geodetic location a telescope observes from.
/// Resolved once per session, read only thereafter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeodeticLocation {
    /// Latitude [ddeg]
    pub lat_deg: f64,
    /// Longitude [ddeg], positive east
    pub lon_deg: f64,
    /// Height above the reference ellipsoid [m]
    pub height_m: f64,
}

impl GeodeticLocation {
    pub fn new(lat_deg: f64, lon_deg: f64, height_m: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            height_m,
        }
    }
}

/// One row of the telescope table
#[derive(Debug, Deserialize)]
struct SiteRow {
    name: String,
    /// Latitude [ddeg]
    lat: f64,
    /// Longitude [ddeg]
    lon: f64,
    /// Height [m]
    height: f64,
}

lazy_static! {
    static ref BUILTIN_SITES: HashMap<&'static str, GeodeticLocation> = {
        let mut sites = HashMap::new();
        sites.insert("atca", GeodeticLocation::new(-30.312885, 149.550139, 236.87));
        sites.insert("parkes", GeodeticLocation::new(-32.998400, 148.263520, 414.80));
        sites.insert("mopra", GeodeticLocation::new(-31.267806, 149.099641, 867.0));
        sites.insert("askap", GeodeticLocation::new(-26.696000, 116.637000, 372.0));
        sites.insert("ceduna", GeodeticLocation::new(-31.867700, 133.809700, 161.0));
        sites.insert("hobart", GeodeticLocation::new(-42.803500, 147.438700, 65.0));
        sites.insert("vla", GeodeticLocation::new(34.078749, -107.618283, 2124.0));
        sites.insert("gbt", GeodeticLocation::new(38.433129, -79.839839, 807.43));
        sites.insert("effelsberg", GeodeticLocation::new(50.524800, 6.883600, 369.0));
        sites.insert("meerkat", GeodeticLocation::new(-30.711056, 21.443889, 1086.6));
        sites
    };
}

/// Registry of well known observatory sites.
/// An explicit value (not a global lookup), so alternate registries
/// can be injected, in tests typically.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: HashMap<String, GeodeticLocation>,
}

impl SiteRegistry {
    /// Builtin registry of well known observatories
    pub fn builtin() -> Self {
        Self {
            sites: BUILTIN_SITES
                .iter()
                .map(|(name, location)| (name.to_string(), *location))
                .collect(),
        }
    }

    /// Empty registry: resolution falls through to the telescope table only
    pub fn empty() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<GeodeticLocation> {
        self.sites.get(name).copied()
    }

    /// Registers (or redefines) one site
    pub fn insert(&mut self, name: &str, location: GeodeticLocation) {
        self.sites.insert(name.to_string(), location);
    }
}

/// Resolves a site name to its geodetic location.
/// The registry takes priority over the telescope table;
/// on duplicated table rows, only the first is used.
/// The table is loaded in all cases:
/// an unreadable table is an error even for registry sites.
pub fn resolve<P: AsRef<Path>>(
    registry: &SiteRegistry,
    name: &str,
    telefile: P,
) -> Result<GeodeticLocation, Error> {
    let rows = read_table(telefile)?;
    if let Some(location) = registry.get(name) {
        return Ok(location);
    }
    rows.iter()
        .find(|row| row.name == name)
        .map(|row| GeodeticLocation::new(row.lat, row.lon, row.height))
        .ok_or_else(|| Error::UnknownSite(name.to_string()))
}

fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<SiteRow>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: SiteRow = record?;
        rows.push(row);
    }
    Ok(rows)
}
