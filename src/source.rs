//! Source tables and target resolution
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum Error {
    #[error("wrong unit \"{0}\" for source coordinates, should be hms or deg")]
    InvalidUnits(String),
    #[error("invalid coordinate \"{0}\", expecting \"RA DEC\"")]
    InvalidCoordinate(String),
    #[error("invalid angle \"{0}\"")]
    InvalidAngle(String),
    #[error("failed to parse source table: {0}")]
    CsvError(#[from] csv::Error),
    #[error("calibrator \"{0}\" is not in the calibrator table")]
    UnknownCalibrator(String),
}

/// Angle convention a coordinate pair is expressed in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AngleUnits {
    /// (hourangle, degrees) sexagesimal
    Hms,
    /// (degrees, degrees) decimal
    Deg,
}

impl FromStr for AngleUnits {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hms" => Ok(Self::Hms),
            "deg" => Ok(Self::Deg),
            other => Err(Error::InvalidUnits(other.to_string())),
        }
    }
}

/// Right ascension / declination pair, ICRS frame. Immutable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SkyCoordinate {
    /// Right ascension [ddeg]
    pub ra_deg: f64,
    /// Declination [ddeg]
    pub dec_deg: f64,
    /// Convention the coordinate was parsed from
    pub units: AngleUnits,
}

impl SkyCoordinate {
    /// Parses a combined "RA DEC" string with given units convention.
    pub fn parse(coordinate: &str, units: AngleUnits) -> Result<Self, Error> {
        let fields: Vec<&str> = coordinate.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(Error::InvalidCoordinate(coordinate.to_string()));
        }
        let (ra_deg, dec_deg) = match units {
            AngleUnits::Hms => (
                // hourangle to degrees
                parse_sexagesimal(fields[0])? * 15.0,
                parse_sexagesimal(fields[1])?,
            ),
            AngleUnits::Deg => (parse_angle(fields[0])?, parse_angle(fields[1])?),
        };
        Ok(Self {
            ra_deg,
            dec_deg,
            units,
        })
    }
}

/// Sexagesimal "±DD:MM:SS.S" (or "HH:MM:SS.S") to decimal.
/// Truncated forms ("DD", "DD:MM") are accepted.
/// A single leading sign at most: each component must be unsigned.
fn parse_sexagesimal(field: &str) -> Result<f64, Error> {
    let trimmed = field.trim();
    let negative = trimmed.starts_with('-');
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let content: Vec<&str> = unsigned.split(':').collect();
    if content.is_empty() || content.len() > 3 {
        return Err(Error::InvalidAngle(field.to_string()));
    }
    let mut value = 0.0_f64;
    let mut scale = 1.0_f64;
    for digits in content {
        if digits.starts_with(['+', '-']) {
            return Err(Error::InvalidAngle(field.to_string()));
        }
        let parsed = digits
            .parse::<f64>()
            .map_err(|_| Error::InvalidAngle(field.to_string()))?;
        value += parsed / scale;
        scale *= 60.0;
    }
    if negative {
        value = -value;
    }
    Ok(value)
}

fn parse_angle(field: &str) -> Result<f64, Error> {
    f64::from_str(field.trim()).map_err(|_| Error::InvalidAngle(field.to_string()))
}

/// A (name, coordinate) row from a source table.
/// Names need not be unique, row order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSource {
    pub name: String,
    pub coord: SkyCoordinate,
}

/// One row of a source/calibrator table
#[derive(Debug, Deserialize)]
struct SourceRow {
    name: String,
    /// Combined "RA DEC" string
    coordinate: String,
    /// "hms" or "deg"
    unit: String,
}

/// Reads a source table. A malformed row anywhere in the file
/// aborts the entire read: no partial results.
pub fn read_sources<P: AsRef<Path>>(path: P) -> Result<Vec<NamedSource>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut sources = Vec::new();
    for record in reader.deserialize() {
        let row: SourceRow = record?;
        let units = row.unit.parse::<AngleUnits>()?;
        let coord = SkyCoordinate::parse(&row.coordinate, units)?;
        sources.push(NamedSource {
            name: row.name,
            coord,
        });
    }
    Ok(sources)
}

/// Target coordinates: either all from the command line (names synthesized
/// by position) or all from the source table. No mixed mode.
pub fn resolve_targets(cli: &Cli) -> Result<Vec<NamedSource>, Error> {
    match cli.targets() {
        Some(targets) => targets
            .iter()
            .enumerate()
            .map(|(index, coordinate)| {
                let coord = SkyCoordinate::parse(coordinate, AngleUnits::Hms)?;
                Ok(NamedSource {
                    name: format!("source {}", index),
                    coord,
                })
            })
            .collect(),
        None => {
            info!("reading target file \"{}\"", cli.source_file());
            read_sources(cli.source_file())
        },
    }
}

/// Calibrator coordinates: rows of the calibrator table selected by the
/// requested names, in command line order. An unknown name is an error.
pub fn resolve_calibrators(cli: &Cli) -> Result<Vec<NamedSource>, Error> {
    let table = read_sources(cli.calibrator_file())?;
    cli.calibrators()
        .iter()
        .map(|name| {
            table
                .iter()
                .find(|source| source.name.as_str() == name.as_str())
                .cloned()
                .ok_or_else(|| Error::UnknownCalibrator(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_table(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn hms_parsing() {
        // PKS 1934-638, the southern flux calibrator
        let coord =
            SkyCoordinate::parse("19:39:25.026 -63:42:45.63", AngleUnits::Hms).unwrap();
        assert!((coord.ra_deg - 294.854275).abs() < 1e-6);
        assert!((coord.dec_deg - -63.712675).abs() < 1e-6);
        assert_eq!(coord.units, AngleUnits::Hms);
    }

    #[test]
    fn deg_parsing_is_deterministic() {
        let first = SkyCoordinate::parse("294.854275 -63.712675", AngleUnits::Deg).unwrap();
        let second = SkyCoordinate::parse("294.854275 -63.712675", AngleUnits::Deg).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.ra_deg, 294.854275);
        assert_eq!(first.dec_deg, -63.712675);
    }

    #[test]
    fn negative_declination_below_one_degree() {
        // sign must survive a zero degrees field
        let coord = SkyCoordinate::parse("00:00:00 -00:30:00", AngleUnits::Hms).unwrap();
        assert!((coord.dec_deg - -0.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_sign_is_rejected() {
        // one leading sign at most, never on inner components
        for bad in ["+-12:00:00", "--12:00:00", "12:-30:00", "12:00:+05"] {
            assert!(
                matches!(parse_sexagesimal(bad), Err(Error::InvalidAngle(_))),
                "\"{}\" should not parse",
                bad
            );
        }
    }

    #[test]
    fn invalid_coordinate_pair() {
        assert!(matches!(
            SkyCoordinate::parse("294.854275", AngleUnits::Deg),
            Err(Error::InvalidCoordinate(_))
        ));
        assert!(matches!(
            SkyCoordinate::parse("12:00:00 abc", AngleUnits::Hms),
            Err(Error::InvalidAngle(_))
        ));
    }

    #[test]
    fn read_mixed_units_table() {
        let file = source_table(
            "name,coordinate,unit\n\
             1934-638,19:39:25.026 -63:42:45.63,hms\n\
             0823-500,125.963 -50.174,deg\n",
        );
        let sources = read_sources(file.path()).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "1934-638");
        assert_eq!(sources[1].name, "0823-500");
        assert_eq!(sources[0].coord.units, AngleUnits::Hms);
        assert_eq!(sources[1].coord.units, AngleUnits::Deg);
        assert!((sources[1].coord.ra_deg - 125.963).abs() < 1e-9);
    }

    #[test]
    fn wrong_unit_aborts_the_read() {
        let file = source_table(
            "name,coordinate,unit\n\
             good,10.0 -20.0,deg\n\
             bad,10.0 -20.0,rad\n\
             never-reached,10.0 -20.0,deg\n",
        );
        let result = read_sources(file.path());
        assert!(matches!(result, Err(Error::InvalidUnits(units)) if units == "rad"));
    }

    #[test]
    fn malformed_row_aborts_the_read() {
        let file = source_table(
            "name,coordinate,unit\n\
             good,10.0 -20.0,deg\n\
             bad,not-a-coordinate,deg\n",
        );
        assert!(read_sources(file.path()).is_err());
    }

    #[test]
    fn targets_from_command_line() {
        let cli = Cli {
            matches: Cli::command().get_matches_from([
                "obsplan",
                "--target",
                "04:37:15.8 -47:15:09",
                "19:39:25.0 -63:42:45",
            ]),
        };
        let targets = resolve_targets(&cli).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, "source 0");
        assert_eq!(targets[1].name, "source 1");
        assert!((targets[0].coord.ra_deg - 69.315833).abs() < 1e-4);
    }

    #[test]
    fn targets_from_file() {
        let file = source_table("name,coordinate,unit\nJ0437,04:37:15.8 -47:15:09,hms\n");
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli {
            matches: Cli::command().get_matches_from(["obsplan", "--sourcefile", &path]),
        };
        let targets = resolve_targets(&cli).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "J0437");
    }

    #[test]
    fn calibrators_selected_by_name() {
        let file = source_table(
            "name,coordinate,unit\n\
             1934-638,19:39:25.026 -63:42:45.63,hms\n\
             0823-500,08:25:26.869 -50:10:38.49,hms\n\
             3C286,13:31:08.288 +30:30:32.96,hms\n",
        );
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli {
            matches: Cli::command().get_matches_from([
                "obsplan",
                "--calfile",
                &path,
                "--cal",
                "3C286",
                "1934-638",
            ]),
        };
        // only the requested rows, in command line order
        let calibrators = resolve_calibrators(&cli).unwrap();
        assert_eq!(calibrators.len(), 2);
        assert_eq!(calibrators[0].name, "3C286");
        assert_eq!(calibrators[1].name, "1934-638");
    }

    #[test]
    fn unknown_calibrator_is_an_error() {
        let file = source_table("name,coordinate,unit\n1934-638,19:39:25.026 -63:42:45.63,hms\n");
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli {
            matches: Cli::command().get_matches_from([
                "obsplan",
                "--calfile",
                &path,
                "--cal",
                "0823-500",
            ]),
        };
        let result = resolve_calibrators(&cli);
        assert!(matches!(result, Err(Error::UnknownCalibrator(name)) if name == "0823-500"));
    }
}
