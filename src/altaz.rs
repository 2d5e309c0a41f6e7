//! ICRS to local horizontal (altitude-azimuth) frame
use hifitime::Epoch;

use crate::site::GeodeticLocation;
use crate::source::SkyCoordinate;

/// Julian date of the J2000.0 reference epoch
const JDE_J2000_DAYS: f64 = 2451545.0;

/// Greenwich mean sidereal time [ddeg], IAU 1982 expression.
/// UT1 is approximated by UTC: the difference stays below one second,
/// negligible against the 0.1 hour sampling grid.
pub fn gmst_deg(t: Epoch) -> f64 {
    let days = t.to_jde_utc_days() - JDE_J2000_DAYS;
    let centuries = days / 36525.0;
    let gmst = 280.46061837
        + 360.98564736629 * days
        + 0.000387933 * centuries.powi(2)
        - centuries.powi(3) / 38710000.0;
    gmst.rem_euclid(360.0)
}

/// Local mean sidereal time [ddeg] at given east longitude
pub fn local_sidereal_deg(t: Epoch, lon_deg: f64) -> f64 {
    (gmst_deg(t) + lon_deg).rem_euclid(360.0)
}

/// Apparent elevation [ddeg] of an ICRS coordinate,
/// seen from given location at given instant.
pub fn elevation_deg(coord: &SkyCoordinate, location: &GeodeticLocation, t: Epoch) -> f64 {
    let lat_rad = location.lat_deg.to_radians();
    let dec_rad = coord.dec_deg.to_radians();
    let hour_angle_rad =
        (local_sidereal_deg(t, location.lon_deg) - coord.ra_deg).to_radians();
    let sin_elev = lat_rad.sin() * dec_rad.sin()
        + lat_rad.cos() * dec_rad.cos() * hour_angle_rad.cos();
    sin_elev.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Elevation time series [ddeg] over a sampling grid
pub fn elevation_series(
    coord: &SkyCoordinate,
    location: &GeodeticLocation,
    grid: &[Epoch],
) -> Vec<f64> {
    grid.iter()
        .map(|t| elevation_deg(coord, location, *t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::AngleUnits;

    fn atca() -> GeodeticLocation {
        GeodeticLocation::new(-30.312885, 149.550139, 236.87)
    }

    #[test]
    fn gmst_at_j2000() {
        // GMST at the J2000.0 epoch (2000-01-01 12:00:00 UTC): 280.46062°,
        // modulo the sub-second UT1-UTC offset of that day
        let t = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        assert!((gmst_deg(t) - 280.46062).abs() < 0.01);
    }

    #[test]
    fn gmst_advances_faster_than_solar_time() {
        // one solar day advances sidereal time by ~0.986°
        let t1 = Epoch::from_gregorian_utc(2022, 3, 11, 0, 0, 0, 0);
        let t2 = Epoch::from_gregorian_utc(2022, 3, 12, 0, 0, 0, 0);
        let advance = (gmst_deg(t2) - gmst_deg(t1)).rem_euclid(360.0);
        assert!((advance - 0.9856).abs() < 1e-3);
    }

    #[test]
    fn zenith_elevation() {
        // a source at (RA = LST, Dec = latitude) sits at the local zenith
        let location = atca();
        let t = Epoch::from_gregorian_utc(2022, 3, 11, 0, 0, 0, 0);
        let coord = SkyCoordinate {
            ra_deg: local_sidereal_deg(t, location.lon_deg),
            dec_deg: location.lat_deg,
            units: AngleUnits::Deg,
        };
        assert!((elevation_deg(&coord, &location, t) - 90.0).abs() < 1e-6);
    }

    #[test]
    fn celestial_pole_elevation() {
        // the visible pole holds at |latitude| at any instant
        let location = atca();
        let pole = SkyCoordinate {
            ra_deg: 0.0,
            dec_deg: -90.0,
            units: AngleUnits::Deg,
        };
        for hour in [0, 6, 12, 18] {
            let t = Epoch::from_gregorian_utc(2022, 3, 11, hour, 0, 0, 0);
            let elevation = elevation_deg(&pole, &location, t);
            assert!((elevation - location.lat_deg.abs()).abs() < 1e-9);
        }
    }

    #[test]
    fn antipodal_source_is_below_the_horizon() {
        let location = atca();
        let t = Epoch::from_gregorian_utc(2022, 3, 11, 0, 0, 0, 0);
        let coord = SkyCoordinate {
            ra_deg: (local_sidereal_deg(t, location.lon_deg) + 180.0).rem_euclid(360.0),
            dec_deg: -location.lat_deg,
            units: AngleUnits::Deg,
        };
        assert!((elevation_deg(&coord, &location, t) - -90.0).abs() < 1e-6);
    }

    #[test]
    fn series_matches_pointwise_evaluation() {
        let location = atca();
        let coord = SkyCoordinate {
            ra_deg: 294.854275,
            dec_deg: -63.712675,
            units: AngleUnits::Deg,
        };
        let grid: Vec<Epoch> = (0..10)
            .map(|ith| {
                Epoch::from_gregorian_utc(2022, 3, 11, 0, 0, 0, 0)
                    + hifitime::Duration::from_hours(ith as f64)
            })
            .collect();
        let series = elevation_series(&coord, &location, &grid);
        assert_eq!(series.len(), grid.len());
        for (t, elevation) in grid.iter().zip(series.iter()) {
            assert_eq!(*elevation, elevation_deg(&coord, &location, *t));
        }
    }
}
