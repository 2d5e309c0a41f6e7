//! Observing window and sampling grid
use hifitime::{Duration, Epoch};
use thiserror::Error;

/// Sampling period of the elevation grid [hours]
const SAMPLING_PERIOD_HOURS: f64 = 0.1;

/// Total span of the elevation grid [hours]
const GRID_SPAN_HOURS: f64 = 24.0;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date-time \"{0}\", expecting \"YYYY-MM-DD HH:MM:SS\" (UTC)")]
    InvalidDateTime(String),
}

/// Planned observing window, in UTC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObservingWindow {
    /// Planned observation start [UTC]
    pub start: Epoch,
    /// Planned observation length
    pub duration: Duration,
    /// Grid lead: the sampling grid starts this long before [Self::start],
    /// so the displayed window straddles the start rather than beginning at it
    pub shift: Duration,
}

impl ObservingWindow {
    /// Parses "YYYY-MM-DD HH:MM:SS" (UTC, time of day optional) into a window.
    pub fn parse(datetime: &str, length_hours: f64, shift_hours: f64) -> Result<Self, Error> {
        let start = parse_datetime(datetime)?;
        Ok(Self {
            start,
            duration: Duration::from_hours(length_hours),
            shift: Duration::from_hours(shift_hours),
        })
    }

    /// Planned observation end [UTC]
    pub fn end(&self) -> Epoch {
        self.start + self.duration
    }

    /// 24 hour sampling grid at fixed period, straddling the observation start.
    pub fn sample_grid(&self) -> Vec<Epoch> {
        let t0 = self.start - self.shift;
        let num_points = (GRID_SPAN_HOURS / SAMPLING_PERIOD_HOURS) as usize;
        (0..num_points)
            .map(|ith| t0 + Duration::from_hours(ith as f64 * SAMPLING_PERIOD_HOURS))
            .collect()
    }
}

fn parse_datetime(s: &str) -> Result<Epoch, Error> {
    let invalid = || Error::InvalidDateTime(s.to_string());

    let fields: Vec<&str> = s.split_whitespace().collect();
    if fields.is_empty() || fields.len() > 2 {
        return Err(invalid());
    }

    let date: Vec<&str> = fields[0].split('-').collect();
    if date.len() != 3 {
        return Err(invalid());
    }
    let year = date[0].parse::<i32>().map_err(|_| invalid())?;
    let month = date[1].parse::<u8>().map_err(|_| invalid())?;
    let day = date[2].parse::<u8>().map_err(|_| invalid())?;

    let (mut hour, mut minute, mut second) = (0_u8, 0_u8, 0_u8);
    if fields.len() == 2 {
        let time: Vec<&str> = fields[1].split(':').collect();
        if time.len() != 3 {
            return Err(invalid());
        }
        hour = time[0].parse::<u8>().map_err(|_| invalid())?;
        minute = time[1].parse::<u8>().map_err(|_| invalid())?;
        second = time[2].parse::<u8>().map_err(|_| invalid())?;
    }

    Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0)
        .map_err(|_| invalid())
}
