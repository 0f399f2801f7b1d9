//! Sexagesimal coordinate resolution
//!
//! Catalog coordinates are strings such as `05:34:32` (RA, hours) and
//! `+22:00:52` (Dec, degrees). Entries with several measurements list them
//! comma-separated; only the first is used.

use log::{info, warn};

use crate::classify::{ClassifiedRecord, Survey};
use crate::error::{Result, SupernovaError};

/// Handling of coordinates that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatePolicy {
    /// Abort the whole run
    #[default]
    Abort,
    /// Log and drop the record
    Skip,
}

/// First entry of a comma-separated coordinate list
pub fn first_listed(value: &str) -> &str {
    value.split(',').next().unwrap_or_default().trim()
}

/// Separators between sexagesimal components: `05:34:32`, `05 34 32`,
/// `05h34m32s`, `+22d00m52s`
fn is_separator(c: char) -> bool {
    c == ':' || c.is_whitespace() || matches!(c, 'h' | 'd' | 'm' | 's')
}

/// Parse `[+-]A[:B[:C]]` into decimal units of A.
///
/// Minutes and seconds of exactly 60 are accepted and carry over.
fn parse_sexagesimal(value: &str) -> std::result::Result<f64, String> {
    let value = value.trim();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let parts: Vec<&str> = unsigned
        .split(is_separator)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err("expected 1 to 3 sexagesimal components".to_string());
    }

    let mut total = 0.0;
    let mut scale = 1.0;
    for (i, part) in parts.iter().enumerate() {
        let component = part
            .parse::<f64>()
            .map_err(|_| format!("invalid component '{part}'"))?;
        if !component.is_finite() || component < 0.0 {
            return Err(format!("invalid component '{part}'"));
        }
        if i > 0 && component > 60.0 {
            return Err(format!("component '{part}' exceeds 60"));
        }
        total += component / scale;
        scale *= 60.0;
    }

    Ok(if negative { -total } else { total })
}

/// Parse right ascension in sexagesimal hours, wrapped into [0, 24)
pub fn parse_ra_hours(value: &str) -> std::result::Result<f64, String> {
    Ok(parse_sexagesimal(value)?.rem_euclid(24.0))
}

/// Parse declination in sexagesimal degrees
pub fn parse_dec_degrees(value: &str) -> std::result::Result<f64, String> {
    let degrees = parse_sexagesimal(value)?;
    if !(-90.0..=90.0).contains(&degrees) {
        return Err(format!("Dec {degrees} deg outside [-90, 90]"));
    }
    Ok(degrees)
}

/// Equatorial position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoord {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl SkyCoord {
    /// Parse catalog RA/Dec strings, using the first listed value of each
    pub fn parse(ra: &str, dec: &str) -> std::result::Result<Self, String> {
        let ra_deg = parse_ra_hours(first_listed(ra))? * 15.0;
        let dec_deg = parse_dec_degrees(first_listed(dec))?;
        Ok(Self { ra_deg, dec_deg })
    }

    /// Longitude in radians with RA wrapped into [-180°, 180°)
    pub fn wrapped_longitude(&self) -> f64 {
        let ra = if self.ra_deg >= 180.0 {
            self.ra_deg - 360.0
        } else {
            self.ra_deg
        };
        ra.to_radians()
    }

    /// Latitude in radians
    pub fn latitude(&self) -> f64 {
        self.dec_deg.to_radians()
    }
}

/// A supernova ready for plotting
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub name: String,
    pub coord: SkyCoord,
    pub year: i32,
    pub survey: Survey,
}

/// Resolve coordinates for every classified record
pub fn resolve(records: Vec<ClassifiedRecord>, policy: CoordinatePolicy) -> Result<Vec<Discovery>> {
    let mut discoveries = Vec::with_capacity(records.len());

    for classified in records {
        let record = classified.record;
        match SkyCoord::parse(&record.ra, &record.dec) {
            Ok(coord) => discoveries.push(Discovery {
                name: record.name,
                coord,
                year: classified.year,
                survey: classified.survey,
            }),
            Err(reason) => match policy {
                CoordinatePolicy::Abort => {
                    return Err(SupernovaError::Coordinate {
                        name: record.name,
                        value: format!("{} {}", record.ra, record.dec),
                        reason,
                    })
                }
                CoordinatePolicy::Skip => {
                    warn!("Skipping {}: {reason}", record.name);
                }
            },
        }
    }

    info!("Resolved coordinates for {} supernovae", discoveries.len());
    Ok(discoveries)
}
