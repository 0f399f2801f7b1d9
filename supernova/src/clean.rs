//! Record cleaning
//!
//! Discovery dates are parsed into calendar dates, with anything unparseable
//! becoming absent. Rows lacking RA, Dec or a valid date are then dropped.

use chrono::NaiveDate;
use log::{debug, info};

use crate::catalog::CatalogRow;

/// A catalog entry with coordinates and a valid discovery date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    /// Sexagesimal hours, possibly several comma-separated alternatives
    pub ra: String,
    /// Sexagesimal degrees, possibly several comma-separated alternatives
    pub dec: String,
    pub discovered: NaiveDate,
    /// Discoverer / survey attribution, empty when not given
    pub discoverer: String,
    /// Claimed type, empty when not given
    pub claimed_type: String,
}

const FULL_DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Parse a free-text discovery date.
///
/// Accepts `YYYY/MM/DD`, `YYYY-MM-DD`, `YYYY/MM`, `YYYY-MM` and `YYYY`.
/// Partial dates resolve to the first day of the month or year.
pub fn parse_discovery_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    if let Some((year, month)) = text.split_once(['/', '-']) {
        let year = parse_year(year)?;
        let month = month.parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    NaiveDate::from_ymd_opt(parse_year(text)?, 1, 1)
}

fn parse_year(text: &str) -> Option<i32> {
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Convert a raw row, returning `None` when a required field is absent
pub fn clean_row(row: CatalogRow) -> Option<Record> {
    let discovered = row.discoverdate.as_deref().and_then(parse_discovery_date);

    match (row.ra, row.dec, discovered) {
        (Some(ra), Some(dec), Some(discovered)) => Some(Record {
            name: row.name,
            ra,
            dec,
            discovered,
            discoverer: row.discoverer.unwrap_or_default(),
            claimed_type: row.claimedtype.unwrap_or_default(),
        }),
        (ra, dec, discovered) => {
            debug!(
                "Dropping {}: ra={:?} dec={:?} date={:?}",
                row.name,
                ra.is_some(),
                dec.is_some(),
                discovered
            );
            None
        }
    }
}

/// Drop every row missing RA, Dec or a valid date
pub fn clean_records(rows: Vec<CatalogRow>) -> Vec<Record> {
    let total = rows.len();
    let records: Vec<Record> = rows.into_iter().filter_map(clean_row).collect();
    info!("Kept {} of {} rows with coordinates and dates", records.len(), total);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, ra: Option<&str>, dec: Option<&str>, date: Option<&str>) -> CatalogRow {
        CatalogRow {
            name: name.to_string(),
            ra: ra.map(String::from),
            dec: dec.map(String::from),
            discoverdate: date.map(String::from),
            ..CatalogRow::default()
        }
    }

    #[test]
    fn test_full_dates() {
        let expected = NaiveDate::from_ymd_opt(1885, 8, 20);
        assert_eq!(parse_discovery_date("1885/08/20"), expected);
        assert_eq!(parse_discovery_date("1885-08-20"), expected);
        assert_eq!(parse_discovery_date(" 1885/08/20 "), expected);
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(
            parse_discovery_date("1937/09"),
            NaiveDate::from_ymd_opt(1937, 9, 1)
        );
        assert_eq!(
            parse_discovery_date("1572"),
            NaiveDate::from_ymd_opt(1572, 1, 1)
        );
    }

    #[test]
    fn test_unparseable_dates_are_absent() {
        assert_eq!(parse_discovery_date("not a date"), None);
        assert_eq!(parse_discovery_date(""), None);
        assert_eq!(parse_discovery_date("1885/13/01"), None);
        assert_eq!(parse_discovery_date("1885/02/30"), None);
        assert_eq!(parse_discovery_date("85"), None);
    }

    #[test]
    fn test_clean_drops_missing_fields() {
        let rows = vec![
            row("keep", Some("01:00:00"), Some("+10:00:00"), Some("1990/01/01")),
            row("no_ra", None, Some("+10:00:00"), Some("1990/01/01")),
            row("no_dec", Some("01:00:00"), None, Some("1990/01/01")),
            row("no_date", Some("01:00:00"), Some("+10:00:00"), None),
            row("bad_date", Some("01:00:00"), Some("+10:00:00"), Some("not a date")),
        ];

        let records = clean_records(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "keep");
        assert_eq!(records[0].claimed_type, "");
        assert_eq!(records[0].discoverer, "");
    }
}
