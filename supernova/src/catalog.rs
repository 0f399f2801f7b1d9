//! Open Supernova Catalog retrieval
//!
//! One blocking GET returns the whole catalog as CSV. Rows with more fields
//! than the header, or that do not parse, are skipped. Short rows are kept
//! with the missing trailing fields absent. Only transport failures and an
//! unusable header abort.

use log::{debug, info};
use serde::Deserialize;

use crate::config::{CATALOG_COLUMNS, DEFAULT_ENDPOINT};
use crate::error::{Result, SupernovaError};

/// Parameters of the single catalog request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub endpoint: String,
    pub columns: Vec<String>,
    pub sort_by: String,
    pub format: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            columns: CATALOG_COLUMNS.iter().map(|c| c.to_string()).collect(),
            sort_by: "discoverdate".to_string(),
            format: "csv".to_string(),
        }
    }
}

impl CatalogQuery {
    /// Query against a different API root with the standard columns
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Request URL, e.g. `<endpoint>/name+ra+dec?sortby=discoverdate&format=csv`
    pub fn url(&self) -> String {
        format!(
            "{}/{}?sortby={}&format={}",
            self.endpoint.trim_end_matches('/'),
            self.columns.join("+"),
            self.sort_by,
            self.format
        )
    }
}

/// One raw catalog row as delivered by the service.
///
/// Every field except the name may be empty or missing in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogRow {
    pub name: String,
    pub ra: Option<String>,
    pub dec: Option<String>,
    pub discoverdate: Option<String>,
    pub discoverer: Option<String>,
    pub claimedtype: Option<String>,
}

/// Download and parse the catalog
pub fn fetch_catalog(query: &CatalogQuery) -> Result<Vec<CatalogRow>> {
    let url = query.url();
    info!("Retrieving data from {url}");

    let body = reqwest::blocking::get(&url)?.error_for_status()?.text()?;
    debug!("Received {} bytes", body.len());

    parse_catalog(&body)
}

/// Parse a CSV catalog payload, skipping malformed rows
pub fn parse_catalog(payload: &str) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(payload.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SupernovaError::CatalogFormat(format!("unreadable header: {e}")))?
        .clone();

    let missing: Vec<&str> = CATALOG_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(SupernovaError::CatalogFormat(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable catalog row: {e}");
                skipped += 1;
                continue;
            }
        };

        if record.len() > headers.len() {
            debug!(
                "Skipping catalog row with {} fields, header has {}",
                record.len(),
                headers.len()
            );
            skipped += 1;
            continue;
        }

        match record.deserialize::<CatalogRow>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!("Skipping malformed catalog row: {e}");
                skipped += 1;
            }
        }
    }

    info!("Parsed {} catalog rows ({} skipped)", rows.len(), skipped);
    Ok(rows)
}
