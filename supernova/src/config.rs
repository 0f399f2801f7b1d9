//! Run configuration
//!
//! The defaults reproduce the fixed behaviour of the animation job: the Open
//! Supernova Catalog endpoint, one frame per year over 1885..2020, written as
//! `SN_<year>.png` into the working directory.

use std::ops::Range;
use std::path::PathBuf;

use crate::catalog::CatalogQuery;
use crate::coords::CoordinatePolicy;

/// Open Supernova Catalog API root
pub const DEFAULT_ENDPOINT: &str = "https://api.sne.space/catalog";

/// Columns requested from the catalog, in request order
pub const CATALOG_COLUMNS: [&str; 6] = [
    "name",
    "ra",
    "dec",
    "discoverdate",
    "discoverer",
    "claimedtype",
];

/// First year with a frame
pub const FIRST_YEAR: i32 = 1885;

/// Exclusive upper bound of the frame years
pub const END_YEAR: i32 = 2020;

/// File name prefix for rendered frames
pub const FRAME_PREFIX: &str = "SN_";

/// Frame size in pixels (8x4 inch figure at 100 dpi)
pub const FRAME_SIZE: (u32, u32) = (800, 400);

/// Full configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Catalog request parameters
    pub query: CatalogQuery,
    /// Years to render, one frame each
    pub years: Range<i32>,
    /// Directory receiving the frame images
    pub output_dir: PathBuf,
    /// Frame file name prefix
    pub file_prefix: String,
    /// Color points by discovering survey and draw the survey legend
    pub classify_surveys: bool,
    /// What to do with coordinates that fail to parse
    pub coordinate_policy: CoordinatePolicy,
    /// Frame size in pixels
    pub image_size: (u32, u32),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            query: CatalogQuery::default(),
            years: FIRST_YEAR..END_YEAR,
            output_dir: PathBuf::from("."),
            file_prefix: FRAME_PREFIX.to_string(),
            classify_surveys: true,
            coordinate_policy: CoordinatePolicy::Abort,
            image_size: FRAME_SIZE,
        }
    }
}
