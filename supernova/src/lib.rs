//! Animated sky map of historical supernova discoveries
//!
//! Retrieves the Open Supernova Catalog, keeps entries with coordinates and a
//! usable discovery date, selects genuine supernovae, and renders one
//! Mollweide sky map per year from 1885 through 2019. The per-year PNG files
//! are meant to be stitched into an animation by an external tool.

pub mod catalog;
pub mod classify;
pub mod clean;
pub mod config;
pub mod coords;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod render;

pub use catalog::{fetch_catalog, parse_catalog, CatalogQuery, CatalogRow};
pub use classify::{classify, select_supernovae, ClassifiedRecord, Survey};
pub use clean::{clean_records, parse_discovery_date, Record};
pub use config::PipelineConfig;
pub use coords::{resolve, CoordinatePolicy, Discovery, SkyCoord};
pub use error::{Result, SupernovaError};
pub use pipeline::{run, run_on_rows, RunSummary, SkyHistory};
pub use render::{frame_path, Frame, FrameRenderer};
