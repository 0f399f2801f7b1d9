//! Render one sky map per year of supernova discoveries
//!
//! Usage:
//! ```
//! cargo run --release --bin animate_discoveries -- [OPTIONS]
//! ```
//!
//! Frames are written as `SN_<year>.png`. To build the animation:
//! `convert -delay 30 -loop 0 SN_*.png SN_Discoveries.gif`

use std::path::PathBuf;

use clap::Parser;
use supernova::catalog::{parse_catalog, CatalogQuery};
use supernova::config::{DEFAULT_ENDPOINT, END_YEAR, FIRST_YEAR, FRAME_PREFIX};
use supernova::pipeline::{run, run_on_rows};
use supernova::{CoordinatePolicy, PipelineConfig};

#[derive(Parser, Debug)]
#[command(
    name = "Supernova Discovery Animation",
    about = "Renders per-year sky maps of supernova discoveries from the Open Supernova Catalog",
    long_about = None
)]
struct Args {
    /// Catalog API root
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Read a previously downloaded CSV catalog instead of querying the API
    #[arg(long)]
    from_file: Option<PathBuf>,

    /// Directory for the frame images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Frame file name prefix
    #[arg(long, default_value = FRAME_PREFIX)]
    prefix: String,

    /// First year to render
    #[arg(long, default_value_t = FIRST_YEAR)]
    start_year: i32,

    /// Year after the last rendered frame
    #[arg(long, default_value_t = END_YEAR)]
    end_year: i32,

    /// Plot every discovery in one color without the survey legend
    #[arg(long)]
    no_surveys: bool,

    /// Drop entries with malformed coordinates instead of aborting
    #[arg(long)]
    skip_bad_coordinates: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.start_year >= args.end_year {
        return Err(format!(
            "start year {} must be before end year {}",
            args.start_year, args.end_year
        )
        .into());
    }

    let config = PipelineConfig {
        query: CatalogQuery::with_endpoint(args.endpoint),
        years: args.start_year..args.end_year,
        output_dir: args.output_dir,
        file_prefix: args.prefix,
        classify_surveys: !args.no_surveys,
        coordinate_policy: if args.skip_bad_coordinates {
            CoordinatePolicy::Skip
        } else {
            CoordinatePolicy::Abort
        },
        ..PipelineConfig::default()
    };

    let summary = match &args.from_file {
        Some(path) => {
            let payload = std::fs::read_to_string(path).map_err(|e| {
                format!("Failed to read catalog from '{}': {}", path.display(), e)
            })?;
            run_on_rows(parse_catalog(&payload)?, &config)?
        }
        None => run(&config)?,
    };

    println!("Catalog rows:        {}", summary.rows);
    println!("With coords + dates: {}", summary.cleaned);
    println!("Supernovae plotted:  {}", summary.supernovae);
    println!("Frames written:      {}", summary.frames);

    Ok(())
}
