//! Fetch → clean → classify → resolve → render
//!
//! The frame loop is a fold over the years: [`SkyHistory`] carries the
//! cumulative discoveries and the running survey legend from one year into
//! the next.

use std::collections::BTreeMap;
use std::fs;
use std::ops::Range;
use std::path::Path;

use log::info;

use crate::catalog::{fetch_catalog, CatalogRow};
use crate::classify::{select_supernovae, Survey};
use crate::clean::clean_records;
use crate::config::{PipelineConfig, FIRST_YEAR};
use crate::coords::{resolve, Discovery};
use crate::error::{Result, SupernovaError};
use crate::render::{frame_path, Frame, FrameRenderer};

/// Most legend entries a frame can show
const LEGEND_CAPACITY: usize = 10;

/// Discoveries accumulated over the years already rendered
#[derive(Debug, Clone, Default)]
pub struct SkyHistory<'a> {
    past: Vec<&'a Discovery>,
    legend: Vec<Survey>,
}

impl<'a> SkyHistory<'a> {
    /// Everything discovered before the current year
    pub fn past(&self) -> &[&'a Discovery] {
        &self.past
    }

    /// Named surveys seen so far
    pub fn legend(&self) -> &[Survey] {
        &self.legend
    }

    /// Legend after also seeing `this`
    fn legend_with(&self, this: &[&'a Discovery]) -> Vec<Survey> {
        let mut legend = self.legend.clone();
        for discovery in this {
            if legend.len() >= LEGEND_CAPACITY {
                break;
            }
            if discovery.survey != Survey::Other && !legend.contains(&discovery.survey) {
                legend.push(discovery.survey);
            }
        }
        legend
    }

    /// Frame for `year`, given that year's discoveries
    pub fn frame<'f>(&'f self, year: i32, this: &'f [&'a Discovery]) -> Frame<'f> {
        Frame {
            year,
            past: &self.past,
            this,
            legend: self.legend_with(this),
        }
    }

    /// History for the following year
    pub fn absorb(mut self, this: &[&'a Discovery]) -> Self {
        self.legend = self.legend_with(this);
        self.past.extend_from_slice(this);
        self
    }
}

/// Group discoveries by year, keeping only years inside the window
pub fn by_year<'a>(
    discoveries: &'a [Discovery],
    years: &Range<i32>,
) -> BTreeMap<i32, Vec<&'a Discovery>> {
    let mut grouped: BTreeMap<i32, Vec<&'a Discovery>> = BTreeMap::new();
    for discovery in discoveries.iter().filter(|d| years.contains(&d.year)) {
        grouped.entry(discovery.year).or_default().push(discovery);
    }
    grouped
}

/// History entering the frame for `start`: every year from [`FIRST_YEAR`] up to it
pub fn seed_history<'a>(grouped: &BTreeMap<i32, Vec<&'a Discovery>>, start: i32) -> SkyHistory<'a> {
    grouped
        .range(FIRST_YEAR..start.max(FIRST_YEAR))
        .fold(SkyHistory::default(), |history, (_, this)| history.absorb(this))
}

/// Render one frame per year, in order. Returns the number of frames written.
///
/// The faded history always reaches back to [`FIRST_YEAR`], whatever year
/// the first rendered frame is.
pub fn render_frames(
    discoveries: &[Discovery],
    mut years: Range<i32>,
    renderer: &FrameRenderer,
    output_dir: &Path,
    prefix: &str,
) -> Result<usize> {
    let grouped = by_year(discoveries, &(FIRST_YEAR.min(years.start)..years.end));
    let seed = seed_history(&grouped, years.start);
    let mut written = 0;

    years.try_fold(seed, |history, year| {
        let this = grouped.get(&year).map(Vec::as_slice).unwrap_or(&[]);
        {
            let frame = history.frame(year, this);
            info!("{} {} {}", year, frame.past.len(), frame.this.len());
            renderer.render(&frame, &frame_path(output_dir, prefix, year))?;
        }
        written += 1;

        // Years before FIRST_YEAR are drawn but never join the history
        let next = if year >= FIRST_YEAR {
            history.absorb(this)
        } else {
            history
        };
        Ok::<_, SupernovaError>(next)
    })?;

    Ok(written)
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub rows: usize,
    pub cleaned: usize,
    pub supernovae: usize,
    pub frames: usize,
}

/// Run every stage after retrieval on an already-parsed catalog
pub fn run_on_rows(rows: Vec<CatalogRow>, config: &PipelineConfig) -> Result<RunSummary> {
    let mut summary = RunSummary {
        rows: rows.len(),
        ..RunSummary::default()
    };

    let records = clean_records(rows);
    summary.cleaned = records.len();

    let classified = select_supernovae(records);
    summary.supernovae = classified.len();

    info!("Converting sexagesimal coordinates");
    let discoveries = resolve(classified, config.coordinate_policy)?;

    fs::create_dir_all(&config.output_dir)?;
    let renderer = FrameRenderer::new(config.image_size, config.classify_surveys);
    summary.frames = render_frames(
        &discoveries,
        config.years.clone(),
        &renderer,
        &config.output_dir,
        &config.file_prefix,
    )?;

    info!(
        "Assemble the animation with: convert -delay 30 -loop 0 {0}*.png {0}Discoveries.gif",
        config.file_prefix
    );
    Ok(summary)
}

/// Retrieve the catalog and run the whole pipeline
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let rows = fetch_catalog(&config.query)?;
    run_on_rows(rows, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::SkyCoord;

    fn discovery(name: &str, year: i32, survey: Survey) -> Discovery {
        Discovery {
            name: name.to_string(),
            coord: SkyCoord {
                ra_deg: 10.0,
                dec_deg: -5.0,
            },
            year,
            survey,
        }
    }

    fn names(set: &[&Discovery]) -> Vec<String> {
        set.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn test_by_year_filters_window() {
        let discoveries = vec![
            discovery("SN1572A", 1572, Survey::Other),
            discovery("SN1885A", 1885, Survey::Other),
            discovery("SN2020A", 2020, Survey::Other),
        ];
        let grouped = by_year(&discoveries, &(1885..2020));
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1885]);
    }

    #[test]
    fn test_history_accumulates_monotonically() {
        let discoveries = vec![
            discovery("a", 1900, Survey::Other),
            discovery("b", 1901, Survey::Other),
            discovery("c", 1901, Survey::Other),
            discovery("d", 1903, Survey::Other),
        ];
        let grouped = by_year(&discoveries, &(1900..1905));

        let mut history = SkyHistory::default();
        let mut previous: Vec<String> = Vec::new();
        for year in 1900..1905 {
            let this = grouped.get(&year).map(Vec::as_slice).unwrap_or(&[]);
            {
                let frame = history.frame(year, this);
                let past = names(frame.past);
                assert!(previous.iter().all(|n| past.contains(n)));

                let mut seen = past;
                seen.extend(names(frame.this));
                previous = seen;
            }
            history = history.absorb(this);
        }
        assert_eq!(names(history.past()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_seed_history_reaches_back_to_first_year() {
        let discoveries = vec![
            discovery("SN1880A", 1880, Survey::Other),
            discovery("SN1890A", 1890, Survey::Other),
            discovery("SN1999A", 1999, Survey::Loss),
            discovery("SN2000A", 2000, Survey::Scp),
        ];
        let grouped = by_year(&discoveries, &(FIRST_YEAR..2001));

        let history = seed_history(&grouped, 2000);
        assert_eq!(names(history.past()), vec!["SN1890A", "SN1999A"]);
        assert_eq!(history.legend(), &[Survey::Loss]);

        let frame = history.frame(2000, &grouped[&2000]);
        assert_eq!(names(frame.past), vec!["SN1890A", "SN1999A"]);
        assert_eq!(names(frame.this), vec!["SN2000A"]);
    }

    #[test]
    fn test_seed_history_empty_at_first_year() {
        let discoveries = vec![discovery("SN1885A", 1885, Survey::Other)];
        let grouped = by_year(&discoveries, &(FIRST_YEAR..2020));
        assert!(seed_history(&grouped, FIRST_YEAR).past().is_empty());
        assert!(seed_history(&grouped, 1800).past().is_empty());
    }

    #[test]
    fn test_frame_partitions_past_and_this() {
        let discoveries = vec![
            discovery("old", 1990, Survey::Other),
            discovery("new", 1991, Survey::Other),
        ];
        let grouped = by_year(&discoveries, &(1990..1992));
        let history = SkyHistory::default().absorb(&grouped[&1990]);
        let frame = history.frame(1991, &grouped[&1991]);

        assert_eq!(names(frame.past), vec!["old"]);
        assert_eq!(names(frame.this), vec!["new"]);
    }

    #[test]
    fn test_legend_order_and_exclusions() {
        let discoveries = vec![
            discovery("a", 1998, Survey::Scp),
            discovery("b", 1998, Survey::Other),
            discovery("c", 1998, Survey::Loss),
            discovery("d", 1999, Survey::Scp),
            discovery("e", 1999, Survey::Ps1),
        ];
        let grouped = by_year(&discoveries, &(1998..2000));

        let history = SkyHistory::default();
        let first = history.frame(1998, &grouped[&1998]).legend;
        assert_eq!(first, vec![Survey::Scp, Survey::Loss]);

        let history = history.absorb(&grouped[&1998]);
        let second = history.frame(1999, &grouped[&1999]).legend;
        assert_eq!(second, vec![Survey::Scp, Survey::Loss, Survey::Ps1]);
        assert_eq!(history.legend(), &[Survey::Scp, Survey::Loss]);
    }
}
