//! Per-year sky map rendering
//!
//! Each frame is a Mollweide map of every supernova discovered before the
//! frame's year (faded) plus the year's own discoveries (opaque). The
//! drawing backend is created and dropped inside [`FrameRenderer::render`],
//! so only one frame's drawing state is alive at a time.

use std::f64::consts::PI;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::classify::Survey;
use crate::coords::Discovery;
use crate::error::{Result, SupernovaError};
use crate::projection::{meridian, mollweide, outline, parallel, X_EXTENT, Y_EXTENT};

/// Color used for every point when surveys are not distinguished
const UNIFORM_COLOR: RGBColor = BLUE;
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const PAST_OPACITY: f64 = 0.5;
const POINT_RADIUS: i32 = 3;
const GRID_SAMPLES: usize = 90;

/// Legend layout: two columns of five entries in the top-left corner
const LEGEND_ROWS: usize = 5;
const LEGEND_MAX: usize = 10;
const LEGEND_ORIGIN: (i32, i32) = (12, 12);
const LEGEND_COLUMN_WIDTH: i32 = 80;
const LEGEND_ROW_HEIGHT: i32 = 16;

/// Everything drawn in one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub year: i32,
    /// Discoveries from earlier years within the animation window
    pub past: &'a [&'a Discovery],
    /// Discoveries from this year
    pub this: &'a [&'a Discovery],
    /// Named surveys seen so far, in order of first appearance
    pub legend: Vec<Survey>,
}

/// Frame file for a year, e.g. `SN_1987.png`
pub fn frame_path(dir: &Path, prefix: &str, year: i32) -> PathBuf {
    dir.join(format!("{prefix}{year:04}.png"))
}

/// Draws frames to PNG files
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    size: (u32, u32),
    classify_surveys: bool,
}

impl FrameRenderer {
    pub fn new(size: (u32, u32), classify_surveys: bool) -> Self {
        Self {
            size,
            classify_surveys,
        }
    }

    fn point_color(&self, discovery: &Discovery) -> RGBColor {
        if self.classify_surveys {
            let (r, g, b) = discovery.survey.rgb();
            RGBColor(r, g, b)
        } else {
            UNIFORM_COLOR
        }
    }

    /// Render one frame and write it to `path`
    pub fn render(&self, frame: &Frame, path: &Path) -> Result<()> {
        let year = frame.year;
        let fail = |e: &dyn Display| SupernovaError::Render {
            year,
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(year.to_string(), ("serif", 22).into_font().color(&BLACK))
            .margin(8)
            .build_cartesian_2d(-X_EXTENT..X_EXTENT, -Y_EXTENT..Y_EXTENT)
            .map_err(|e| fail(&e))?;

        // Grid: meridians every 30 degrees, parallels at ±30 and ±60
        for step in -5..=5 {
            let longitude = (step as f64 * 30.0).to_radians();
            chart
                .draw_series(LineSeries::new(meridian(longitude, GRID_SAMPLES), GRID_COLOR))
                .map_err(|e| fail(&e))?;
        }
        for step in -2..=2 {
            let latitude = (step as f64 * 30.0).to_radians();
            chart
                .draw_series(LineSeries::new(parallel(latitude, GRID_SAMPLES), GRID_COLOR))
                .map_err(|e| fail(&e))?;
        }
        chart
            .draw_series(LineSeries::new(outline(GRID_SAMPLES), BLACK))
            .map_err(|e| fail(&e))?;

        chart
            .draw_series(frame.past.iter().map(|d| {
                let style = self.point_color(d).mix(PAST_OPACITY).filled();
                Circle::new(project(d), POINT_RADIUS, style)
            }))
            .map_err(|e| fail(&e))?;
        chart
            .draw_series(frame.this.iter().map(|d| {
                let style = self.point_color(d).filled();
                Circle::new(project(d), POINT_RADIUS, style)
            }))
            .map_err(|e| fail(&e))?;

        if self.classify_surveys {
            for (position, survey) in legend_layout(&frame.legend) {
                let (r, g, b) = survey.rgb();
                let style = ("serif", 13).into_font().color(&RGBColor(r, g, b));
                root.draw(&Text::new(survey.label(), position, style))
                    .map_err(|e| fail(&e))?;
            }
        }

        root.present().map_err(|e| fail(&e))?;
        Ok(())
    }
}

fn project(discovery: &Discovery) -> (f64, f64) {
    let longitude = discovery.coord.wrapped_longitude().clamp(-PI, PI);
    mollweide(longitude, discovery.coord.latitude())
}

/// Pixel position of each legend entry, `Other` excluded
fn legend_layout(legend: &[Survey]) -> Vec<((i32, i32), Survey)> {
    legend
        .iter()
        .filter(|s| **s != Survey::Other)
        .take(LEGEND_MAX)
        .enumerate()
        .map(|(i, survey)| {
            let column = (i / LEGEND_ROWS) as i32;
            let row = (i % LEGEND_ROWS) as i32;
            let position = (
                LEGEND_ORIGIN.0 + column * LEGEND_COLUMN_WIDTH,
                LEGEND_ORIGIN.1 + row * LEGEND_ROW_HEIGHT,
            );
            (position, *survey)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NAMED_SURVEYS;
    use crate::coords::SkyCoord;

    fn discovery(name: &str, year: i32, survey: Survey) -> Discovery {
        Discovery {
            name: name.to_string(),
            coord: SkyCoord {
                ra_deg: 83.6,
                dec_deg: 22.0,
            },
            year,
            survey,
        }
    }

    #[test]
    fn test_frame_path_embeds_year() {
        let path = frame_path(Path::new("frames"), "SN_", 1885);
        assert_eq!(path, PathBuf::from("frames/SN_1885.png"));
    }

    #[test]
    fn test_legend_two_columns_of_five() {
        let layout = legend_layout(&NAMED_SURVEYS);
        assert_eq!(layout.len(), 10);
        assert_eq!(layout[0].0, LEGEND_ORIGIN);
        assert_eq!(layout[4].0 .0, LEGEND_ORIGIN.0);
        assert_eq!(layout[5].0, (LEGEND_ORIGIN.0 + LEGEND_COLUMN_WIDTH, LEGEND_ORIGIN.1));
        assert_eq!(layout[9].1, Survey::Des);
    }

    #[test]
    fn test_legend_skips_other() {
        let layout = legend_layout(&[Survey::Other, Survey::Loss]);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0], (LEGEND_ORIGIN, Survey::Loss));
    }

    #[test]
    fn test_uniform_color_without_surveys() {
        let d = discovery("SN2010A", 2010, Survey::Ps1);
        assert_eq!(FrameRenderer::new((800, 400), false).point_color(&d), BLUE);
        assert_eq!(
            FrameRenderer::new((800, 400), true).point_color(&d),
            RGBColor(0, 100, 0)
        );
    }

    #[test]
    #[ignore = "requires system fonts for the title and legend"]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let old = discovery("SN1999A", 1999, Survey::Loss);
        let new = discovery("SN2000A", 2000, Survey::Scp);
        let past = [&old];
        let this = [&new];
        let frame = Frame {
            year: 2000,
            past: &past,
            this: &this,
            legend: vec![Survey::Loss, Survey::Scp],
        };

        let path = frame_path(dir.path(), "SN_", 2000);
        FrameRenderer::new((800, 400), true)
            .render(&frame, &path)
            .unwrap();
        assert!(path.exists());
    }
}
