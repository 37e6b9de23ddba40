//! Horizontal bar charts drawn with plotters.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Deserialize;
use tracing::info;

use crate::aggregate::ChartSeries;
use crate::error::{Error, Result};
use crate::palette::NamedColor;

const FONT: &str = "sans-serif";
const LABEL_FONT_SIZE: u32 = 14;
// Rough glyph width used to size the label column; the SVG backend has no
// font metrics to measure with.
const LABEL_CHAR_WIDTH: u32 = 8;

/// One chart to draw: a series plus its title, axis unit and file stem.
pub struct Chart<'a> {
    pub series: &'a ChartSeries,
    pub title: &'a str,
    pub unit: &'a str,
    pub file_stem: &'a str,
}

pub trait ChartRenderer {
    /// Draw `chart` and return the path of the image written.
    fn render(&mut self, chart: &Chart<'_>) -> Result<PathBuf>;
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub out_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Pixels left empty on each side of a bar.
    pub bar_margin: u32,
    pub annotate_values: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            width: 1400,
            height: 300,
            bar_margin: 8,
            annotate_values: true,
        }
    }
}

/// Writes transparent, fixed-size SVG charts into `out_dir`.
pub struct SvgRenderer {
    config: ChartConfig,
}

impl SvgRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn path_for(&self, file_stem: &str) -> PathBuf {
        self.config.out_dir.join(format!("{file_stem}.svg"))
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&mut self, chart: &Chart<'_>) -> Result<PathBuf> {
        let render_err = |reason: String| Error::Render {
            chart: chart.title.to_string(),
            reason,
        };
        if chart.series.is_empty() {
            return Err(render_err("series has no bars".into()));
        }
        fs::create_dir_all(&self.config.out_dir).map_err(|e| {
            Error::io(
                format!("failed to create {}", self.config.out_dir.display()),
                e,
            )
        })?;

        let path = self.path_for(chart.file_stem);
        draw_bars(&path, chart, &self.config).map_err(|e| render_err(e.to_string()))?;
        info!(chart = chart.title, path = %path.display(), bars = chart.series.len(), "wrote chart");
        Ok(path)
    }
}

fn rgb(color: NamedColor) -> RGBColor {
    let (r, g, b) = color.rgb;
    RGBColor(r, g, b)
}

fn segment_index(v: &SegmentValue<u32>) -> Option<usize> {
    match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => Some(*i as usize),
        SegmentValue::Last => None,
    }
}

fn draw_bars(
    path: &Path,
    chart: &Chart<'_>,
    config: &ChartConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let series = chart.series;
    let bars = series.len() as u32;
    let longest = series.labels.iter().map(|l| l.len()).max().unwrap_or(0) as u32;
    // Headroom past the longest bar for its value annotation.
    let x_max = series.max_value().max(f64::MIN_POSITIVE) * 1.15;

    // No background fill: the SVG stays transparent.
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(longest * LABEL_CHAR_WIDTH + 10)
        .build_cartesian_2d(0f64..x_max, (0u32..bars).into_segmented())?;

    let labels = &series.labels;
    ctx.configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_style((FONT, LABEL_FONT_SIZE))
        .y_label_formatter(&|v| {
            segment_index(v)
                .and_then(|i| labels.get(i).cloned())
                .unwrap_or_default()
        })
        .x_desc(chart.unit)
        .draw()?;

    ctx.draw_series(
        Histogram::horizontal(&ctx)
            .margin(config.bar_margin)
            .style_func(|key, _| {
                segment_index(key)
                    .and_then(|i| series.colors.get(i))
                    .map(|c| rgb(*c).filled())
                    .unwrap_or_else(|| BLACK.filled())
            })
            .data(
                series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as u32, *v)),
            ),
    )?;

    if config.annotate_values {
        let style = TextStyle::from((FONT, LABEL_FONT_SIZE).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        ctx.draw_series(series.values.iter().enumerate().map(|(i, v)| {
            Text::new(
                format!(" {}", series.format.value(*v)),
                (*v, SegmentValue::CenterOf(i as u32)),
                style.clone(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}
