//! Turning measurement records and artifact sizes into sorted chart series.

use std::fs;

use tracing::{debug, warn};

use crate::colors::ColorRegistry;
use crate::error::{Error, Result};
use crate::harness::MeasurementRecord;
use crate::identity::{Classifier, ToolIdentity};
use crate::matrix::BenchmarkMatrix;
use crate::palette::NamedColor;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// How values of a series are printed in labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesFormat {
    pub precision: usize,
    pub unit: &'static str,
}

impl SeriesFormat {
    pub const SECONDS: SeriesFormat = SeriesFormat {
        precision: 3,
        unit: "s",
    };
    pub const MEGABYTES: SeriesFormat = SeriesFormat {
        precision: 0,
        unit: "MB",
    };

    pub fn value(&self, value: f64) -> String {
        format!("{value:.prec$}{unit}", prec = self.precision, unit = self.unit)
    }

    pub fn label(&self, identity: ToolIdentity, value: f64) -> String {
        format!("{identity} ({})", self.value(value))
    }
}

/// Parallel label/value/color sequences for one chart, ascending by value.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub identities: Vec<ToolIdentity>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<NamedColor>,
    pub format: SeriesFormat,
}

impl ChartSeries {
    fn with_capacity(n: usize, format: SeriesFormat) -> Self {
        Self {
            identities: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
            format,
        }
    }

    fn push(&mut self, identity: ToolIdentity, value: f64, color: NamedColor) {
        self.identities.push(identity);
        self.labels.push(self.format.label(identity, value));
        self.values.push(value);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Sort records by median, classify each and color it through `registry`.
///
/// The sort is stable, so tied medians keep the harness's order.
pub fn aggregate(
    records: &[MeasurementRecord],
    classifier: &Classifier,
    registry: &mut ColorRegistry,
    format: SeriesFormat,
) -> Result<ChartSeries> {
    let mut sorted: Vec<&MeasurementRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.median.total_cmp(&b.median));

    let mut series = ChartSeries::with_capacity(sorted.len(), format);
    for record in sorted {
        let identity = classifier.classify(&record.command)?;
        if record.had_failures() {
            warn!(tool = %identity, "some runs exited non-zero");
        }
        let color = registry.color_for(identity);
        series.push(identity, record.median, color);
    }
    Ok(series)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeMeasurement {
    pub identity: ToolIdentity,
    pub bytes: u64,
}

impl SizeMeasurement {
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / BYTES_PER_MB
    }
}

/// Stat the artifact of every distinct tool seen in `records`, in first-seen
/// order. A missing artifact aborts: the run did not complete.
pub fn measure_sizes(
    records: &[MeasurementRecord],
    classifier: &Classifier,
    matrix: &BenchmarkMatrix,
) -> Result<Vec<SizeMeasurement>> {
    let mut sizes: Vec<SizeMeasurement> = Vec::new();
    for record in records {
        let identity = classifier.classify(&record.command)?;
        if sizes.iter().any(|s| s.identity == identity) {
            continue;
        }
        let path = matrix.artifact_path(identity);
        let meta = fs::metadata(&path).map_err(|source| Error::MissingArtifact {
            identity,
            path: path.clone(),
            source,
        })?;
        if !meta.is_file() {
            return Err(Error::MissingArtifact {
                identity,
                path,
                source: std::io::Error::other("not a regular file"),
            });
        }
        debug!(tool = %identity, bytes = meta.len(), "measured artifact");
        sizes.push(SizeMeasurement {
            identity,
            bytes: meta.len(),
        });
    }
    Ok(sizes)
}

/// Size series in megabytes, reusing the colors the timing charts assigned.
pub fn aggregate_sizes(sizes: &[SizeMeasurement], registry: &mut ColorRegistry) -> ChartSeries {
    let mut sorted: Vec<&SizeMeasurement> = sizes.iter().collect();
    sorted.sort_by_key(|s| s.bytes);

    let mut series = ChartSeries::with_capacity(sorted.len(), SeriesFormat::MEGABYTES);
    for size in sorted {
        let color = registry.color_for(size.identity);
        series.push(size.identity, size.megabytes(), color);
    }
    series
}
