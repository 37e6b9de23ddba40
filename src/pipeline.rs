//! One benchmark-and-plot run, start to finish.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate::{self, ChartSeries, SeriesFormat};
use crate::colors::ColorRegistry;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::harness::load_results;
use crate::identity::Classifier;
use crate::matrix::Phase;
use crate::render::{Chart, ChartRenderer};

pub const REPORT_FILE: &str = "results.md";

/// Paths written by a successful [`Pipeline::plot`].
#[derive(Debug)]
pub struct RunOutput {
    pub charts: Vec<PathBuf>,
    pub report: PathBuf,
}

pub struct Pipeline<R> {
    config: Config,
    classifier: Classifier,
    renderer: R,
    seed: Option<u64>,
}

impl<R: ChartRenderer> Pipeline<R> {
    pub fn new(config: Config, renderer: R) -> Result<Self> {
        config.matrix.validate()?;
        let classifier = config.classifier()?;
        config.matrix.check_classifier(&classifier)?;
        Ok(Self {
            config,
            classifier,
            renderer,
            seed: None,
        })
    }

    /// Fix the color draw so repeated runs produce identical charts.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run both harness phases. Either failing aborts before anything is
    /// plotted.
    pub fn benchmark(&self) -> Result<(PathBuf, PathBuf)> {
        let harness = &self.config.harness;
        let encryption = harness.run_phase(Phase::Encrypt, &self.config.matrix)?;
        let decryption = harness.run_phase(Phase::Decrypt, &self.config.matrix)?;
        Ok((encryption, decryption))
    }

    /// Build all three series, then render them. Every series is built
    /// before the first chart is drawn, so a bad input leaves no charts.
    pub fn plot(&mut self, encryption: &Path, decryption: &Path) -> Result<RunOutput> {
        let enc_records = load_results(encryption)?;
        let dec_records = load_results(decryption)?;

        let mut registry = match self.seed {
            Some(seed) => ColorRegistry::with_seed(seed),
            None => ColorRegistry::new(),
        };
        let enc = aggregate::aggregate(
            &enc_records,
            &self.classifier,
            &mut registry,
            SeriesFormat::SECONDS,
        )?;
        let dec = aggregate::aggregate(
            &dec_records,
            &self.classifier,
            &mut registry,
            SeriesFormat::SECONDS,
        )?;
        let sizes = aggregate::measure_sizes(&enc_records, &self.classifier, &self.config.matrix)?;
        let size = aggregate::aggregate_sizes(&sizes, &mut registry);

        let charts: [(&str, &str, &str, &ChartSeries); 3] = [
            ("Encryption Time", "Seconds", "encryption-time", &enc),
            ("Decryption Time", "Seconds", "decryption-time", &dec),
            ("File Size", "Megabytes", "file-size", &size),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (title, unit, file_stem, series) in charts {
            written.push(self.renderer.render(&Chart {
                series,
                title,
                unit,
                file_stem,
            })?);
        }

        let sections: Vec<(&str, &ChartSeries)> = charts.iter().map(|c| (c.0, c.3)).collect();
        let md = crate::report::render_markdown(&sections, jiff::Timestamp::now());
        let out_dir = &self.config.chart.out_dir;
        fs::create_dir_all(out_dir)
            .map_err(|e| Error::io(format!("failed to create {}", out_dir.display()), e))?;
        let report = out_dir.join(REPORT_FILE);
        fs::write(&report, md)
            .map_err(|e| Error::io(format!("failed to write {}", report.display()), e))?;
        info!(path = %report.display(), "wrote report");

        Ok(RunOutput {
            charts: written,
            report,
        })
    }

    /// Benchmark, then plot from the files the harness just wrote.
    pub fn run(&mut self) -> Result<RunOutput> {
        let (encryption, decryption) = self.benchmark()?;
        self.plot(&encryption, &decryption)
    }

    /// Plot from existing results, defaulting to the harness's export paths.
    pub fn plot_results(
        &mut self,
        encryption: Option<PathBuf>,
        decryption: Option<PathBuf>,
    ) -> Result<RunOutput> {
        let harness = &self.config.harness;
        let encryption = encryption.unwrap_or_else(|| harness.results_path(Phase::Encrypt));
        let decryption = decryption.unwrap_or_else(|| harness.results_path(Phase::Decrypt));
        self.plot(&encryption, &decryption)
    }
}
