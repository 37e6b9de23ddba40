//! Driving hyperfine and reading back its `--export-json` results.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::matrix::{BenchmarkMatrix, Phase};

/// One row of hyperfine's `results` array. Only `command` and `median`
/// feed the charts; the rest is carried for the markdown report.
#[derive(Clone, Debug, Deserialize)]
pub struct MeasurementRecord {
    pub command: String,
    pub median: f64,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default)]
    pub exit_codes: Vec<Option<i32>>,
}

impl MeasurementRecord {
    pub fn new(command: impl Into<String>, median: f64) -> Self {
        Self {
            command: command.into(),
            median,
            mean: None,
            stddev: None,
            min: None,
            max: None,
            exit_codes: Vec::new(),
        }
    }

    /// True if any run exited non-zero or was killed by a signal.
    pub fn had_failures(&self) -> bool {
        self.exit_codes.iter().any(|c| *c != Some(0))
    }
}

#[derive(Deserialize)]
struct ResultsFile {
    results: Vec<MeasurementRecord>,
}

/// Load and validate one hyperfine results file.
pub fn load_results(path: &Path) -> Result<Vec<MeasurementRecord>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
    parse_results(&content).map_err(|reason| Error::ResultsFormat {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_results(content: &str) -> std::result::Result<Vec<MeasurementRecord>, String> {
    let parsed: ResultsFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if parsed.results.is_empty() {
        return Err("`results` is empty".into());
    }
    for (i, r) in parsed.results.iter().enumerate() {
        if !(r.median.is_finite() && r.median > 0.0) {
            return Err(format!(
                "results[{i}] ({}) has non-positive median {}",
                r.command, r.median
            ));
        }
    }
    Ok(parsed.results)
}

/// Resolve `name` on `$PATH`.
pub fn find_tool(name: &str) -> Option<String> {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Harness {
    pub program: String,
    pub runs: u32,
    /// Cooldown before every run, in `sleep` syntax (`60s`, `2m`).
    pub rest: String,
    pub results_dir: PathBuf,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            program: "hyperfine".into(),
            runs: 3,
            rest: "60s".into(),
            results_dir: PathBuf::from("."),
        }
    }
}

impl Harness {
    pub fn results_path(&self, phase: Phase) -> PathBuf {
        self.results_dir.join(format!("{}.json", phase.name()))
    }

    /// Shell step hyperfine runs before every timed run of `phase`.
    pub fn prepare_command(&self, phase: Phase, matrix: &BenchmarkMatrix) -> String {
        match phase {
            Phase::Encrypt => format!("sleep {}", self.rest),
            Phase::Decrypt => format!(
                "rm -rf {dir} && mkdir {dir} && sleep {rest}",
                dir = matrix.output_dir,
                rest = self.rest
            ),
        }
    }

    /// Full argument list passed to the harness for `phase`.
    pub fn args(
        &self,
        phase: Phase,
        matrix: &BenchmarkMatrix,
        export: &Path,
    ) -> Result<Vec<String>> {
        let mut args = vec![
            "--runs".to_string(),
            self.runs.to_string(),
            "--prepare".to_string(),
            self.prepare_command(phase, matrix),
        ];
        args.extend(matrix.commands(phase)?);
        args.push("--export-json".to_string());
        args.push(export.display().to_string());
        Ok(args)
    }

    /// Run one phase to completion and return the results file it wrote.
    pub fn run_phase(&self, phase: Phase, matrix: &BenchmarkMatrix) -> Result<PathBuf> {
        if self.runs == 0 {
            return Err(Error::Config("harness.runs must be at least 1".into()));
        }
        let program = find_tool(&self.program).ok_or_else(|| Error::HarnessUnavailable {
            program: self.program.clone(),
        })?;

        fs::create_dir_all(&self.results_dir).map_err(|e| {
            Error::io(
                format!("failed to create {}", self.results_dir.display()),
                e,
            )
        })?;
        // The harness runs inside the work dir, so the export path must not
        // be relative to ours.
        let export = std::path::absolute(self.results_path(phase))
            .map_err(|e| Error::io("failed to resolve results path", e))?;
        let args = self.args(phase, matrix, &export)?;

        info!(phase = phase.name(), runs = self.runs, tools = matrix.tools.len(), "running benchmark");
        let start = Instant::now();
        let status = Command::new(&program)
            .args(&args)
            .current_dir(&matrix.work_dir)
            .status()
            .map_err(|e| Error::io(format!("failed to run {program}"), e))?;

        if !status.success() {
            let code = status.code().unwrap_or_else(|| {
                warn!(phase = phase.name(), "harness terminated by signal");
                1
            });
            return Err(Error::Harness {
                phase: phase.name(),
                code,
            });
        }
        info!(phase = phase.name(), elapsed = ?start.elapsed(), "benchmark finished");
        Ok(export)
    }
}
