//! TOML configuration. Every field has a default, so an empty file (or no
//! file at all) reproduces the stock safelock benchmark.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::harness::Harness;
use crate::identity::{Classifier, Matcher};
use crate::matrix::BenchmarkMatrix;
use crate::render::ChartConfig;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub matrix: BenchmarkMatrix,
    pub harness: Harness,
    pub chart: ChartConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Replaces the built-in matcher list when non-empty. Order is priority.
    pub matchers: Vec<Matcher>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config {}", path.display()), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn classifier(&self) -> Result<Classifier> {
        if self.classifier.matchers.is_empty() {
            Ok(Classifier::default())
        } else {
            Classifier::new(self.classifier.matchers.clone())
        }
    }
}
