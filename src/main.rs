use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lockbench::config::Config;
use lockbench::matrix::Phase;
use lockbench::pipeline::Pipeline;
use lockbench::render::SvgRenderer;

#[derive(Parser)]
#[command(
    name = "lockbench",
    about = "Benchmark safelock against other encryptors with hyperfine and chart the results",
    version
)]
struct Cli {
    /// TOML config file; omitted sections use the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the benchmark and plot from existing results files
    #[arg(long)]
    plot_only: bool,

    /// Print the benchmark commands and exit
    #[arg(long)]
    dry_run: bool,

    /// Number of hyperfine runs per command
    #[arg(long)]
    runs: Option<u32>,

    /// Cooldown before every run, e.g. "60s"
    #[arg(long)]
    rest: Option<String>,

    /// Directory the benchmark runs in (artifacts are measured here)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Directory for charts and the markdown report
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Directory hyperfine exports its JSON results into
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Seed for the color draw (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Encryption results file (default: <results-dir>/encryption.json)
    #[arg(long, requires = "plot_only")]
    encryption_json: Option<PathBuf>,

    /// Decryption results file (default: <results-dir>/decryption.json)
    #[arg(long, requires = "plot_only")]
    decryption_json: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(runs) = self.runs {
            config.harness.runs = runs;
        }
        if let Some(ref rest) = self.rest {
            config.harness.rest = rest.clone();
        }
        if let Some(ref dir) = self.work_dir {
            config.matrix.work_dir = dir.clone();
        }
        if let Some(ref dir) = self.out_dir {
            config.chart.out_dir = dir.clone();
        }
        if let Some(ref dir) = self.results_dir {
            config.harness.results_dir = dir.clone();
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockbench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:?}");
        // A failed harness run exits with the harness's own status.
        let code = match err.downcast_ref::<lockbench::Error>() {
            Some(lockbench::Error::Harness { code, .. }) => *code,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;

    if cli.dry_run {
        config.matrix.validate()?;
        config.matrix.check_classifier(&config.classifier()?)?;
        for phase in [Phase::Encrypt, Phase::Decrypt] {
            println!("# {}", phase.name());
            println!(
                "# prepare: {}",
                config.harness.prepare_command(phase, &config.matrix)
            );
            for cmd in config.matrix.commands(phase)? {
                println!("{cmd}");
            }
        }
        return Ok(());
    }

    info!(
        runs = config.harness.runs,
        rest = %config.harness.rest,
        work_dir = %config.matrix.work_dir.display(),
        out_dir = %config.chart.out_dir.display(),
        tools = ?config.matrix.tools,
        "settings"
    );

    let renderer = SvgRenderer::new(config.chart.clone());
    let mut pipeline = Pipeline::new(config, renderer)?.with_seed(cli.seed);

    let output = if cli.plot_only {
        pipeline.plot_results(cli.encryption_json, cli.decryption_json)?
    } else {
        pipeline.run()?
    };

    for chart in &output.charts {
        println!("{}", chart.display());
    }
    println!("{}", output.report.display());
    Ok(())
}
