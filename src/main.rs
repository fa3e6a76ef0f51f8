use alpha_peak::analysis::{BoundaryPolicy, LocalMaximaFinder, MaximaFinder, ThresholdPeakFinder};
use alpha_peak::model::{Band, ChannelPeak, FrequencyAxis, PsdMatrix};
use alpha_peak::report::{failure_product, product_json, write_peak_table, write_product_json};
use alpha_peak::{DetectionConfig, DetectionPipeline, PeakReport};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "alpha-peak")]
#[command(about = "Find the alpha peak frequency in a multi-channel PSD table", long_about = None)]
struct Args {
    /// Path to the PSD table (CSV, first column holds channel labels)
    #[arg(long)]
    psd: Option<String>,

    /// JSON config file with `psd`, `fmin`, `fmax` and `out_dir` keys
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Lower band edge in Hz, exclusive (default: 6.9)
    #[arg(long)]
    fmin: Option<f64>,

    /// Upper band edge in Hz, exclusive (default: 14.1)
    #[arg(long)]
    fmax: Option<f64>,

    /// Peak finder to use
    #[arg(long, value_enum, default_value = "prominence")]
    finder: FinderKind,

    /// Prominence tolerance for the prominence finder, relative to dynamic range
    #[arg(long, default_value = "0.01")]
    tolerance: f64,

    /// Threshold for the threshold finder, relative to dynamic range
    #[arg(long, default_value = "0.25")]
    threshold: f64,

    /// Also demote a lone maximum on the last band sample
    #[arg(long)]
    symmetric_edges: bool,

    /// Process channels one at a time
    #[arg(long)]
    sequential: bool,

    /// Directory for the per-channel peak table
    #[arg(short = 'o', long)]
    out_dir: Option<String>,

    /// Path of the status document
    #[arg(long, default_value = "product.json")]
    product: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FinderKind {
    /// Strict local maxima filtered by prominence
    Prominence,
    /// Derivative sign changes with a drop threshold
    Threshold,
}

/// Values read from a JSON config file; command-line flags take precedence
#[derive(Debug, Default, Deserialize)]
struct RunConfig {
    psd: Option<String>,
    fmin: Option<f64>,
    fmax: Option<f64>,
    out_dir: Option<String>,
}

impl RunConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config: {:?}", path))
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let product_path = expand(&args.product);

    match run(&args) {
        Ok(report) => {
            write_product_json(&product_path, &product_json(&report))?;
            Ok(())
        }
        Err(e) => {
            log::error!("Alpha peak detection failed: {:#}", e);
            if let Err(write_err) = write_product_json(&product_path, &failure_product(format!("{:#}", e))) {
                log::error!("Could not write failure product: {:#}", write_err);
            }
            Err(e)
        }
    }
}

fn run(args: &Args) -> Result<PeakReport> {
    let file_config = match &args.config {
        Some(path) => RunConfig::load(&expand(path))?,
        None => RunConfig::default(),
    };

    let psd_path = args
        .psd
        .as_ref()
        .or(file_config.psd.as_ref())
        .map(|p| expand(p))
        .context("No PSD table given (use --psd or a config file with a `psd` key)")?;

    let defaults = Band::alpha();
    let band = Band::new(
        args.fmin.or(file_config.fmin).unwrap_or(defaults.fmin),
        args.fmax.or(file_config.fmax).unwrap_or(defaults.fmax),
    )?;

    let out_dir = expand(
        args.out_dir
            .as_deref()
            .or(file_config.out_dir.as_deref())
            .unwrap_or("out_dir"),
    );

    let policy = if args.symmetric_edges {
        BoundaryPolicy::Symmetric
    } else {
        BoundaryPolicy::Asymmetric
    };
    let config = DetectionConfig::new(band)
        .with_boundary_policy(policy)
        .with_parallel(!args.sequential);

    log::info!("Alpha Peak Detection");
    log::info!("====================");
    log::info!("Band: {}", band);

    let (axis, psd) = alpha_peak::psd::load_psd_csv(&psd_path)?;

    let report = match args.finder {
        FinderKind::Prominence => {
            let finder = LocalMaximaFinder::new().with_relative_tolerance(args.tolerance);
            detect(config, finder, &axis, &psd)?
        }
        FinderKind::Threshold => {
            let finder = ThresholdPeakFinder::new().with_threshold_fraction(args.threshold);
            detect(config, finder, &axis, &psd)?
        }
    };

    for channel in &report.channels {
        log_channel(channel);
    }
    log_channel(&report.mean_channel);

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;
    write_peak_table(&out_dir.join("alpha_peak.csv"), &report)?;

    match report.summary.mean.value() {
        Some(hz) => log::info!("✅ Alpha peak: {:.2} Hz", hz),
        None => log::warn!("Alpha peak undefined: no channel had a peak"),
    }

    Ok(report)
}

fn detect<F: MaximaFinder>(
    config: DetectionConfig,
    finder: F,
    axis: &FrequencyAxis,
    psd: &PsdMatrix,
) -> Result<PeakReport> {
    let pipeline = DetectionPipeline::new(config, finder);
    let report = pipeline.run(axis, psd)?;
    Ok(report)
}

fn log_channel(channel: &ChannelPeak) {
    match channel.frequency() {
        Some(hz) => log::debug!("  {}: {:.2} Hz", channel.label, hz),
        None => log::debug!("  {}: no peak", channel.label),
    }
}
