//! PSD table loading
//!
//! Reads the channel-by-frequency PSD table produced by the upstream PSD
//! step: a header row of `channels,<f1>,<f2>,...` followed by one row per
//! channel with its label and power values.

mod csv;

pub use csv::parse_psd_csv;

use crate::model::{FrequencyAxis, PsdMatrix};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a PSD table from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file (first column: channel labels)
///
/// # Returns
/// The frequency axis taken from the header and the PSD matrix
pub fn load_psd_csv(path: &Path) -> Result<(FrequencyAxis, PsdMatrix)> {
    log::info!("Loading PSD table from {:?}", path);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read PSD table: {:?}", path))?;

    let (axis, psd) =
        parse_psd_csv(&text).with_context(|| format!("Failed to parse PSD table: {:?}", path))?;

    log::info!(
        "PSD loaded: {} channels, {} frequencies ({:.2}-{:.2} Hz)",
        psd.n_channels(),
        axis.len(),
        axis.min(),
        axis.max()
    );

    Ok((axis, psd))
}
