//! Per-channel peak table

use crate::detection::PeakReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Marker written for channels without a peak
pub const NO_PEAK_MARKER: &str = "n/a";

/// Render the per-channel table as CSV text
pub fn render_peak_table(report: &PeakReport) -> String {
    let mut out = String::from("channels,alpha_peak\n");

    for channel in &report.channels {
        let value = channel
            .frequency()
            .map(|hz| hz.to_string())
            .unwrap_or_else(|| NO_PEAK_MARKER.to_string());
        out.push_str(&format!("{},{}\n", quote_label(&channel.label), value));
    }

    out
}

/// Write the per-channel table to `path`
pub fn write_peak_table(path: &Path, report: &PeakReport) -> Result<()> {
    std::fs::write(path, render_peak_table(report))
        .with_context(|| format!("Failed to write peak table: {:?}", path))?;

    log::info!("Peak table written to: {:?}", path);
    Ok(())
}

fn quote_label(label: &str) -> String {
    if label.contains(',') || label.contains('"') {
        format!("\"{}\"", label.replace('"', "\"\""))
    } else {
        label.to_string()
    }
}
