//! Status document for the hosting platform
//!
//! The platform displays `brainlife` messages in its UI; the summary block
//! carries the machine-readable result next to them.

use crate::detection::PeakReport;
use crate::model::{ChannelPeak, PeakSummary};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Warning,
    Error,
}

/// One UI message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub msg: String,
}

/// Complete status document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub brainlife: Vec<StatusMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PeakSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_channel: Option<ChannelPeak>,
}

/// Build the status document for a finished run
pub fn product_json(report: &PeakReport) -> Product {
    let mut messages = Vec::new();

    match report.summary.mean.value() {
        Some(hz) => messages.push(StatusMessage {
            kind: MessageKind::Success,
            msg: format!("Alpha peak successfully detected at {:.2}Hz.", hz),
        }),
        None => messages.push(StatusMessage {
            kind: MessageKind::Warning,
            msg: format!(
                "No alpha peak found in any of the {} channels ({}).",
                report.summary.total, report.band
            ),
        }),
    }

    if report.summary.missing > 0 && report.summary.mean.is_defined() {
        messages.push(StatusMessage {
            kind: MessageKind::Warning,
            msg: format!(
                "No peak found for {} of {} channels.",
                report.summary.missing, report.summary.total
            ),
        });
    }

    Product {
        brainlife: messages,
        summary: Some(report.summary),
        mean_channel: Some(report.mean_channel.clone()),
    }
}

/// Build a status document for a run that failed before producing a report
pub fn failure_product(message: impl Into<String>) -> Product {
    Product {
        brainlife: vec![StatusMessage {
            kind: MessageKind::Error,
            msg: message.into(),
        }],
        summary: None,
        mean_channel: None,
    }
}

/// Write a status document to `path`
pub fn write_product_json(path: &Path, product: &Product) -> Result<()> {
    let json = serde_json::to_string_pretty(product).context("Failed to serialize product")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write product: {:?}", path))?;

    log::info!("Product written to: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Band, MeanFrequency, NoPeakReason, PeakOutcome};

    fn report(mean: MeanFrequency, missing: usize) -> PeakReport {
        PeakReport {
            band: Band::alpha(),
            band_frequencies: vec![],
            channels: vec![],
            mean_channel: ChannelPeak::new(
                "mean",
                PeakOutcome::NoPeak {
                    reason: NoPeakReason::NoMaxima,
                },
            ),
            summary: PeakSummary {
                mean,
                missing,
                total: 4,
            },
        }
    }

    #[test]
    fn test_success_message() {
        let product = product_json(&report(MeanFrequency::Computed(10.25), 0));
        assert_eq!(product.brainlife.len(), 1);
        assert_eq!(product.brainlife[0].kind, MessageKind::Success);
        assert_eq!(
            product.brainlife[0].msg,
            "Alpha peak successfully detected at 10.25Hz."
        );
    }

    #[test]
    fn test_missing_channels_warning() {
        let product = product_json(&report(MeanFrequency::Computed(9.0), 2));
        assert_eq!(product.brainlife.len(), 2);
        assert_eq!(product.brainlife[1].kind, MessageKind::Warning);
        assert_eq!(product.brainlife[1].msg, "No peak found for 2 of 4 channels.");
    }

    #[test]
    fn test_undefined_mean_is_warning() {
        let product = product_json(&report(MeanFrequency::Undefined, 4));
        assert_eq!(product.brainlife.len(), 1);
        assert_eq!(product.brainlife[0].kind, MessageKind::Warning);
    }

    #[test]
    fn test_json_shape() {
        let product = product_json(&report(MeanFrequency::Computed(9.0), 0));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["brainlife"][0]["type"], "success");
        assert_eq!(value["summary"]["mean"]["status"], "computed");
        assert_eq!(value["summary"]["mean"]["hz"], 9.0);
        assert_eq!(value["mean_channel"]["outcome"]["status"], "no_peak");

        let failure = serde_json::to_value(failure_product("bad band")).unwrap();
        assert_eq!(failure["brainlife"][0]["type"], "error");
        assert!(failure.get("summary").is_none());
    }
}
