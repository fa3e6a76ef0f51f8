//! Main detection pipeline orchestration

use super::config::DetectionConfig;
use crate::analysis::{summarize, ChannelPeakEstimator, MaximaFinder, PeakResolver};
use crate::error::PeakError;
use crate::model::{Band, ChannelPeak, FrequencyAxis, PeakSummary, PsdMatrix};

/// Everything a detection run produces
#[derive(Debug, Clone, PartialEq)]
pub struct PeakReport {
    /// Band that was searched
    pub band: Band,

    /// Frequencies strictly inside the band
    pub band_frequencies: Vec<f64>,

    /// One entry per input channel, in input order
    pub channels: Vec<ChannelPeak>,

    /// Peak of the cross-channel mean spectrum
    pub mean_channel: ChannelPeak,

    /// Reduction of `channels`
    pub summary: PeakSummary,
}

impl PeakReport {
    /// Labels of channels without a peak
    pub fn missing_labels(&self) -> impl Iterator<Item = &str> {
        self.channels
            .iter()
            .filter(|c| !c.outcome.is_found())
            .map(|c| c.label.as_str())
    }
}

/// Main detection pipeline
pub struct DetectionPipeline<F: MaximaFinder> {
    config: DetectionConfig,
    estimator: ChannelPeakEstimator<F>,
}

impl<F: MaximaFinder> DetectionPipeline<F> {
    /// Create a new pipeline with the given finder
    pub fn new(config: DetectionConfig, finder: F) -> Self {
        let resolver = PeakResolver::new().with_policy(config.boundary_policy);
        let estimator = ChannelPeakEstimator::new(finder, resolver).with_parallel(config.parallel);

        Self { config, estimator }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run peak detection over every channel of `psd`
    ///
    /// Shape and band problems are reported before any channel is processed.
    /// Channels without a peak are part of the report, not errors.
    pub fn run(&self, axis: &FrequencyAxis, psd: &PsdMatrix) -> Result<PeakReport, PeakError> {
        let band = self.config.band;

        psd.check_axis(axis)?;
        band.validate(axis)?;

        let selection = band.select(axis);
        selection.ensure_not_empty()?;

        log::info!(
            "Detecting peaks in {} ({} frequencies) across {} channels using the {} finder",
            band,
            selection.len(),
            psd.n_channels(),
            self.estimator.finder().name()
        );

        let channels = self.estimator.estimate_channels(&selection, psd);
        let mean_channel = self.estimator.estimate_mean(&selection, psd);
        let summary = summarize(&channels);

        match summary.mean.value() {
            Some(hz) => log::info!(
                "Mean peak frequency: {:.2} Hz ({} of {} channels without a peak)",
                hz,
                summary.missing,
                summary.total
            ),
            None => log::warn!(
                "No channel had a peak in {}; mean frequency is undefined",
                band
            ),
        }

        Ok(PeakReport {
            band,
            band_frequencies: selection.frequencies().to_vec(),
            channels,
            mean_channel,
            summary,
        })
    }
}
