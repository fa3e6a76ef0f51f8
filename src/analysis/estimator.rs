//! Per-channel peak estimation
//!
//! Runs the maxima finder and resolver on every channel row of a PSD matrix,
//! and once more on the cross-channel mean spectrum. Each channel is handled
//! independently: a channel without a peak never affects the others.

use super::resolver::{PeakResolver, Resolution};
use super::traits::MaximaFinder;
use crate::error::PeakError;
use crate::model::{BandSelection, ChannelPeak, NoPeakReason, PeakOutcome, PsdMatrix};
use rayon::prelude::*;

/// Label used for the cross-channel mean spectrum
pub const MEAN_CHANNEL_LABEL: &str = "mean";

/// Applies finder and resolver to each channel of a PSD matrix
pub struct ChannelPeakEstimator<F: MaximaFinder> {
    finder: F,
    resolver: PeakResolver,
    parallel: bool,
}

impl<F: MaximaFinder> ChannelPeakEstimator<F> {
    /// Create an estimator; channels are processed in parallel by default
    pub fn new(finder: F, resolver: PeakResolver) -> Self {
        Self {
            finder,
            resolver,
            parallel: true,
        }
    }

    /// Enable or disable parallel processing across channels
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    pub fn resolver(&self) -> &PeakResolver {
        &self.resolver
    }

    /// Find the peak of one band-restricted sequence
    ///
    /// `values` must hold one value per selected frequency. An empty band is
    /// an error here, since there is nothing to search.
    pub fn estimate_sequence(
        &self,
        selection: &BandSelection,
        values: &[f64],
    ) -> Result<PeakOutcome, PeakError> {
        self.detect(selection, values).map(|(outcome, _)| outcome)
    }

    /// Estimate the peak of one channel given its full-axis row
    pub fn estimate_channel(&self, selection: &BandSelection, label: &str, row: &[f64]) -> ChannelPeak {
        let outcome = match selection
            .restrict(row)
            .and_then(|values| self.detect(selection, &values))
        {
            Ok((outcome, candidates)) => {
                if candidates > 1 {
                    log::debug!("Multiple peaks found for channel: {} ({})", label, candidates);
                }
                outcome
            }
            Err(e) => {
                log::warn!("Peak detection skipped for channel {}: {}", label, e);
                let reason = match e {
                    PeakError::EmptyBand { .. } => NoPeakReason::EmptyBand,
                    _ => NoPeakReason::InvalidRow,
                };
                PeakOutcome::NoPeak { reason }
            }
        };

        match outcome {
            PeakOutcome::Found { frequency, .. } => {
                log::debug!("Channel {}: peak at {:.2} Hz", label, frequency);
            }
            PeakOutcome::NoPeak { reason } => {
                log::warn!("No peak found for channel: {} ({})", label, reason.description());
            }
        }

        ChannelPeak::new(label, outcome)
    }

    /// Estimate every channel, preserving input order
    pub fn estimate_channels(&self, selection: &BandSelection, psd: &PsdMatrix) -> Vec<ChannelPeak> {
        if self.parallel {
            (0..psd.n_channels())
                .into_par_iter()
                .map(|c| self.estimate_channel(selection, &psd.labels()[c], psd.row(c)))
                .collect()
        } else {
            psd.channels()
                .map(|(label, row)| self.estimate_channel(selection, label, row))
                .collect()
        }
    }

    /// Estimate the peak of the spectrum averaged across channels
    pub fn estimate_mean(&self, selection: &BandSelection, psd: &PsdMatrix) -> ChannelPeak {
        let mean = psd.mean_spectrum();
        self.estimate_channel(selection, MEAN_CHANNEL_LABEL, &mean)
    }

    /// Outcome plus the number of candidates the finder produced
    fn detect(
        &self,
        selection: &BandSelection,
        values: &[f64],
    ) -> Result<(PeakOutcome, usize), PeakError> {
        selection.ensure_not_empty()?;

        if values.len() != selection.len() {
            return Err(PeakError::LengthMismatch {
                values: values.len(),
                band: selection.len(),
            });
        }

        let candidates = self.finder.find_candidates(values);

        let outcome = match self.resolver.resolve(&candidates, values.len()) {
            Resolution::Selected(peak) => match selection.frequency_at(peak.index) {
                Some(frequency) => PeakOutcome::Found {
                    frequency,
                    magnitude: peak.magnitude,
                    band_index: peak.index,
                },
                None => {
                    return Err(PeakError::LengthMismatch {
                        values: peak.index + 1,
                        band: selection.len(),
                    })
                }
            },
            Resolution::NoPeak(reason) => PeakOutcome::NoPeak { reason },
        };

        Ok((outcome, candidates.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BoundaryPolicy, LocalMaximaFinder};
    use crate::model::{Band, FrequencyAxis};

    fn axis() -> FrequencyAxis {
        FrequencyAxis::new((5..=15).map(f64::from).collect()).unwrap()
    }

    fn psd() -> PsdMatrix {
        PsdMatrix::new(
            vec!["O1".to_string(), "O2".to_string()],
            vec![
                vec![0.0, 0.0, 1.0, 2.0, 5.0, 3.0, 2.0, 1.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            ],
        )
        .unwrap()
    }

    fn estimator() -> ChannelPeakEstimator<LocalMaximaFinder> {
        ChannelPeakEstimator::new(LocalMaximaFinder::new(), PeakResolver::new())
    }

    #[test]
    fn test_estimate_channels_in_order() {
        let selection = Band::alpha().select(&axis());
        let peaks = estimator().estimate_channels(&selection, &psd());

        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].label, "O1");
        assert_eq!(peaks[0].frequency(), Some(9.0));
        assert_eq!(peaks[1].label, "O2");
        assert_eq!(
            peaks[1].outcome,
            PeakOutcome::NoPeak {
                reason: NoPeakReason::NoMaxima
            }
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<Vec<f64>> = (0..16)
            .map(|c| {
                (0..11)
                    .map(|f| {
                        let centre = 7.0 + (c % 5) as f64;
                        10.0 / (1.0 + (f as f64 + 5.0 - centre).powi(2))
                    })
                    .collect()
            })
            .collect();
        let psd = PsdMatrix::from_rows(rows).unwrap();
        let selection = Band::alpha().select(&axis());

        let parallel = estimator().estimate_channels(&selection, &psd);
        let sequential = estimator()
            .with_parallel(false)
            .estimate_channels(&selection, &psd);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_estimate_mean_channel() {
        let selection = Band::alpha().select(&axis());
        let mean = estimator().estimate_mean(&selection, &psd());
        assert_eq!(mean.label, MEAN_CHANNEL_LABEL);
        assert_eq!(mean.frequency(), Some(9.0));
    }

    #[test]
    fn test_empty_band_is_error_for_sequence() {
        let selection = Band::new(7.2, 7.8).unwrap().select(&axis());
        let result = estimator().estimate_sequence(&selection, &[]);
        assert!(matches!(result, Err(PeakError::EmptyBand { .. })));
    }

    #[test]
    fn test_empty_band_does_not_abort_channels() {
        let selection = Band::new(7.2, 7.8).unwrap().select(&axis());
        let peaks = estimator().estimate_channels(&selection, &psd());
        assert_eq!(peaks.len(), 2);
        for peak in peaks {
            assert_eq!(
                peak.outcome,
                PeakOutcome::NoPeak {
                    reason: NoPeakReason::EmptyBand
                }
            );
        }
    }

    #[test]
    fn test_short_row_reported_as_invalid() {
        let selection = Band::alpha().select(&axis());
        let peak = estimator().estimate_channel(&selection, "O1", &[1.0, 2.0, 3.0]);
        assert_eq!(
            peak.outcome,
            PeakOutcome::NoPeak {
                reason: NoPeakReason::InvalidRow
            }
        );
    }

    #[test]
    fn test_sequence_length_checked() {
        let selection = Band::alpha().select(&axis());
        let result = estimator().estimate_sequence(&selection, &[1.0, 2.0]);
        assert_eq!(
            result,
            Err(PeakError::LengthMismatch { values: 2, band: 8 })
        );
    }

    #[test]
    fn test_last_sample_peak_reported() {
        let selection = Band::alpha().select(&axis());
        let rising = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 5.0];

        let outcome = estimator().estimate_sequence(&selection, &rising).unwrap();
        assert_eq!(outcome.frequency(), Some(14.0));

        let symmetric = ChannelPeakEstimator::new(
            LocalMaximaFinder::new(),
            PeakResolver::new().with_policy(BoundaryPolicy::Symmetric),
        );
        let outcome = symmetric.estimate_sequence(&selection, &rising).unwrap();
        assert!(!outcome.is_found());
    }
}
