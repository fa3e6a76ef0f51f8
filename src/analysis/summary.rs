//! Cross-channel reduction of peak frequencies

use crate::model::{ChannelPeak, MeanFrequency, PeakSummary};

/// Summarise per-channel peaks, ignoring channels without a peak
pub fn summarize(peaks: &[ChannelPeak]) -> PeakSummary {
    summarize_frequencies(peaks.iter().map(ChannelPeak::frequency))
}

/// Summarise optional peak frequencies
///
/// Values are summed in iteration order, so the mean is reproducible for a
/// fixed channel order. `MeanFrequency::Undefined` is returned when every
/// entry is missing (or there are none).
pub fn summarize_frequencies(frequencies: impl IntoIterator<Item = Option<f64>>) -> PeakSummary {
    let mut sum = 0.0;
    let mut found = 0usize;
    let mut total = 0usize;

    for frequency in frequencies {
        total += 1;
        if let Some(hz) = frequency {
            sum += hz;
            found += 1;
        }
    }

    let mean = if found == 0 {
        MeanFrequency::Undefined
    } else {
        MeanFrequency::Computed(sum / found as f64)
    };

    PeakSummary {
        mean,
        missing: total - found,
        total,
    }
}
