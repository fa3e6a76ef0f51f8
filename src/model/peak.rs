use serde::{Deserialize, Serialize};

/// A local maximum within a band-restricted sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Maximum {
    /// Position within the band-restricted sequence
    pub index: usize,

    /// PSD value at that position
    pub magnitude: f64,
}

impl Maximum {
    pub fn new(index: usize, magnitude: f64) -> Self {
        Self { index, magnitude }
    }
}

/// Why a channel ended up without a peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoPeakReason {
    /// The finder returned no maxima
    NoMaxima,

    /// Only band-edge maxima were found and they were demoted
    BoundaryOnly,

    /// The band selected no frequencies
    EmptyBand,

    /// The channel row does not line up with the band selection
    InvalidRow,
}

impl NoPeakReason {
    pub fn description(&self) -> &'static str {
        match self {
            NoPeakReason::NoMaxima => "no local maximum in band",
            NoPeakReason::BoundaryOnly => "only band-edge maxima",
            NoPeakReason::EmptyBand => "band is empty",
            NoPeakReason::InvalidRow => "row does not match the frequency axis",
        }
    }
}

/// Result of peak detection on one spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeakOutcome {
    /// A peak was selected
    Found {
        /// Peak frequency in Hz
        frequency: f64,
        /// PSD value at the peak
        magnitude: f64,
        /// Position within the band-restricted sequence
        band_index: usize,
    },

    /// No reliable peak
    NoPeak { reason: NoPeakReason },
}

impl PeakOutcome {
    /// Peak frequency, if one was found
    pub fn frequency(&self) -> Option<f64> {
        match self {
            PeakOutcome::Found { frequency, .. } => Some(*frequency),
            PeakOutcome::NoPeak { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PeakOutcome::Found { .. })
    }
}

/// Peak outcome for one labelled channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPeak {
    /// Channel label from the input
    pub label: String,

    pub outcome: PeakOutcome,
}

impl ChannelPeak {
    pub fn new(label: impl Into<String>, outcome: PeakOutcome) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }

    pub fn frequency(&self) -> Option<f64> {
        self.outcome.frequency()
    }
}

/// Mean peak frequency across channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "hz", rename_all = "snake_case")]
pub enum MeanFrequency {
    /// Mean over the channels that had a peak
    Computed(f64),

    /// No channel had a peak
    Undefined,
}

impl MeanFrequency {
    pub fn value(&self) -> Option<f64> {
        match self {
            MeanFrequency::Computed(hz) => Some(*hz),
            MeanFrequency::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, MeanFrequency::Computed(_))
    }
}

/// Cross-channel reduction of per-channel peaks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakSummary {
    pub mean: MeanFrequency,

    /// Channels without a peak
    pub missing: usize,

    /// Channels considered
    pub total: usize,
}

impl PeakSummary {
    /// Channels that contributed to the mean
    pub fn found(&self) -> usize {
        self.total - self.missing
    }
}
