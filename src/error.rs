//! Error types for alpha peak detection

use thiserror::Error;

/// Errors raised by the detection core
///
/// Channels without a peak are not errors; see [`crate::model::PeakOutcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeakError {
    /// Band bounds are not finite or not ordered
    #[error("invalid band: fmin ({fmin} Hz) must be finite and below fmax ({fmax} Hz)")]
    InvalidBand { fmin: f64, fmax: f64 },

    /// Band does not overlap the frequency axis at all
    #[error(
        "band {fmin}-{fmax} Hz lies outside the frequency axis ({axis_min}-{axis_max} Hz)"
    )]
    BandOutsideAxis {
        fmin: f64,
        fmax: f64,
        axis_min: f64,
        axis_max: f64,
    },

    /// No frequency falls strictly inside the band
    #[error("no frequencies fall strictly inside the band {fmin}-{fmax} Hz")]
    EmptyBand { fmin: f64, fmax: f64 },

    /// Frequency axis is empty, not finite or not strictly increasing
    #[error("invalid frequency axis: {0}")]
    InvalidAxis(String),

    /// PSD matrix is malformed
    #[error("invalid PSD matrix: {0}")]
    InvalidPsd(String),

    /// PSD column count disagrees with the frequency axis
    #[error("PSD has {psd} frequency columns but the axis has {axis} frequencies")]
    ShapeMismatch { psd: usize, axis: usize },

    /// A channel row is too short for the band selection
    #[error("channel row has {values} values but the band reaches index {index}")]
    RowTooShort { values: usize, index: usize },

    /// A band-restricted sequence has the wrong length
    #[error("sequence has {values} values but the band selects {band} frequencies")]
    LengthMismatch { values: usize, band: usize },
}

impl PeakError {
    /// Whether this error comes from the band configuration
    ///
    /// Configuration errors abort a run before any channel is processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PeakError::InvalidBand { .. }
                | PeakError::BandOutsideAxis { .. }
                | PeakError::EmptyBand { .. }
        )
    }
}
