use super::FrequencyAxis;
use crate::error::PeakError;

/// Frequency band with exclusive bounds, in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub fmin: f64,
    pub fmax: f64,
}

impl Band {
    /// Create a band, rejecting non-finite or unordered bounds
    pub fn new(fmin: f64, fmax: f64) -> Result<Self, PeakError> {
        if !fmin.is_finite() || !fmax.is_finite() || fmin >= fmax {
            return Err(PeakError::InvalidBand { fmin, fmax });
        }
        Ok(Self { fmin, fmax })
    }

    /// Alpha band, 7-14 Hz
    ///
    /// Bounds sit just outside 7 and 14 so both integer bins are kept under
    /// the exclusive-bound rule.
    pub fn alpha() -> Self {
        Self {
            fmin: 6.9,
            fmax: 14.1,
        }
    }

    /// Whether `frequency` lies strictly inside the band
    pub fn contains(&self, frequency: f64) -> bool {
        frequency > self.fmin && frequency < self.fmax
    }

    /// Check the band against an axis before any channel is processed
    ///
    /// Fails when the bounds are invalid or the band lies entirely outside the
    /// axis range.
    pub fn validate(&self, axis: &FrequencyAxis) -> Result<(), PeakError> {
        Band::new(self.fmin, self.fmax)?;

        if self.fmax <= axis.min() || self.fmin >= axis.max() {
            return Err(PeakError::BandOutsideAxis {
                fmin: self.fmin,
                fmax: self.fmax,
                axis_min: axis.min(),
                axis_max: axis.max(),
            });
        }
        Ok(())
    }

    /// Restrict an axis to the band
    pub fn select(&self, axis: &FrequencyAxis) -> BandSelection {
        let (indices, frequencies): (Vec<usize>, Vec<f64>) = axis
            .values()
            .iter()
            .enumerate()
            .filter(|(_, f)| self.contains(**f))
            .map(|(i, f)| (i, *f))
            .unzip();

        BandSelection {
            band: *self,
            indices,
            frequencies,
        }
    }
}

impl Default for Band {
    fn default() -> Self {
        Self::alpha()
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} Hz", self.fmin, self.fmax)
    }
}

/// Axis positions and frequencies that fall inside a band
#[derive(Debug, Clone, PartialEq)]
pub struct BandSelection {
    band: Band,
    indices: Vec<usize>,
    frequencies: Vec<f64>,
}

impl BandSelection {
    pub fn band(&self) -> Band {
        self.band
    }

    /// Positions on the original axis, in axis order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Frequencies at [`Self::indices`]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Fail with `EmptyBand` when nothing was selected
    pub fn ensure_not_empty(&self) -> Result<(), PeakError> {
        if self.is_empty() {
            return Err(PeakError::EmptyBand {
                fmin: self.band.fmin,
                fmax: self.band.fmax,
            });
        }
        Ok(())
    }

    /// Values of a full-axis row at the selected positions
    pub fn restrict(&self, row: &[f64]) -> Result<Vec<f64>, PeakError> {
        self.indices
            .iter()
            .map(|&i| {
                row.get(i).copied().ok_or(PeakError::RowTooShort {
                    values: row.len(),
                    index: i,
                })
            })
            .collect()
    }

    /// Frequency for a position within the band-restricted sequence
    pub fn frequency_at(&self, band_index: usize) -> Option<f64> {
        self.frequencies.get(band_index).copied()
    }
}
