use crate::error::PeakError;

/// Ordered frequency axis in Hz, shared read-only by every channel
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxis {
    frequencies: Vec<f64>,
}

impl FrequencyAxis {
    /// Create an axis from strictly increasing, finite frequencies
    pub fn new(frequencies: Vec<f64>) -> Result<Self, PeakError> {
        if frequencies.is_empty() {
            return Err(PeakError::InvalidAxis("axis has no frequencies".to_string()));
        }

        if let Some(bad) = frequencies.iter().find(|f| !f.is_finite()) {
            return Err(PeakError::InvalidAxis(format!(
                "non-finite frequency {}",
                bad
            )));
        }

        if let Some(pair) = frequencies.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PeakError::InvalidAxis(format!(
                "frequencies must be strictly increasing ({} followed by {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self { frequencies })
    }

    /// All frequencies in axis order
    pub fn values(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always false for a constructed axis
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Lowest frequency on the axis
    pub fn min(&self) -> f64 {
        self.frequencies[0]
    }

    /// Highest frequency on the axis
    pub fn max(&self) -> f64 {
        self.frequencies[self.frequencies.len() - 1]
    }
}

/// Channel-major PSD matrix (one row per channel, one column per frequency)
#[derive(Debug, Clone, PartialEq)]
pub struct PsdMatrix {
    /// Channel labels in input order
    labels: Vec<String>,

    /// Row-major power values, `labels.len() * n_freqs` entries
    values: Vec<f64>,

    /// Number of frequency columns
    n_freqs: usize,
}

impl PsdMatrix {
    /// Build a matrix from labelled channel rows
    ///
    /// Every row must have the same length, and every value must be finite
    /// and non-negative.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, PeakError> {
        if rows.is_empty() {
            return Err(PeakError::InvalidPsd("matrix has no channels".to_string()));
        }

        if labels.len() != rows.len() {
            return Err(PeakError::InvalidPsd(format!(
                "{} labels for {} channel rows",
                labels.len(),
                rows.len()
            )));
        }

        let n_freqs = rows[0].len();
        if n_freqs == 0 {
            return Err(PeakError::InvalidPsd("matrix has no frequency columns".to_string()));
        }

        let mut values = Vec::with_capacity(rows.len() * n_freqs);
        for (label, row) in labels.iter().zip(&rows) {
            if row.len() != n_freqs {
                return Err(PeakError::InvalidPsd(format!(
                    "channel {} has {} values, expected {}",
                    label,
                    row.len(),
                    n_freqs
                )));
            }

            if let Some(bad) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(PeakError::InvalidPsd(format!(
                    "channel {} contains invalid power value {}",
                    label, bad
                )));
            }

            values.extend_from_slice(row);
        }

        Ok(Self {
            labels,
            values,
            n_freqs,
        })
    }

    /// Build a matrix with labels `0..C`
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PeakError> {
        let labels = (0..rows.len()).map(|c| c.to_string()).collect();
        Self::new(labels, rows)
    }

    /// Check that the column count matches the frequency axis
    pub fn check_axis(&self, axis: &FrequencyAxis) -> Result<(), PeakError> {
        if self.n_freqs != axis.len() {
            return Err(PeakError::ShapeMismatch {
                psd: self.n_freqs,
                axis: axis.len(),
            });
        }
        Ok(())
    }

    pub fn n_channels(&self) -> usize {
        self.labels.len()
    }

    pub fn n_freqs(&self) -> usize {
        self.n_freqs
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Power spectrum of one channel
    pub fn row(&self, channel: usize) -> &[f64] {
        let start = channel * self.n_freqs;
        &self.values[start..start + self.n_freqs]
    }

    /// Iterate over (label, row) pairs in channel order
    pub fn channels(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.chunks_exact(self.n_freqs))
    }

    /// Column-wise average across channels
    ///
    /// Sums run in channel order so the result is reproducible.
    pub fn mean_spectrum(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_freqs];
        for row in self.values.chunks_exact(self.n_freqs) {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }

        let n = self.n_channels() as f64;
        sums.into_iter().map(|s| s / n).collect()
    }
}
