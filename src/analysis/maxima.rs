//! Strict-neighbour local maxima with a prominence tolerance
//!
//! A sample is a local maximum when it is strictly greater than both
//! neighbours. To keep jitter from registering as extra maxima, a maximum is
//! accepted only if its prominence exceeds a tolerance proportional to the
//! sequence's dynamic range.
//!
//! Prominence is the drop from the peak to the higher of the two lowest points
//! reached on each side before a strictly higher sample (or the sequence end).

use super::traits::MaximaFinder;
use crate::model::Maximum;

/// Default tolerance, as a fraction of the sequence's dynamic range
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.01;

/// Local maxima finder with prominence-based noise rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMaximaFinder {
    relative_tolerance: f64,
}

impl LocalMaximaFinder {
    pub fn new() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
        }
    }

    /// Set the prominence tolerance relative to `max - min` of the sequence
    ///
    /// Negative or non-finite values disable the tolerance.
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            0.0
        };
        self
    }

    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    /// Interior local maxima, in index order
    ///
    /// The first and last samples are never returned. Monotone sequences and
    /// sequences shorter than three samples yield nothing.
    pub fn find(&self, values: &[f64]) -> Vec<Maximum> {
        if values.len() < 3 {
            return Vec::new();
        }

        let tolerance = self.absolute_tolerance(values);

        (1..values.len() - 1)
            .filter(|&i| values[i] > values[i - 1] && values[i] > values[i + 1])
            .filter(|&i| prominence(values, i) > tolerance)
            .map(|i| Maximum::new(i, values[i]))
            .collect()
    }

    /// Band-edge samples that rise above their only neighbour
    fn edge_candidates(&self, values: &[f64], tolerance: f64) -> (Option<Maximum>, Option<Maximum>) {
        let last = values.len() - 1;

        let first = (values[0] > values[1] && prominence(values, 0) > tolerance)
            .then(|| Maximum::new(0, values[0]));
        let end = (values[last] > values[last - 1] && prominence(values, last) > tolerance)
            .then(|| Maximum::new(last, values[last]));

        (first, end)
    }

    fn absolute_tolerance(&self, values: &[f64]) -> f64 {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        self.relative_tolerance * (max - min)
    }
}

impl Default for LocalMaximaFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl MaximaFinder for LocalMaximaFinder {
    fn find_candidates(&self, values: &[f64]) -> Vec<Maximum> {
        if values.len() < 2 {
            return Vec::new();
        }

        let tolerance = self.absolute_tolerance(values);
        let (first, end) = self.edge_candidates(values, tolerance);

        let mut candidates = Vec::new();
        candidates.extend(first);
        candidates.extend(self.find(values));
        candidates.extend(end);
        candidates
    }

    fn name(&self) -> &'static str {
        "prominence"
    }
}

/// Topographic prominence of `values[index]`
///
/// Band-edge samples only have one side; that side alone sets the base.
fn prominence(values: &[f64], index: usize) -> f64 {
    let peak = values[index];

    let left = side_base(values[..index].iter().rev(), peak);
    let right = side_base(values[index + 1..].iter(), peak);

    let reference = match (left, right) {
        (Some(l), Some(r)) => l.max(r),
        (Some(b), None) | (None, Some(b)) => b,
        (None, None) => peak,
    };

    peak - reference
}

/// Lowest sample reached walking away from a peak before a higher one
fn side_base<'a>(side: impl Iterator<Item = &'a f64>, peak: f64) -> Option<f64> {
    side.take_while(|v| **v <= peak)
        .fold(None, |lowest: Option<f64>, &v| Some(lowest.map_or(v, |l| l.min(v))))
}
