//! Noise-tolerant peak finder based on derivative sign changes
//!
//! Walks the alternating sequence of turning points (plus both endpoints) and
//! accepts a peak only once the signal has dropped at least `threshold` below
//! it, and only if it rose at least `threshold` above the preceding valley.
//! Endpoints can be returned, so the resolver's band-edge policy applies.

use super::traits::MaximaFinder;
use crate::model::Maximum;

/// Default threshold, as a fraction of the sequence's dynamic range
pub const DEFAULT_THRESHOLD_FRACTION: f64 = 0.25;

/// Threshold-based peak finder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPeakFinder {
    threshold_fraction: f64,
}

impl ThresholdPeakFinder {
    pub fn new() -> Self {
        Self {
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
        }
    }

    /// Set the threshold as a fraction of `max - min` of each sequence
    pub fn with_threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = if fraction.is_finite() && fraction > 0.0 {
            fraction
        } else {
            0.0
        };
        self
    }

    pub fn threshold_fraction(&self) -> f64 {
        self.threshold_fraction
    }
}

impl Default for ThresholdPeakFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl MaximaFinder for ThresholdPeakFinder {
    fn find_candidates(&self, values: &[f64]) -> Vec<Maximum> {
        let n = values.len();
        if n < 2 {
            return Vec::new();
        }

        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let threshold = self.threshold_fraction * (hi - lo);

        let (mut positions, mut x) = turning_points(values);
        let min_mag = x.iter().copied().fold(f64::INFINITY, f64::min);

        if x.len() <= 2 {
            // Monotone: the larger endpoint is the only possible peak
            let best = if x[1] > x[0] { 1 } else { 0 };
            return if x[best] > min_mag + threshold {
                vec![Maximum::new(positions[best], x[best])]
            } else {
                Vec::new()
            };
        }

        // Endpoints were tacked on, so make sure peaks and valleys alternate
        let rise = signum(x[1] - x[0]);
        let next = signum(x[2] - x[1]);
        let mut ii: isize = if rise <= 0 { -1 } else { 0 };
        if rise == next {
            let skip = if rise <= 0 { 1 } else { 0 };
            x.remove(skip);
            positions.remove(skip);
        }

        let len = x.len() as isize;
        let at = |i: isize| x[i as usize];

        let mut peaks: Vec<(usize, f64)> = Vec::new();
        let mut temp_mag = min_mag;
        let mut temp_loc = 0usize;
        let mut left_min = min_mag;
        let mut found_peak = false;

        while ii < len - 1 {
            // Candidate peak
            ii += 1;

            if found_peak {
                let last_mag = peaks.last().map_or(min_mag, |p| p.1);
                if at(ii) > last_mag || left_min < last_mag - threshold {
                    temp_mag = min_mag;
                    found_peak = false;
                }
            }

            if ii == len - 1 {
                break;
            }

            if at(ii) > temp_mag && at(ii) > left_min + threshold {
                temp_loc = ii as usize;
                temp_mag = at(ii);
            }

            // Following valley
            ii += 1;

            if !found_peak && temp_mag > threshold + at(ii) {
                found_peak = true;
                left_min = at(ii);
                peaks.push((temp_loc, temp_mag));
            } else if at(ii) < left_min {
                left_min = at(ii);
            }
        }

        let last = x.len() - 1;
        if x[last] > temp_mag && x[last] > left_min + threshold {
            peaks.push((last, x[last]));
        } else if !found_peak && temp_mag > min_mag {
            peaks.push((temp_loc, temp_mag));
        }

        peaks
            .into_iter()
            .map(|(loc, mag)| Maximum::new(positions[loc], mag))
            .collect()
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}

/// Endpoints plus every sample where the derivative changes sign
///
/// Zero differences count as slightly negative so the first of a run of
/// repeated values is the one kept.
fn turning_points(values: &[f64]) -> (Vec<usize>, Vec<f64>) {
    let slopes: Vec<f64> = values
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            if d == 0.0 {
                -f64::EPSILON
            } else {
                d
            }
        })
        .collect();

    let mut positions = vec![0];
    positions.extend(
        slopes
            .windows(2)
            .enumerate()
            .filter(|(_, s)| s[0] * s[1] < 0.0)
            .map(|(i, _)| i + 1),
    );
    positions.push(values.len() - 1);

    let x = positions.iter().map(|&i| values[i]).collect();
    (positions, x)
}

fn signum(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
