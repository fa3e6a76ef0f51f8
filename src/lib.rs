//! Alpha Peak - dominant spectral peak detection in multi-channel PSD data
//!
//! This library finds the peak frequency inside a band (the alpha band,
//! 7-14 Hz, by default) for every channel of a power-spectral-density
//! matrix, and reduces the per-channel peaks to a mean frequency that
//! tolerates channels without a peak.
//!
//! ```no_run
//! use alpha_peak::{detect_alpha_peak, psd::load_psd_csv};
//! use std::path::Path;
//!
//! let (axis, psd) = load_psd_csv(Path::new("psd.csv"))?;
//! let report = detect_alpha_peak(&axis, &psd)?;
//!
//! match report.summary.mean.value() {
//!     Some(hz) => println!("Alpha peak: {:.2} Hz", hz),
//!     None => println!("No channel had an alpha peak"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod detection;
pub mod error;
pub mod model;
pub mod psd;
pub mod report;

pub use detection::{DetectionConfig, DetectionPipeline, PeakReport};
pub use error::PeakError;

use analysis::LocalMaximaFinder;
use model::{FrequencyAxis, PsdMatrix};

/// Detect the alpha peak with default settings
///
/// Searches 7-14 Hz with the prominence-based finder and the default
/// band-edge policy.
pub fn detect_alpha_peak(axis: &FrequencyAxis, psd: &PsdMatrix) -> Result<PeakReport, PeakError> {
    DetectionPipeline::new(DetectionConfig::default(), LocalMaximaFinder::new()).run(axis, psd)
}
