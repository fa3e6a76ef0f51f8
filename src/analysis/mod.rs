//! Peak detection layer
//!
//! Local-maxima finding sits behind the [`MaximaFinder`] trait so the
//! prominence-based finder and the threshold-based finder can be swapped.
//! The resolver applies the band-edge policy, the estimator fans out over
//! channels and the summary reduces the per-channel peaks.

mod estimator;
mod maxima;
mod resolver;
mod summary;
mod threshold;
mod traits;

pub use estimator::{ChannelPeakEstimator, MEAN_CHANNEL_LABEL};
pub use maxima::{LocalMaximaFinder, DEFAULT_RELATIVE_TOLERANCE};
pub use resolver::{BoundaryPolicy, PeakResolver, Resolution};
pub use summary::{summarize, summarize_frequencies};
pub use threshold::{ThresholdPeakFinder, DEFAULT_THRESHOLD_FRACTION};
pub use traits::MaximaFinder;
