//! Data model for PSD peak detection
//!
//! These types are shared by the detection core and the I/O collaborators
//! and carry no file-format knowledge.

mod band;
mod peak;
mod spectrum;

pub use band::{Band, BandSelection};
pub use peak::{ChannelPeak, Maximum, MeanFrequency, NoPeakReason, PeakOutcome, PeakSummary};
pub use spectrum::{FrequencyAxis, PsdMatrix};
