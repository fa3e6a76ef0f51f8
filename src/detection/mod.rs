//! Detection orchestration

pub mod config;
pub mod pipeline;

pub use config::DetectionConfig;
pub use pipeline::{DetectionPipeline, PeakReport};
