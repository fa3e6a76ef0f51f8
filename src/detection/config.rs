//! Detection configuration

use crate::analysis::BoundaryPolicy;
use crate::model::Band;

/// Configuration for a detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    /// Frequency band to search, exclusive bounds (default: alpha, 6.9-14.1 Hz)
    pub band: Band,

    /// Treatment of a lone band-edge maximum (default: Asymmetric)
    pub boundary_policy: BoundaryPolicy,

    /// Process channels in parallel (default: true)
    /// Results are identical either way
    pub parallel: bool,
}

impl DetectionConfig {
    /// Create a configuration for the given band
    pub fn new(band: Band) -> Self {
        Self {
            band,
            boundary_policy: BoundaryPolicy::default(),
            parallel: true,
        }
    }

    /// Set the band edge policy
    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    /// Enable or disable parallel channel processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::new(Band::alpha())
    }
}
