//! Band-edge and tie-break policy for candidate maxima
//!
//! A maximum on the first or last sample of the band is only used when
//! nothing better exists:
//!
//! - no candidates: no peak
//! - one candidate on the first sample: demoted to no peak
//! - one candidate on the last sample: kept (unless the policy is symmetric)
//! - several candidates: the largest magnitude wins, but a winner on the first
//!   sample and then a winner on the last sample is replaced by the next
//!   largest; if no candidate survives, no peak

use crate::model::{Maximum, NoPeakReason};

/// How a lone band-edge maximum is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Demote a lone maximum on the first sample only
    #[default]
    Asymmetric,

    /// Demote a lone maximum on either edge
    Symmetric,
}

/// Outcome of resolving one channel's candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Selected(Maximum),
    NoPeak(NoPeakReason),
}

impl Resolution {
    pub fn selected(&self) -> Option<Maximum> {
        match self {
            Resolution::Selected(m) => Some(*m),
            Resolution::NoPeak(_) => None,
        }
    }
}

/// Reduces candidate maxima to at most one selected peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeakResolver {
    policy: BoundaryPolicy,
}

impl PeakResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Pick the peak among `maxima` found in a sequence of `len` samples
    pub fn resolve(&self, maxima: &[Maximum], len: usize) -> Resolution {
        let last = len.saturating_sub(1);

        match maxima {
            [] => Resolution::NoPeak(NoPeakReason::NoMaxima),
            [only] => {
                let demoted = only.index == 0
                    || (self.policy == BoundaryPolicy::Symmetric && only.index == last);
                if demoted {
                    log::debug!("Demoting lone band-edge maximum at index {}", only.index);
                    Resolution::NoPeak(NoPeakReason::BoundaryOnly)
                } else {
                    Resolution::Selected(*only)
                }
            }
            _ => {
                let mut excluded: Vec<usize> = Vec::with_capacity(2);
                let mut winner = strongest(maxima, &excluded);

                // Each pass excludes a new index, so this runs at most twice
                while let Some(m) = winner.filter(|m| m.index == 0 || m.index == last) {
                    log::debug!("Largest maximum sits on band edge index {}, skipping it", m.index);
                    excluded.push(m.index);
                    winner = strongest(maxima, &excluded);
                }

                match winner {
                    Some(m) => Resolution::Selected(m),
                    None => Resolution::NoPeak(NoPeakReason::BoundaryOnly),
                }
            }
        }
    }
}

/// Largest-magnitude maximum not at an excluded index; ties keep the lowest index
fn strongest(maxima: &[Maximum], excluded: &[usize]) -> Option<Maximum> {
    maxima
        .iter()
        .filter(|m| !excluded.contains(&m.index))
        .fold(None, |best: Option<Maximum>, m| match best {
            Some(b) if b.magnitude >= m.magnitude => Some(b),
            _ => Some(*m),
        })
}
