//! Maxima finder trait

use crate::model::Maximum;

/// Local-maxima finder - allows swapping between finder implementations
///
/// Implementations are pure functions of the input sequence so they can be
/// shared across channel workers.
pub trait MaximaFinder: Send + Sync {
    /// Find candidate peaks in a band-restricted sequence
    ///
    /// Returns candidates in increasing index order. Band-edge samples may be
    /// included as fallback candidates; the resolver decides whether to trust
    /// them. Sequences shorter than two samples yield no candidates.
    fn find_candidates(&self, values: &[f64]) -> Vec<Maximum>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
