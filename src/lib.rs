pub mod cfr;
pub mod game;
pub mod games;
pub mod policy;

/// dimensional analysis types
pub type Utility = f64;
pub type Probability = f64;

/// reach probabilities at or below this threshold are treated as zero
/// by the pruning checks
pub(crate) const REACH_EPSILON: Probability = f64::EPSILON;
