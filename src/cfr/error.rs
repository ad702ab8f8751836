use crate::game::turn::Turn;

/// everything that can go wrong at the solver API boundary. none of
/// these are recovered internally; a failed call leaves the solver in
/// its pre-call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfrError {
    /// a configuration combination outside the supported set
    InvalidConfiguration(&'static str),
    /// the environment does not guarantee serialized, unrolled play
    EnvironmentNotSerialized,
    /// per-player policy maps that cover some actual players but not
    /// others
    InconsistentInfostates,
    /// an action policy whose weights sum to zero cannot be normalized
    NonNormalizablePolicy,
    /// a regret table and a policy passed to a kernel disagree on the
    /// action set
    SizeMismatch { expected: usize, found: usize },
    /// a player outside the update schedule
    UnknownPlayer(Turn),
}

impl std::fmt::Display for CfrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(why) => write!(f, "invalid configuration: {}", why),
            Self::EnvironmentNotSerialized => {
                write!(f, "environment is not serialized and unrolled")
            }
            Self::InconsistentInfostates => {
                write!(f, "policy maps must cover every actual player or none")
            }
            Self::NonNormalizablePolicy => {
                write!(f, "action policy weights sum to zero and cannot be normalized")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "action set size mismatch: expected {}, found {}", expected, found)
            }
            Self::UnknownPlayer(turn) => write!(f, "player {} is not in the update schedule", turn),
        }
    }
}

impl std::error::Error for CfrError {}
