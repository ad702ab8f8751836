use serde::Deserialize;
use serde::Serialize;

/// whose move it is at a given world state. `Chance` marks stochastic
/// nodes, `Unknown` is the sentinel for states where nobody moves
/// (terminal states). everything else is an actual player, indexed
/// from zero in seating order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Turn {
    Chance,
    Player(usize),
    Unknown,
}

impl Turn {
    pub fn chance(&self) -> bool {
        matches!(self, Self::Chance)
    }
    /// actual players are everyone but chance and the unknown sentinel
    pub fn actual(&self) -> bool {
        matches!(self, Self::Player(_))
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chance => write!(f, "chance"),
            Self::Unknown => write!(f, "unknown"),
            Self::Player(i) => write!(f, "P{}", i),
        }
    }
}
