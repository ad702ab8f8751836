use super::turn::Turn;
use serde::Deserialize;
use serde::Serialize;

/// an information state: the ordered (public, private) observation
/// history of one player, from the root to their current decision.
/// two world states producing equal infostates are indistinguishable
/// to the acting player and share all per-infoset tables, so this type
/// is the key of every tabular map and hashes structurally.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoState<O> {
    turn: Turn,
    history: Vec<(O, O)>,
}

impl<O> InfoState<O> {
    pub fn new(turn: Turn) -> Self {
        Self {
            turn,
            history: Vec::new(),
        }
    }
    /// the player this infostate belongs to
    pub fn turn(&self) -> Turn {
        self.turn
    }
    pub fn len(&self) -> usize {
        self.history.len()
    }
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
    /// append one (public, private) observation pair
    pub fn push(&mut self, public: O, private: O) {
        self.history.push((public, private));
    }
    pub fn history(&self) -> &[(O, O)] {
        &self.history
    }
}
