use crate::Utility;
use crate::game::game::Game;
use crate::game::game::Stochasticity;
use crate::game::turn::Turn;

/// rock paper scissors, sequentialized: the first player commits, the
/// second moves without having observed anything but that a move was
/// made. the veiled public observation is what keeps the second
/// player's three histories in one infostate.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RpsAction {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RpsObs {
    /// a move was made, identity hidden
    Veiled,
    /// a move was made and you saw it (it was yours)
    Threw(RpsAction),
}

#[derive(Debug, Clone, Default)]
pub struct Rps {
    throws: [Option<RpsAction>; 2],
}

impl Rps {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RpsAction {
    /// +1 when self beats other, -1 when other beats self
    fn beats(&self, other: &Self) -> Utility {
        use RpsAction::*;
        match (self, other) {
            (Rock, Scissors) | (Paper, Rock) | (Scissors, Paper) => 1.,
            (Rock, Paper) | (Paper, Scissors) | (Scissors, Rock) => -1.,
            _ => 0.,
        }
    }
}

impl Game for Rps {
    type Action = RpsAction;
    type Observation = RpsObs;

    fn players(&self) -> Vec<Turn> {
        vec![Turn::Player(0), Turn::Player(1)]
    }
    fn turn(&self) -> Turn {
        match self.throws {
            [None, _] => Turn::Player(0),
            [_, None] => Turn::Player(1),
            _ => Turn::Unknown,
        }
    }
    fn is_terminal(&self) -> bool {
        self.throws.iter().all(Option::is_some)
    }
    fn actions(&self) -> Vec<RpsAction> {
        vec![RpsAction::Rock, RpsAction::Paper, RpsAction::Scissors]
    }
    fn apply(&mut self, action: &RpsAction) {
        match self.throws {
            [None, _] => self.throws[0] = Some(*action),
            [_, None] => self.throws[1] = Some(*action),
            _ => unreachable!("no moves left to make"),
        }
    }
    fn payoff(&self, player: Turn) -> Utility {
        let [Some(first), Some(second)] = self.throws else {
            unreachable!("payoff at a terminal state")
        };
        match player {
            Turn::Player(0) => first.beats(&second),
            Turn::Player(1) => second.beats(&first),
            _ => 0.,
        }
    }
    fn public_observation(&self, _: &RpsAction, _: &Self) -> RpsObs {
        RpsObs::Veiled
    }
    fn private_observation(&self, player: Turn, action: &RpsAction, _: &Self) -> RpsObs {
        if player == self.turn() {
            RpsObs::Threw(*action)
        } else {
            RpsObs::Veiled
        }
    }
    fn stochasticity(&self) -> Stochasticity {
        Stochasticity::Deterministic
    }
}
