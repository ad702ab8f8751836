use crate::Probability;
use crate::Utility;
use crate::game::game::Game;
use crate::game::game::Stochasticity;
use crate::game::turn::Turn;

/// Kuhn poker. both players ante one chip, chance deals each a card
/// from {J, Q, K}, and one short betting round decides the pot: check
/// passes, bet puts in one more chip; checking a bet folds, betting a
/// bet calls to showdown.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum KuhnCard {
    Jack,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum KuhnAction {
    /// the chance deal: (first player's card, second player's card)
    Deal(KuhnCard, KuhnCard),
    Check,
    Bet,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum KuhnObs {
    /// the deal happened, contents hidden
    Veiled,
    /// your own card
    Dealt(KuhnCard),
    /// a public betting action
    Saw(KuhnAction),
}

#[derive(Debug, Clone, Default)]
pub struct Kuhn {
    deal: Option<(KuhnCard, KuhnCard)>,
    moves: Vec<KuhnAction>,
}

impl Kuhn {
    pub fn new() -> Self {
        Self::default()
    }

    fn showdown(&self, pot: Utility, player: Turn) -> Utility {
        let (first, second) = self.deal.expect("cards dealt");
        let direction = match player {
            Turn::Player(0) => 1.,
            _ => -1.,
        };
        if first > second {
            direction * pot
        } else {
            -direction * pot
        }
    }
}

impl Game for Kuhn {
    type Action = KuhnAction;
    type Observation = KuhnObs;

    fn players(&self) -> Vec<Turn> {
        vec![Turn::Chance, Turn::Player(0), Turn::Player(1)]
    }
    fn turn(&self) -> Turn {
        use KuhnAction::*;
        if self.deal.is_none() {
            return Turn::Chance;
        }
        match self.moves.as_slice() {
            [] => Turn::Player(0),
            [_] => Turn::Player(1),
            [Check, Bet] => Turn::Player(0),
            _ => Turn::Unknown,
        }
    }
    fn is_terminal(&self) -> bool {
        use KuhnAction::*;
        matches!(
            self.moves.as_slice(),
            [Check, Check] | [Check, Bet, Check] | [Check, Bet, Bet] | [Bet, Check] | [Bet, Bet]
        )
    }
    fn actions(&self) -> Vec<KuhnAction> {
        vec![KuhnAction::Check, KuhnAction::Bet]
    }
    fn chances(&self) -> Vec<(KuhnAction, Probability)> {
        use KuhnCard::*;
        let cards = [Jack, Queen, King];
        cards
            .iter()
            .flat_map(|a| cards.iter().map(move |b| (a, b)))
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (KuhnAction::Deal(*a, *b), 1. / 6.))
            .collect()
    }
    fn apply(&mut self, action: &KuhnAction) {
        match action {
            KuhnAction::Deal(first, second) => self.deal = Some((*first, *second)),
            bet => self.moves.push(*bet),
        }
    }
    fn payoff(&self, player: Turn) -> Utility {
        use KuhnAction::*;
        let direction = match player {
            Turn::Player(0) => 1.,
            _ => -1.,
        };
        match self.moves.as_slice() {
            [Check, Check] => self.showdown(1., player),
            [Check, Bet, Check] => -direction,
            [Check, Bet, Bet] => self.showdown(2., player),
            [Bet, Check] => direction,
            [Bet, Bet] => self.showdown(2., player),
            _ => unreachable!("payoff at a terminal state"),
        }
    }
    fn public_observation(&self, action: &KuhnAction, _: &Self) -> KuhnObs {
        match action {
            KuhnAction::Deal(..) => KuhnObs::Veiled,
            bet => KuhnObs::Saw(*bet),
        }
    }
    fn private_observation(&self, player: Turn, action: &KuhnAction, _: &Self) -> KuhnObs {
        match (action, player) {
            (KuhnAction::Deal(card, _), Turn::Player(0)) => KuhnObs::Dealt(*card),
            (KuhnAction::Deal(_, card), Turn::Player(1)) => KuhnObs::Dealt(*card),
            (KuhnAction::Deal(..), _) => KuhnObs::Veiled,
            (bet, _) => KuhnObs::Saw(*bet),
        }
    }
    fn stochasticity(&self) -> Stochasticity {
        Stochasticity::Enumerated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(deal: (KuhnCard, KuhnCard), moves: &[KuhnAction]) -> Kuhn {
        let mut game = Kuhn::new();
        game.apply(&KuhnAction::Deal(deal.0, deal.1));
        for m in moves {
            game.apply(m);
        }
        game
    }

    #[test]
    fn distribution() {
        let chances = Kuhn::new().chances();
        assert_eq!(chances.len(), 6);
        let total = chances.iter().map(|(_, p)| p).sum::<Probability>();
        assert!((total - 1.).abs() < 1e-12);
    }

    #[test]
    fn showdowns() {
        use KuhnAction::*;
        use KuhnCard::*;
        let game = play((King, Jack), &[Check, Check]);
        assert_eq!(game.payoff(Turn::Player(0)), 1.);
        let game = play((Jack, Queen), &[Bet, Bet]);
        assert_eq!(game.payoff(Turn::Player(0)), -2.);
        assert_eq!(game.payoff(Turn::Player(1)), 2.);
    }

    #[test]
    fn folds() {
        use KuhnAction::*;
        use KuhnCard::*;
        // folding loses the ante no matter the cards
        let game = play((King, Jack), &[Check, Bet, Check]);
        assert_eq!(game.payoff(Turn::Player(0)), -1.);
        let game = play((Jack, King), &[Bet, Check]);
        assert_eq!(game.payoff(Turn::Player(0)), 1.);
    }

    #[test]
    fn turns() {
        use KuhnAction::*;
        use KuhnCard::*;
        assert_eq!(Kuhn::new().turn(), Turn::Chance);
        assert_eq!(play((Queen, King), &[]).turn(), Turn::Player(0));
        assert_eq!(play((Queen, King), &[Check]).turn(), Turn::Player(1));
        assert_eq!(play((Queen, King), &[Check, Bet]).turn(), Turn::Player(0));
        assert!(play((Queen, King), &[Check, Bet, Bet]).is_terminal());
    }

    #[test]
    fn privacy() {
        use KuhnCard::*;
        let root = Kuhn::new();
        let deal = KuhnAction::Deal(Queen, Jack);
        let next = root.child(&deal);
        assert_eq!(
            root.private_observation(Turn::Player(0), &deal, &next),
            KuhnObs::Dealt(Queen)
        );
        assert_eq!(
            root.private_observation(Turn::Player(1), &deal, &next),
            KuhnObs::Dealt(Jack)
        );
        assert_eq!(root.public_observation(&deal, &next), KuhnObs::Veiled);
    }
}
