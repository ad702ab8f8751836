use super::turn::Turn;
use crate::Probability;
use crate::Utility;

/// how the environment handles its chance player, if it has one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stochasticity {
    /// no chance nodes at all
    Deterministic,
    /// chance outcomes can be drawn but not enumerated
    Sampled,
    /// chance outcomes can be enumerated with their likelihoods
    Enumerated,
}

/// the world state is fully abstracted. it must be implemented by the
/// consumer of the solver API.
///
/// a single value carries both the environment contract and the state
/// it describes: `apply` is the only mutator, everything else is a pure
/// observer. solvers clone the state to branch at decision points and
/// mutate the clone by applying one action or chance outcome.
///
/// actions and chance outcomes share one associated type. the solver
/// never inspects either beyond copying, hashing and comparing, so the
/// distinction is carried by which accessor produced the value:
/// `actions` at decision nodes, `chances` at stochastic ones.
///
/// the factored-observation contract is what keys the tabular storage:
/// each transition produces one public observation and one private
/// observation per player, and the running (public, private) history
/// is a player's information state.
pub trait Game: Clone + std::fmt::Debug {
    type Action: Clone + PartialEq + Eq + PartialOrd + Ord + std::hash::Hash + std::fmt::Debug;
    type Observation: Clone + PartialEq + Eq + PartialOrd + Ord + std::hash::Hash + std::fmt::Debug;

    /// everyone participating, chance included when stochastic
    fn players(&self) -> Vec<Turn>;
    /// who moves here. `Turn::Chance` iff this is a stochastic node
    fn turn(&self) -> Turn;
    fn is_terminal(&self) -> bool;
    /// non-empty ordered legal actions of the active player
    fn actions(&self) -> Vec<Self::Action>;
    /// non-empty ordered chance outcomes with likelihoods in (0, 1]
    /// summing to one. only meaningful when the active player is chance
    fn chances(&self) -> Vec<(Self::Action, Probability)> {
        Vec::new()
    }
    /// advance this state by one action or chance outcome
    fn apply(&mut self, action: &Self::Action);
    /// scalar payoff at a terminal state
    fn payoff(&self, player: Turn) -> Utility;
    /// what everyone sees of the transition self --action--> next
    fn public_observation(&self, action: &Self::Action, next: &Self) -> Self::Observation;
    /// what one player privately sees of the transition self --action--> next
    fn private_observation(
        &self,
        player: Turn,
        action: &Self::Action,
        next: &Self,
    ) -> Self::Observation;
    fn stochasticity(&self) -> Stochasticity {
        Stochasticity::Enumerated
    }
    /// whether the game is serialized and unrolled: turns strictly
    /// sequential, every transition observed as it happens. solvers
    /// refuse construction otherwise
    fn serialized(&self) -> bool {
        true
    }

    /// actual (non-chance) players in seating order
    fn actuals(&self) -> Vec<Turn> {
        self.players().into_iter().filter(|t| t.actual()).collect()
    }
    /// clone and advance
    fn child(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }
}
