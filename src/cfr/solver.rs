use super::error::CfrError;
use super::memory::Memory;
use super::walker::InfoMap;
use super::walker::ObsBuffer;
use super::walker::root_buffer;
use super::walker::root_infostates;
use crate::Utility;
use crate::game::game::Game;
use crate::game::infostate::InfoState;
use crate::game::turn::Turn;
use crate::policy::action::ActionPolicy;
use crate::policy::default::Uniform;
use crate::policy::default::Zero;
use crate::policy::tabular::TabularPolicy;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::VecDeque;

/// per-player policy tables, the shape every solver trades in
pub type Profile<G> =
    BTreeMap<Turn, TabularPolicy<<G as Game>::Observation, <G as Game>::Action>>;
/// per-player root values, the shape every iteration reports
pub type ValueMap = BTreeMap<Turn, Utility>;

/// the state shared by every tabular CFR variant: the root world
/// state, one current and one cumulative average policy table per
/// actual player, the alternating update schedule, the iteration
/// counter, and the infostate memory keyed by structural equality.
pub struct Tabular<G: Game> {
    root: G,
    current: Profile<G>,
    average: Profile<G>,
    schedule: VecDeque<Turn>,
    epochs: usize,
    memory: HashMap<InfoState<G::Observation>, Memory<G::Action>>,
}

impl<G: Game> Tabular<G> {
    /// takes ownership of the root state and the per-player policy
    /// tables. the maps must cover exactly the actual players, and the
    /// environment must guarantee serialized, unrolled play.
    pub(crate) fn new(
        root: G,
        current: Profile<G>,
        average: Profile<G>,
    ) -> Result<Self, CfrError> {
        if !root.serialized() {
            return Err(CfrError::EnvironmentNotSerialized);
        }
        let actuals = root.actuals();
        for profile in [&current, &average] {
            if profile.len() != actuals.len() || actuals.iter().any(|p| !profile.contains_key(p)) {
                return Err(CfrError::InconsistentInfostates);
            }
        }
        Ok(Self {
            root,
            current,
            average,
            schedule: actuals.into_iter().collect(),
            epochs: 0,
            memory: HashMap::new(),
        })
    }

    pub fn root(&self) -> &G {
        &self.root
    }
    /// the iteration counter, starting at zero
    pub fn epochs(&self) -> usize {
        self.epochs
    }
    pub fn current(&self) -> &Profile<G> {
        &self.current
    }
    /// the raw cumulative average tables. normalize per infoset before
    /// treating them as probabilities
    pub fn average(&self) -> &Profile<G> {
        &self.average
    }
    /// the update rotation, next player first
    pub fn schedule(&self) -> impl Iterator<Item = Turn> + '_ {
        self.schedule.iter().copied()
    }

    pub(crate) fn advance(&mut self) {
        self.epochs += 1;
    }

    /// rotate the schedule and return the player to update. an
    /// explicit player is moved to the back of the rotation instead.
    pub(crate) fn cycle(&mut self, player: Option<Turn>) -> Result<Turn, CfrError> {
        match player {
            None => {
                let head = self.schedule.pop_front().expect("non-empty schedule");
                self.schedule.push_back(head);
                Ok(head)
            }
            Some(Turn::Chance) => Err(CfrError::InvalidConfiguration(
                "chance cannot be the player to update",
            )),
            Some(player) => {
                let at = self
                    .schedule
                    .iter()
                    .position(|&p| p == player)
                    .ok_or(CfrError::UnknownPlayer(player))?;
                self.schedule.remove(at);
                self.schedule.push_back(player);
                Ok(player)
            }
        }
    }

    /// who the rotation would update next
    pub(crate) fn preview(&self) -> Turn {
        *self.schedule.front().expect("non-empty schedule")
    }

    /// infostate memory lookup, inserting a fresh record with the
    /// state's legal actions on first visit
    pub(crate) fn witness(
        &mut self,
        info: &InfoState<G::Observation>,
        state: &G,
    ) -> &mut Memory<G::Action> {
        use std::collections::hash_map::Entry;
        match self.memory.entry(info.clone()) {
            Entry::Occupied(seen) => seen.into_mut(),
            Entry::Vacant(fresh) => {
                let mut memory = Memory::default();
                memory.emplace(state.actions());
                fresh.insert(memory)
            }
        }
    }
    pub(crate) fn memory(&self, info: &InfoState<G::Observation>) -> &Memory<G::Action> {
        self.memory.get(info).expect("witnessed infostate")
    }
    /// read access to every infostate record seen so far
    pub fn records(
        &self,
    ) -> impl Iterator<Item = (&InfoState<G::Observation>, &Memory<G::Action>)> {
        self.memory.iter()
    }
    pub(crate) fn memory_mut(
        &mut self,
        info: &InfoState<G::Observation>,
    ) -> &mut Memory<G::Action> {
        self.memory.get_mut(info).expect("witnessed infostate")
    }

    /// disjoint borrows of the memory map and both policy tables, for
    /// the update passes that write all three
    pub(crate) fn split(
        &mut self,
    ) -> (
        &mut HashMap<InfoState<G::Observation>, Memory<G::Action>>,
        &mut Profile<G>,
        &mut Profile<G>,
    ) {
        (&mut self.memory, &mut self.current, &mut self.average)
    }

    pub(crate) fn fetch_current(
        &mut self,
        player: Turn,
        info: &InfoState<G::Observation>,
        actions: &[G::Action],
    ) -> &mut ActionPolicy<G::Action> {
        self.current
            .get_mut(&player)
            .expect("current policy per actual player")
            .fetch(info, actions, &Uniform)
    }
    pub(crate) fn fetch_average(
        &mut self,
        player: Turn,
        info: &InfoState<G::Observation>,
        actions: &[G::Action],
    ) -> &mut ActionPolicy<G::Action> {
        self.average
            .get_mut(&player)
            .expect("average policy per actual player")
            .fetch(info, actions, &Zero)
    }

    /// expected value at the root for every player under the current
    /// average policy, with no table updates
    pub fn game_value(&self) -> Result<ValueMap, CfrError> {
        evaluate(
            &self.root,
            &self.average,
            &root_buffer(&self.root),
            &root_infostates(&self.root),
        )
    }
}

/// full-tree traversal enumerates chance outcomes, so a chance player
/// that can only be sampled is unusable
pub(crate) fn enumerable<G: Game>(root: &G) -> Result<(), CfrError> {
    match root.stochasticity() {
        crate::game::game::Stochasticity::Sampled => Err(CfrError::InvalidConfiguration(
            "full-tree traversal needs an enumerable chance player",
        )),
        _ => Ok(()),
    }
}

#[rustfmt::skip]
impl<G: Game> std::fmt::Display for Tabular<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Epochs: {}", self.epochs)?;
        writeln!(f, "┌─────────┬──────────────────────────────┬──────────────┬──────────┬──────────┬──────────┐")?;
        writeln!(f, "│    Turn │ Infostate                    │       Action │   Regret │   Weight │   Advice │")?;
        writeln!(f, "├─────────┼──────────────────────────────┼──────────────┼──────────┼──────────┼──────────┤")?;
        for (info, data) in self.memory.iter() {
            let label = match info.history().last() {
                Some((_, private)) => format!("{} obs, last {:?}", info.len(), private),
                None => String::from("root"),
            };
            let advice = self
                .average
                .get(&info.turn())
                .and_then(|table| table.normalized(info).ok());
            for action in data.actions() {
                writeln!(
                    f,
                    "│ {:>7} │ {:>28.28} │ {:>12.12} │ {:>+8.2} │ {:>8.2} │ {:>8.2} │",
                    format!("{}", info.turn()),
                    label,
                    format!("{:?}", action),
                    data.regret(action),
                    self.average
                        .get(&info.turn())
                        .and_then(|table| table.get(info))
                        .map(|row| row.get(action))
                        .unwrap_or_default(),
                    advice.as_ref().map(|row| row.get(action)).unwrap_or_default(),
                )?;
            }
        }
        writeln!(f, "└─────────┴──────────────────────────────┴──────────────┴──────────┴──────────┴──────────┘")?;
        Ok(())
    }
}

/// one full evaluation traversal under the given (cumulative) profile,
/// normalizing each visited row on the fly. reaching an infostate
/// whose row has no mass is a usage error: the profile has simply not
/// been trained there.
pub(crate) fn evaluate<G: Game>(
    state: &G,
    profile: &Profile<G>,
    buffer: &ObsBuffer<G::Observation>,
    infos: &InfoMap<G::Observation>,
) -> Result<ValueMap, CfrError> {
    use super::walker::observe;
    if state.is_terminal() {
        return Ok(state
            .actuals()
            .into_iter()
            .map(|p| (p, state.payoff(p)))
            .collect());
    }
    let turn = state.turn();
    let mut value: ValueMap = state.actuals().into_iter().map(|p| (p, 0.)).collect();
    if turn == Turn::Chance {
        for (outcome, probability) in state.chances() {
            let next = state.child(&outcome);
            let (buffer, infos) = observe(state, &outcome, &next, buffer, infos);
            for (player, child) in evaluate(&next, profile, &buffer, &infos)? {
                *value.get_mut(&player).expect("actual player") += probability * child;
            }
        }
    } else {
        let info = infos.get(&turn).expect("infostate for active player");
        let policy = profile
            .get(&turn)
            .ok_or(CfrError::InconsistentInfostates)?
            .normalized(info)?;
        for action in state.actions() {
            let probability = policy.get(&action);
            let next = state.child(&action);
            let (buffer, infos) = observe(state, &action, &next, buffer, infos);
            for (player, child) in evaluate(&next, profile, &buffer, &infos)? {
                *value.get_mut(&player).expect("actual player") += probability * child;
            }
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Probability;
    use crate::games::rps::Rps;

    fn profile<G: Game>(root: &G) -> Profile<G> {
        root.actuals()
            .into_iter()
            .map(|p| (p, TabularPolicy::new()))
            .collect()
    }

    #[test]
    fn rotation() {
        let root = Rps::new();
        let mut base = Tabular::new(root.clone(), profile(&root), profile(&root)).unwrap();
        assert_eq!(base.cycle(None).unwrap(), Turn::Player(0));
        assert_eq!(base.preview(), Turn::Player(1));
        assert_eq!(base.cycle(None).unwrap(), Turn::Player(1));
        assert_eq!(base.cycle(None).unwrap(), Turn::Player(0));
    }

    #[test]
    fn scheduling_errors() {
        let root = Rps::new();
        let mut base = Tabular::new(root.clone(), profile(&root), profile(&root)).unwrap();
        assert!(matches!(
            base.cycle(Some(Turn::Chance)),
            Err(CfrError::InvalidConfiguration(_))
        ));
        assert_eq!(
            base.cycle(Some(Turn::Player(7))),
            Err(CfrError::UnknownPlayer(Turn::Player(7)))
        );
        assert_eq!(base.cycle(Some(Turn::Player(1))).unwrap(), Turn::Player(1));
        assert_eq!(base.preview(), Turn::Player(0));
    }

    #[test]
    fn partial_profiles() {
        let root = Rps::new();
        let mut partial = profile(&root);
        partial.remove(&Turn::Player(1));
        assert_eq!(
            Tabular::new(root.clone(), partial, profile(&root)).err(),
            Some(CfrError::InconsistentInfostates)
        );
    }

    /// a game that is all chance: two coin flips, then payoffs
    #[derive(Debug, Clone, Default)]
    struct Lotto {
        flips: Vec<bool>,
    }
    impl Game for Lotto {
        type Action = bool;
        type Observation = bool;
        fn players(&self) -> Vec<Turn> {
            vec![Turn::Chance, Turn::Player(0), Turn::Player(1)]
        }
        fn turn(&self) -> Turn {
            if self.is_terminal() {
                Turn::Unknown
            } else {
                Turn::Chance
            }
        }
        fn is_terminal(&self) -> bool {
            self.flips.len() == 2
        }
        fn actions(&self) -> Vec<bool> {
            Vec::new()
        }
        fn chances(&self) -> Vec<(bool, Probability)> {
            vec![(false, 0.25), (true, 0.75)]
        }
        fn apply(&mut self, action: &bool) {
            self.flips.push(*action);
        }
        fn payoff(&self, player: Turn) -> Utility {
            let heads = self.flips.iter().filter(|f| **f).count() as Utility;
            match player {
                Turn::Player(0) => heads,
                _ => -heads,
            }
        }
        fn public_observation(&self, action: &bool, _: &Self) -> bool {
            *action
        }
        fn private_observation(&self, _: Turn, action: &bool, _: &Self) -> bool {
            *action
        }
    }

    #[test]
    fn chance_expectation() {
        // a purely stochastic game is worth its expectation no matter
        // what either policy table says
        let root = Lotto::default();
        let base = Tabular::new(root.clone(), profile(&root), profile(&root)).unwrap();
        let value = base.game_value().unwrap();
        assert!((value[&Turn::Player(0)] - 1.5).abs() < 1e-12);
        assert!((value[&Turn::Player(1)] + 1.5).abs() < 1e-12);
    }
}
