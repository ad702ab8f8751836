use super::config::MccfrConfig;
use super::config::SampleWeighting;
use super::config::SamplingMode;
use super::config::UpdateMode;
use super::error::CfrError;
use super::matching;
use super::solver::Profile;
use super::solver::Tabular;
use super::solver::ValueMap;
use super::walker::InfoMap;
use super::walker::ObsBuffer;
use super::walker::ReachMap;
use super::walker::observe;
use super::walker::observe_inplace;
use super::walker::root_buffer;
use super::walker::root_infostates;
use super::walker::root_reach;
use crate::Probability;
use crate::Utility;
use crate::game::game::Game;
use crate::game::infostate::InfoState;
use crate::game::turn::Turn;
use rand::Rng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Monte Carlo counterfactual regret minimization. each iteration
/// visits a sampled slice of the tree, rederives current policies
/// lazily on visit (or at iteration end, for the variants that batch
/// their touched infosets), and unbiases every update by the inverse
/// likelihood of having sampled it.
pub struct Mccfr<G: Game> {
    base: Tabular<G>,
    config: MccfrConfig,
    rng: SmallRng,
}

impl<G: Game> Mccfr<G> {
    pub(crate) fn make(base: Tabular<G>, config: MccfrConfig, rng: SmallRng) -> Self {
        Self { base, config, rng }
    }

    pub fn config(&self) -> &MccfrConfig {
        &self.config
    }
    pub fn iteration(&self) -> usize {
        self.base.epochs()
    }
    pub fn root(&self) -> &G {
        self.base.root()
    }
    pub fn schedule(&self) -> impl Iterator<Item = Turn> + '_ {
        self.base.schedule()
    }
    pub fn policy(&self) -> &Profile<G> {
        self.base.current()
    }
    /// read access to every infostate record seen so far
    pub fn records(
        &self,
    ) -> impl Iterator<Item = (&InfoState<G::Observation>, &super::memory::Memory<G::Action>)> {
        self.base.records()
    }
    /// borrow the raw cumulative average tables. normalize per
    /// infoset before treating them as probabilities
    pub fn average(&self) -> &Profile<G> {
        self.base.average()
    }
    /// one evaluation traversal with the average policy, no updates
    pub fn game_value(&self) -> Result<ValueMap, CfrError> {
        self.base.game_value()
    }

    /// run `n` iterations and report the sampled root value of each.
    /// alternating iterations report the updated player only.
    pub fn iterate(&mut self, n: usize) -> Result<Vec<ValueMap>, CfrError> {
        log::info!("running {} mccfr iterations", n);
        (0..n).map(|_| self.once(None)).collect()
    }

    /// a single alternating iteration updating the given player
    pub fn iterate_for(&mut self, player: Turn) -> Result<ValueMap, CfrError> {
        if self.config.update != UpdateMode::Alternating {
            return Err(CfrError::InvalidConfiguration(
                "explicit player updates require alternating mode",
            ));
        }
        self.once(Some(player))
    }

    fn once(&mut self, explicit: Option<Turn>) -> Result<ValueMap, CfrError> {
        let updated = match self.config.update {
            UpdateMode::Alternating => Some(self.base.cycle(explicit)?),
            UpdateMode::Simultaneous => None,
        };
        let root = self.base.root().clone();
        let value = match self.config.sampling {
            SamplingMode::Outcome => {
                let weights = root
                    .actuals()
                    .into_iter()
                    .map(|p| (p, 0.))
                    .collect::<BTreeMap<_, _>>();
                let (value, _) = self.outcome(
                    updated,
                    root.clone(),
                    root_reach(&root),
                    root_buffer(&root),
                    root_infostates(&root),
                    1.,
                    weights,
                )?;
                value
            }
            SamplingMode::External | SamplingMode::Pure
                if self.config.update == UpdateMode::Alternating =>
            {
                let traverser = updated.expect("alternating update has a traverser");
                let pure = self.config.sampling == SamplingMode::Pure;
                let mut touched = HashSet::new();
                let value = self.external(
                    traverser,
                    root.clone(),
                    root_buffer(&root),
                    root_infostates(&root),
                    &mut touched,
                    pure,
                )?;
                self.settle(&touched)?;
                BTreeMap::from([(traverser, value)])
            }
            SamplingMode::Chance | SamplingMode::Pure => {
                let pure = self.config.sampling == SamplingMode::Pure;
                let mut touched = HashSet::new();
                let value = self.sampled_chance(
                    updated,
                    root.clone(),
                    root_reach(&root),
                    root_buffer(&root),
                    root_infostates(&root),
                    &mut touched,
                    pure,
                )?;
                self.settle(&touched)?;
                value
            }
            SamplingMode::External => unreachable!("external sampling is alternating"),
        };
        self.base.advance();
        Ok(value)
    }

    /// delayed regret minimization over the infostates touched this
    /// iteration
    fn settle(&mut self, touched: &HashSet<InfoState<G::Observation>>) -> Result<(), CfrError> {
        let (memory, current, _) = self.base.split();
        for info in touched {
            let data = memory.get_mut(info).expect("touched infostate");
            let actions = data.actions().to_vec();
            let policy = current
                .get_mut(&info.turn())
                .expect("current policy per actual player")
                .fetch(info, &actions, &crate::policy::default::Uniform);
            matching::regret_matching(data.regrets(), policy)?;
        }
        Ok(())
    }

    /// regret matching on visit: MCCFR only refreshes a current policy
    /// when the trajectory touches its infostate
    fn refresh(&mut self, info: &InfoState<G::Observation>, actions: &[G::Action]) -> Result<Vec<Probability>, CfrError> {
        let turn = info.turn();
        let (memory, current, _) = self.base.split();
        let data = memory.get(info).expect("witnessed infostate");
        let policy = current
            .get_mut(&turn)
            .expect("current policy per actual player")
            .fetch(info, actions, &crate::policy::default::Uniform);
        matching::regret_matching(data.regrets(), policy)?;
        Ok(actions.iter().map(|a| policy.get(a)).collect())
    }

    /// draw an action index from the given distribution
    fn draw(&mut self, weights: &[Probability]) -> usize {
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        WeightedIndex::new(weights)
            .expect("distribution with positive mass")
            .sample(&mut self.rng)
    }

    /// epsilon-on-policy sampling: with probability epsilon draw
    /// uniformly, otherwise on-policy. returns the index, the
    /// epsilon-adjusted sampling likelihood, and the policy likelihood
    fn pick(&mut self, policy: &[Probability], explore: bool) -> (usize, Probability, Probability) {
        let n = policy.len();
        let epsilon = if explore { self.config.epsilon } else { 0. };
        let uniform = 1. / n as Probability;
        let index = if epsilon > 0. && self.rng.random::<Probability>() < epsilon {
            self.rng.random_range(0..n)
        } else {
            self.draw(policy)
        };
        let sampling = epsilon * uniform + (1. - epsilon) * policy[index];
        (index, sampling, policy[index])
    }

    /// sample one chance outcome and its likelihood
    fn chance(&mut self, state: &G) -> (G::Action, Probability) {
        let mut outcomes = state.chances();
        let index = self.draw(&outcomes.iter().map(|(_, p)| *p).collect::<Vec<_>>());
        outcomes.swap_remove(index)
    }

    /// outcome sampling: a single trajectory per iteration. returns
    /// the importance-weighted terminal value and the tail policy
    /// product from this node to the sampled terminal.
    #[allow(clippy::too_many_arguments)]
    fn outcome(
        &mut self,
        updated: Option<Turn>,
        mut state: G,
        mut reach: ReachMap,
        mut buffer: ObsBuffer<G::Observation>,
        mut infos: InfoMap<G::Observation>,
        likelihood: Probability,
        weights: BTreeMap<Turn, Utility>,
    ) -> Result<(ValueMap, Probability), CfrError> {
        if state.is_terminal() {
            let value = match updated {
                Some(player) => BTreeMap::from([(player, state.payoff(player) / likelihood)]),
                None => state
                    .actuals()
                    .into_iter()
                    .map(|p| (p, state.payoff(p) / likelihood))
                    .collect(),
            };
            return Ok((value, 1.));
        }
        let turn = state.turn();
        if turn == Turn::Chance {
            let (outcome, probability) = self.chance(&state);
            *reach.get_mut(&Turn::Chance).expect("chance reach") *= probability;
            let prior = state.clone();
            state.apply(&outcome);
            observe_inplace(&prior, &outcome, &state, &mut buffer, &mut infos);
            return self.outcome(
                updated,
                state,
                reach,
                buffer,
                infos,
                likelihood * probability,
                weights,
            );
        }
        let info = infos.get(&turn).expect("infostate for active player").clone();
        let actions = self.base.witness(&info, &state).actions().to_vec();
        let policy = self.refresh(&info, &actions)?;
        let explore = updated.map_or(true, |p| p == turn);
        let (index, sampling, probability) = self.pick(&policy, explore);
        let mut next_weights = weights.clone();
        if self.config.weighting == SampleWeighting::Lazy {
            let delayed = self.base.memory(&info).delayed(index);
            let weight = next_weights.get_mut(&turn).expect("weight per actual player");
            *weight = *weight * probability + delayed;
        }
        let mut next_reach = reach.clone();
        *next_reach.get_mut(&turn).expect("active reach") *= probability;
        let prior = state.clone();
        state.apply(&actions[index]);
        observe_inplace(&prior, &actions[index], &state, &mut buffer, &mut infos);
        let (value, tail) = self.outcome(
            updated,
            state,
            next_reach,
            buffer,
            infos,
            likelihood * sampling,
            next_weights,
        )?;
        if updated.map_or(true, |p| p == turn) {
            // the classical estimator: W * tail * (1 - p) for the
            // sampled action, -W * tail * p for the rest
            let own = value.get(&turn).copied().expect("value for active player");
            let external = reach
                .iter()
                .filter(|(p, _)| **p != turn)
                .map(|(_, r)| r)
                .product::<Probability>();
            let weight = own * external;
            let data = self.base.memory_mut(&info);
            for at in 0..actions.len() {
                let delta = if at == index {
                    weight * tail * (1. - probability)
                } else {
                    -weight * tail * probability
                };
                data.add_regret(at, delta);
            }
        }
        if updated.map_or(true, |p| self.base.preview() == turn && p != turn) {
            let own = reach.get(&turn).copied().expect("active reach");
            let pending = weights.get(&turn).copied().expect("weight per actual player");
            self.update_average(&info, &actions, &policy, index, own, likelihood, pending);
        }
        Ok((value, tail * probability))
    }

    /// the average-policy increment at one visited infostate, per the
    /// configured weighting scheme
    #[allow(clippy::too_many_arguments)]
    fn update_average(
        &mut self,
        info: &InfoState<G::Observation>,
        actions: &[G::Action],
        policy: &[Probability],
        sampled: usize,
        own: Probability,
        likelihood: Probability,
        pending: Utility,
    ) {
        let turn = info.turn();
        let epoch = self.base.epochs();
        let weighting = self.config.weighting;
        let (memory, _, average) = self.base.split();
        let data = memory.get_mut(info).expect("witnessed infostate");
        let row = average
            .get_mut(&turn)
            .expect("average policy per actual player")
            .fetch(info, actions, &crate::policy::default::Zero);
        match weighting {
            SampleWeighting::Lazy => {
                for (at, action) in actions.iter().enumerate() {
                    let increment = (pending + own) * policy[at];
                    row.add(action, increment);
                    if at == sampled {
                        data.reset_delayed(at);
                    } else {
                        data.add_delayed(at, increment);
                    }
                }
            }
            SampleWeighting::Optimistic => {
                let delay = (1 + epoch - data.visited()) as Utility;
                for (at, action) in actions.iter().enumerate() {
                    row.add(action, own * policy[at] * delay);
                }
                data.set_visited(epoch);
            }
            SampleWeighting::Stochastic => {
                for (at, action) in actions.iter().enumerate() {
                    row.add(action, own * policy[at] / likelihood);
                }
            }
        }
    }

    /// external sampling (and, with `pure`, the alternating half of
    /// pure CFR): the traverser explores every action, everyone else
    /// is sampled. pure CFR caches one sample per infostate per
    /// iteration instead of redrawing per visit.
    fn external(
        &mut self,
        traverser: Turn,
        mut state: G,
        mut buffer: ObsBuffer<G::Observation>,
        mut infos: InfoMap<G::Observation>,
        touched: &mut HashSet<InfoState<G::Observation>>,
        pure: bool,
    ) -> Result<Utility, CfrError> {
        if state.is_terminal() {
            return Ok(state.payoff(traverser));
        }
        let turn = state.turn();
        if turn == Turn::Chance {
            let (outcome, _) = self.chance(&state);
            let prior = state.clone();
            state.apply(&outcome);
            observe_inplace(&prior, &outcome, &state, &mut buffer, &mut infos);
            return self.external(traverser, state, buffer, infos, touched, pure);
        }
        let info = infos.get(&turn).expect("infostate for active player").clone();
        let actions = self.base.witness(&info, &state).actions().to_vec();
        let policy = {
            let row = self.base.fetch_current(turn, &info, &actions);
            actions.iter().map(|a| row.get(a)).collect::<Vec<_>>()
        };
        if turn == traverser {
            let mut values = Vec::with_capacity(actions.len());
            for action in actions.iter() {
                let next = state.child(action);
                let (cbuffer, cinfos) = observe(&state, action, &next, &buffer, &infos);
                values.push(self.external(traverser, next, cbuffer, cinfos, touched, pure)?);
            }
            let baseline = policy
                .iter()
                .zip(values.iter())
                .map(|(p, v)| p * v)
                .sum::<Utility>();
            let data = self.base.memory_mut(&info);
            for (at, value) in values.iter().enumerate() {
                data.add_regret(at, value - baseline);
            }
            touched.insert(info);
            Ok(baseline)
        } else {
            let epoch = self.base.epochs();
            let index = match pure {
                false => self.draw(&policy),
                true => match self.base.memory(&info).sample(epoch) {
                    Some(cached) => cached,
                    None => {
                        let fresh = self.draw(&policy);
                        self.base.memory_mut(&info).set_sample(epoch, fresh);
                        fresh
                    }
                },
            };
            if self.base.preview() == turn {
                // the simple update scheme: bump the next scheduled
                // player's average by their bare current policy
                let row = self.base.fetch_average(turn, &info, &actions);
                for (action, probability) in actions.iter().zip(policy.iter()) {
                    row.add(action, *probability);
                }
            }
            let prior = state.clone();
            state.apply(&actions[index]);
            observe_inplace(&prior, &actions[index], &state, &mut buffer, &mut infos);
            self.external(traverser, state, buffer, infos, touched, pure)
        }
    }

    /// chance sampling (and, with `pure`, the simultaneous half of
    /// pure CFR): a vanilla-shaped traversal over the full decision
    /// tree with exactly one outcome drawn per chance node. the drawn
    /// likelihood cancels against its own importance correction, so
    /// neither reach nor value carries it. pure CFR additionally
    /// collapses each visited infostate's policy onto its cached
    /// sample, making reach contributions zero-or-one.
    #[allow(clippy::too_many_arguments)]
    fn sampled_chance(
        &mut self,
        updated: Option<Turn>,
        state: G,
        reach: ReachMap,
        buffer: ObsBuffer<G::Observation>,
        infos: InfoMap<G::Observation>,
        touched: &mut HashSet<InfoState<G::Observation>>,
        pure: bool,
    ) -> Result<ValueMap, CfrError> {
        if state.is_terminal() {
            return Ok(state
                .actuals()
                .into_iter()
                .map(|p| (p, state.payoff(p)))
                .collect());
        }
        let turn = state.turn();
        if turn == Turn::Chance {
            let (outcome, _) = self.chance(&state);
            let next = state.child(&outcome);
            let (cbuffer, cinfos) = observe(&state, &outcome, &next, &buffer, &infos);
            return self.sampled_chance(updated, next, reach, cbuffer, cinfos, touched, pure);
        }
        let info = infos.get(&turn).expect("infostate for active player").clone();
        let actions = self.base.witness(&info, &state).actions().to_vec();
        let policy = {
            let row = self.base.fetch_current(turn, &info, &actions);
            actions.iter().map(|a| row.get(a)).collect::<Vec<_>>()
        };
        let epoch = self.base.epochs();
        let sampled = match pure {
            false => None,
            true => Some(match self.base.memory(&info).sample(epoch) {
                Some(cached) => cached,
                None => {
                    let fresh = self.draw(&policy);
                    self.base.memory_mut(&info).set_sample(epoch, fresh);
                    fresh
                }
            }),
        };
        // the traversal policy: mixed for chance sampling, one-hot on
        // the cached sample for pure CFR
        let traversal = match sampled {
            None => policy.clone(),
            Some(on) => (0..actions.len())
                .map(|at| if at == on { 1. } else { 0. })
                .collect(),
        };
        let mut value: ValueMap = state.actuals().into_iter().map(|p| (p, 0.)).collect();
        let mut children = Vec::with_capacity(actions.len());
        for (action, probability) in actions.iter().zip(traversal.iter()) {
            let next = state.child(action);
            let mut creach = reach.clone();
            *creach.get_mut(&turn).expect("active reach") *= probability;
            let (cbuffer, cinfos) = observe(&state, action, &next, &buffer, &infos);
            let child = self.sampled_chance(updated, next, creach, cbuffer, cinfos, touched, pure)?;
            for (player, v) in child.iter() {
                *value.get_mut(player).expect("actual player") += probability * v;
            }
            children.push(child);
        }
        if updated.map_or(true, |p| p == turn) {
            let external = reach
                .iter()
                .filter(|(p, _)| **p != turn)
                .map(|(_, r)| r)
                .product::<Probability>();
            let own = reach.get(&turn).copied().expect("active reach");
            let baseline = value.get(&turn).copied().expect("active value");
            if external > 0. {
                let data = self.base.memory_mut(&info);
                for (at, child) in children.iter().enumerate() {
                    let gain = child.get(&turn).expect("active value") - baseline;
                    data.add_regret(at, external * gain);
                }
            }
            if own > 0. {
                let row = self.base.fetch_average(turn, &info, &actions);
                for (action, probability) in actions.iter().zip(policy.iter()) {
                    row.add(action, own * probability);
                }
            }
            touched.insert(info);
        }
        Ok(value)
    }
}

impl<G: Game> std::fmt::Display for Mccfr<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.base, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::factory;
    use crate::cfr::response::exploitability;
    use crate::games::kuhn::Kuhn;
    use crate::games::rps::Rps;

    const EXPLOITABILITY_THRESHOLD: Utility = 5e-3;

    /// drive a sampling solver until its average profile drops below
    /// the given exploitability, checking every `chunk` iterations
    fn solve<G: Game>(solver: &mut Mccfr<G>, target: Utility, budget: usize, chunk: usize) -> Utility {
        let mut expl = Utility::MAX;
        let mut spent = 0;
        while expl > target && spent < budget {
            solver.iterate(chunk).unwrap();
            spent += chunk;
            expl = exploitability(solver.root(), solver.average()).unwrap();
        }
        expl
    }

    #[test]
    fn kuhn_outcome_sampling() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut solver = factory::outcome_sampling(
            Kuhn::new(),
            UpdateMode::Alternating,
            SampleWeighting::Stochastic,
            0.6,
            Some(0),
        )
        .unwrap();
        let expl = solve(&mut solver, EXPLOITABILITY_THRESHOLD, 200_000, 10_000);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn kuhn_external_sampling() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut solver = factory::external_sampling(Kuhn::new(), Some(0)).unwrap();
        let expl = solve(&mut solver, EXPLOITABILITY_THRESHOLD, 200_000, 5_000);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn rps_outcome_optimistic() {
        // simultaneous updates with optimistic averaging on the
        // simultaneous-move game
        let _ = env_logger::builder().is_test(true).try_init();
        let mut solver = factory::outcome_sampling(
            Rps::new(),
            UpdateMode::Simultaneous,
            SampleWeighting::Optimistic,
            0.6,
            Some(0),
        )
        .unwrap();
        let expl = solve(&mut solver, EXPLOITABILITY_THRESHOLD, 1_000_000, 25_000);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn kuhn_outcome_lazy() {
        let mut solver = factory::outcome_sampling(
            Kuhn::new(),
            UpdateMode::Alternating,
            SampleWeighting::Lazy,
            0.6,
            Some(0),
        )
        .unwrap();
        let expl = solve(&mut solver, 1e-2, 400_000, 20_000);
        assert!(expl < 1e-2, "exploitability {}", expl);
    }

    #[test]
    fn kuhn_chance_sampling() {
        let mut solver =
            factory::chance_sampling(Kuhn::new(), UpdateMode::Alternating, Some(0)).unwrap();
        let expl = solve(&mut solver, EXPLOITABILITY_THRESHOLD, 100_000, 2_000);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn kuhn_pure_alternating() {
        let mut solver = factory::pure_cfr(Kuhn::new(), UpdateMode::Alternating, Some(0)).unwrap();
        let expl = solve(&mut solver, 1e-2, 400_000, 20_000);
        assert!(expl < 1e-2, "exploitability {}", expl);
    }

    #[test]
    fn rps_pure_simultaneous() {
        let mut solver = factory::pure_cfr(Rps::new(), UpdateMode::Simultaneous, Some(0)).unwrap();
        let expl = solve(&mut solver, 1e-2, 400_000, 20_000);
        assert!(expl < 1e-2, "exploitability {}", expl);
    }

    #[test]
    fn rotation() {
        // alternating iterations report the rotation of the initial
        // schedule, one player at a time
        let mut solver = factory::outcome_sampling(
            Kuhn::new(),
            UpdateMode::Alternating,
            SampleWeighting::Stochastic,
            0.6,
            Some(7),
        )
        .unwrap();
        let values = solver.iterate(4).unwrap();
        let updated = values
            .iter()
            .map(|v| *v.keys().next().expect("one updated player"))
            .collect::<Vec<_>>();
        assert_eq!(
            updated,
            vec![
                Turn::Player(0),
                Turn::Player(1),
                Turn::Player(0),
                Turn::Player(1)
            ]
        );
        assert_eq!(solver.iteration(), 4);
    }

    /// two blind binary choices and a fixed payoff matrix, small
    /// enough to compare sampled updates against exact ones
    #[derive(Debug, Clone, Default)]
    struct Micro {
        moves: Vec<u8>,
    }
    impl Game for Micro {
        type Action = u8;
        type Observation = u8;
        fn players(&self) -> Vec<Turn> {
            vec![Turn::Player(0), Turn::Player(1)]
        }
        fn turn(&self) -> Turn {
            match self.moves.len() {
                0 => Turn::Player(0),
                1 => Turn::Player(1),
                _ => Turn::Unknown,
            }
        }
        fn is_terminal(&self) -> bool {
            self.moves.len() == 2
        }
        fn actions(&self) -> Vec<u8> {
            vec![0, 1]
        }
        fn apply(&mut self, action: &u8) {
            self.moves.push(*action);
        }
        fn payoff(&self, player: Turn) -> Utility {
            let grid = [[1., -1.], [-2., 3.]];
            let value = grid[self.moves[0] as usize][self.moves[1] as usize];
            match player {
                Turn::Player(0) => value,
                _ => -value,
            }
        }
        fn public_observation(&self, _: &u8, _: &Self) -> u8 {
            9
        }
        fn private_observation(&self, player: Turn, action: &u8, _: &Self) -> u8 {
            if player == self.turn() { *action } else { 9 }
        }
    }

    #[test]
    fn unbiased_sampling() {
        // the expected outcome-sampling regret update equals the exact
        // full-tree update, here measured at the first player's only
        // infostate after one iteration from uniform policies
        use crate::policy::tabular::TabularPolicy;
        let mut exact = factory::vanilla(
            Micro::default(),
            crate::cfr::config::CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        exact.iterate(1).unwrap();
        let expected = exact
            .records()
            .find(|(info, _)| info.turn() == Turn::Player(0))
            .map(|(_, record)| record.regrets().to_vec())
            .expect("first player record");
        let samples = 50_000;
        let mut estimate = vec![0.; expected.len()];
        for seed in 0..samples {
            let mut sampled = factory::outcome_sampling(
                Micro::default(),
                UpdateMode::Alternating,
                SampleWeighting::Stochastic,
                0.6,
                Some(seed),
            )
            .unwrap();
            sampled.iterate(1).unwrap();
            let record = sampled
                .records()
                .find(|(info, _)| info.turn() == Turn::Player(0))
                .map(|(_, record)| record.regrets().to_vec())
                .expect("first player record");
            for (slot, regret) in estimate.iter_mut().zip(record.iter()) {
                *slot += regret / samples as Utility;
            }
        }
        for (mean, exact) in estimate.iter().zip(expected.iter()) {
            assert!(
                (mean - exact).abs() < 0.1,
                "estimate {:?} drifted from exact {:?}",
                estimate,
                expected
            );
        }
    }
}
