use super::config::CfrConfig;
use super::config::Discount;
use super::config::Exponential;
use super::config::MatchingMode;
use super::config::PruningMode;
use super::config::UpdateMode;
use super::config::WeightingMode;
use super::error::CfrError;
use super::matching;
use super::solver::Profile;
use super::solver::Tabular;
use super::solver::ValueMap;
use super::walker::InfoMap;
use super::walker::ObsBuffer;
use super::walker::ReachMap;
use super::walker::observe;
use super::walker::root_buffer;
use super::walker::root_infostates;
use super::walker::root_reach;
use crate::Probability;
use crate::REACH_EPSILON;
use crate::Utility;
use crate::game::game::Game;
use crate::game::turn::Turn;

/// full-tree counterfactual regret minimization. one iteration walks
/// the whole game tree, accumulates counterfactual regret and average
/// policy mass at every decision infostate of the updated player(s),
/// and then rederives each updated current policy by regret matching.
/// the weighting and pruning variants all share this traversal.
pub struct Vanilla<G: Game> {
    base: Tabular<G>,
    config: CfrConfig,
    discount: Discount,
    exponential: Exponential,
}

impl<G: Game> Vanilla<G> {
    pub(crate) fn make(
        base: Tabular<G>,
        config: CfrConfig,
        discount: Discount,
        exponential: Exponential,
    ) -> Self {
        Self {
            base,
            config,
            discount,
            exponential,
        }
    }

    pub fn config(&self) -> &CfrConfig {
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
    /// borrow the current policy tables
    pub fn policy(&self) -> &Profile<G> {
        self.base.current()
    }
    /// read access to every infostate record seen so far
    pub fn records(
        &self,
    ) -> impl Iterator<
        Item = (
            &crate::game::infostate::InfoState<G::Observation>,
            &super::memory::Memory<G::Action>,
        ),
    > {
        self.base.records()
    }
    /// borrow the raw cumulative average tables. for exponential
    /// weighting prefer [`average_policy`](Self::average_policy),
    /// which divides out the stored denominators
    pub fn average(&self) -> &Profile<G> {
        self.base.average()
    }
    /// the average strategy profile. exponential weighting cannot be
    /// recovered by normalizing the numerator alone, so this
    /// materializes a fresh profile; every other weighting borrows
    /// would-be-identical data, cloned here for a uniform signature
    pub fn average_policy(&self) -> Profile<G> {
        match self.config.weighting {
            WeightingMode::Exponential => {
                let mut profile = self.base.average().clone();
                for (_, table) in profile.iter_mut() {
                    for (info, policy) in table.iter_mut() {
                        let memory = self.base.memory(info);
                        for (index, weight) in policy.values_mut().enumerate() {
                            let denominator = memory.denominator(index);
                            if denominator > 0. {
                                *weight /= denominator;
                            }
                        }
                    }
                }
                profile
            }
            _ => self.base.average().clone(),
        }
    }
    /// one evaluation traversal with the average policy, no updates
    pub fn game_value(&self) -> Result<ValueMap, CfrError> {
        match self.config.weighting {
            WeightingMode::Exponential => {
                let root = self.base.root();
                super::solver::evaluate(
                    root,
                    &self.average_policy(),
                    &root_buffer(root),
                    &root_infostates(root),
                )
            }
            _ => self.base.game_value(),
        }
    }

    /// run `n` iterations and report the root value of each
    pub fn iterate(&mut self, n: usize) -> Result<Vec<ValueMap>, CfrError> {
        log::info!("running {} cfr iterations", n);
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            let updated = match self.config.update {
                UpdateMode::Alternating => Some(self.base.cycle(None)?),
                UpdateMode::Simultaneous => None,
            };
            values.push(self.once(updated)?);
        }
        Ok(values)
    }

    /// a single alternating iteration updating the given player
    pub fn iterate_for(&mut self, player: Turn) -> Result<ValueMap, CfrError> {
        if self.config.update != UpdateMode::Alternating {
            return Err(CfrError::InvalidConfiguration(
                "explicit player updates require alternating mode",
            ));
        }
        let updated = self.base.cycle(Some(player))?;
        self.once(Some(updated))
    }

    fn once(&mut self, updated: Option<Turn>) -> Result<ValueMap, CfrError> {
        log::trace!("iteration {}", self.base.epochs());
        let root = self.base.root().clone();
        let reach = root_reach(&root);
        let buffer = root_buffer(&root);
        let infos = root_infostates(&root);
        let value = self.traverse(updated, root, reach, buffer, infos)?;
        self.apply_matching(updated)?;
        self.base.advance();
        Ok(value)
    }

    /// depth-first over the full tree. reach probabilities compound
    /// per player on the way down, values come back up per player,
    /// and regret and average updates happen on the unwind at each
    /// updated decision node.
    fn traverse(
        &mut self,
        updated: Option<Turn>,
        state: G,
        reach: ReachMap,
        buffer: ObsBuffer<G::Observation>,
        infos: InfoMap<G::Observation>,
    ) -> Result<ValueMap, CfrError> {
        if state.is_terminal() {
            return Ok(state
                .actuals()
                .into_iter()
                .map(|p| (p, state.payoff(p)))
                .collect());
        }
        if self.config.pruning == PruningMode::Partial && prunable(updated, &reach) {
            return Ok(state.actuals().into_iter().map(|p| (p, 0.)).collect());
        }
        let turn = state.turn();
        let mut value: ValueMap = state.actuals().into_iter().map(|p| (p, 0.)).collect();
        if turn == Turn::Chance {
            for (outcome, probability) in state.chances() {
                let next = state.child(&outcome);
                let mut creach = reach.clone();
                *creach.get_mut(&Turn::Chance).expect("chance reach") *= probability;
                let (cbuffer, cinfos) = observe(&state, &outcome, &next, &buffer, &infos);
                let child = self.traverse(updated, next, creach, cbuffer, cinfos)?;
                for (player, v) in child {
                    *value.get_mut(&player).expect("actual player") += probability * v;
                }
            }
            return Ok(value);
        }
        let info = infos.get(&turn).expect("infostate for active player").clone();
        let actions = self.base.witness(&info, &state).actions().to_vec();
        let policy = {
            let row = self.base.fetch_current(turn, &info, &actions);
            actions.iter().map(|a| row.get(a)).collect::<Vec<_>>()
        };
        let mut children = Vec::with_capacity(actions.len());
        for (action, probability) in actions.iter().zip(policy.iter()) {
            let next = state.child(action);
            let mut creach = reach.clone();
            *creach.get_mut(&turn).expect("active reach") *= probability;
            let (cbuffer, cinfos) = observe(&state, action, &next, &buffer, &infos);
            let child = self.traverse(updated, next, creach, cbuffer, cinfos)?;
            for (player, v) in child.iter() {
                *value.get_mut(player).expect("actual player") += probability * v;
            }
            children.push(child);
        }
        if updated.map_or(true, |p| p == turn) {
            self.update(turn, &info, &actions, &policy, &reach, &value, &children);
        }
        Ok(value)
    }

    /// regret and average increments at one updated decision node
    fn update(
        &mut self,
        turn: Turn,
        info: &crate::game::infostate::InfoState<G::Observation>,
        actions: &[G::Action],
        policy: &[Probability],
        reach: &ReachMap,
        value: &ValueMap,
        children: &[ValueMap],
    ) {
        let cf = reach
            .iter()
            .filter(|(p, _)| **p != turn)
            .map(|(_, r)| r)
            .product::<Probability>();
        let own = *reach.get(&turn).expect("active reach");
        let baseline = *value.get(&turn).expect("active value");
        match self.config.weighting {
            WeightingMode::Exponential => {
                // instantaneous regrets and the acting player's reach
                // are remembered until the end of the iteration, when
                // the L1 weights become known
                let memory = self.base.memory_mut(info);
                for (index, child) in children.iter().enumerate() {
                    let gain = child.get(&turn).expect("active value") - baseline;
                    memory.add_instant(index, cf * gain);
                }
                memory.set_reach(own);
            }
            _ => {
                if cf > 0. {
                    let into_instant = self.config.pruning == PruningMode::RegretBased;
                    let memory = self.base.memory_mut(info);
                    for (index, child) in children.iter().enumerate() {
                        let gain = child.get(&turn).expect("active value") - baseline;
                        if into_instant {
                            memory.add_instant(index, cf * gain);
                        } else {
                            memory.add_regret(index, cf * gain);
                        }
                    }
                }
                let average = self.base.fetch_average(turn, info, actions);
                for (action, probability) in actions.iter().zip(policy.iter()) {
                    average.add(action, own * probability);
                }
            }
        }
    }

    /// the post-traversal regret-matching pass over every updated
    /// infostate: apply the weighting schedule, rederive the current
    /// policy, and (for the discounting family) decay the average
    fn apply_matching(&mut self, updated: Option<Turn>) -> Result<(), CfrError> {
        // discount schedules age with the number of completed
        // iterations, this one included
        let age = self.base.epochs() + 1;
        let config = self.config;
        let discount = self.discount;
        let exponential = self.exponential;
        let (memory, current, average) = self.base.split();
        for (info, data) in memory
            .iter_mut()
            .filter(|(info, _)| updated.map_or(true, |p| info.turn() == p))
        {
            let turn = info.turn();
            let actions = data.actions().to_vec();
            let policy = current
                .get_mut(&turn)
                .expect("current policy per actual player")
                .fetch(info, &actions, &crate::policy::default::Uniform);
            match config.weighting {
                WeightingMode::Exponential => {
                    let mean = data.instants().iter().sum::<Utility>()
                        / data.instants().len() as Utility;
                    let weights = data
                        .instants()
                        .iter()
                        .map(|r| (r - mean).exp())
                        .collect::<Vec<_>>();
                    let reach = data.reach();
                    let numerator = average
                        .get_mut(&turn)
                        .expect("average policy per actual player")
                        .fetch(info, &actions, &crate::policy::default::Zero);
                    for (index, action) in actions.iter().enumerate() {
                        let instant = data.instants()[index];
                        let folded = if instant >= 0. {
                            instant
                        } else {
                            (exponential.beta)(instant, age)
                        };
                        data.add_regret(index, weights[index] * folded);
                        data.reset_instant(index);
                        numerator.add(action, weights[index] * reach * policy.get(action));
                        data.add_denominator(index, weights[index] * reach);
                    }
                    matching::regret_matching(data.regrets(), policy)?;
                }
                _ => {
                    if config.weighting == WeightingMode::Discounted {
                        for regret in data.regrets_mut().iter_mut() {
                            *regret *= discount.regret(age, *regret);
                        }
                    }
                    match (config.matching, config.pruning) {
                        (MatchingMode::Plus, PruningMode::RegretBased) => {
                            let (regret, instant) = data.tables_mut();
                            matching::regret_matching_plus_pruned(regret, instant, policy)?;
                        }
                        (MatchingMode::Plus, _) => {
                            matching::regret_matching_plus(data.regrets_mut(), policy)?;
                        }
                        (MatchingMode::Plain, _) => {
                            matching::regret_matching(data.regrets(), policy)?;
                        }
                    }
                    let decay = match config.weighting {
                        WeightingMode::Linear => age as Utility / (age as Utility + 1.),
                        WeightingMode::Discounted => discount.policy(age),
                        _ => 1.,
                    };
                    if decay != 1. {
                        average
                            .get_mut(&turn)
                            .expect("average policy per actual player")
                            .fetch(info, &actions, &crate::policy::default::Zero)
                            .scale(decay);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<G: Game> std::fmt::Display for Vanilla<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.base, f)
    }
}

/// cheap zero-reach short-circuit. in alternating mode the subtree is
/// dead once the updating player cannot reach it and neither can some
/// other participant; in simultaneous mode every non-chance player
/// must be unreachable.
fn prunable(updated: Option<Turn>, reach: &ReachMap) -> bool {
    match updated {
        Some(player) => {
            reach.get(&player).map_or(false, |r| *r <= REACH_EPSILON)
                && reach
                    .iter()
                    .any(|(p, r)| *p != player && *r <= REACH_EPSILON)
        }
        None => reach
            .iter()
            .filter(|(p, _)| !p.chance())
            .all(|(_, r)| *r <= REACH_EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::factory;
    use crate::cfr::response::exploitability;
    use crate::game::infostate::InfoState;
    use crate::games::kuhn::Kuhn;
    use crate::games::kuhn::KuhnAction;
    use crate::games::kuhn::KuhnCard;
    use crate::games::kuhn::KuhnObs;
    use crate::games::rps::Rps;
    use crate::games::rps::RpsAction;
    use crate::games::rps::RpsObs;
    use crate::policy::action::ActionPolicy;
    use crate::policy::tabular::TabularPolicy;
    use std::collections::BTreeMap;

    const KUHN_VALUE: Utility = -1. / 18.;
    const EXPLOITABILITY_THRESHOLD: Utility = 5e-3;

    fn kuhn_info(player: usize, card: KuhnCard, bets: &[KuhnAction]) -> InfoState<KuhnObs> {
        let mut info = InfoState::new(Turn::Player(player));
        info.push(KuhnObs::Veiled, KuhnObs::Dealt(card));
        for bet in bets {
            info.push(KuhnObs::Saw(*bet), KuhnObs::Saw(*bet));
        }
        info
    }

    /// normalized probability of betting at one average-policy row
    fn bets(solver: &Vanilla<Kuhn>, info: &InfoState<KuhnObs>) -> Utility {
        solver.average_policy()[&info.turn()]
            .normalized(info)
            .expect("trained infostate")
            .get(&KuhnAction::Bet)
    }

    /// drive a solver until its average profile drops below the
    /// exploitability threshold or the iteration budget runs out
    fn solve(solver: &mut Vanilla<Kuhn>, budget: usize, chunk: usize) -> Utility {
        let mut expl = Utility::MAX;
        let mut spent = 0;
        while expl > EXPLOITABILITY_THRESHOLD && spent < budget {
            solver.iterate(chunk).unwrap();
            spent += chunk;
            expl = exploitability(solver.root(), &solver.average_policy()).unwrap();
        }
        expl
    }

    #[test]
    fn rps_uniformizes() {
        // both players start away from equilibrium and are pulled to
        // the uniform one
        let _ = env_logger::builder().is_test(true).try_init();
        let throws = [RpsAction::Rock, RpsAction::Paper, RpsAction::Scissors];
        let first = InfoState::new(Turn::Player(0));
        let second = {
            let mut info = InfoState::new(Turn::Player(1));
            info.push(RpsObs::Veiled, RpsObs::Veiled);
            info
        };
        let mut current: BTreeMap<_, TabularPolicy<RpsObs, RpsAction>> = BTreeMap::new();
        let mut skewed = TabularPolicy::new();
        skewed.assign(
            first.clone(),
            throws.iter().copied().zip([0.5, 0.25, 0.25]).collect(),
        );
        current.insert(Turn::Player(0), skewed);
        let mut skewed = TabularPolicy::new();
        skewed.assign(
            second.clone(),
            throws.iter().copied().zip([0.2, 0.3, 0.5]).collect(),
        );
        current.insert(Turn::Player(1), skewed);
        let average = [Turn::Player(0), Turn::Player(1)]
            .into_iter()
            .map(|p| (p, TabularPolicy::new()))
            .collect();
        let mut solver =
            factory::vanilla_with(Rps::new(), CfrConfig::default(), current, average).unwrap();
        solver.iterate(20_000).unwrap();
        println!("{}", solver);
        for (player, info) in [(Turn::Player(0), &first), (Turn::Player(1), &second)] {
            let row = solver.average()[&player].normalized(info).unwrap();
            for action in throws.iter() {
                let p = row.get(action);
                assert!((p - 1. / 3.).abs() < 1e-2, "{:?} {:?}: {}", player, action, p);
            }
        }
        let value = solver.game_value().unwrap();
        assert!(value[&Turn::Player(0)].abs() < 1e-4);
    }

    #[test]
    fn kuhn_value() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate(15_000).unwrap();
        let value = solver.game_value().unwrap();
        assert!(
            (value[&Turn::Player(0)] - KUHN_VALUE).abs() < 1e-3,
            "game value {} not near {}",
            value[&Turn::Player(0)],
            KUHN_VALUE
        );
        assert!((value[&Turn::Player(0)] + value[&Turn::Player(1)]).abs() < 1e-9);
    }

    #[test]
    fn kuhn_profile() {
        // the learned profile must sit inside the one-parameter family
        // of optimal Kuhn strategies, parameterized by the jack bluff
        // rate alpha
        use KuhnAction::*;
        use KuhnCard::*;
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate(15_000).unwrap();
        let tol = 1e-2;
        let alpha = bets(&solver, &kuhn_info(0, Jack, &[]));
        assert!((0. ..=1. / 3. + tol).contains(&alpha), "alpha {}", alpha);
        let close = |info: &InfoState<KuhnObs>, expected: Utility, name: &str| {
            let p = bets(&solver, info);
            assert!((p - expected).abs() < tol, "{}: bet {} not near {}", name, p, expected);
        };
        close(&kuhn_info(0, Queen, &[Check, Bet]), 1. / 3. + alpha, "first queen facing bet");
        close(&kuhn_info(0, King, &[]), 3. * alpha, "first king");
        close(&kuhn_info(0, King, &[Check, Bet]), 1., "first king facing bet");
        close(&kuhn_info(1, Jack, &[Check]), 1. / 3., "second jack vs check");
        close(&kuhn_info(1, Jack, &[Bet]), 0., "second jack vs bet");
        close(&kuhn_info(1, Queen, &[Check]), 0., "second queen vs check");
        close(&kuhn_info(1, Queen, &[Bet]), 1. / 3., "second queen vs bet");
        close(&kuhn_info(1, King, &[Check]), 1., "second king vs check");
        close(&kuhn_info(1, King, &[Bet]), 1., "second king vs bet");
    }

    #[test]
    fn running_minimum() {
        // the best profile seen so far only ever improves, and ends up
        // essentially unexploitable
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        let mut minimum = Utility::MAX;
        for _ in 0..12 {
            solver.iterate(500).unwrap();
            let expl = exploitability(solver.root(), solver.average()).unwrap();
            let next = minimum.min(expl);
            assert!(next <= minimum);
            minimum = next;
        }
        assert!(minimum < 1e-2, "running minimum {} too high", minimum);
    }

    #[test]
    fn invariants() {
        // regret and current-policy domains match the stored action
        // list exactly, and every current row is a distribution
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate(100).unwrap();
        for (info, record) in solver.records() {
            assert_eq!(record.regrets().len(), record.actions().len());
            let row = solver.policy()[&info.turn()]
                .get(info)
                .expect("current row per witnessed infostate");
            assert_eq!(row.len(), record.actions().len());
            for action in record.actions() {
                assert!(row.get(action) >= 0.);
            }
            assert!((row.sum() - 1.).abs() < 1e-9);
        }
    }

    #[test]
    fn monotone_average() {
        // uniform weighting only ever adds mass
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate(100).unwrap();
        let before: Vec<(InfoState<KuhnObs>, ActionPolicy<KuhnAction>)> = solver
            .average()
            .values()
            .flat_map(|table| table.iter().map(|(i, p)| (i.clone(), p.clone())))
            .collect();
        solver.iterate(100).unwrap();
        for (info, row) in before {
            let after = &solver.average()[&info.turn()][&info];
            for (action, weight) in row.iter() {
                assert!(after.get(action) >= weight);
            }
        }
    }

    #[test]
    fn pruning_equivalence() {
        // partial pruning only skips subtrees whose updates vanish, so
        // the learned tables agree with the unpruned run
        let mut plain = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        let mut pruned = factory::vanilla(
            Kuhn::new(),
            CfrConfig {
                pruning: PruningMode::Partial,
                ..CfrConfig::default()
            },
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        plain.iterate(200).unwrap();
        pruned.iterate(200).unwrap();
        for (info, row) in plain.average().values().flat_map(|t| t.iter()) {
            match pruned.average()[&info.turn()].get(info) {
                Some(other) => {
                    for (action, weight) in row.iter() {
                        assert!((other.get(action) - weight).abs() < 1e-9);
                    }
                }
                // a row the pruned run never materialized can only
                // have gathered zero mass in the full run
                None => assert!(row.sum().abs() < 1e-9),
            }
        }
    }

    #[test]
    fn plus_converges() {
        let mut solver = factory::plus(Kuhn::new()).unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn linear_converges() {
        let mut solver = factory::linear(Kuhn::new(), UpdateMode::Alternating).unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn discounted_converges() {
        let mut solver =
            factory::discounted(Kuhn::new(), UpdateMode::Alternating, Discount::default()).unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn exponential_converges() {
        let mut solver =
            factory::exponential(Kuhn::new(), UpdateMode::Alternating, Exponential::default())
                .unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn simultaneous_converges() {
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig {
                update: UpdateMode::Simultaneous,
                ..CfrConfig::default()
            },
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    #[test]
    fn regret_pruned_plus_converges() {
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig {
                update: UpdateMode::Alternating,
                matching: MatchingMode::Plus,
                weighting: WeightingMode::Uniform,
                pruning: PruningMode::RegretBased,
            },
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        let expl = solve(&mut solver, 100_000, 200);
        assert!(expl < EXPLOITABILITY_THRESHOLD, "exploitability {}", expl);
    }

    /// one player, one action, one decision
    #[derive(Debug, Clone, Default)]
    struct Solo {
        done: bool,
    }
    impl Game for Solo {
        type Action = u8;
        type Observation = u8;
        fn players(&self) -> Vec<Turn> {
            vec![Turn::Player(0), Turn::Player(1)]
        }
        fn turn(&self) -> Turn {
            if self.done { Turn::Unknown } else { Turn::Player(0) }
        }
        fn is_terminal(&self) -> bool {
            self.done
        }
        fn actions(&self) -> Vec<u8> {
            vec![0]
        }
        fn apply(&mut self, _: &u8) {
            self.done = true;
        }
        fn payoff(&self, _: Turn) -> Utility {
            0.
        }
        fn public_observation(&self, action: &u8, _: &Self) -> u8 {
            *action
        }
        fn private_observation(&self, _: Turn, action: &u8, _: &Self) -> u8 {
            *action
        }
    }

    #[test]
    fn degenerate_choice() {
        // with a single legal action the game is solved in one pass
        let mut solver = factory::vanilla(
            Solo::default(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate(1).unwrap();
        let expl = exploitability(solver.root(), solver.average()).unwrap();
        assert!(expl.abs() < 1e-12);
        let info = InfoState::new(Turn::Player(0));
        let row = solver.average()[&Turn::Player(0)].normalized(&info).unwrap();
        assert_eq!(row.get(&0), 1.);
    }

    #[test]
    fn explicit_updates() {
        // iterate_for drives the schedule by hand
        let mut solver = factory::vanilla(
            Kuhn::new(),
            CfrConfig::default(),
            TabularPolicy::new(),
            TabularPolicy::new(),
        )
        .unwrap();
        solver.iterate_for(Turn::Player(1)).unwrap();
        assert_eq!(solver.schedule().next(), Some(Turn::Player(0)));
        assert_eq!(
            solver.iterate_for(Turn::Chance).err(),
            Some(CfrError::InvalidConfiguration(
                "chance cannot be the player to update"
            ))
        );
        assert_eq!(
            solver.iterate_for(Turn::Player(9)).err(),
            Some(CfrError::UnknownPlayer(Turn::Player(9)))
        );
        assert_eq!(solver.iteration(), 1);
    }
}
