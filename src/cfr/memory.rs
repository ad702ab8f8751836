use crate::Probability;
use crate::Utility;

/// the per-infostate record, created lazily on first visit and never
/// removed. the legal action list is fixed at creation and every dense
/// table is aligned with it. beyond cumulative regret, the record
/// carries the auxiliary slots the individual variants need:
///
/// - `instant`: instantaneous regret, for exponential weighting and
///   regret-based pruning
/// - `delayed`: per-action delayed weights, for lazily weighted
///   outcome sampling
/// - `denominator` and `reach`: the average-policy denominator and the
///   acting player's reach, for exponential weighting
/// - `visited`: last-visit iteration, for optimistic weighting
/// - `sampled`: the epoch-tagged action pure CFR shares across every
///   world state of the infostate within one iteration
#[derive(Debug, Clone)]
pub struct Memory<A> {
    actions: Vec<A>,
    regret: Vec<Utility>,
    instant: Vec<Utility>,
    delayed: Vec<Utility>,
    denominator: Vec<Utility>,
    reach: Probability,
    visited: usize,
    sampled: Option<(usize, usize)>,
}

impl<A> Default for Memory<A> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            regret: Vec::new(),
            instant: Vec::new(),
            delayed: Vec::new(),
            denominator: Vec::new(),
            reach: Probability::default(),
            visited: usize::default(),
            sampled: None,
        }
    }
}

impl<A: Clone + PartialEq> Memory<A> {
    /// fix the legal action list and zero the tables. re-emplacing an
    /// already populated record is a no-op
    pub fn emplace(&mut self, actions: Vec<A>) {
        if self.actions.is_empty() {
            let n = actions.len();
            self.actions = actions;
            self.regret = vec![0.; n];
            self.instant = vec![0.; n];
            self.delayed = vec![0.; n];
            self.denominator = vec![0.; n];
        }
    }
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
    pub fn index(&self, action: &A) -> usize {
        self.actions
            .iter()
            .position(|a| a == action)
            .expect("legal action at this infostate")
    }
    pub fn regret(&self, action: &A) -> Utility {
        self.regret[self.index(action)]
    }
    pub fn regrets(&self) -> &[Utility] {
        &self.regret
    }
    pub fn regrets_mut(&mut self) -> &mut [Utility] {
        &mut self.regret
    }
    pub fn add_regret(&mut self, index: usize, delta: Utility) {
        self.regret[index] += delta;
    }
    pub fn instants(&self) -> &[Utility] {
        &self.instant
    }
    pub fn add_instant(&mut self, index: usize, delta: Utility) {
        self.instant[index] += delta;
    }
    pub fn reset_instant(&mut self, index: usize) {
        self.instant[index] = 0.;
    }
    /// cumulative regret and instantaneous regret, borrowed together
    /// for the pruned kernel
    pub fn tables_mut(&mut self) -> (&mut [Utility], &mut [Utility]) {
        (&mut self.regret, &mut self.instant)
    }
    pub fn delayed(&self, index: usize) -> Utility {
        self.delayed[index]
    }
    pub fn add_delayed(&mut self, index: usize, delta: Utility) {
        self.delayed[index] += delta;
    }
    pub fn reset_delayed(&mut self, index: usize) {
        self.delayed[index] = 0.;
    }
    pub fn denominator(&self, index: usize) -> Utility {
        self.denominator[index]
    }
    pub fn add_denominator(&mut self, index: usize, delta: Utility) {
        self.denominator[index] += delta;
    }
    pub fn reach(&self) -> Probability {
        self.reach
    }
    pub fn set_reach(&mut self, reach: Probability) {
        self.reach = reach;
    }
    pub fn visited(&self) -> usize {
        self.visited
    }
    pub fn set_visited(&mut self, epoch: usize) {
        self.visited = epoch;
    }
    /// the action pure CFR sampled for this infostate at this epoch,
    /// if any. samples from earlier epochs are stale by construction,
    /// which is what clears the slot at iteration boundaries
    pub fn sample(&self, epoch: usize) -> Option<usize> {
        match self.sampled {
            Some((at, index)) if at == epoch => Some(index),
            _ => None,
        }
    }
    pub fn set_sample(&mut self, epoch: usize, index: usize) {
        self.sampled = Some((epoch, index));
    }
}
