use super::action::ActionPolicy;
use super::default::DefaultPolicy;
use crate::cfr::error::CfrError;
use crate::game::infostate::InfoState;
use serde::Deserialize;
use serde::Serialize;

/// a state policy: infostate -> action policy. rows are created on
/// first fetch from a default policy over the infostate's legal
/// actions, and the stored row keeps its identity across visits so
/// accumulated weights survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularPolicy<O, A>
where
    O: Clone + PartialEq + Eq + std::hash::Hash,
{
    table: std::collections::HashMap<InfoState<O>, ActionPolicy<A>>,
}

impl<O, A> Default for TabularPolicy<O, A>
where
    O: Clone + PartialEq + Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self {
            table: std::collections::HashMap::new(),
        }
    }
}

impl<O, A> TabularPolicy<O, A>
where
    O: Clone + PartialEq + Eq + std::hash::Hash,
    A: Clone + PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn get(&self, info: &InfoState<O>) -> Option<&ActionPolicy<A>> {
        self.table.get(info)
    }
    /// lookup with insert-on-miss: absent rows are seeded from the
    /// default policy over the given legal actions
    pub fn fetch(
        &mut self,
        info: &InfoState<O>,
        actions: &[A],
        default: &impl DefaultPolicy,
    ) -> &mut ActionPolicy<A> {
        self.table
            .entry(info.clone())
            .or_insert_with(|| default.build(actions))
    }
    /// overwrite a row wholesale. mostly useful to seed starting
    /// policies before training
    pub fn assign(&mut self, info: InfoState<O>, policy: ActionPolicy<A>) {
        self.table.insert(info, policy);
    }
    /// normalized probability snapshot of one row, without mutating
    /// the stored cumulative weights
    pub fn normalized(&self, info: &InfoState<O>) -> Result<ActionPolicy<A>, CfrError> {
        self.table
            .get(info)
            .ok_or(CfrError::NonNormalizablePolicy)?
            .normalized()
    }
    /// per-infoset normalization of the whole table
    pub fn normalized_all(&self) -> Result<Self, CfrError> {
        Ok(Self {
            table: self
                .table
                .iter()
                .map(|(info, policy)| policy.normalized().map(|p| (info.clone(), p)))
                .collect::<Result<_, _>>()?,
        })
    }
    pub fn iter(&self) -> impl Iterator<Item = (&InfoState<O>, &ActionPolicy<A>)> {
        self.table.iter()
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&InfoState<O>, &mut ActionPolicy<A>)> {
        self.table.iter_mut()
    }
}

impl<O, A> std::ops::Index<&InfoState<O>> for TabularPolicy<O, A>
where
    O: Clone + PartialEq + Eq + std::hash::Hash,
{
    type Output = ActionPolicy<A>;
    fn index(&self, info: &InfoState<O>) -> &Self::Output {
        self.table.get(info).expect("infostate present in table")
    }
}
