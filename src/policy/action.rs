use crate::Utility;
use crate::cfr::error::CfrError;
use serde::Deserialize;
use serde::Serialize;

/// one infostate's mapping from action to non-negative weight. backed
/// by a vector so iteration always follows the order the legal actions
/// were inserted with; per-infoset storage is small enough that linear
/// lookup beats hashing.
///
/// reads of absent actions yield zero, writes insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPolicy<A> {
    weights: Vec<(A, Utility)>,
}

impl<A> Default for ActionPolicy<A> {
    fn default() -> Self {
        Self {
            weights: Vec::new(),
        }
    }
}

impl<A: Clone + PartialEq> ActionPolicy<A> {
    pub fn new() -> Self {
        Self::default()
    }
    /// constant fill over the given actions, in their order
    pub fn with(actions: &[A], weight: Utility) -> Self {
        Self {
            weights: actions.iter().cloned().map(|a| (a, weight)).collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.weights.len()
    }
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
    pub fn get(&self, action: &A) -> Utility {
        self.weights
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, w)| *w)
            .unwrap_or_default()
    }
    pub fn set(&mut self, action: &A, weight: Utility) {
        match self.weights.iter_mut().find(|(a, _)| a == action) {
            Some((_, w)) => *w = weight,
            None => self.weights.push((action.clone(), weight)),
        }
    }
    pub fn add(&mut self, action: &A, delta: Utility) {
        match self.weights.iter_mut().find(|(a, _)| a == action) {
            Some((_, w)) => *w += delta,
            None => self.weights.push((action.clone(), delta)),
        }
    }
    pub fn scale(&mut self, factor: Utility) {
        for (_, w) in self.weights.iter_mut() {
            *w *= factor;
        }
    }
    pub fn sum(&self) -> Utility {
        self.weights.iter().map(|(_, w)| w).sum()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&A, Utility)> {
        self.weights.iter().map(|(a, w)| (a, *w))
    }
    pub fn support(&self) -> impl Iterator<Item = &A> {
        self.weights.iter().map(|(a, _)| a)
    }
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Utility> {
        self.weights.iter_mut().map(|(_, w)| w)
    }
    /// probability snapshot. the stored weights are untouched
    pub fn normalized(&self) -> Result<Self, CfrError> {
        let sum = self.sum();
        if sum <= 0. {
            return Err(CfrError::NonNormalizablePolicy);
        }
        Ok(Self {
            weights: self
                .weights
                .iter()
                .map(|(a, w)| (a.clone(), w / sum))
                .collect(),
        })
    }
}

impl<A: Clone + PartialEq> FromIterator<(A, Utility)> for ActionPolicy<A> {
    fn from_iter<I: IntoIterator<Item = (A, Utility)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}
