use super::error::CfrError;
use crate::Probability;
use crate::Utility;

/// whether one player or all players are updated per iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Alternating,
    Simultaneous,
}

/// which kernel turns cumulative regret into the next current policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingMode {
    /// plain regret matching
    Plain,
    /// regret matching plus: cumulative regret clipped to non-negative
    Plus,
}

/// how regret and average-policy increments are weighted over time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightingMode {
    /// unweighted increments
    Uniform,
    /// average policy weighted by the iteration index
    Linear,
    /// sign-dependent regret discounting and gamma-powered average
    /// discounting, parameterized by [`Discount`]
    Discounted,
    /// instantaneous regrets weighted by their exponentiated advantage,
    /// parameterized by [`Exponential`]
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruningMode {
    None,
    /// short-circuit subtrees whose regret and average updates would
    /// all be zero anyway
    Partial,
    /// skip negative-regret actions and recover through the
    /// instantaneous regret. only sound on top of regret matching plus
    RegretBased,
}

/// which part of the tree a Monte Carlo iteration actually visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// one trajectory per iteration
    Outcome,
    /// every traverser action, one sample per opponent and chance node
    External,
    /// full decision tree, one sample per chance node
    Chance,
    /// one cached action per infostate per iteration
    Pure,
}

/// how sampled average-policy increments are reweighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWeighting {
    /// per-action delayed weights pushed along once sampled
    Lazy,
    /// increments boosted by the number of iterations since last visit
    Optimistic,
    /// increments boosted by the reciprocal sample likelihood
    Stochastic,
}

/// full-tree solver configuration
#[derive(Debug, Clone, Copy)]
pub struct CfrConfig {
    pub update: UpdateMode,
    pub matching: MatchingMode,
    pub weighting: WeightingMode,
    pub pruning: PruningMode,
}

impl Default for CfrConfig {
    fn default() -> Self {
        Self {
            update: UpdateMode::Alternating,
            matching: MatchingMode::Plain,
            weighting: WeightingMode::Uniform,
            pruning: PruningMode::None,
        }
    }
}

impl CfrConfig {
    pub fn validate(&self) -> Result<(), CfrError> {
        if self.pruning == PruningMode::RegretBased && self.matching != MatchingMode::Plus {
            return Err(CfrError::InvalidConfiguration(
                "regret-based pruning requires regret matching plus",
            ));
        }
        if self.weighting == WeightingMode::Exponential && self.pruning == PruningMode::RegretBased
        {
            // the two prescribe conflicting cumulative-regret updates:
            // exponential folds L1-weighted instantaneous regret in,
            // regret-based recovery replaces the cumulative outright
            return Err(CfrError::InvalidConfiguration(
                "exponential weighting cannot combine with regret-based pruning",
            ));
        }
        Ok(())
    }
}

/// Monte Carlo solver configuration. regret matching plus is not
/// supported here, so there is no matching field to misconfigure.
#[derive(Debug, Clone, Copy)]
pub struct MccfrConfig {
    pub update: UpdateMode,
    pub sampling: SamplingMode,
    pub weighting: SampleWeighting,
    /// exploration rate of epsilon-on-policy sampling
    pub epsilon: Probability,
}

impl Default for MccfrConfig {
    fn default() -> Self {
        Self {
            update: UpdateMode::Alternating,
            sampling: SamplingMode::Outcome,
            weighting: SampleWeighting::Stochastic,
            epsilon: 0.6,
        }
    }
}

impl MccfrConfig {
    pub fn validate(&self) -> Result<(), CfrError> {
        if !(0. ..=1.).contains(&self.epsilon) {
            return Err(CfrError::InvalidConfiguration(
                "exploration epsilon must lie in [0, 1]",
            ));
        }
        if self.sampling == SamplingMode::External {
            if self.update != UpdateMode::Alternating {
                return Err(CfrError::InvalidConfiguration(
                    "external sampling requires alternating updates",
                ));
            }
            if self.weighting != SampleWeighting::Stochastic {
                return Err(CfrError::InvalidConfiguration(
                    "external sampling requires stochastic weighting",
                ));
            }
        }
        if self.sampling != SamplingMode::Outcome
            && matches!(
                self.weighting,
                SampleWeighting::Lazy | SampleWeighting::Optimistic
            )
        {
            return Err(CfrError::InvalidConfiguration(
                "lazy and optimistic weighting only apply to outcome sampling",
            ));
        }
        Ok(())
    }
}

/// discounted CFR parameters. positive cumulative regrets are scaled
/// by `t^alpha / (t^alpha + 1)`, non-positive ones by the beta
/// analogue, and the cumulative average policy by `(t / (t + 1))^gamma`.
#[derive(Debug, Clone, Copy)]
pub struct Discount {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for Discount {
    fn default() -> Self {
        Self {
            alpha: 1.5,
            beta: 0.,
            gamma: 2.,
        }
    }
}

impl Discount {
    /// linear CFR expressed in discount parameters
    pub const fn linear() -> Self {
        Self {
            alpha: 1.,
            beta: 1.,
            gamma: 1.,
        }
    }
    pub fn policy(&self, t: usize) -> Utility {
        let t = t as Utility;
        (t / (t + 1.)).powf(self.gamma)
    }
    pub fn regret(&self, t: usize, regret: Utility) -> Utility {
        let t = t as Utility;
        if regret > 0. {
            let x = t.powf(self.alpha);
            x / (x + 1.)
        } else {
            let x = t.powf(self.beta);
            x / (x + 1.)
        }
    }
}

/// exponential CFR parameters. `beta` bounds the contribution of
/// negative instantaneous regrets; the default forgets them entirely.
#[derive(Clone, Copy)]
pub struct Exponential {
    pub beta: fn(Utility, usize) -> Utility,
}

fn zero(_: Utility, _: usize) -> Utility {
    0.
}

impl Default for Exponential {
    fn default() -> Self {
        Self { beta: zero }
    }
}

impl std::fmt::Debug for Exponential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exponential").finish_non_exhaustive()
    }
}
