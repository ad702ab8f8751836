use super::error::CfrError;
use crate::Utility;
use crate::policy::action::ActionPolicy;

/// the regret-matching kernels. each maps one infostate's cumulative
/// regret vector onto its current action policy, in action order. the
/// kernels are pure in the sense that they touch nothing outside the
/// slices and the one policy they are handed.

fn aligned<A: Clone + PartialEq>(regret: &[Utility], policy: &ActionPolicy<A>) -> Result<(), CfrError> {
    if regret.len() == policy.len() {
        Ok(())
    } else {
        Err(CfrError::SizeMismatch {
            expected: regret.len(),
            found: policy.len(),
        })
    }
}

/// plain regret matching: positive regrets normalized into a
/// distribution, uniform when no positive regret exists
pub fn regret_matching<A: Clone + PartialEq>(regret: &[Utility], policy: &mut ActionPolicy<A>) -> Result<(), CfrError> {
    aligned(regret, policy)?;
    let mass = regret.iter().map(|r| r.max(0.)).sum::<Utility>();
    if mass > 0. {
        for (weight, r) in policy.values_mut().zip(regret.iter()) {
            *weight = r.max(0.) / mass;
        }
    } else {
        let uniform = 1. / regret.len() as Utility;
        for weight in policy.values_mut() {
            *weight = uniform;
        }
    }
    Ok(())
}

/// regret matching plus: cumulative regret is clipped to non-negative
/// in place between iterations, then matched as usual
pub fn regret_matching_plus<A: Clone + PartialEq>(
    regret: &mut [Utility],
    policy: &mut ActionPolicy<A>,
) -> Result<(), CfrError> {
    for r in regret.iter_mut() {
        *r = r.max(0.);
    }
    regret_matching(regret, policy)
}

/// regret matching plus with regret-based pruning. the instantaneous
/// regret accumulated since the last update is folded into the
/// cumulative table first: a positive instantaneous regret recovering
/// a negative cumulative one replaces it outright, which is what keeps
/// skipping those subtrees sound. the instantaneous slots are reset.
pub fn regret_matching_plus_pruned<A: Clone + PartialEq>(
    regret: &mut [Utility],
    instant: &mut [Utility],
    policy: &mut ActionPolicy<A>,
) -> Result<(), CfrError> {
    if regret.len() != instant.len() {
        return Err(CfrError::SizeMismatch {
            expected: regret.len(),
            found: instant.len(),
        });
    }
    for (r, i) in regret.iter_mut().zip(instant.iter_mut()) {
        if *i > 0. && *r < 0. {
            *r = *i;
        } else {
            *r += *i;
        }
        *i = 0.;
    }
    regret_matching_plus(regret, policy)
}
