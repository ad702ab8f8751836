use super::config::CfrConfig;
use super::config::Discount;
use super::config::Exponential;
use super::config::MatchingMode;
use super::config::MccfrConfig;
use super::config::PruningMode;
use super::config::SampleWeighting;
use super::config::SamplingMode;
use super::config::UpdateMode;
use super::config::WeightingMode;
use super::error::CfrError;
use super::mccfr::Mccfr;
use super::solver::Profile;
use super::solver::Tabular;
use super::solver::enumerable;
use super::vanilla::Vanilla;
use crate::Probability;
use crate::game::game::Game;
use crate::policy::tabular::TabularPolicy;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// the constructor surface. each solver takes ownership of its root
/// state and starting policies, validates the configuration, and
/// initializes the update schedule with the iteration counter at zero.
/// single-policy constructors clone the given tables once per actual
/// player; the `_with` variants accept explicit per-player maps.

type Table<G> = TabularPolicy<<G as Game>::Observation, <G as Game>::Action>;

fn explode<G: Game>(root: &G, policy: Table<G>) -> Profile<G> {
    root.actuals()
        .into_iter()
        .map(|p| (p, policy.clone()))
        .collect()
}

fn seeded(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// full-tree CFR with an explicit configuration
pub fn vanilla<G: Game>(
    root: G,
    config: CfrConfig,
    policy: Table<G>,
    average: Table<G>,
) -> Result<Vanilla<G>, CfrError> {
    let current = explode(&root, policy);
    let averages = explode(&root, average);
    vanilla_with(root, config, current, averages)
}

/// full-tree CFR with per-player starting policies
pub fn vanilla_with<G: Game>(
    root: G,
    config: CfrConfig,
    current: Profile<G>,
    average: Profile<G>,
) -> Result<Vanilla<G>, CfrError> {
    config.validate()?;
    enumerable(&root)?;
    Ok(Vanilla::make(
        Tabular::new(root, current, average)?,
        config,
        Discount::default(),
        Exponential::default(),
    ))
}

/// CFR+: alternating updates, regret matching plus, uniform weighting
pub fn plus<G: Game>(root: G) -> Result<Vanilla<G>, CfrError> {
    vanilla(
        root,
        CfrConfig {
            update: UpdateMode::Alternating,
            matching: MatchingMode::Plus,
            weighting: WeightingMode::Uniform,
            pruning: PruningMode::None,
        },
        TabularPolicy::new(),
        TabularPolicy::new(),
    )
}

/// linear CFR: the average policy weighted by the iteration index
pub fn linear<G: Game>(root: G, update: UpdateMode) -> Result<Vanilla<G>, CfrError> {
    vanilla(
        root,
        CfrConfig {
            update,
            matching: MatchingMode::Plain,
            weighting: WeightingMode::Linear,
            pruning: PruningMode::None,
        },
        TabularPolicy::new(),
        TabularPolicy::new(),
    )
}

/// discounted CFR with explicit (alpha, beta, gamma)
pub fn discounted<G: Game>(
    root: G,
    update: UpdateMode,
    params: Discount,
) -> Result<Vanilla<G>, CfrError> {
    let config = CfrConfig {
        update,
        matching: MatchingMode::Plain,
        weighting: WeightingMode::Discounted,
        pruning: PruningMode::None,
    };
    config.validate()?;
    enumerable(&root)?;
    Ok(Vanilla::make(
        Tabular::new(
            root.clone(),
            explode(&root, TabularPolicy::new()),
            explode(&root, TabularPolicy::new()),
        )?,
        config,
        params,
        Exponential::default(),
    ))
}

/// exponential CFR with an explicit negative-regret bound
pub fn exponential<G: Game>(
    root: G,
    update: UpdateMode,
    params: Exponential,
) -> Result<Vanilla<G>, CfrError> {
    let config = CfrConfig {
        update,
        matching: MatchingMode::Plain,
        weighting: WeightingMode::Exponential,
        pruning: PruningMode::None,
    };
    config.validate()?;
    enumerable(&root)?;
    Ok(Vanilla::make(
        Tabular::new(
            root.clone(),
            explode(&root, TabularPolicy::new()),
            explode(&root, TabularPolicy::new()),
        )?,
        config,
        Discount::default(),
        params,
    ))
}

/// outcome-sampling MCCFR
pub fn outcome_sampling<G: Game>(
    root: G,
    update: UpdateMode,
    weighting: SampleWeighting,
    epsilon: Probability,
    seed: Option<u64>,
) -> Result<Mccfr<G>, CfrError> {
    mccfr(
        root,
        MccfrConfig {
            update,
            sampling: SamplingMode::Outcome,
            weighting,
            epsilon,
        },
        seed,
    )
}

/// external-sampling MCCFR. alternating updates and stochastic
/// weighting are the only sound combination, so they are implied
pub fn external_sampling<G: Game>(root: G, seed: Option<u64>) -> Result<Mccfr<G>, CfrError> {
    mccfr(
        root,
        MccfrConfig {
            update: UpdateMode::Alternating,
            sampling: SamplingMode::External,
            weighting: SampleWeighting::Stochastic,
            epsilon: 0.,
        },
        seed,
    )
}

/// chance-sampling MCCFR
pub fn chance_sampling<G: Game>(
    root: G,
    update: UpdateMode,
    seed: Option<u64>,
) -> Result<Mccfr<G>, CfrError> {
    mccfr(
        root,
        MccfrConfig {
            update,
            sampling: SamplingMode::Chance,
            weighting: SampleWeighting::Stochastic,
            epsilon: 0.,
        },
        seed,
    )
}

/// pure CFR
pub fn pure_cfr<G: Game>(
    root: G,
    update: UpdateMode,
    seed: Option<u64>,
) -> Result<Mccfr<G>, CfrError> {
    mccfr(
        root,
        MccfrConfig {
            update,
            sampling: SamplingMode::Pure,
            weighting: SampleWeighting::Stochastic,
            epsilon: 0.,
        },
        seed,
    )
}

/// Monte Carlo CFR with an explicit configuration
pub fn mccfr<G: Game>(root: G, config: MccfrConfig, seed: Option<u64>) -> Result<Mccfr<G>, CfrError> {
    mccfr_with(
        root.clone(),
        config,
        explode(&root, TabularPolicy::new()),
        explode(&root, TabularPolicy::new()),
        seed,
    )
}

/// Monte Carlo CFR with per-player starting policies
pub fn mccfr_with<G: Game>(
    root: G,
    config: MccfrConfig,
    current: Profile<G>,
    average: Profile<G>,
    seed: Option<u64>,
) -> Result<Mccfr<G>, CfrError> {
    config.validate()?;
    Ok(Mccfr::make(
        Tabular::new(root, current, average)?,
        config,
        seeded(seed),
    ))
}
