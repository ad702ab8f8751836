use super::action::ActionPolicy;

/// seeds a fresh action policy over an infostate's legal actions when
/// a table is queried for an infostate it has never seen
pub trait DefaultPolicy {
    fn build<A: Clone + PartialEq>(&self, actions: &[A]) -> ActionPolicy<A>;
}

/// `1 / |A|` over the legal actions. the default for current policies
pub struct Uniform;

/// zero mass everywhere. the default for cumulative average policies
pub struct Zero;

impl DefaultPolicy for Uniform {
    fn build<A: Clone + PartialEq>(&self, actions: &[A]) -> ActionPolicy<A> {
        ActionPolicy::with(actions, 1. / actions.len() as f64)
    }
}

impl DefaultPolicy for Zero {
    fn build<A: Clone + PartialEq>(&self, actions: &[A]) -> ActionPolicy<A> {
        ActionPolicy::with(actions, 0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniformity() {
        let policy = Uniform.build(&['a', 'b', 'c', 'd']);
        assert_eq!(policy.len(), 4);
        assert!(policy.iter().all(|(_, w)| w == 0.25));
    }

    #[test]
    fn nullity() {
        let policy = Zero.build(&['a', 'b']);
        assert_eq!(policy.sum(), 0.);
        assert_eq!(policy.len(), 2);
    }
}
