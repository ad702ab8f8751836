use std::rc::Rc;

/// a container for game values with two storage modes. `Value` owns the
/// wrapped value inline; `Shared` shares ownership of one heap
/// allocation, so cloning a shared holder shares rather than copies.
///
/// equality and hashing always dereference to the wrapped value.
/// pointer identity is a separate, explicit question answered by
/// [`shares`](Holder::shares), never by `==`. a genuinely fresh copy of
/// the wrapped value comes from [`deep`](Holder::deep).
#[derive(Debug, Clone)]
pub enum Holder<T> {
    Value(T),
    Shared(Rc<T>),
}

impl<T> Holder<T> {
    pub fn value(inner: T) -> Self {
        Self::Value(inner)
    }
    pub fn shared(inner: T) -> Self {
        Self::Shared(Rc::new(inner))
    }
    pub fn get(&self) -> &T {
        match self {
            Self::Value(inner) => inner,
            Self::Shared(inner) => inner,
        }
    }
    /// whether two shared holders point at the same allocation. value
    /// holders never share
    pub fn shares(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Shared(lhs), Self::Shared(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<T: Clone> Holder<T> {
    /// a holder over a fresh clone of the wrapped value, in the same
    /// storage mode
    pub fn deep(&self) -> Self {
        match self {
            Self::Value(inner) => Self::Value(inner.clone()),
            Self::Shared(inner) => Self::Shared(Rc::new(T::clone(inner))),
        }
    }
}

impl<T> std::ops::Deref for Holder<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: PartialEq> PartialEq for Holder<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
impl<T: Eq> Eq for Holder<T> {}

impl<T: std::hash::Hash> std::hash::Hash for Holder<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.get().hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_equality() {
        assert_eq!(Holder::value(7), Holder::shared(7));
        assert_ne!(Holder::value(7), Holder::value(8));
    }

    #[test]
    fn sharing() {
        let original = Holder::shared(String::from("kuhn"));
        let alias = original.clone();
        let copy = original.deep();
        assert!(original.shares(&alias));
        assert!(!original.shares(&copy));
        assert_eq!(original, copy);
    }

    #[test]
    fn values_never_share() {
        let lhs = Holder::value(1);
        let rhs = lhs.clone();
        assert!(!lhs.shares(&rhs));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn hashing() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Holder::value(3));
        assert!(set.contains(&Holder::shared(3)));
    }
}
