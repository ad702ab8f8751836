//! small complete games exercising the [`Game`](crate::game::game::Game)
//! contract. they anchor the end-to-end convergence tests and double
//! as worked examples for implementing environments.

pub mod kuhn;
pub mod rps;
