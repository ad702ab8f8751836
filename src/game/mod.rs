//! the game abstraction that solvers traverse. a [`Game`](game::Game)
//! value is a full world state whose methods double as the environment
//! contract: turn order, legal moves, chance distributions, transitions,
//! rewards, and the factored (public, private) observations that build
//! each player's [`InfoState`](infostate::InfoState).

pub mod game;
pub mod holder;
pub mod infostate;
pub mod turn;
