use crate::Probability;
use crate::game::game::Game;
use crate::game::infostate::InfoState;
use crate::game::turn::Turn;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// per-player pending (public, private) observation pairs that have
/// accumulated since the player was last to act
pub type ObsBuffer<O> = BTreeMap<Turn, Vec<(O, O)>>;
/// each player's running infostate along one trajectory
pub type InfoMap<O> = BTreeMap<Turn, InfoState<O>>;
/// each participant's compounded reach probability, chance included
pub type ReachMap = BTreeMap<Turn, Probability>;

/// hooks for the generic depth-first walk. the walker knows nothing of
/// regrets, policies or players; it clones world states to branch and
/// threads an opaque per-frame payload down the recursion. `root`
/// fires once before any descent, `enter`/`leave` bracket a node's
/// subtree, and `child` fires on every edge descent to produce the
/// next frame's payload.
pub trait Visitor<G: Game> {
    type Data;
    fn root(&mut self, state: &G) -> Self::Data;
    fn child(&mut self, data: &Self::Data, from: &G, action: &G::Action, into: &G) -> Self::Data;
    fn enter(&mut self, _state: &G, _data: &mut Self::Data) {}
    fn leave(&mut self, _state: &G, _data: &mut Self::Data) {}
}

/// depth-first traversal of the full tree under `root`, visiting
/// siblings in the environment's enumeration order
pub fn walk<G: Game, V: Visitor<G>>(root: &G, visitor: &mut V) {
    let data = visitor.root(root);
    descend(root, data, visitor);
}

fn descend<G: Game, V: Visitor<G>>(state: &G, mut data: V::Data, visitor: &mut V) {
    visitor.enter(state, &mut data);
    if !state.is_terminal() {
        let branches = match state.turn() {
            Turn::Chance => state.chances().into_iter().map(|(a, _)| a).collect(),
            _ => state.actions(),
        };
        for action in branches {
            let next = state.child(&action);
            let child = visitor.child(&data, state, &action, &next);
            descend(&next, child, visitor);
        }
    }
    visitor.leave(state, &mut data);
}

/// root-frame constructors

pub fn root_infostates<G: Game>(root: &G) -> InfoMap<G::Observation> {
    root.actuals()
        .into_iter()
        .map(|p| (p, InfoState::new(p)))
        .collect()
}

pub fn root_buffer<G: Game>(root: &G) -> ObsBuffer<G::Observation> {
    root.actuals().into_iter().map(|p| (p, Vec::new())).collect()
}

pub fn root_reach<G: Game>(root: &G) -> ReachMap {
    root.players().into_iter().map(|p| (p, 1.)).collect()
}

/// the observation bookkeeping between successive turns of the same
/// player. on the transition `from --action--> into`, the player who
/// is active at `into` drains everything buffered since their last
/// turn into their infostate and then appends this transition's pair;
/// everyone else's pair is buffered for later.
pub fn observe_inplace<G: Game>(
    from: &G,
    action: &G::Action,
    into: &G,
    buffer: &mut ObsBuffer<G::Observation>,
    infos: &mut InfoMap<G::Observation>,
) {
    let active = into.turn();
    let public = from.public_observation(action, into);
    for player in from.actuals() {
        let private = from.private_observation(player, action, into);
        if player == active {
            let info = infos.get_mut(&player).expect("infostate per actual player");
            let pending = buffer.get_mut(&player).expect("buffer per actual player");
            for (public, private) in pending.drain(..) {
                info.push(public, private);
            }
            info.push(public.clone(), private);
        } else {
            buffer
                .get_mut(&player)
                .expect("buffer per actual player")
                .push((public.clone(), private));
        }
    }
}

/// pure variant of [`observe_inplace`], returning fresh buffers and
/// infostates for the child frame
pub fn observe<G: Game>(
    from: &G,
    action: &G::Action,
    into: &G,
    buffer: &ObsBuffer<G::Observation>,
    infos: &InfoMap<G::Observation>,
) -> (ObsBuffer<G::Observation>, InfoMap<G::Observation>) {
    let mut buffer = buffer.clone();
    let mut infos = infos.clone();
    observe_inplace(from, action, into, &mut buffer, &mut infos);
    (buffer, infos)
}

/// enumerate every infostate at which some player has to act, grouped
/// by player. a diagnostic over the walker that doubles as its test
/// harness
pub fn infostates<G: Game>(root: &G) -> BTreeMap<Turn, HashSet<InfoState<G::Observation>>> {
    struct Enumerator<G: Game> {
        found: BTreeMap<Turn, HashSet<InfoState<G::Observation>>>,
    }
    impl<G: Game> Visitor<G> for Enumerator<G> {
        type Data = (ObsBuffer<G::Observation>, InfoMap<G::Observation>);
        fn root(&mut self, state: &G) -> Self::Data {
            (root_buffer(state), root_infostates(state))
        }
        fn child(
            &mut self,
            data: &Self::Data,
            from: &G,
            action: &G::Action,
            into: &G,
        ) -> Self::Data {
            let (mut buffer, mut infos) = data.clone();
            observe_inplace(from, action, into, &mut buffer, &mut infos);
            let active = into.turn();
            if active.actual() && !into.is_terminal() {
                self.found
                    .entry(active)
                    .or_default()
                    .insert(infos.get(&active).expect("active infostate").clone());
            }
            (buffer, infos)
        }
    }
    let mut enumerator = Enumerator::<G> {
        found: BTreeMap::new(),
    };
    if root.turn().actual() && !root.is_terminal() {
        enumerator
            .found
            .entry(root.turn())
            .or_default()
            .insert(InfoState::new(root.turn()));
    }
    walk(root, &mut enumerator);
    enumerator.found
}
