use super::error::CfrError;
use super::solver::Profile;
use super::walker::InfoMap;
use super::walker::ObsBuffer;
use super::walker::Visitor;
use super::walker::observe;
use super::walker::root_buffer;
use super::walker::root_infostates;
use super::walker::walk;
use crate::Probability;
use crate::Utility;
use crate::game::game::Game;
use crate::game::infostate::InfoState;
use crate::game::turn::Turn;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// a pure best response against a fixed profile: the responder's
/// deterministic tabular policy and its expected value at the root
pub struct BestResponse<G: Game> {
    player: Turn,
    value: Utility,
    policy: HashMap<InfoState<G::Observation>, G::Action>,
}

impl<G: Game> BestResponse<G> {
    pub fn player(&self) -> Turn {
        self.player
    }
    /// the responder's expected root value against the profile
    pub fn value(&self) -> Utility {
        self.value
    }
    pub fn policy(&self) -> &HashMap<InfoState<G::Observation>, G::Action> {
        &self.policy
    }
    pub fn action(&self, info: &InfoState<G::Observation>) -> Option<&G::Action> {
        self.policy.get(info)
    }
    /// the best response as a one-hot tabular policy, ready to be
    /// plugged back into a profile
    pub fn tabular(&self) -> crate::policy::tabular::TabularPolicy<G::Observation, G::Action> {
        let mut table = crate::policy::tabular::TabularPolicy::new();
        for (info, action) in self.policy.iter() {
            table.assign(
                info.clone(),
                crate::policy::action::ActionPolicy::with(std::slice::from_ref(action), 1.),
            );
        }
        table
    }
}

/// what one vertex of the response forest remembers: the responder's
/// payoff when terminal, the responder's infostate when the responder
/// is to move, and the reach contributed by everyone else (profile
/// and chance alike)
struct Site<G: Game> {
    terminal: Utility,
    info: Option<InfoState<G::Observation>>,
    reach: Probability,
}

/// one outgoing edge: the action taken and its likelihood under the
/// profile (one for the responder's own actions)
struct Branch<A> {
    action: A,
    probability: Probability,
}

/// materializes the full tree once, with reach and infostate baked
/// into each vertex, so that the per-infoset argmax can see every
/// member history at once
struct Builder<'a, G: Game> {
    player: Turn,
    profile: &'a Profile<G>,
    graph: DiGraph<Site<G>, Branch<G::Action>>,
}

struct Frame<G: Game> {
    index: NodeIndex,
    buffer: ObsBuffer<G::Observation>,
    infos: InfoMap<G::Observation>,
    reach: Probability,
}

impl<G: Game> Builder<'_, G> {
    fn site(&self, state: &G, infos: &InfoMap<G::Observation>, reach: Probability) -> Site<G> {
        let terminal = state.is_terminal();
        let responder = !terminal && state.turn() == self.player;
        Site {
            terminal: if terminal { state.payoff(self.player) } else { 0. },
            info: responder
                .then(|| infos.get(&self.player).expect("responder infostate").clone()),
            reach,
        }
    }
    /// the profile's likelihood of the edge: chance outcomes by their
    /// distribution, opponents by their normalized average row, the
    /// responder by convention one. rows the profile never visited
    /// fall back to uniform; they only ever scale zero reach.
    fn likelihood(&self, from: &G, action: &G::Action, infos: &InfoMap<G::Observation>) -> Probability {
        let turn = from.turn();
        if turn == self.player {
            1.
        } else if turn == Turn::Chance {
            from.chances()
                .into_iter()
                .find(|(a, _)| a == action)
                .map(|(_, p)| p)
                .expect("sampled outcome in distribution")
        } else {
            let info = infos.get(&turn).expect("opponent infostate");
            self.profile
                .get(&turn)
                .and_then(|table| table.normalized(info).ok())
                .map(|row| row.get(action))
                .unwrap_or(1. / from.actions().len() as Probability)
        }
    }
}

impl<G: Game> Visitor<G> for Builder<'_, G> {
    type Data = Frame<G>;
    fn root(&mut self, state: &G) -> Frame<G> {
        let infos = root_infostates(state);
        let site = self.site(state, &infos, 1.);
        Frame {
            index: self.graph.add_node(site),
            buffer: root_buffer(state),
            infos,
            reach: 1.,
        }
    }
    fn child(&mut self, data: &Frame<G>, from: &G, action: &G::Action, into: &G) -> Frame<G> {
        let probability = self.likelihood(from, action, &data.infos);
        let reach = data.reach
            * match from.turn() == self.player {
                true => 1.,
                false => probability,
            };
        let (buffer, infos) = observe(from, action, into, &data.buffer, &data.infos);
        let site = self.site(into, &infos, reach);
        let index = self.graph.add_node(site);
        self.graph.add_edge(
            data.index,
            index,
            Branch {
                action: action.clone(),
                probability,
            },
        );
        Frame {
            index,
            buffer,
            infos,
            reach,
        }
    }
}

/// best response for `player` against a profile of cumulative average
/// policies. the materialized tree is partitioned into a flat map
/// from responder infostate to member histories, wherever in the tree
/// they sit, and values resolve by demand-driven backward induction:
/// each infoset decides once, with a single argmax over its
/// reach-weighted member values, and every later lookup reuses that
/// decision.
pub fn best_response<G: Game>(
    root: &G,
    profile: &Profile<G>,
    player: Turn,
) -> Result<BestResponse<G>, CfrError> {
    if !player.actual() {
        return Err(CfrError::UnknownPlayer(player));
    }
    if !root.serialized() {
        return Err(CfrError::EnvironmentNotSerialized);
    }
    super::solver::enumerable(root)?;
    let mut builder = Builder {
        player,
        profile,
        graph: DiGraph::new(),
    };
    walk(root, &mut builder);
    let graph = builder.graph;

    let mut groups: HashMap<InfoState<G::Observation>, Vec<NodeIndex>> = HashMap::new();
    for index in graph.node_indices() {
        if let Some(info) = graph[index].info.as_ref() {
            groups.entry(info.clone()).or_default().push(index);
        }
    }

    let mut values: Vec<Option<Utility>> = vec![None; graph.node_count()];
    let mut policy: HashMap<InfoState<G::Observation>, G::Action> = HashMap::new();
    let value = resolve(&graph, &groups, &mut values, &mut policy, NodeIndex::new(0));
    // the root pass only decides infosets reachable under the response
    // itself; the rest of the responder's infosets still owe an answer
    for (info, members) in groups.iter() {
        if !policy.contains_key(info) {
            resolve(&graph, &groups, &mut values, &mut policy, members[0]);
        }
    }

    Ok(BestResponse {
        player,
        value,
        policy,
    })
}

/// memoized backward induction over the forest. terminal nodes carry
/// their payoff, chance and opponent nodes are expectations over their
/// profile-weighted edges, and responder nodes follow their infoset's
/// decision, computing it on first demand.
fn resolve<G: Game>(
    graph: &DiGraph<Site<G>, Branch<G::Action>>,
    groups: &HashMap<InfoState<G::Observation>, Vec<NodeIndex>>,
    values: &mut Vec<Option<Utility>>,
    policy: &mut HashMap<InfoState<G::Observation>, G::Action>,
    index: NodeIndex,
) -> Utility {
    if let Some(value) = values[index.index()] {
        return value;
    }
    let value = match graph[index].info.as_ref() {
        Some(info) => {
            let action = match policy.get(info) {
                Some(action) => action.clone(),
                None => {
                    // one argmax per infoset, over the action values
                    // summed across every member history, each
                    // weighted by its external reach
                    let members = groups.get(info).expect("grouped responder infostate");
                    let actions = actions_at(graph, members[0]);
                    let best = actions
                        .iter()
                        .enumerate()
                        .map(|(at, action)| {
                            let score = members
                                .iter()
                                .map(|&member| {
                                    graph[member].reach
                                        * resolve(
                                            graph,
                                            groups,
                                            values,
                                            policy,
                                            follow(graph, member, action),
                                        )
                                })
                                .sum::<Utility>();
                            (at, score)
                        })
                        .max_by(|(_, a), (_, b)| a.partial_cmp(b).expect("comparable scores"))
                        .map(|(at, _)| at)
                        .expect("non-empty action set");
                    let action = actions[best].clone();
                    policy.insert(info.clone(), action.clone());
                    action
                }
            };
            resolve(graph, groups, values, policy, follow(graph, index, &action))
        }
        None if graph.edges(index).next().is_none() => graph[index].terminal,
        None => graph
            .edges(index)
            .map(|edge| {
                edge.weight().probability
                    * resolve(graph, groups, values, policy, edge.target())
            })
            .sum(),
    };
    values[index.index()] = Some(value);
    value
}

fn actions_at<G: Game>(
    graph: &DiGraph<Site<G>, Branch<G::Action>>,
    index: NodeIndex,
) -> Vec<G::Action> {
    let mut actions = graph
        .edges(index)
        .map(|edge| edge.weight().action.clone())
        .collect::<Vec<_>>();
    // petgraph iterates outgoing edges newest-first
    actions.reverse();
    actions
}

fn follow<G: Game>(
    graph: &DiGraph<Site<G>, Branch<G::Action>>,
    index: NodeIndex,
    action: &G::Action,
) -> NodeIndex {
    graph
        .edges(index)
        .find(|edge| &edge.weight().action == action)
        .map(|edge| edge.target())
        .expect("edge per legal action")
}

/// total profit available to deviators: the sum over players of their
/// best-response value against everyone else's average policy. zero
/// exactly at a Nash equilibrium of a two-player zero-sum game,
/// non-negative everywhere.
pub fn exploitability<G: Game>(root: &G, profile: &Profile<G>) -> Result<Utility, CfrError> {
    root.actuals()
        .into_iter()
        .map(|player| best_response(root, profile, player).map(|br| br.value()))
        .sum()
}
