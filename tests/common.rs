//! Common scenario-building helpers for the pacsearch test suite.
//!
//! Scenarios double as instrumented mock games: they expose successor
//! generation counts, which the search tests use to observe pruning and
//! depth accounting.

// Not every test binary uses every helper.
#![allow(dead_code)]

use pacsearch::{
    Action, ScenarioSpec,
    scenario::{MoveSpec, NodeSpec},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A non-terminal node with no moves (a dead end treated as a leaf).
pub fn node(id: &str, score: f64) -> NodeSpec {
    NodeSpec {
        id: id.to_string(),
        score,
        win: false,
        lose: false,
        moves: Vec::new(),
    }
}

/// A terminal winning node.
pub fn win(id: &str, score: f64) -> NodeSpec {
    NodeSpec {
        win: true,
        ..node(id, score)
    }
}

/// Attach moves to a node, in the given tie-break order.
pub fn with_moves(mut spec: NodeSpec, moves: &[(Action, &str)]) -> NodeSpec {
    spec.moves = moves
        .iter()
        .map(|&(action, to)| MoveSpec {
            action,
            to: to.to_string(),
        })
        .collect();
    spec
}

/// Assemble a scenario spec.
pub fn spec(num_agents: usize, root: &str, nodes: Vec<NodeSpec>) -> ScenarioSpec {
    ScenarioSpec {
        name: None,
        num_agents,
        root: root.to_string(),
        nodes,
    }
}

/// Shape of the random trees produced by [`random_tree`].
#[derive(Clone, Copy)]
pub struct TreeShape {
    pub num_agents: usize,
    pub rounds: usize,
    pub max_branching: usize,
    /// Force every adversary node down to a single legal action
    pub single_reply_adversaries: bool,
}

/// Generate a complete random game tree with exactly `shape.rounds` full
/// rounds of play.
///
/// Interior nodes get 1 to `max_branching` children; only the nodes at the
/// final ply carry (integer-valued) scores, which is where a search with
/// `max_depth == rounds` cuts off. Deterministic for a given seed.
pub fn random_tree(seed: u64, shape: TreeShape) -> ScenarioSpec {
    assert!(shape.max_branching >= 1 && shape.max_branching <= Action::ALL.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = Vec::new();
    grow_tree(&mut rng, &mut nodes, "n", 0, shape);
    spec(shape.num_agents, "n", nodes)
}

fn grow_tree(rng: &mut StdRng, nodes: &mut Vec<NodeSpec>, id: &str, ply: usize, shape: TreeShape) {
    if ply == shape.rounds * shape.num_agents {
        nodes.push(node(id, rng.random_range(-1000..1000) as f64));
        return;
    }

    let adversary_to_move = ply % shape.num_agents != 0;
    let branching = if adversary_to_move && shape.single_reply_adversaries {
        1
    } else {
        rng.random_range(1..=shape.max_branching)
    };
    let mut moves = Vec::with_capacity(branching);
    let mut children = Vec::with_capacity(branching);
    for (index, &action) in Action::ALL.iter().take(branching).enumerate() {
        let child_id = format!("{id}.{index}");
        moves.push(MoveSpec {
            action,
            to: child_id.clone(),
        });
        children.push(child_id);
    }

    let mut parent = node(id, 0.0);
    parent.moves = moves;
    nodes.push(parent);

    for child_id in children {
        grow_tree(rng, nodes, &child_id, ply + 1, shape);
    }
}
