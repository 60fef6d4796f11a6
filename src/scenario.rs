//! Table-driven scenario games
//!
//! A scenario is an explicit game tree: named nodes with a score, optional
//! win/lose flags, and (action, target) edges for whichever agent is to move
//! at that node. Scenarios load from JSON, implement [`GameState`], and
//! count successor generations, which makes pruning behavior and depth
//! accounting directly observable. They back the `pacsearch` CLI and the
//! integration tests.
//!
//! Scenario nodes are abstract: they carry no board geometry, so the
//! evaluation queries return an empty board and the composite evaluator
//! degenerates to the raw score. Use the `score` evaluator with scenarios.
//!
//! States share the underlying tree through `Rc`, so scenarios are
//! single-threaded like the search engine itself.

use std::{cell::Cell, collections::HashMap, fs, path::Path, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::game::{Action, AgentIndex, GameState, GhostState, Position};

/// Serializable description of a scenario game tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Total number of agents; agent 0 is the maximizer
    pub num_agents: usize,
    /// Id of the starting node
    pub root: String,
    /// All nodes of the tree
    pub nodes: Vec<NodeSpec>,
}

/// One node of a scenario tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    /// Raw score reported for this node
    #[serde(default)]
    pub score: f64,
    /// Terminal win for the maximizer
    #[serde(default)]
    pub win: bool,
    /// Terminal loss for the maximizer
    #[serde(default)]
    pub lose: bool,
    /// Legal moves for the agent to move at this node, in tie-break order
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
}

/// An (action, target node) edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSpec {
    pub action: Action,
    pub to: String,
}

impl ScenarioSpec {
    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    /// Fails on unreadable files or malformed JSON.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read scenario file '{}'", path.display()),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve node references and build a playable game.
    ///
    /// # Errors
    /// Fails fast on duplicate node ids, edges to undefined nodes, an
    /// undefined root, or a zero agent count.
    pub fn build(&self) -> crate::Result<ScenarioGame> {
        if self.num_agents == 0 {
            return Err(crate::Error::NoAgents {
                num_agents: self.num_agents,
            });
        }

        let mut index_by_id = HashMap::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                return Err(crate::Error::DuplicateScenarioNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for spec in &self.nodes {
            let mut moves = Vec::with_capacity(spec.moves.len());
            for edge in &spec.moves {
                let Some(&target) = index_by_id.get(&edge.to) else {
                    return Err(crate::Error::UnknownScenarioNode {
                        id: spec.id.clone(),
                        target: edge.to.clone(),
                    });
                };
                moves.push((edge.action, target));
            }
            nodes.push(ScenarioNode {
                id: spec.id.clone(),
                score: spec.score,
                win: spec.win,
                lose: spec.lose,
                moves,
            });
        }

        let Some(&root) = index_by_id.get(&self.root) else {
            return Err(crate::Error::UnknownScenarioRoot {
                root: self.root.clone(),
            });
        };

        Ok(ScenarioGame {
            data: Rc::new(ScenarioData {
                num_agents: self.num_agents,
                root,
                nodes,
                expansions: Cell::new(0),
            }),
        })
    }
}

#[derive(Debug)]
struct ScenarioNode {
    id: String,
    score: f64,
    win: bool,
    lose: bool,
    moves: Vec<(Action, usize)>,
}

#[derive(Debug)]
struct ScenarioData {
    num_agents: usize,
    root: usize,
    nodes: Vec<ScenarioNode>,
    expansions: Cell<usize>,
}

/// A built scenario: hands out states and tracks successor generations.
#[derive(Debug)]
pub struct ScenarioGame {
    data: Rc<ScenarioData>,
}

impl ScenarioGame {
    /// The starting state of the scenario.
    pub fn root_state(&self) -> ScenarioState {
        ScenarioState {
            data: Rc::clone(&self.data),
            node: self.data.root,
        }
    }

    /// Number of successor generations since construction or the last reset.
    pub fn expansions(&self) -> usize {
        self.data.expansions.get()
    }

    pub fn reset_expansions(&self) {
        self.data.expansions.set(0);
    }
}

/// A position within a scenario tree.
#[derive(Debug, Clone)]
pub struct ScenarioState {
    data: Rc<ScenarioData>,
    node: usize,
}

impl ScenarioState {
    fn node(&self) -> &ScenarioNode {
        &self.data.nodes[self.node]
    }

    /// Id of the underlying scenario node.
    pub fn id(&self) -> &str {
        &self.node().id
    }
}

impl GameState for ScenarioState {
    fn num_agents(&self) -> usize {
        self.data.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Action> {
        self.node().moves.iter().map(|&(action, _)| action).collect()
    }

    fn successor(&self, agent: AgentIndex, action: Action) -> crate::Result<Self> {
        let node = self.node();
        let Some(&(_, target)) = node.moves.iter().find(|&&(a, _)| a == action) else {
            return Err(crate::Error::IllegalAction {
                action,
                agent,
                context: node.id.clone(),
            });
        };
        self.data.expansions.set(self.data.expansions.get() + 1);
        Ok(ScenarioState {
            data: Rc::clone(&self.data),
            node: target,
        })
    }

    fn is_win(&self) -> bool {
        self.node().win
    }

    fn is_lose(&self) -> bool {
        self.node().lose
    }

    fn raw_score(&self) -> f64 {
        self.node().score
    }

    fn pacman_position(&self) -> Position {
        (0, 0)
    }

    fn food_positions(&self) -> Vec<Position> {
        Vec::new()
    }

    fn capsule_positions(&self) -> Vec<Position> {
        Vec::new()
    }

    fn ghost_states(&self) -> Vec<GhostState> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, score: f64) -> NodeSpec {
        NodeSpec {
            id: id.to_string(),
            score,
            win: false,
            lose: false,
            moves: Vec::new(),
        }
    }

    #[test]
    fn scenario_parses_from_json() {
        let raw = r#"{
            "name": "tiny",
            "num_agents": 2,
            "root": "start",
            "nodes": [
                {
                    "id": "start",
                    "moves": [
                        { "action": "north", "to": "up" },
                        { "action": "stop", "to": "start" }
                    ]
                },
                { "id": "up", "score": 3.5, "win": true }
            ]
        }"#;
        let spec: ScenarioSpec = serde_json::from_str(raw).unwrap();
        let game = spec.build().unwrap();
        let root = game.root_state();

        assert_eq!(root.id(), "start");
        assert_eq!(root.legal_actions(0), vec![Action::North, Action::Stop]);

        let up = root.successor(0, Action::North).unwrap();
        assert!(up.is_win());
        assert_eq!(up.raw_score(), 3.5);
        assert_eq!(game.expansions(), 1);
    }

    #[test]
    fn successor_rejects_illegal_action() {
        let spec = ScenarioSpec {
            name: None,
            num_agents: 1,
            root: "only".to_string(),
            nodes: vec![leaf("only", 0.0)],
        };
        let game = spec.build().unwrap();
        let result = game.root_state().successor(0, Action::East);
        assert!(matches!(result, Err(crate::Error::IllegalAction { .. })));
        assert_eq!(game.expansions(), 0, "failed expansion must not count");
    }

    #[test]
    fn build_rejects_duplicate_ids() {
        let spec = ScenarioSpec {
            name: None,
            num_agents: 1,
            root: "a".to_string(),
            nodes: vec![leaf("a", 0.0), leaf("a", 1.0)],
        };
        assert!(matches!(
            spec.build(),
            Err(crate::Error::DuplicateScenarioNode { .. })
        ));
    }

    #[test]
    fn build_rejects_unknown_edge_target() {
        let mut start = leaf("start", 0.0);
        start.moves.push(MoveSpec {
            action: Action::North,
            to: "missing".to_string(),
        });
        let spec = ScenarioSpec {
            name: None,
            num_agents: 1,
            root: "start".to_string(),
            nodes: vec![start],
        };
        assert!(matches!(
            spec.build(),
            Err(crate::Error::UnknownScenarioNode { .. })
        ));
    }

    #[test]
    fn build_rejects_unknown_root_and_zero_agents() {
        let spec = ScenarioSpec {
            name: None,
            num_agents: 1,
            root: "missing".to_string(),
            nodes: vec![leaf("a", 0.0)],
        };
        assert!(matches!(
            spec.build(),
            Err(crate::Error::UnknownScenarioRoot { .. })
        ));

        let spec = ScenarioSpec {
            name: None,
            num_agents: 0,
            root: "a".to_string(),
            nodes: vec![leaf("a", 0.0)],
        };
        assert!(matches!(spec.build(), Err(crate::Error::NoAgents { .. })));
    }

    #[test]
    fn reset_expansions_clears_the_counter() {
        let mut start = leaf("start", 0.0);
        start.moves.push(MoveSpec {
            action: Action::North,
            to: "end".to_string(),
        });
        let spec = ScenarioSpec {
            name: None,
            num_agents: 1,
            root: "start".to_string(),
            nodes: vec![start, leaf("end", 1.0)],
        };
        let game = spec.build().unwrap();
        game.root_state().successor(0, Action::North).unwrap();
        assert_eq!(game.expansions(), 1);
        game.reset_expansions();
        assert_eq!(game.expansions(), 0);
    }
}
