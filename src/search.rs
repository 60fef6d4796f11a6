//! Depth-limited adversarial game-tree search
//!
//! One recursive turn-rotation traversal serves all three strategies:
//! minimax, minimax with alpha-beta pruning, and expectimax. The strategies
//! differ only in how a step aggregates child values (max / max with
//! pruning at the maximizer; min / min with pruning / uniform average at an
//! adversary), so the aggregation is selected by a [`SearchStrategy`] value
//! inside a single scaffold rather than duplicated per strategy. This keeps
//! the cutoff and turn-rotation rules identical by construction.
//!
//! The traversal is synchronous, single-threaded, and side-effect-free on
//! its inputs: states are queried, never mutated, and alpha/beta bounds are
//! plain `Copy` values threaded down each call, so sibling subtrees can
//! never observe each other's bounds. Recursion depth is bounded by
//! `max_depth * num_agents`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    evaluation::EvaluationKind,
    game::{Action, AgentIndex, GameState, PACMAN},
};

/// Which aggregation rule the traversal applies at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Adversaries minimize; full enumeration.
    Minimax,
    /// Adversaries minimize; provably value-equivalent to minimax but prunes
    /// subtrees that cannot influence the root choice.
    AlphaBeta,
    /// Adversaries move uniformly at random; their nodes average children.
    Expectimax,
}

impl SearchStrategy {
    /// All strategies, in the order the CLI reports them.
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Minimax,
        SearchStrategy::AlphaBeta,
        SearchStrategy::Expectimax,
    ];
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStrategy::Minimax => "minimax",
            SearchStrategy::AlphaBeta => "alphabeta",
            SearchStrategy::Expectimax => "expectimax",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SearchStrategy {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        match input {
            "minimax" => Ok(SearchStrategy::Minimax),
            "alphabeta" | "alpha-beta" => Ok(SearchStrategy::AlphaBeta),
            "expectimax" => Ok(SearchStrategy::Expectimax),
            _ => Err(crate::Error::ParseStrategy {
                input: input.to_string(),
                expected: "minimax, alphabeta, expectimax".to_string(),
            }),
        }
    }
}

/// Value and chosen action returned by every recursive call.
///
/// `action` is `None` at cutoff, terminal, and empty-legal-action leaves and
/// at expectimax chance nodes; otherwise it is the best action found at that
/// node under the strategy's aggregation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub value: f64,
    pub action: Option<Action>,
}

impl SearchResult {
    /// A leaf result: an evaluation with no action attached.
    fn evaluated(value: f64) -> Self {
        SearchResult {
            value,
            action: None,
        }
    }
}

/// Alpha-beta window carried down the traversal.
///
/// `alpha` is the best value the maximizer can already guarantee on the
/// current path, `beta` the best the minimizer can. Passed by value: each
/// call tightens its own copy only.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub alpha: f64,
    pub beta: f64,
}

impl Bounds {
    /// The unbounded window used at the root.
    pub const FULL: Bounds = Bounds {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };
}

/// Compute the turn following `agent` at `depth`.
///
/// Depth counts full rounds: it increments exactly when the agent index
/// wraps from the last adversary back to the maximizer. All strategies share
/// this rule, so their depth-limit behavior matches.
pub(crate) fn next_turn(agent: AgentIndex, depth: usize, num_agents: usize) -> (AgentIndex, usize) {
    if agent + 1 == num_agents {
        (PACMAN, depth + 1)
    } else {
        (agent + 1, depth)
    }
}

/// Depth-limited game-tree search over any [`GameState`] implementation.
///
/// Construction fixes the strategy, the cutoff evaluator, and the depth
/// limit in full rounds (one maximizer move plus every adversary's reply).
#[derive(Debug, Clone, Copy)]
pub struct GameTreeSearch {
    strategy: SearchStrategy,
    evaluator: EvaluationKind,
    max_depth: usize,
}

impl GameTreeSearch {
    pub fn new(strategy: SearchStrategy, evaluator: EvaluationKind, max_depth: usize) -> Self {
        GameTreeSearch {
            strategy,
            evaluator,
            max_depth,
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn evaluator(&self) -> EvaluationKind {
        self.evaluator
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run the search from `state` with the maximizer to move and return the
    /// chosen action, or `None` when the root is already a leaf (terminal,
    /// zero depth limit, or no legal actions).
    ///
    /// # Errors
    /// Propagates successor-generation failures from the host game.
    pub fn choose_action<S: GameState>(&self, state: &S) -> crate::Result<Option<Action>> {
        Ok(self.search_root(state)?.action)
    }

    /// Run the search from `state` and return the full root result.
    pub fn search_root<S: GameState>(&self, state: &S) -> crate::Result<SearchResult> {
        self.node_value(state, PACMAN, 0, Bounds::FULL)
    }

    /// Turn-rotation scaffold: cut off or dispatch on the agent class.
    ///
    /// Cutoff (terminal state or the depth limit) is decided on entry,
    /// before any successor is generated, so a terminal root short-circuits
    /// even at depth 0.
    fn node_value<S: GameState>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        bounds: Bounds,
    ) -> crate::Result<SearchResult> {
        let num_agents = state.num_agents();
        assert!(num_agents >= 1, "game must have at least one agent");
        assert!(
            agent < num_agents,
            "agent index {agent} out of range for {num_agents} agents"
        );

        if state.is_win() || state.is_lose() || depth == self.max_depth {
            return Ok(SearchResult::evaluated(self.evaluator.evaluate(state)));
        }

        if agent == PACMAN {
            self.max_step(state, agent, depth, bounds)
        } else {
            self.adversary_step(state, agent, depth, bounds)
        }
    }

    /// Maximizer step: strict-improvement max over children, first-seen
    /// tie-break in legal-action order, pruning under alpha-beta.
    fn max_step<S: GameState>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        mut bounds: Bounds,
    ) -> crate::Result<SearchResult> {
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Ok(SearchResult::evaluated(self.evaluator.evaluate(state)));
        }

        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());
        let mut best = SearchResult {
            value: f64::NEG_INFINITY,
            action: None,
        };

        for action in actions {
            let child = state.successor(agent, action)?;
            let value = self.node_value(&child, next_agent, next_depth, bounds)?.value;
            if value > best.value {
                best = SearchResult {
                    value,
                    action: Some(action),
                };
            }
            if self.strategy == SearchStrategy::AlphaBeta {
                if best.value > bounds.beta {
                    return Ok(best);
                }
                bounds.alpha = bounds.alpha.max(best.value);
            }
        }

        Ok(best)
    }

    /// Adversary step: the one place the strategies differ.
    fn adversary_step<S: GameState>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        bounds: Bounds,
    ) -> crate::Result<SearchResult> {
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Ok(SearchResult::evaluated(self.evaluator.evaluate(state)));
        }

        match self.strategy {
            SearchStrategy::Minimax | SearchStrategy::AlphaBeta => {
                self.min_step(state, agent, depth, bounds, actions)
            }
            SearchStrategy::Expectimax => self.expectation_step(state, agent, depth, actions),
        }
    }

    /// Minimizing adversary: strict-improvement min, first-seen tie-break,
    /// pruning under alpha-beta.
    fn min_step<S: GameState>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        mut bounds: Bounds,
        actions: Vec<Action>,
    ) -> crate::Result<SearchResult> {
        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());
        let mut best = SearchResult {
            value: f64::INFINITY,
            action: None,
        };

        for action in actions {
            let child = state.successor(agent, action)?;
            let value = self.node_value(&child, next_agent, next_depth, bounds)?.value;
            if value < best.value {
                best = SearchResult {
                    value,
                    action: Some(action),
                };
            }
            if self.strategy == SearchStrategy::AlphaBeta {
                if best.value < bounds.alpha {
                    return Ok(best);
                }
                bounds.beta = bounds.beta.min(best.value);
            }
        }

        Ok(best)
    }

    /// Stochastic adversary: uniform average over children, each legal
    /// action weighted 1/n. Chance nodes carry no best action.
    fn expectation_step<S: GameState>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        actions: Vec<Action>,
    ) -> crate::Result<SearchResult> {
        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());
        let mut total = 0.0;
        let count = actions.len();

        for action in actions {
            let child = state.successor(agent, action)?;
            total += self
                .node_value(&child, next_agent, next_depth, Bounds::FULL)?
                .value;
        }

        Ok(SearchResult::evaluated(total / count as f64))
    }
}
