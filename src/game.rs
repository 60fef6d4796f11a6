//! The state query interface the search engine runs against
//!
//! The engine never owns a game: it consumes an opaque, immutable state
//! through the [`GameState`] trait and asks it for legal actions, successor
//! states, terminal status, and the handful of board queries the evaluation
//! functions need. Any conforming implementation works, including the
//! table-driven scenarios in [`crate::scenario`] and test doubles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an agent within a game. Agent 0 is always the maximizer
/// ("Pacman"); agents 1..N-1 are the adversaries ("ghosts"), searched in
/// increasing index order within one round.
pub type AgentIndex = usize;

/// The maximizing agent's index.
pub const PACMAN: AgentIndex = 0;

/// A board coordinate as (x, y).
pub type Position = (i32, i32);

/// The fixed action vocabulary shared by all agents.
///
/// `Stop` is a legal no-op move; the reflex evaluation penalizes it but the
/// tree searches treat it like any other action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    /// All actions in their conventional enumeration order.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stop,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::North => "North",
            Action::South => "South",
            Action::East => "East",
            Action::West => "West",
            Action::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}

/// Snapshot of a single adversary as seen by the evaluation functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostState {
    /// Current board position
    pub position: Position,
    /// Remaining moves for which the ghost is scared; 0 means not scared
    pub scared_timer: u32,
}

impl GhostState {
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Query interface the search engine and evaluation functions depend on.
///
/// Implementations are immutable snapshots: [`GameState::successor`] returns
/// a fresh state and never mutates the receiver. An empty result from
/// [`GameState::legal_actions`] is valid and marks the node as a leaf.
///
/// The engine only requests successors for actions it obtained from
/// `legal_actions`, so `successor` failing on a legal action indicates a
/// defect in the host game, not in the caller.
pub trait GameState: Sized {
    /// Total number of agents, at least 1.
    fn num_agents(&self) -> usize;

    /// Legal actions for the given agent, in the host game's fixed order.
    /// The engine's tie-breaking follows this order.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Action>;

    /// The state reached when `agent` takes `action`.
    ///
    /// # Errors
    /// Fails if `action` is not legal for `agent` in this state.
    fn successor(&self, agent: AgentIndex, action: Action) -> crate::Result<Self>;

    /// Whether this state is a terminal win for the maximizer.
    fn is_win(&self) -> bool;

    /// Whether this state is a terminal loss for the maximizer.
    fn is_lose(&self) -> bool;

    /// The game's built-in score for this state.
    fn raw_score(&self) -> f64;

    /// The maximizer's position. Consumed only by evaluation functions.
    fn pacman_position(&self) -> Position;

    /// Positions of the remaining food pellets.
    fn food_positions(&self) -> Vec<Position>;

    /// Positions of the remaining capsules (power pellets).
    fn capsule_positions(&self) -> Vec<Position>;

    /// One entry per adversary, in agent-index order.
    fn ghost_states(&self) -> Vec<GhostState>;
}
