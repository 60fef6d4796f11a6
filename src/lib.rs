//! Adversarial game-tree search for Pacman-style multi-agent games
//!
//! This crate provides:
//! - A depth-limited game-tree search engine with three interchangeable
//!   strategies (minimax, alpha-beta pruning, expectimax) sharing one
//!   turn-rotation scaffold
//! - Score-only and composite heuristic evaluation functions
//! - Agent wrappers that fix a strategy, an evaluator, and a depth limit at
//!   construction time, plus a reflex agent
//! - Table-driven scenario games for exercising the engine from the CLI and
//!   the test suite
//!
//! The game engine itself is an external collaborator: the core only
//! consumes the [`game::GameState`] query interface.

pub mod agents;
pub mod cli;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod scenario;
pub mod search;
pub mod utils;

pub use agents::{Agent, AgentConfig, DEFAULT_SEARCH_DEPTH, ReflexAgent, SearchAgent};
pub use error::{Error, Result};
pub use evaluation::EvaluationKind;
pub use game::{Action, AgentIndex, GameState, GhostState, PACMAN, Position};
pub use scenario::{ScenarioGame, ScenarioSpec, ScenarioState};
pub use search::{Bounds, GameTreeSearch, SearchResult, SearchStrategy};
