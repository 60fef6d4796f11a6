//! Agent wrappers around the search engine and evaluation functions
//!
//! A [`SearchAgent`] fixes one search strategy, one evaluation function, and
//! a depth limit at construction time and then answers "choose an action for
//! this state" for the driver loop. A [`ReflexAgent`] skips tree search and
//! scores each immediate successor with the reflex evaluation instead.
//!
//! Configuration is validated when the agent is built, never during search:
//! unknown strategy or evaluator names and a zero depth limit are rejected
//! up front.

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{
    evaluation::{EvaluationKind, reflex_evaluation},
    game::{Action, GameState, PACMAN},
    search::{GameTreeSearch, SearchStrategy},
};

/// Depth limit used when the caller does not specify one.
pub const DEFAULT_SEARCH_DEPTH: usize = 2;

/// An agent that chooses one action per driver-loop turn.
pub trait Agent<S: GameState> {
    /// Choose an action for the maximizer in `state`.
    ///
    /// # Errors
    /// Fails when the maximizer has no legal actions, and propagates
    /// successor-generation failures from the host game.
    fn choose_action(&mut self, state: &S) -> crate::Result<Action>;

    /// Human-readable agent name.
    fn name(&self) -> &str;
}

/// Configuration for creating a [`SearchAgent`].
///
/// # Examples
///
/// ```
/// use pacsearch::agents::AgentConfig;
/// use pacsearch::evaluation::EvaluationKind;
/// use pacsearch::search::SearchStrategy;
///
/// let agent = AgentConfig::new(SearchStrategy::AlphaBeta)
///     .with_evaluator(EvaluationKind::Composite)
///     .with_max_depth(3)
///     .build()
///     .unwrap();
/// assert_eq!(agent.search().max_depth(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Search strategy for the game tree
    pub strategy: SearchStrategy,
    /// Evaluation function applied at depth cutoffs and leaves
    pub evaluator: EvaluationKind,
    /// Depth limit in full rounds, at least 1
    pub max_depth: usize,
}

impl AgentConfig {
    /// Create a configuration with the given strategy and defaults for the
    /// rest: the score evaluator and [`DEFAULT_SEARCH_DEPTH`].
    pub fn new(strategy: SearchStrategy) -> Self {
        AgentConfig {
            strategy,
            evaluator: EvaluationKind::Score,
            max_depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    /// Set the cutoff evaluation function.
    pub fn with_evaluator(mut self, evaluator: EvaluationKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Set the depth limit in full rounds.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the agent, validating the configuration.
    ///
    /// # Errors
    /// Fails when `max_depth` is 0.
    pub fn build(self) -> crate::Result<SearchAgent> {
        SearchAgent::new(self.strategy, self.evaluator, self.max_depth)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(SearchStrategy::Minimax)
    }
}

/// Adversarial search agent: one strategy, one evaluator, one depth limit.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    name: String,
    search: GameTreeSearch,
}

impl SearchAgent {
    /// Create an agent from typed configuration values.
    ///
    /// # Errors
    /// Fails when `max_depth` is 0; the engine itself accepts a zero limit
    /// (it evaluates the root in place), but an agent configured that way
    /// could never return an action.
    pub fn new(
        strategy: SearchStrategy,
        evaluator: EvaluationKind,
        max_depth: usize,
    ) -> crate::Result<Self> {
        if max_depth == 0 {
            return Err(crate::Error::ZeroSearchDepth { depth: max_depth });
        }
        Ok(SearchAgent {
            name: format!("{strategy}(depth={max_depth}, eval={evaluator})"),
            search: GameTreeSearch::new(strategy, evaluator, max_depth),
        })
    }

    /// Create an agent from configuration names, as supplied on a command
    /// line. Unknown names fail here, before any search runs.
    ///
    /// # Errors
    /// Fails on unknown strategy or evaluator names, or a zero depth.
    pub fn from_names(strategy: &str, evaluator: &str, max_depth: usize) -> crate::Result<Self> {
        Self::new(strategy.parse()?, evaluator.parse()?, max_depth)
    }

    /// The underlying configured search.
    pub fn search(&self) -> &GameTreeSearch {
        &self.search
    }
}

impl<S: GameState> Agent<S> for SearchAgent {
    fn choose_action(&mut self, state: &S) -> crate::Result<Action> {
        self.search
            .search_root(state)?
            .action
            .ok_or(crate::Error::NoLegalActions { agent: PACMAN })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reflex agent: scores each legal action with the reflex evaluation of its
/// successor and picks uniformly at random among the best-scoring actions.
///
/// Seed the agent for deterministic behavior in tests and experiments.
#[derive(Debug)]
pub struct ReflexAgent {
    name: String,
    rng: StdRng,
}

impl ReflexAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        ReflexAgent {
            name: "Reflex".to_string(),
            rng,
        }
    }
}

impl Default for ReflexAgent {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S: GameState> Agent<S> for ReflexAgent {
    fn choose_action(&mut self, state: &S) -> crate::Result<Action> {
        let actions = state.legal_actions(PACMAN);
        if actions.is_empty() {
            return Err(crate::Error::NoLegalActions { agent: PACMAN });
        }

        let mut scores = Vec::with_capacity(actions.len());
        for &action in &actions {
            scores.push(reflex_evaluation(state, action)?);
        }
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let candidates: Vec<Action> = actions
            .iter()
            .zip(&scores)
            .filter(|&(_, &score)| score == best)
            .map(|(&action, _)| action)
            .collect();

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoLegalActions { agent: PACMAN })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
