//! Evaluation functions for non-terminal states
//!
//! The tree searches call an evaluation function whenever they cut off at
//! the depth limit or hit a leaf; the reflex agent uses one directly as its
//! decision criterion. Two functions are provided: the raw game score, and a
//! composite heuristic combining food, ghost, and capsule features.
//!
//! The composite terms and their signs are fixed; the coefficients below are
//! tuning choices and deliberately public so callers (and tests) can
//! recompute the formula instead of asserting magic numbers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    game::{Action, GameState, PACMAN},
    utils::manhattan_distance,
};

/// Reward per unit of inverse distance to the nearest food pellet.
pub const FOOD_PROXIMITY_WEIGHT: f64 = 10.0;

/// Penalty per remaining food pellet. Dominates the proximity reward so the
/// agent prefers eating food over hovering next to it.
pub const FOOD_COUNT_PENALTY: f64 = 100.0;

/// Reward per unit of inverse (distance + 1) to a scared ghost.
pub const SCARED_GHOST_BONUS: f64 = 200.0;

/// Penalty per unit of inverse distance to a ghost that is not scared.
pub const GHOST_PROXIMITY_PENALTY: f64 = 10.0;

/// Penalty per unit of inverse (distance + 1) to the nearest capsule.
pub const CAPSULE_PROXIMITY_WEIGHT: f64 = 2.0;

/// Penalty per remaining capsule. Steep enough that collecting a capsule
/// always beats lingering near one.
pub const CAPSULE_COUNT_PENALTY: f64 = 20.0;

/// Fixed penalty the reflex evaluation applies to the `Stop` action.
pub const STOP_PENALTY: f64 = 500.0;

/// Baseline evaluation: the state's raw built-in score.
///
/// This is the default cutoff evaluator for the tree-search strategies.
pub fn score_evaluation<S: GameState>(state: &S) -> f64 {
    state.raw_score()
}

/// Composite heuristic evaluation.
///
/// Combines, with the documented coefficients:
/// - the raw score;
/// - `+ FOOD_PROXIMITY_WEIGHT / d` for the nearest food at distance `d > 0`;
/// - `- FOOD_COUNT_PENALTY * remaining_food`;
/// - per ghost, `+ SCARED_GHOST_BONUS / (d + 1)` while its scared timer is
///   positive, otherwise `- GHOST_PROXIMITY_PENALTY / d` when `d > 0`;
/// - `- CAPSULE_PROXIMITY_WEIGHT / (d + 1)` for the nearest capsule;
/// - `- CAPSULE_COUNT_PENALTY * remaining_capsules`.
///
/// All distances are Manhattan distances from the maximizer's position.
pub fn composite_evaluation<S: GameState>(state: &S) -> f64 {
    let pacman = state.pacman_position();
    let mut score = state.raw_score();

    let food = state.food_positions();
    if let Some(nearest) = food
        .iter()
        .map(|&pellet| manhattan_distance(pacman, pellet))
        .min()
        && nearest > 0
    {
        score += FOOD_PROXIMITY_WEIGHT / nearest as f64;
    }
    score -= FOOD_COUNT_PENALTY * food.len() as f64;

    for ghost in state.ghost_states() {
        let distance = manhattan_distance(pacman, ghost.position);
        if ghost.is_scared() {
            score += SCARED_GHOST_BONUS / (distance as f64 + 1.0);
        } else if distance > 0 {
            score -= GHOST_PROXIMITY_PENALTY / distance as f64;
        }
    }

    let capsules = state.capsule_positions();
    if let Some(nearest) = capsules
        .iter()
        .map(|&capsule| manhattan_distance(pacman, capsule))
        .min()
    {
        score -= CAPSULE_PROXIMITY_WEIGHT / (nearest as f64 + 1.0);
    }
    score -= CAPSULE_COUNT_PENALTY * capsules.len() as f64;

    score
}

/// Reflex decision criterion: the composite evaluation of the successor the
/// maximizer reaches by taking `action`, minus [`STOP_PENALTY`] when the
/// action is `Stop`.
///
/// # Errors
/// Fails if `action` is not legal for the maximizer in `state`.
pub fn reflex_evaluation<S: GameState>(state: &S, action: Action) -> crate::Result<f64> {
    let successor = state.successor(PACMAN, action)?;
    let mut score = composite_evaluation(&successor);
    if action == Action::Stop {
        score -= STOP_PENALTY;
    }
    Ok(score)
}

/// Selects an evaluation function at construction time.
///
/// Replaces name-based lookup: CLI-supplied names parse into this enum once,
/// so an unknown evaluator is rejected before any search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    /// Raw built-in score
    Score,
    /// Composite food/ghost/capsule heuristic
    Composite,
}

impl EvaluationKind {
    /// Evaluate `state` with the selected function.
    pub fn evaluate<S: GameState>(&self, state: &S) -> f64 {
        match self {
            EvaluationKind::Score => score_evaluation(state),
            EvaluationKind::Composite => composite_evaluation(state),
        }
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvaluationKind::Score => "score",
            EvaluationKind::Composite => "composite",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EvaluationKind {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        match input {
            "score" => Ok(EvaluationKind::Score),
            "composite" => Ok(EvaluationKind::Composite),
            _ => Err(crate::Error::ParseEvaluator {
                input: input.to_string(),
                expected: "score, composite".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AgentIndex, GhostState, Position};

    /// Static board snapshot exposing only the evaluation queries.
    struct Snapshot {
        score: f64,
        pacman: Position,
        food: Vec<Position>,
        capsules: Vec<Position>,
        ghosts: Vec<GhostState>,
    }

    impl Snapshot {
        fn empty(score: f64) -> Self {
            Snapshot {
                score,
                pacman: (0, 0),
                food: Vec::new(),
                capsules: Vec::new(),
                ghosts: Vec::new(),
            }
        }
    }

    impl GameState for Snapshot {
        fn num_agents(&self) -> usize {
            1 + self.ghosts.len()
        }

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<Action> {
            Vec::new()
        }

        fn successor(&self, agent: AgentIndex, action: Action) -> crate::Result<Self> {
            Err(crate::Error::IllegalAction {
                action,
                agent,
                context: "static snapshot".to_string(),
            })
        }

        fn is_win(&self) -> bool {
            false
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn raw_score(&self) -> f64 {
            self.score
        }

        fn pacman_position(&self) -> Position {
            self.pacman
        }

        fn food_positions(&self) -> Vec<Position> {
            self.food.clone()
        }

        fn capsule_positions(&self) -> Vec<Position> {
            self.capsules.clone()
        }

        fn ghost_states(&self) -> Vec<GhostState> {
            self.ghosts.clone()
        }
    }

    #[test]
    fn composite_matches_documented_formula() {
        // One food pellet at distance 3, no capsules, one non-scared ghost
        // at distance 5.
        let snapshot = Snapshot {
            score: 42.0,
            pacman: (0, 0),
            food: vec![(3, 0)],
            capsules: Vec::new(),
            ghosts: vec![GhostState {
                position: (0, 5),
                scared_timer: 0,
            }],
        };

        let expected = 42.0 + FOOD_PROXIMITY_WEIGHT / 3.0
            - FOOD_COUNT_PENALTY * 1.0
            - GHOST_PROXIMITY_PENALTY / 5.0;
        assert_eq!(composite_evaluation(&snapshot), expected);
    }

    #[test]
    fn composite_on_bare_board_is_raw_score() {
        let snapshot = Snapshot::empty(-17.5);
        assert_eq!(composite_evaluation(&snapshot), -17.5);
        assert_eq!(score_evaluation(&snapshot), -17.5);
    }

    #[test]
    fn scared_ghost_attracts_instead_of_repelling() {
        let mut snapshot = Snapshot::empty(0.0);
        snapshot.ghosts = vec![GhostState {
            position: (2, 2),
            scared_timer: 10,
        }];
        assert_eq!(
            composite_evaluation(&snapshot),
            SCARED_GHOST_BONUS / (4.0 + 1.0)
        );
    }

    #[test]
    fn adjacent_ghost_at_distance_zero_is_skipped() {
        // Ghost on the same square: the inverse-distance term is undefined
        // and must be omitted rather than divide by zero.
        let mut snapshot = Snapshot::empty(7.0);
        snapshot.ghosts = vec![GhostState {
            position: (0, 0),
            scared_timer: 0,
        }];
        assert_eq!(composite_evaluation(&snapshot), 7.0);
    }

    #[test]
    fn capsule_terms_apply_count_and_proximity() {
        let mut snapshot = Snapshot::empty(0.0);
        snapshot.capsules = vec![(1, 0), (6, 0)];
        let expected = -CAPSULE_PROXIMITY_WEIGHT / 2.0 - CAPSULE_COUNT_PENALTY * 2.0;
        assert_eq!(composite_evaluation(&snapshot), expected);
    }

    #[test]
    fn nearest_food_is_the_one_that_counts() {
        let mut snapshot = Snapshot::empty(0.0);
        snapshot.food = vec![(10, 0), (0, 2), (5, 5)];
        let expected = FOOD_PROXIMITY_WEIGHT / 2.0 - FOOD_COUNT_PENALTY * 3.0;
        assert_eq!(composite_evaluation(&snapshot), expected);
    }

    #[test]
    fn evaluator_names_parse_and_round_trip() {
        assert_eq!(
            "score".parse::<EvaluationKind>().unwrap(),
            EvaluationKind::Score
        );
        assert_eq!(
            "composite".parse::<EvaluationKind>().unwrap(),
            EvaluationKind::Composite
        );
        assert_eq!(EvaluationKind::Composite.to_string(), "composite");
        assert!(matches!(
            "better".parse::<EvaluationKind>(),
            Err(crate::Error::ParseEvaluator { .. })
        ));
    }
}
