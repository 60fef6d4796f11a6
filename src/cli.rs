//! CLI commands for running search strategies over scenario files

use std::path::PathBuf;

use clap::Args;

use crate::{
    agents::DEFAULT_SEARCH_DEPTH,
    evaluation::EvaluationKind,
    scenario::{ScenarioGame, ScenarioSpec},
    search::{GameTreeSearch, SearchResult, SearchStrategy},
};

/// Arguments for the `choose` subcommand
#[derive(Args, Debug)]
pub struct ChooseArgs {
    /// Path to a scenario JSON file
    pub scenario: PathBuf,

    /// Search strategy to run
    #[arg(long, default_value = "minimax")]
    pub strategy: SearchStrategy,

    /// Evaluation function applied at depth cutoffs
    #[arg(long, default_value = "score")]
    pub evaluator: EvaluationKind,

    /// Search depth in full rounds
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,
}

/// Run one strategy over a scenario and report the root decision.
pub fn choose(args: ChooseArgs) -> anyhow::Result<()> {
    let spec = ScenarioSpec::from_path(&args.scenario)?;
    let game = spec.build()?;
    let search = GameTreeSearch::new(args.strategy, args.evaluator, args.depth);
    let result = search.search_root(&game.root_state())?;

    if let Some(name) = &spec.name {
        println!("scenario: {name}");
    }
    print_result(args.strategy, &result, &game);
    Ok(())
}

/// Arguments for the `compare` subcommand
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to a scenario JSON file
    pub scenario: PathBuf,

    /// Evaluation function applied at depth cutoffs
    #[arg(long, default_value = "score")]
    pub evaluator: EvaluationKind,

    /// Search depth in full rounds
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,
}

/// Run all three strategies over the same scenario side by side.
pub fn compare(args: CompareArgs) -> anyhow::Result<()> {
    let spec = ScenarioSpec::from_path(&args.scenario)?;
    if let Some(name) = &spec.name {
        println!("scenario: {name}");
    }

    for strategy in SearchStrategy::ALL {
        // Fresh game per strategy so expansion counts are independent.
        let game = spec.build()?;
        let search = GameTreeSearch::new(strategy, args.evaluator, args.depth);
        let result = search.search_root(&game.root_state())?;
        print_result(strategy, &result, &game);
    }
    Ok(())
}

fn print_result(strategy: SearchStrategy, result: &SearchResult, game: &ScenarioGame) {
    let action = match result.action {
        Some(action) => action.to_string(),
        None => "(none)".to_string(),
    };
    println!(
        "{strategy:<12} action={action:<8} value={value:<12.3} nodes expanded={expansions}",
        value = result.value,
        expansions = game.expansions(),
    );
}
