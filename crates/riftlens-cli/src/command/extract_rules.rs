use std::path::PathBuf;

use riftlens_search::feature_space::materialize;
use riftlens_tree::{rule, tree::DecisionTree};

use crate::{
    schema::{feature_model::FeatureModel, game_record},
    util,
};

const MIN_CONFIDENCE: f64 = 0.8;
const MIN_SUPPORT: usize = 5;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExtractRulesArg {
    /// Game metric records JSON file
    #[arg(long)]
    games: PathBuf,
    /// Feature model JSON from search-features
    #[arg(long)]
    model: PathBuf,
    #[arg(long, default_value_t = MIN_CONFIDENCE)]
    min_confidence: f64,
    #[arg(long, default_value_t = MIN_SUPPORT)]
    min_support: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExtractRulesArg) -> anyhow::Result<()> {
    let records = util::read_json_file("game metrics", &arg.games)?;
    let games = game_record::into_game_records(records)?;
    anyhow::ensure!(!games.is_empty(), "no games in {}", arg.games.display());
    let model: FeatureModel = util::read_json_file("feature model", &arg.model)?;

    // induction is deterministic, so this is the tree the search scored
    let table = materialize(&games, &model.features);
    let tree = DecisionTree::grow(&table);
    eprintln!("Decision tree:");
    eprint!("{tree}");

    let rules = rule::extract_rules(&tree, &table, arg.min_confidence, arg.min_support)?;
    eprintln!();
    eprintln!("{} rules:", rules.len());
    for rule in &rules {
        eprintln!("  {rule}");
    }

    util::save_json(&rules, arg.output.as_deref())?;
    Ok(())
}
