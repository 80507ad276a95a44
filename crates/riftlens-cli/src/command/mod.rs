use clap::{Parser, Subcommand};

use self::{
    extract_rules::ExtractRulesArg, mine_patterns::MinePatternsArg,
    search_features::SearchFeaturesArg,
};

mod extract_rules;
mod mine_patterns;
mod search_features;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What stage of the pipeline to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search predictive (metric, role, time frame) feature subsets with
    /// the genetic algorithm
    SearchFeatures(#[clap(flatten)] SearchFeaturesArg),
    /// Regrow the decision tree for a feature model and extract its rules
    ExtractRules(#[clap(flatten)] ExtractRulesArg),
    /// Mine the frequent interaction patterns of the games matching a rule
    MinePatterns(#[clap(flatten)] MinePatternsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::SearchFeatures(arg) => search_features::run(&arg)?,
        Mode::ExtractRules(arg) => extract_rules::run(&arg)?,
        Mode::MinePatterns(arg) => mine_patterns::run(&arg)?,
    }
    Ok(())
}
