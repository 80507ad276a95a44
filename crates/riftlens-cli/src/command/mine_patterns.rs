use std::{collections::HashMap, path::PathBuf};

use anyhow::Context;
use riftlens_mining::miner::{self, FrameTask};
use riftlens_model::VertexLabel;
use riftlens_search::feature_space::{FeatureTriple, materialize};
use riftlens_tree::{
    rule::{self, RuleStep},
    tree::DecisionTree,
};

use crate::{
    schema::{
        feature_model::FeatureModel, game_record, graph_record::GameGraphRecord,
        pattern::FramePattern,
    },
    util,
};

const MIN_CONFIDENCE: f64 = 0.8;
const MIN_RULE_SUPPORT: usize = 5;
const MIN_SUPPORT_RATE: f64 = 0.8;
const WORKER_COUNT: usize = 6;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MinePatternsArg {
    /// Game metric records JSON file
    #[arg(long)]
    games: PathBuf,
    /// Per-game interaction graph records JSON file
    #[arg(long)]
    graphs: PathBuf,
    /// Feature model JSON from search-features
    #[arg(long)]
    model: PathBuf,
    /// Index of the rule to mine for, in extract-rules order
    #[arg(long, default_value_t = 0)]
    rule: usize,
    #[arg(long, default_value_t = MIN_CONFIDENCE)]
    min_confidence: f64,
    #[arg(long, default_value_t = MIN_RULE_SUPPORT)]
    min_rule_support: usize,
    /// Minimum pattern support as a fraction of the matched games
    #[arg(long, default_value_t = MIN_SUPPORT_RATE)]
    min_support: f64,
    #[arg(long, default_value_t = WORKER_COUNT)]
    workers: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn run(arg: &MinePatternsArg) -> anyhow::Result<()> {
    let records = util::read_json_file("game metrics", &arg.games)?;
    let games = game_record::into_game_records(records)?;
    anyhow::ensure!(!games.is_empty(), "no games in {}", arg.games.display());
    let graph_records: Vec<GameGraphRecord> = util::read_json_file("graph records", &arg.graphs)?;
    let model: FeatureModel = util::read_json_file("feature model", &arg.model)?;

    let table = materialize(&games, &model.features);
    let tree = DecisionTree::grow(&table);
    let rules = rule::extract_rules(&tree, &table, arg.min_confidence, arg.min_rule_support)?;
    let rule = rules.get(arg.rule).with_context(|| {
        format!("rule index {} out of range ({} rules)", arg.rule, rules.len())
    })?;
    eprintln!("Mining patterns for rule:");
    eprintln!("  {rule}");

    // the game subset the rule selects, joined to its graph records
    let graphs_by_id: HashMap<&str, &GameGraphRecord> = graph_records
        .iter()
        .map(|record| (record.game_id.as_str(), record))
        .collect();
    let mut matched = Vec::new();
    for (game, sample) in std::iter::zip(&games, table.samples()) {
        if rule.matches(sample)? {
            let record = graphs_by_id
                .get(game.game_id.as_str())
                .with_context(|| format!("no graph record for game {}", game.game_id))?;
            matched.push(*record);
        }
    }
    eprintln!("  {} of {} games satisfy the rule", matched.len(), games.len());

    // per-frame anchor vertices from the rule's comparisons
    let triples: HashMap<String, FeatureTriple> = model
        .features
        .iter()
        .map(|triple| (triple.feature_name(), *triple))
        .collect();
    let frame_count = matched
        .iter()
        .map(|record| record.time_frames.len())
        .max()
        .unwrap_or(0);
    let mut anchors: Vec<Vec<VertexLabel>> = vec![Vec::new(); frame_count];
    for step in &rule.steps {
        let feature = match step {
            RuleStep::Le { feature, .. } | RuleStep::Gt { feature, .. } => feature,
            RuleStep::Leaf { .. } => continue,
        };
        let triple = triples
            .get(feature)
            .with_context(|| format!("rule references unknown feature {feature:?}"))?;
        if triple.frame < frame_count && !anchors[triple.frame].contains(&triple.vertex) {
            anchors[triple.frame].push(triple.vertex);
        }
    }

    let min_support = (arg.min_support * matched.len() as f64).ceil() as usize;
    let tasks: Vec<FrameTask> = anchors
        .iter()
        .enumerate()
        .map(|(frame, required_vertices)| FrameTask {
            graphs: matched
                .iter()
                .map(|record| record.frame_graph(frame))
                .collect(),
            min_support,
            required_vertices: required_vertices.clone(),
        })
        .collect();

    let frequent = miner::mine_time_frames(&tasks, arg.workers);
    let patterns: Vec<FramePattern> = frequent
        .iter()
        .enumerate()
        .map(|(frame, graph)| FramePattern::from_graph(frame, graph))
        .collect();

    eprintln!("Frequent patterns:");
    for pattern in &patterns {
        eprintln!(
            "  time frame {}: {} nodes, {} edges",
            pattern.time_frame,
            pattern.nodes.len(),
            pattern.edges.len(),
        );
    }

    util::save_json(&patterns, arg.output.as_deref())?;
    Ok(())
}
