use std::path::PathBuf;

use chrono::Utc;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use riftlens_model::GameRecord;
use riftlens_search::{
    feature_space::{FeatureSpace, materialize},
    genetic::{ComplexityPenalty, GenerationStats, GeneticSearch, Population},
};
use riftlens_tree::tree::DecisionTree;

use crate::{
    schema::{feature_model::FeatureModel, game_record},
    util,
};

const POPULATION_COUNT: usize = 100;
const MAX_GENERATIONS: usize = 100;
const WORKER_COUNT: usize = 6;

const PROPAGATION_RATE: f64 = 0.8;
const CROSSOVER_RATE: f64 = 0.8;
const MUTATION_RATE: f64 = 0.001;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SearchFeaturesArg {
    /// Game metric records JSON file
    #[arg(long)]
    games: PathBuf,
    #[arg(long, default_value_t = POPULATION_COUNT)]
    population: usize,
    #[arg(long, default_value_t = MAX_GENERATIONS)]
    generations: usize,
    #[arg(long, default_value_t = WORKER_COUNT)]
    workers: usize,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SearchFeaturesArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.generations > 0, "need at least one generation");

    let records = util::read_json_file("game metrics", &arg.games)?;
    let games = game_record::into_game_records(records)?;
    anyhow::ensure!(!games.is_empty(), "no games in {}", arg.games.display());

    let frame_count = games.iter().map(GameRecord::frame_count).max().unwrap_or(0);
    anyhow::ensure!(frame_count > 0, "no game has any recorded time frame");
    let space = FeatureSpace::new(frame_count);

    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };

    let search = GeneticSearch {
        propagation_rate: PROPAGATION_RATE,
        crossover_rate: CROSSOVER_RATE,
        mutation_rate: MUTATION_RATE,
        penalty: ComplexityPenalty::default(),
    };
    let mut population = Population::random(space, arg.population, &mut rng);

    eprintln!(
        "Searching {} candidate features over {} games ({} time frames)",
        space.genome_len(),
        games.len(),
        frame_count,
    );

    for generation in 0..arg.generations {
        eprintln!("Generation #{generation}:");
        population.evaluate_fitness(&games, search.penalty, arg.workers)?;
        let stats = GenerationStats::from_population(&population, search.penalty);
        eprintln!(
            "  Max: {:.3}, Min: {:.3}, Avg: {:.3}, True Max: {:.3}",
            stats.max, stats.min, stats.mean, stats.true_max,
        );
        eprintln!("  Best features:");
        for feature in population.best().features(space) {
            eprintln!("    {feature}");
        }

        if generation + 1 < arg.generations {
            population = search.evolve(&population, &mut rng);
        }
    }

    let best = population.best();
    let features = best.features(space);
    let model = FeatureModel {
        trained_at: Utc::now(),
        generations: arg.generations,
        population: arg.population,
        final_fitness: best.fitness(),
        true_fitness: best.fitness() + search.penalty.value(features.len()),
        features,
    };
    util::save_json(&model, arg.output.as_deref())?;

    eprintln!();
    eprintln!("Feature search completed");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  True fitness: {:.3}", model.true_fitness);
    eprintln!("  Features: {}", model.features.len());

    if games.len() >= 2 {
        let folds = games.len().min(5);
        let table = materialize(&games, &model.features);
        let held_out = DecisionTree::cross_validate(&table, folds)?;
        eprintln!("  Held-out accuracy ({folds} folds): {held_out:.3}");
    }

    Ok(())
}
