//! Population evolution driving the feature search.
//!
//! Fitness of an individual is the in-sample accuracy of a decision tree
//! grown over its decoded feature subset, minus a complexity penalty that
//! grows exponentially with the subset size. The penalty pushes the search
//! toward small feature sets; the reported "true max" adds it back so
//! convergence can be tracked on raw accuracy.
//!
//! Evolution per generation:
//!
//! 1. evaluate fitness for the whole population (parallel over shards)
//! 2. carry the top [`ELITE_COUNT`] individuals unchanged
//! 3. rank-select a breeding pool from the remainder
//! 4. refill the population with crossover plus mutation children
//!
//! The population size is constant across generations.

use std::thread;

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
    seq::IndexedRandom,
};
use riftlens_model::GameRecord;
use riftlens_stats::descriptive::DescriptiveStats;
use riftlens_tree::tree::{DecisionTree, MissingFeatureError};

use crate::{
    feature_space::{FeatureSpace, FeatureTriple, materialize},
    genome::{self, Genome},
};

/// Number of top individuals preserved unchanged each generation; these are
/// also excluded from the breeding pool.
pub const ELITE_COUNT: usize = 2;

/// Fitness deduction for carrying many features: `weight * exp(n / scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityPenalty {
    pub weight: f64,
    pub scale: f64,
}

impl ComplexityPenalty {
    /// Penalty for a subset of `feature_count` features.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn value(&self, feature_count: usize) -> f64 {
        self.weight * (feature_count as f64 / self.scale).exp()
    }
}

impl Default for ComplexityPenalty {
    fn default() -> Self {
        ComplexityPenalty {
            weight: 0.02,
            scale: 2.8,
        }
    }
}

/// One candidate feature subset and its fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    fitness: f64,
}

impl Individual {
    /// A fresh individual with exactly one random feature active and an
    /// unset fitness.
    #[must_use]
    pub fn random<R>(space: FeatureSpace, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Individual {
            genome: Genome::random_single_bit(space.genome_len(), rng),
            fitness: f64::MIN,
        }
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Penalized fitness; `f64::MIN` until evaluated.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The feature subset this individual encodes.
    #[must_use]
    pub fn features(&self, space: FeatureSpace) -> Vec<FeatureTriple> {
        space.decode(&self.genome)
    }
}

/// The evolving collection of candidate feature subsets.
#[derive(Debug, Clone)]
pub struct Population {
    space: FeatureSpace,
    individuals: Vec<Individual>,
}

impl Population {
    /// A population of `count` random single-feature individuals.
    ///
    /// # Panics
    ///
    /// Panics if `count` is not larger than [`ELITE_COUNT`].
    #[must_use]
    pub fn random<R>(space: FeatureSpace, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(count > ELITE_COUNT, "population must exceed the elite count");
        let individuals = (0..count).map(|_| Individual::random(space, rng)).collect();
        Population { space, individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The fittest individual.
    ///
    /// Meaningful after [`Population::evaluate_fitness`]; before evaluation
    /// every fitness is `f64::MIN`.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty, which constructors prevent.
    #[must_use]
    pub fn best(&self) -> &Individual {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .expect("population is never empty")
    }

    /// Evaluates fitness for every individual and sorts the population by
    /// fitness descending.
    ///
    /// The population is sharded across at most `workers` scoped threads;
    /// every task owns its inputs and writes only its own shard, and shard
    /// results are joined in spawn order. A panicking worker aborts the
    /// whole batch.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero or a worker panics.
    pub fn evaluate_fitness(
        &mut self,
        games: &[GameRecord],
        penalty: ComplexityPenalty,
        workers: usize,
    ) -> Result<(), MissingFeatureError> {
        assert!(workers > 0, "worker count must be positive");
        let space = self.space;
        let chunk_len = self.individuals.len().div_ceil(workers);
        thread::scope(|s| {
            let handles: Vec<_> = self
                .individuals
                .chunks_mut(chunk_len)
                .map(|shard| {
                    s.spawn(move || -> Result<(), MissingFeatureError> {
                        for individual in shard {
                            individual.fitness =
                                penalized_accuracy(space, games, penalty, &individual.genome)?;
                        }
                        Ok(())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("fitness worker panicked")?;
            }
            Ok(())
        })?;

        // stable sort keeps evaluation order among equal fitnesses
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Ok(())
    }
}

/// Raw tree accuracy of the genome's feature subset minus the complexity
/// penalty.
fn penalized_accuracy(
    space: FeatureSpace,
    games: &[GameRecord],
    penalty: ComplexityPenalty,
    genome: &Genome,
) -> Result<f64, MissingFeatureError> {
    let features = space.decode(genome);
    let table = materialize(games, &features);
    let tree = DecisionTree::grow(&table);
    let accuracy = tree.accuracy(&table)?;
    Ok(accuracy - penalty.value(features.len()))
}

/// Per-generation fitness summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Best fitness with its complexity penalty added back: the raw
    /// accuracy of the best individual, used for convergence tracking.
    pub true_max: f64,
}

impl GenerationStats {
    /// Summarizes an evaluated population.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty, which constructors prevent.
    #[must_use]
    pub fn from_population(population: &Population, penalty: ComplexityPenalty) -> Self {
        let stats =
            DescriptiveStats::new(population.individuals.iter().map(Individual::fitness))
                .expect("population is never empty");
        let best = population.best();
        GenerationStats {
            max: stats.max,
            min: stats.min,
            mean: stats.mean,
            true_max: best.fitness + penalty.value(best.genome.count_ones()),
        }
    }
}

/// Controls selection, crossover, and mutation of the feature search.
#[derive(Debug, Clone)]
pub struct GeneticSearch {
    /// Fraction of the non-elite population sampled into the breeding pool.
    pub propagation_rate: f64,
    /// Probability that a parent pair exchanges genome segments.
    pub crossover_rate: f64,
    /// Independent flip probability per genome bit.
    pub mutation_rate: f64,
    /// Complexity penalty applied during fitness evaluation.
    pub penalty: ComplexityPenalty,
}

impl GeneticSearch {
    /// Evaluates the population, summarizes it, and steps it to the next
    /// generation.
    pub fn next_generation<R>(
        &self,
        population: &mut Population,
        games: &[GameRecord],
        workers: usize,
        rng: &mut R,
    ) -> Result<GenerationStats, MissingFeatureError>
    where
        R: Rng + ?Sized,
    {
        population.evaluate_fitness(games, self.penalty, workers)?;
        let stats = GenerationStats::from_population(population, self.penalty);
        *population = self.evolve(population, rng);
        Ok(stats)
    }

    /// Breeds the next generation from an evaluated population.
    ///
    /// The top [`ELITE_COUNT`] individuals are carried over unchanged; the
    /// rest of the fixed-size population is refilled with mutated crossover
    /// children of rank-selected parents.
    ///
    /// # Panics
    ///
    /// Panics if the population is not sorted by fitness descending (it is
    /// after [`Population::evaluate_fitness`]) or is too small to breed.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let individuals = &population.individuals;
        assert!(
            individuals.len() > ELITE_COUNT + 1,
            "population too small to breed"
        );
        assert!(
            individuals.is_sorted_by(|a, b| a.fitness >= b.fitness),
            "population must be evaluated before evolving"
        );

        let mut next = individuals[..ELITE_COUNT].to_vec();
        let pool = rank_select(&individuals[ELITE_COUNT..], self.propagation_rate, rng);

        while next.len() < individuals.len() {
            let parent1 = pool.choose(rng).expect("breeding pool is never empty");
            let parent2 = pool.choose(rng).expect("breeding pool is never empty");
            let (mut child1, mut child2) =
                self.crossover(&parent1.genome, &parent2.genome, rng);
            genome::mutate(&mut child1, self.mutation_rate, rng);
            genome::mutate(&mut child2, self.mutation_rate, rng);
            next.push(Individual {
                genome: child1,
                fitness: f64::MIN,
            });
            next.push(Individual {
                genome: child2,
                fitness: f64::MIN,
            });
        }
        next.truncate(individuals.len());

        Population {
            space: population.space,
            individuals: next,
        }
    }

    /// Two-point crossover of a parent pair.
    ///
    /// Two cut points are drawn over the genome and ordered; with
    /// probability `crossover_rate` the children exchange the segment
    /// between them (child 1 takes the outer bits of parent 1 and the inner
    /// bits of parent 2, child 2 the reverse), otherwise the children are
    /// exact clones of the parents. Genome length is invariant either way.
    #[must_use]
    pub fn crossover<R>(&self, parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome)
    where
        R: Rng + ?Sized,
    {
        let first = rng.random_range(0..parent1.len());
        let second = rng.random_range(0..parent1.len());
        let (start, end) = (first.min(second), first.max(second));

        if rng.random_bool(self.crossover_rate) {
            (
                genome::splice(parent1, parent2, start, end),
                genome::splice(parent2, parent1, start, end),
            )
        } else {
            (parent1.clone(), parent2.clone())
        }
    }
}

/// Rank selection with linearly decreasing weights.
///
/// `ranked` must be ordered by fitness descending; the best entry gets the
/// largest weight and the worst a weight of one. Samples with replacement to
/// `round(len * propagation_rate)` picks, at least one.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rank_select<'a, R>(
    ranked: &'a [Individual],
    propagation_rate: f64,
    rng: &mut R,
) -> Vec<&'a Individual>
where
    R: Rng + ?Sized,
{
    let weights: Vec<usize> = (1..=ranked.len()).rev().collect();
    let distribution = WeightedIndex::new(weights).expect("pool weights are positive");
    let picks = ((ranked.len() as f64 * propagation_rate).round() as usize).max(1);
    (0..picks)
        .map(|_| &ranked[distribution.sample(rng)])
        .collect()
}
