//! Genetic operators on path chromosomes.
//!
//! - [`tournament_select`]: binary tournament with a configurable chance of
//!   the fitter contestant winning
//! - [`crossover`]: two-point segment swap
//! - [`mutate`]: random gene overwrite at positions chosen by [`MutationType`]
//!
//! Crossover and mutation return new, compacted chromosomes; parents are
//! never modified.

use rand::seq::index;
use rand::Rng;

use crate::evaluation::{Fitter, PathEvaluator};

use super::chromosome::Chromosome;
use super::config::MutationType;

/// Picks a parent by binary tournament.
///
/// Two members are drawn uniformly with replacement. With probability
/// `tournament_chance` the fitter one is returned, otherwise either one at
/// random. When neither is fitter the first non-empty draw is returned.
/// Returns `None` for an empty population.
pub fn tournament_select<R: Rng>(
    population: &[Chromosome],
    evaluator: &PathEvaluator<'_>,
    tournament_chance: f64,
    rng: &mut R,
) -> Option<Chromosome> {
    if population.is_empty() {
        return None;
    }
    let first = &population[rng.random_range(0..population.len())];
    let second = &population[rng.random_range(0..population.len())];

    let picked = if rng.random::<f64>() <= tournament_chance {
        match evaluator.compare(first, second) {
            Some(Fitter::First) => Some(first),
            Some(Fitter::Second) => Some(second),
            None => None,
        }
    } else if rng.random_bool(0.5) {
        Some(first)
    } else {
        Some(second)
    };

    let fallback = if first.is_empty() { second } else { first };
    Some(picked.unwrap_or(fallback).clone())
}

/// Two-point crossover.
///
/// Two distinct cut points are drawn from `1..vertex_count`; the children
/// swap the parents' genes in `[pos1, pos2)` and keep their own genes
/// elsewhere, then are compacted to `vertex_count` genes. Parents are
/// returned unchanged if either is empty or `vertex_count <= 2`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_quickroute::ga::{crossover, Chromosome};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let p1 = Chromosome::new(vec![1, 2, 3, 4, 5]);
/// let p2 = Chromosome::new(vec![1, 4, 5, 0, 0]);
/// let (c1, c2) = crossover(&p1, &p2, 5, &mut rng);
/// assert_eq!(c1.len(), 5);
/// assert_eq!(c2.len(), 5);
/// assert_eq!(c1.genes()[0], 1);
/// ```
pub fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    vertex_count: usize,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    if parent1.is_empty() || parent2.is_empty() || vertex_count <= 2 {
        return (parent1.clone(), parent2.clone());
    }
    let p1 = padded(parent1, vertex_count);
    let p2 = padded(parent2, vertex_count);

    let a = rng.random_range(1..vertex_count);
    let mut b = a;
    while b == a {
        b = rng.random_range(1..vertex_count);
    }
    let (pos1, pos2) = (a.min(b), a.max(b));

    let mut child1 = p1.clone();
    let mut child2 = p2.clone();
    child1[pos1..pos2].copy_from_slice(&p2[pos1..pos2]);
    child2[pos1..pos2].copy_from_slice(&p1[pos1..pos2]);

    (
        Chromosome::new(child1).compacted(vertex_count),
        Chromosome::new(child2).compacted(vertex_count),
    )
}

/// Gene positions to consider for mutation.
///
/// - `OnePoint`: one position in `0..vertex_count`
/// - `MultiPoint`: between 2 and `vertex_count - 2` distinct positions in
///   `0..vertex_count` (exactly 2 when `vertex_count == 3`)
/// - `Total`: every position in `1..vertex_count - 1`
pub fn mutation_positions<R: Rng>(
    mutation_type: MutationType,
    vertex_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    match mutation_type {
        MutationType::OnePoint => index::sample(rng, vertex_count, 1).into_vec(),
        MutationType::MultiPoint => {
            let count = if vertex_count > 3 {
                rng.random_range(2..vertex_count - 1)
            } else {
                2.min(vertex_count)
            };
            index::sample(rng, vertex_count, count).into_vec()
        }
        MutationType::Total => (1..vertex_count.saturating_sub(1)).collect(),
    }
}

/// Mutates a copy of `chromosome`.
///
/// Each position chosen by `mutation_type` is overwritten, with probability
/// `mutation_chance`, by a random vertex id in `1..=vertex_count`. The result
/// is compacted once at the end. Returns the chromosome unchanged if it is
/// empty or `vertex_count <= 2`.
pub fn mutate<R: Rng>(
    chromosome: &Chromosome,
    mutation_type: MutationType,
    mutation_chance: f64,
    vertex_count: usize,
    rng: &mut R,
) -> Chromosome {
    if chromosome.is_empty() || vertex_count <= 2 {
        return chromosome.clone();
    }
    let mut genes = padded(chromosome, vertex_count);
    for pos in mutation_positions(mutation_type, vertex_count, rng) {
        if rng.random::<f64>() <= mutation_chance {
            genes[pos] = rng.random_range(1..=vertex_count);
        }
    }
    Chromosome::new(genes).compacted(vertex_count)
}

/// Genes of `chromosome`, zero-padded or truncated to `len`.
fn padded(chromosome: &Chromosome, len: usize) -> Vec<usize> {
    let mut genes = chromosome.genes().to_vec();
    genes.resize(len, super::chromosome::UNUSED);
    genes
}
