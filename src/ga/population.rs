//! Population of path chromosomes for one generation.

use log::warn;
use rand::Rng;

use crate::evaluation::PathEvaluator;
use crate::models::RoadGraph;

use super::chromosome::Chromosome;
use super::config::{Replacement, StartPopulation};

/// Upper bound on the members reserved up front by [`Population::generate`].
const PREALLOCATE_LIMIT: usize = 1024;

/// The working set of chromosomes of one generation.
///
/// Members are unique and padded to the graph's vertex count. The target
/// size is re-derived from the surviving count every time the population
/// is generated or cleaned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    members: Vec<Chromosome>,
    target_size: usize,
}

impl Population {
    /// Wraps existing members; the target size becomes their count.
    pub fn from_members(members: Vec<Chromosome>) -> Self {
        let target_size = members.len();
        Self {
            members,
            target_size,
        }
    }

    /// Synthesizes `size` distinct random start→finish chromosomes.
    ///
    /// Each chromosome holds the start vertex, a random number of distinct
    /// intermediate vertices in random order, and the finish vertex, then is
    /// padded to the vertex count. `size` is clamped to
    /// [`RoadGraph::all_different_ways_count`] so generation always ends.
    pub fn generate<R: Rng>(graph: &RoadGraph, size: usize, rng: &mut R) -> Self {
        let ways = graph.all_different_ways_count();
        let size = if (size as u128) > ways {
            warn!(
                "requested population of {size} exceeds the {ways} distinct paths of the graph, clamping"
            );
            ways as usize
        } else {
            size
        };

        let mut members: Vec<Chromosome> = Vec::with_capacity(size.min(PREALLOCATE_LIMIT));
        while members.len() < size {
            let candidate = random_path(graph, rng);
            if !members.contains(&candidate) {
                members.push(candidate);
            }
        }

        let len = graph.vertex_count();
        let members = members.into_iter().map(|c| c.compacted(len)).collect();
        Self::from_members(members)
    }

    /// Current members.
    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Size recorded after the last generation or clean.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Replaces the members with a freshly bred generation, returning the
    /// previous members. The target size is left untouched until
    /// [`clean`](Self::clean).
    pub fn replace_members(&mut self, members: Vec<Chromosome>) -> Vec<Chromosome> {
        std::mem::replace(&mut self.members, members)
    }

    /// Removes structurally equal members, keeping first occurrences.
    pub fn dedup_in_place(&mut self) {
        dedup(&mut self.members);
    }

    /// Deduplicates, drops invalid members and, under
    /// [`Replacement::Genitor`], removes the worst member until the
    /// population is back to its previous target size. The target size then
    /// becomes the surviving count.
    pub fn clean(&mut self, evaluator: &PathEvaluator<'_>, replacement: Replacement) {
        let graph = evaluator.graph();
        dedup(&mut self.members);
        self.members.retain(|c| c.is_valid(graph));
        if replacement == Replacement::Genitor {
            while self.members.len() > self.target_size {
                match evaluator.worst(&self.members) {
                    Some(idx) => {
                        self.members.remove(idx);
                    }
                    None => break,
                }
            }
        }
        self.target_size = self.members.len();
    }

    /// Starting set of the next generation.
    ///
    /// `Elite` yields the best member alone (nothing if no member is
    /// travellable), `Full` a copy of every member.
    pub fn seed_next_generation(
        &self,
        evaluator: &PathEvaluator<'_>,
        strategy: StartPopulation,
    ) -> Vec<Chromosome> {
        match strategy {
            StartPopulation::Elite => evaluator
                .best(&self.members)
                .map(|idx| vec![self.members[idx].clone()])
                .unwrap_or_default(),
            StartPopulation::Full => self.members.clone(),
        }
    }

    /// Best member, if any member is travellable.
    pub fn best(&self, evaluator: &PathEvaluator<'_>) -> Option<&Chromosome> {
        evaluator.best(&self.members).map(|idx| &self.members[idx])
    }
}

/// Inserts an offspring into a generation under construction.
///
/// `Classic` appends unconditionally. `Genitor` only accepts a valid
/// chromosome, which replaces the current worst member of `into` (or is
/// appended when `into` is empty).
pub fn insert(
    chromosome: Chromosome,
    into: &mut Vec<Chromosome>,
    evaluator: &PathEvaluator<'_>,
    replacement: Replacement,
) {
    match replacement {
        Replacement::Classic => into.push(chromosome),
        Replacement::Genitor => {
            if !chromosome.is_valid(evaluator.graph()) {
                return;
            }
            match evaluator.worst(into) {
                Some(idx) => into[idx] = chromosome,
                None => into.push(chromosome),
            }
        }
    }
}

/// Removes structurally equal chromosomes, keeping first occurrences.
fn dedup(members: &mut Vec<Chromosome>) {
    let mut seen = std::collections::HashSet::with_capacity(members.len());
    members.retain(|c| seen.insert(c.clone()));
}

/// One random start→finish path without repeated vertices, unpadded.
fn random_path<R: Rng>(graph: &RoadGraph, rng: &mut R) -> Chromosome {
    let (start, finish) = (graph.start(), graph.finish());
    let mut pool: Vec<usize> = (1..=graph.vertex_count())
        .filter(|&v| v != start && v != finish)
        .collect();

    let count = rng.random_range(0..=pool.len());
    let mut genes = Vec::with_capacity(count + 2);
    genes.push(start);
    for _ in 0..count {
        let idx = rng.random_range(0..pool.len());
        genes.push(pool.swap_remove(idx));
    }
    genes.push(finish);
    Chromosome::new(genes)
}
