//! Evolution loop for the quickest-path search.
//!
//! [`QuickestPathSearch`] drives generations through a small state machine:
//! seeding → breeding → cleaning → (converged | exhausted | seeding).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::{Fitness, PathEvaluator};
use crate::models::{format_hhmm, RoadGraph, TimeOfDay};

use super::chromosome::Chromosome;
use super::config::SearchConfig;
use super::operators::{crossover, mutate, tournament_select};
use super::population::{insert, Population};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A generation left the population unchanged.
    Converged,
    /// The iteration limit was reached or the population shrank to one
    /// member.
    Exhausted,
    /// The caller's cancellation flag was raised.
    Cancelled,
}

/// Result of a quickest-path search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Vertex ids from start to finish. Empty when no travellable path was
    /// found.
    pub path: Vec<usize>,

    /// Travel time of `path` in seconds.
    pub duration_secs: Option<u64>,

    /// Length of `path` in the graph's distance units.
    pub length: Option<f64>,

    /// Departure time of the trip.
    pub start_time: TimeOfDay,

    /// Number of completed generations.
    pub generations: usize,

    /// Why the search stopped.
    pub outcome: Outcome,
}

impl SearchResult {
    /// Returns `true` if a travellable path was found.
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Travel time as `HH:MM`.
    pub fn duration_hhmm(&self) -> Option<String> {
        self.duration_secs.map(format_hhmm)
    }

    /// Arrival time of day as `HH:MM`.
    pub fn arrival_hhmm(&self) -> Option<String> {
        self.duration_secs
            .and_then(|d| self.start_time.seconds().checked_add(d))
            .map(format_hhmm)
    }
}

/// Stages of one search.
enum State {
    Seeding,
    Breeding(Vec<Chromosome>),
    Cleaning(Vec<Chromosome>),
    Done(Outcome),
}

/// Genetic search for the quickest start→finish path of a [`RoadGraph`].
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_quickroute::models::RoadGraph;
/// use u_quickroute::ga::{QuickestPathSearch, SearchConfig};
///
/// let graph: RoadGraph = "3\n1 3\n08:00\n\n1 2 10\n2 3 10\n\n1 2 50 00:00 23:59\n2 3 50 00:00 23:59\n"
///     .parse()
///     .unwrap();
/// let search = QuickestPathSearch::new(&graph, SearchConfig::default()).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let result = search.find_quickest_way(&mut rng);
///
/// assert_eq!(result.path, vec![1, 2, 3]);
/// assert_eq!(result.duration_hhmm().as_deref(), Some("00:24"));
/// assert_eq!(result.arrival_hhmm().as_deref(), Some("08:24"));
/// ```
pub struct QuickestPathSearch<'a> {
    graph: &'a RoadGraph,
    config: SearchConfig,
}

impl<'a> QuickestPathSearch<'a> {
    /// Creates a search, rejecting an out-of-range configuration.
    pub fn new(graph: &'a RoadGraph, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates `config`, seeds a generator from `config.seed` (or a random
    /// seed) and runs the search.
    pub fn run(graph: &RoadGraph, config: &SearchConfig) -> Result<SearchResult> {
        let search = QuickestPathSearch::new(graph, config.clone())?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(search.find_quickest_way(&mut rng))
    }

    /// Runs the search to completion with the given generator.
    pub fn find_quickest_way<R: Rng>(&self, rng: &mut R) -> SearchResult {
        self.find_quickest_way_with_cancel(rng, None)
    }

    /// Runs the search with an optional cancellation flag.
    ///
    /// The flag is checked after each breeding phase; once raised, the bred
    /// generation is discarded and the best member of the current
    /// population is returned.
    pub fn find_quickest_way_with_cancel<R: Rng>(
        &self,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> SearchResult {
        let evaluator = PathEvaluator::new(self.graph);
        let mut population =
            Population::generate(self.graph, self.config.initial_population_size, rng);
        let mut generation = 0usize;

        let mut state = self.after_generation(&population, generation);
        let outcome = loop {
            state = match state {
                State::Seeding => State::Breeding(
                    population.seed_next_generation(&evaluator, self.config.start_population),
                ),
                State::Breeding(mut next) => {
                    self.breed(&population, &mut next, &evaluator, rng, generation);
                    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                        State::Done(Outcome::Cancelled)
                    } else {
                        State::Cleaning(next)
                    }
                }
                State::Cleaning(next) => {
                    let previous = population.replace_members(next);
                    population.clean(&evaluator, self.config.replacement);
                    generation += 1;
                    debug!(
                        "generation {generation}: {} members after cleaning",
                        population.len()
                    );
                    if same_members(&previous, population.members()) {
                        State::Done(Outcome::Converged)
                    } else {
                        self.after_generation(&population, generation)
                    }
                }
                State::Done(outcome) => break outcome,
            };
        };

        let best = population.best(&evaluator).cloned().unwrap_or_default();
        let fitness = if best.is_empty() {
            Fitness::INVALID
        } else {
            evaluator.evaluate(&best)
        };
        let result = SearchResult {
            path: best.strip_zeros(),
            duration_secs: fitness.duration_secs,
            length: fitness.length,
            start_time: self.graph.start_time(),
            generations: generation,
            outcome,
        };
        info!(
            "search stopped ({:?}) after {} generations: path {:?}, duration {:?}s, length {:?}",
            result.outcome, result.generations, result.path, result.duration_secs, result.length
        );
        result
    }

    /// Decides whether another generation runs.
    fn after_generation(&self, population: &Population, generation: usize) -> State {
        if generation >= self.config.iteration_limit || population.len() <= 1 {
            State::Done(Outcome::Exhausted)
        } else {
            State::Seeding
        }
    }

    /// Breeds offspring into `next` until enough rounds produced a valid
    /// child or the raw round ceiling is hit.
    fn breed<R: Rng>(
        &self,
        population: &Population,
        next: &mut Vec<Chromosome>,
        evaluator: &PathEvaluator<'_>,
        rng: &mut R,
        generation: usize,
    ) {
        let graph = self.graph;
        let n = graph.vertex_count();
        let cfg = &self.config;
        let target = population.target_size();
        let ceiling = target.saturating_mul(cfg.breeding_rounds_per_slot);

        let mut productive = 0usize;
        let mut rounds = 0usize;
        while productive < target && rounds < ceiling {
            rounds += 1;
            let (Some(p1), Some(p2)) = (
                tournament_select(population.members(), evaluator, cfg.tournament_chance, rng),
                tournament_select(population.members(), evaluator, cfg.tournament_chance, rng),
            ) else {
                break;
            };
            let (c1, c2) = crossover(&p1, &p2, n, rng);
            let c1 = mutate(&c1, cfg.mutation_type, cfg.mutation_chance, n, rng);
            let c2 = mutate(&c2, cfg.mutation_type, cfg.mutation_chance, n, rng);

            let mut any_valid = false;
            for child in [c1, c2] {
                if child.is_valid(graph) {
                    any_valid = true;
                    insert(child, next, evaluator, cfg.replacement);
                }
            }
            if any_valid {
                productive += 1;
            }
        }

        if productive < target {
            warn!(
                "generation {}: only {productive} of {target} breeding rounds produced a valid child within {rounds} rounds",
                generation + 1
            );
        }
        debug!(
            "generation {}: bred {} offspring in {rounds} rounds ({productive} productive)",
            generation + 1,
            next.len()
        );
    }
}

/// Set equality of two generations.
fn same_members(a: &[Chromosome], b: &[Chromosome]) -> bool {
    let a: HashSet<&Chromosome> = a.iter().collect();
    let b: HashSet<&Chromosome> = b.iter().collect();
    a == b
}
