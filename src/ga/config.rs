//! Search configuration.
//!
//! [`SearchConfig`] holds every parameter of one quickest-path search.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted [`SearchConfig::initial_population_size`].
pub const MAX_INITIAL_POPULATION: usize = 1_000_000;

/// How mutation positions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// A single random position.
    #[default]
    OnePoint,
    /// A random number of distinct random positions.
    MultiPoint,
    /// Every interior position.
    Total,
}

/// How the next generation's starting set is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPopulation {
    /// Only the best chromosome of the current population.
    #[default]
    Elite,
    /// The whole current population.
    Full,
}

/// How offspring enter the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
    /// Append every offspring.
    #[default]
    Classic,
    /// A valid offspring replaces the current worst member.
    Genitor,
}

/// Configuration of a quickest-path search.
///
/// # Defaults
///
/// ```
/// use u_quickroute::ga::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.iteration_limit, 100);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_quickroute::ga::{MutationType, Replacement, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_tournament_chance(0.9)
///     .with_mutation_type(MutationType::MultiPoint)
///     .with_replacement(Replacement::Genitor)
///     .with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Probability that a tournament returns the fitter contestant, in (0, 1].
    pub tournament_chance: f64,

    /// Position selection policy for mutation.
    pub mutation_type: MutationType,

    /// Probability that a selected position is overwritten, in (0, 1].
    pub mutation_chance: f64,

    /// Maximum number of generations. Zero runs none.
    pub iteration_limit: usize,

    /// Requested size of the first population.
    ///
    /// At most [`MAX_INITIAL_POPULATION`]. Clamped to the number of distinct
    /// start→finish sequences of the graph.
    pub initial_population_size: usize,

    /// How each generation is seeded.
    pub start_population: StartPopulation,

    /// How offspring are inserted.
    pub replacement: Replacement,

    /// Raw breeding rounds allowed per target population slot.
    ///
    /// A generation stops breeding after `target_size × breeding_rounds_per_slot`
    /// rounds even if too few of them produced a valid child.
    pub breeding_rounds_per_slot: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tournament_chance: 0.8,
            mutation_type: MutationType::default(),
            mutation_chance: 0.05,
            iteration_limit: 100,
            initial_population_size: 20,
            start_population: StartPopulation::default(),
            replacement: Replacement::default(),
            breeding_rounds_per_slot: 100,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the tournament chance.
    pub fn with_tournament_chance(mut self, p: f64) -> Self {
        self.tournament_chance = p;
        self
    }

    /// Sets the mutation type.
    pub fn with_mutation_type(mut self, t: MutationType) -> Self {
        self.mutation_type = t;
        self
    }

    /// Sets the mutation chance.
    pub fn with_mutation_chance(mut self, p: f64) -> Self {
        self.mutation_chance = p;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_iteration_limit(mut self, n: usize) -> Self {
        self.iteration_limit = n;
        self
    }

    /// Sets the requested initial population size.
    pub fn with_initial_population_size(mut self, n: usize) -> Self {
        self.initial_population_size = n;
        self
    }

    /// Sets the start-population strategy.
    pub fn with_start_population(mut self, s: StartPopulation) -> Self {
        self.start_population = s;
        self
    }

    /// Sets the replacement strategy.
    pub fn with_replacement(mut self, r: Replacement) -> Self {
        self.replacement = r;
        self
    }

    /// Sets the breeding round ceiling per population slot.
    pub fn with_breeding_rounds_per_slot(mut self, n: usize) -> Self {
        self.breeding_rounds_per_slot = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::ConfigurationOutOfRange`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        check_probability("tournament_chance", self.tournament_chance)?;
        check_probability("mutation_chance", self.mutation_chance)?;
        if self.initial_population_size == 0 {
            return Err(Error::config(
                "initial_population_size",
                "must be at least 1",
            ));
        }
        if self.initial_population_size > MAX_INITIAL_POPULATION {
            return Err(Error::config(
                "initial_population_size",
                format!("must be at most {MAX_INITIAL_POPULATION}"),
            ));
        }
        if self.breeding_rounds_per_slot == 0 {
            return Err(Error::config(
                "breeding_rounds_per_slot",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, p: f64) -> Result<()> {
    // NaN fails both comparisons
    if p > 0.0 && p <= 1.0 {
        Ok(())
    } else {
        Err(Error::config(field, format!("{p} is outside (0, 1]")))
    }
}
