//! Genetic algorithm for the quickest path through a road network.
//!
//! - [`Chromosome`] — Fixed-length, zero-padded path encoding
//! - [`SearchConfig`] — Search parameters and strategy selectors
//! - [`Population`] — Generation bookkeeping: generation, cleaning, seeding
//! - [`operators`] — Tournament selection, two-point crossover, mutation
//! - [`QuickestPathSearch`] — The evolution loop

mod chromosome;
mod config;
pub mod operators;
mod population;
mod runner;

pub use chromosome::{Chromosome, UNUSED};
pub use config::{
    MutationType, Replacement, SearchConfig, StartPopulation, MAX_INITIAL_POPULATION,
};
pub use operators::{crossover, mutate, tournament_select};
pub use population::{insert, Population};
pub use runner::{Outcome, QuickestPathSearch, SearchResult};
