//! Path evaluation: length, simulated travel time, and ranking.

mod evaluator;

pub use evaluator::{best_index, compare_fitness, worst_index, Fitness, Fitter, PathEvaluator};
