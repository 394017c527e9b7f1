//! Path evaluator that simulates travel under time-windowed speed limits.

use serde::{Deserialize, Serialize};

use crate::ga::{Chromosome, UNUSED};
use crate::models::RoadGraph;

/// Travel length and duration of one chromosome.
///
/// `None` marks a chromosome that is not a usable path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fitness {
    /// Total travel time in whole seconds.
    pub duration_secs: Option<u64>,
    /// Total path length in the graph's distance units.
    pub length: Option<f64>,
}

impl Fitness {
    /// Fitness of a chromosome that cannot be travelled.
    pub const INVALID: Fitness = Fitness {
        duration_secs: None,
        length: None,
    };

    /// Duration if it is strictly positive.
    ///
    /// A zero-second trip ranks like an invalid one.
    pub fn positive_duration(&self) -> Option<u64> {
        self.duration_secs.filter(|&d| d > 0)
    }
}

/// Which of two compared chromosomes is fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fitter {
    First,
    Second,
}

/// Ranks two fitness values.
///
/// A trip without positive duration always loses; when neither has one
/// there is no winner. Otherwise the shorter duration wins, and on equal
/// durations the first argument wins only with a strictly smaller length.
/// An invalid length counts as `-1`.
pub fn compare_fitness(first: &Fitness, second: &Fitness) -> Option<Fitter> {
    match (first.positive_duration(), second.positive_duration()) {
        (None, None) => None,
        (None, Some(_)) => Some(Fitter::Second),
        (Some(_), None) => Some(Fitter::First),
        (Some(a), Some(b)) if a < b => Some(Fitter::First),
        (Some(a), Some(b)) if a > b => Some(Fitter::Second),
        _ => {
            let l1 = first.length.unwrap_or(-1.0);
            let l2 = second.length.unwrap_or(-1.0);
            if l1 >= l2 {
                Some(Fitter::Second)
            } else {
                Some(Fitter::First)
            }
        }
    }
}

/// Index of the fittest entry.
///
/// Folds from the last entry towards the first, keeping the winner of each
/// comparison. When a comparison has no winner the running best is dropped
/// and the next entry with a positive duration takes its place, so the
/// result is `None` when no entry is travellable in that order.
pub fn best_index(fitness: &[Fitness]) -> Option<usize> {
    let (last, rest) = fitness.split_last()?;
    let mut best = last.positive_duration().map(|_| rest.len());
    let mut best_fitness = *last;
    for (i, f) in rest.iter().enumerate() {
        match compare_fitness(f, &best_fitness) {
            Some(Fitter::First) => {
                best = Some(i);
                best_fitness = *f;
            }
            Some(Fitter::Second) => {}
            None => {
                best = None;
                best_fitness = Fitness::INVALID;
            }
        }
    }
    best
}

/// Index of the least fit entry, or `None` for an empty slice.
///
/// Each entry is compared with the current worst; whenever the current
/// worst wins, the entry becomes the new worst.
pub fn worst_index(fitness: &[Fitness]) -> Option<usize> {
    let mut worst = fitness.len().checked_sub(1)?;
    for i in 0..worst {
        if compare_fitness(&fitness[i], &fitness[worst]) == Some(Fitter::Second) {
            worst = i;
        }
    }
    Some(worst)
}

/// Computes travel length and time-dependent duration of chromosomes on a
/// road graph.
///
/// # Examples
///
/// ```
/// use u_quickroute::models::{RoadGraph, SpeedWindow, TimeOfDay};
/// use u_quickroute::evaluation::PathEvaluator;
/// use u_quickroute::ga::Chromosome;
///
/// let mut graph = RoadGraph::new(3, 1, 3, TimeOfDay::parse("08:00").unwrap()).unwrap();
/// let always = SpeedWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT);
/// for (a, b) in [(1, 2), (2, 3)] {
///     graph.set_distance(a, b, 10.0).unwrap();
///     graph.add_speed_limit(a, b, 50, always).unwrap();
/// }
///
/// let evaluator = PathEvaluator::new(&graph);
/// let path = Chromosome::new(vec![1, 2, 3]);
/// assert_eq!(evaluator.path_length(&path), Some(20.0));
/// assert_eq!(evaluator.path_duration(&path), Some(1440));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathEvaluator<'a> {
    graph: &'a RoadGraph,
}

impl<'a> PathEvaluator<'a> {
    /// Creates an evaluator for the given graph.
    pub fn new(graph: &'a RoadGraph) -> Self {
        Self { graph }
    }

    /// The graph paths are evaluated on.
    pub fn graph(&self) -> &'a RoadGraph {
        self.graph
    }

    /// Consecutive vertex pairs travelled by a valid chromosome.
    ///
    /// Stops at the finish vertex. Returns `None` if the chromosome is
    /// invalid or a leg leaves the graph.
    fn legs(&self, chromosome: &Chromosome) -> Option<Vec<(usize, usize)>> {
        if !chromosome.is_valid(self.graph) {
            return None;
        }
        let finish = self.graph.finish();
        let mut legs = Vec::new();
        for pair in chromosome.genes().windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from == finish {
                break;
            }
            if to == UNUSED || !self.graph.contains_vertex(from) || !self.graph.contains_vertex(to)
            {
                return None;
            }
            legs.push((from, to));
        }
        Some(legs)
    }

    /// Total length of the path, or `None` if the chromosome is invalid or
    /// uses a missing road.
    pub fn path_length(&self, chromosome: &Chromosome) -> Option<f64> {
        let mut total = 0.0;
        for (from, to) in self.legs(chromosome)? {
            if !self.graph.has_road(from, to) {
                return None;
            }
            total += self.graph.distance(from, to);
        }
        Some(total)
    }

    /// Total travel time in seconds, departing at the graph's start time.
    ///
    /// Each leg runs at the speed that applies when it is entered and takes
    /// `floor(3600 × distance / speed)` seconds. Returns `None` if the
    /// chromosome is invalid, a leg has no speed table, or the applicable
    /// speed is not positive, or the running clock overflows.
    pub fn path_duration(&self, chromosome: &Chromosome) -> Option<u64> {
        let mut clock = self.graph.start_time().seconds();
        let mut total: u64 = 0;
        for (from, to) in self.legs(chromosome)? {
            let speed = self.graph.speed_table(from, to).speed_at(clock)?;
            if speed <= 0 {
                return None;
            }
            let travel = (3600.0 * self.graph.distance(from, to) / speed as f64).floor() as u64;
            clock = clock.checked_add(travel)?;
            total = total.checked_add(travel)?;
        }
        Some(total)
    }

    /// Length and duration together.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Fitness {
        Fitness {
            duration_secs: self.path_duration(chromosome),
            length: self.path_length(chromosome),
        }
    }

    /// Evaluates every chromosome of a slice.
    pub fn evaluate_all(&self, chromosomes: &[Chromosome]) -> Vec<Fitness> {
        chromosomes.iter().map(|c| self.evaluate(c)).collect()
    }

    /// Ranks two chromosomes, see [`compare_fitness`].
    pub fn compare(&self, first: &Chromosome, second: &Chromosome) -> Option<Fitter> {
        compare_fitness(&self.evaluate(first), &self.evaluate(second))
    }

    /// Index of the fittest chromosome, see [`best_index`].
    pub fn best(&self, population: &[Chromosome]) -> Option<usize> {
        best_index(&self.evaluate_all(population))
    }

    /// Index of the least fit chromosome, see [`worst_index`].
    pub fn worst(&self, population: &[Chromosome]) -> Option<usize> {
        worst_index(&self.evaluate_all(population))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpeedWindow, TimeOfDay};

    fn always() -> SpeedWindow {
        SpeedWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT)
    }

    fn window(start: &str, end: &str) -> SpeedWindow {
        SpeedWindow::new(
            TimeOfDay::parse(start).expect("valid"),
            TimeOfDay::parse(end).expect("valid"),
        )
    }

    /// 1 -10- 2 -10- 3, speed 50 everywhere, departing 08:00.
    fn line_graph() -> RoadGraph {
        let mut g = RoadGraph::new(3, 1, 3, TimeOfDay::parse("08:00").expect("valid"))
            .expect("valid");
        for (a, b) in [(1, 2), (2, 3)] {
            g.set_distance(a, b, 10.0).expect("valid");
            g.add_speed_limit(a, b, 50, always()).expect("valid");
        }
        g
    }

    fn fit(duration: Option<u64>, length: Option<f64>) -> Fitness {
        Fitness {
            duration_secs: duration,
            length,
        }
    }

    #[test]
    fn test_line_graph_length_and_duration() {
        let g = line_graph();
        let eval = PathEvaluator::new(&g);
        let c = Chromosome::new(vec![1, 2, 3]);
        assert_eq!(eval.path_length(&c), Some(20.0));
        assert_eq!(eval.path_duration(&c), Some(1440));
    }

    #[test]
    fn test_clock_overflow_is_invalid() {
        let mut g = RoadGraph::new(3, 1, 3, TimeOfDay::parse("08:00").expect("valid"))
            .expect("valid");
        g.set_distance(1, 2, 1e300).expect("valid");
        g.set_distance(2, 3, 1.0).expect("valid");
        g.add_speed_limit(1, 2, 1, always()).expect("valid");
        g.add_speed_limit(2, 3, 1, always()).expect("valid");
        let eval = PathEvaluator::new(&g);
        let c = Chromosome::new(vec![1, 2, 3]);
        assert!(eval.path_length(&c).is_some());
        assert_eq!(eval.path_duration(&c), None);
        assert_eq!(eval.evaluate(&c).positive_duration(), None);
    }

    #[test]
    fn test_missing_road_is_invalid() {
        let g = line_graph();
        let eval = PathEvaluator::new(&g);
        let direct = Chromosome::new(vec![1, 3, 0]);
        assert_eq!(eval.path_length(&direct), None);
        assert_eq!(eval.path_duration(&direct), None);
    }

    #[test]
    fn test_invalid_chromosome() {
        let g = line_graph();
        let eval = PathEvaluator::new(&g);
        assert_eq!(eval.evaluate(&Chromosome::default()), Fitness::INVALID);
        assert_eq!(eval.evaluate(&Chromosome::new(vec![2, 1, 3])), Fitness::INVALID);
        assert_eq!(eval.evaluate(&Chromosome::new(vec![1, 1, 3])), Fitness::INVALID);
    }

    #[test]
    fn test_walk_stops_at_finish() {
        let g = line_graph();
        let eval = PathEvaluator::new(&g);
        let c = Chromosome::new(vec![1, 2, 3, 0, 0]);
        assert_eq!(eval.path_length(&c), Some(20.0));
    }

    #[test]
    fn test_internal_gap_is_invalid() {
        let mut g = RoadGraph::new(4, 1, 4, TimeOfDay::MIDNIGHT).expect("valid");
        g.set_distance(1, 2, 1.0).expect("valid");
        g.set_distance(2, 4, 1.0).expect("valid");
        let eval = PathEvaluator::new(&g);
        assert_eq!(eval.path_length(&Chromosome::new(vec![1, 2, 0, 4])), None);
    }

    #[test]
    fn test_speed_window_follows_clock() {
        // Slow before 08:10, fast afterwards.
        let mut g = RoadGraph::new(3, 1, 3, TimeOfDay::parse("08:00").expect("valid"))
            .expect("valid");
        for (a, b) in [(1, 2), (2, 3)] {
            g.set_distance(a, b, 10.0).expect("valid");
            g.add_speed_limit(a, b, 30, window("00:00", "08:10")).expect("valid");
            g.add_speed_limit(a, b, 60, always()).expect("valid");
        }
        let eval = PathEvaluator::new(&g);
        // Leg 1 at 30: 1200 s, arriving 08:20. Leg 2 at 60: 600 s.
        assert_eq!(eval.path_duration(&Chromosome::new(vec![1, 2, 3])), Some(1800));
    }

    #[test]
    fn test_travel_time_is_floored() {
        let mut g = RoadGraph::new(2, 1, 2, TimeOfDay::MIDNIGHT).expect("valid");
        g.set_distance(1, 2, 1.0).expect("valid");
        g.add_speed_limit(1, 2, 7, always()).expect("valid");
        let eval = PathEvaluator::new(&g);
        // 3600 / 7 = 514.28...
        assert_eq!(eval.path_duration(&Chromosome::new(vec![1, 2])), Some(514));
    }

    #[test]
    fn test_empty_speed_table_is_invalid() {
        let mut g = RoadGraph::new(2, 1, 2, TimeOfDay::MIDNIGHT).expect("valid");
        g.set_distance(1, 2, 5.0).expect("valid");
        let eval = PathEvaluator::new(&g);
        let c = Chromosome::new(vec![1, 2]);
        assert_eq!(eval.path_duration(&c), None);
        assert_eq!(eval.path_length(&c), Some(5.0));
    }

    #[test]
    fn test_non_positive_speed_is_invalid() {
        let mut g = RoadGraph::new(2, 1, 2, TimeOfDay::parse("08:00").expect("valid"))
            .expect("valid");
        g.set_distance(1, 2, 5.0).expect("valid");
        g.add_speed_limit(1, 2, 0, window("07:00", "09:00")).expect("valid");
        g.add_speed_limit(1, 2, 40, always()).expect("valid");
        let eval = PathEvaluator::new(&g);
        assert_eq!(eval.path_duration(&Chromosome::new(vec![1, 2])), None);
    }

    #[test]
    fn test_non_positive_speed_outside_window_is_skipped() {
        let mut g = RoadGraph::new(2, 1, 2, TimeOfDay::parse("12:00").expect("valid"))
            .expect("valid");
        g.set_distance(1, 2, 5.0).expect("valid");
        g.add_speed_limit(1, 2, 0, window("07:00", "09:00")).expect("valid");
        g.add_speed_limit(1, 2, 40, always()).expect("valid");
        let eval = PathEvaluator::new(&g);
        assert_eq!(eval.path_duration(&Chromosome::new(vec![1, 2])), Some(450));
    }

    #[test]
    fn test_compare_durations() {
        let fast = fit(Some(100), Some(50.0));
        let slow = fit(Some(200), Some(10.0));
        assert_eq!(compare_fitness(&fast, &slow), Some(Fitter::First));
        assert_eq!(compare_fitness(&slow, &fast), Some(Fitter::Second));
    }

    #[test]
    fn test_compare_invalid() {
        let ok = fit(Some(100), Some(5.0));
        let zero = fit(Some(0), Some(5.0));
        assert_eq!(compare_fitness(&Fitness::INVALID, &ok), Some(Fitter::Second));
        assert_eq!(compare_fitness(&ok, &zero), Some(Fitter::First));
        assert_eq!(compare_fitness(&zero, &Fitness::INVALID), None);
    }

    #[test]
    fn test_compare_tie_break() {
        let short = fit(Some(100), Some(5.0));
        let long = fit(Some(100), Some(8.0));
        assert_eq!(compare_fitness(&short, &long), Some(Fitter::First));
        assert_eq!(compare_fitness(&long, &short), Some(Fitter::Second));
        // Full equality goes to the second argument
        assert_eq!(compare_fitness(&short, &short), Some(Fitter::Second));
    }

    #[test]
    fn test_best_and_worst_index() {
        let fitness = vec![
            fit(Some(300), Some(1.0)),
            fit(Some(100), Some(1.0)),
            Fitness::INVALID,
            fit(Some(200), Some(1.0)),
        ];
        assert_eq!(best_index(&fitness), Some(1));
        assert_eq!(worst_index(&fitness), Some(2));
    }

    #[test]
    fn test_best_index_all_invalid() {
        assert_eq!(best_index(&[Fitness::INVALID, Fitness::INVALID]), None);
        assert_eq!(best_index(&[]), None);
        assert_eq!(worst_index(&[]), None);
    }

    #[test]
    fn test_best_index_recovers_after_no_winner() {
        // Entry 0 and the last entry are both invalid; entry 1 is travellable.
        let fitness = vec![Fitness::INVALID, fit(Some(10), Some(1.0)), Fitness::INVALID];
        assert_eq!(best_index(&fitness), Some(1));
    }

    #[test]
    fn test_evaluator_best_worst() {
        let g = line_graph();
        let eval = PathEvaluator::new(&g);
        let pop = vec![Chromosome::new(vec![1, 3, 0]), Chromosome::new(vec![1, 2, 3])];
        assert_eq!(eval.best(&pop), Some(1));
        assert_eq!(eval.worst(&pop), Some(0));
        assert_eq!(eval.compare(&pop[0], &pop[1]), Some(Fitter::Second));
    }
}
