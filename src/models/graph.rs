//! Road network graph.

use crate::distance::{DistanceMatrix, SpeedMatrix};
use crate::error::{Error, Result};

use super::clock::TimeOfDay;
use super::speed::{SpeedTable, SpeedWindow};

/// An undirected road network with a single trip to plan.
///
/// Vertices are identified by ids `1..=vertex_count`. Distances and speed
/// tables are symmetric; a zero distance or an empty speed table means the
/// two vertices are not directly connected.
///
/// The graph is immutable once handed to a search.
///
/// # Examples
///
/// ```
/// use u_quickroute::models::{RoadGraph, SpeedWindow, TimeOfDay};
///
/// let mut graph = RoadGraph::new(3, 1, 3, TimeOfDay::parse("08:00").unwrap()).unwrap();
/// graph.set_distance(1, 2, 10.0).unwrap();
/// graph.set_distance(2, 3, 10.0).unwrap();
/// let always = SpeedWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT);
/// graph.add_speed_limit(1, 2, 50, always).unwrap();
/// graph.add_speed_limit(2, 3, 50, always).unwrap();
///
/// assert_eq!(graph.distance(2, 1), 10.0);
/// assert_eq!(graph.all_different_ways_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoadGraph {
    vertex_count: usize,
    start: usize,
    finish: usize,
    start_time: TimeOfDay,
    distances: DistanceMatrix,
    speeds: SpeedMatrix,
}

impl RoadGraph {
    /// Creates a graph with no roads.
    ///
    /// Fails if `start` or `finish` lie outside `1..=vertex_count` or are
    /// equal to each other.
    pub fn new(
        vertex_count: usize,
        start: usize,
        finish: usize,
        start_time: TimeOfDay,
    ) -> Result<Self> {
        if vertex_count == 0 {
            return Err(Error::graph(0, "vertex count must be at least 1"));
        }
        for (name, v) in [("start", start), ("finish", finish)] {
            if v == 0 || v > vertex_count {
                return Err(Error::graph(
                    0,
                    format!("{name} vertex {v} is outside 1..={vertex_count}"),
                ));
            }
        }
        if start == finish {
            return Err(Error::graph(0, "start and finish vertices must differ"));
        }
        Ok(Self {
            vertex_count,
            start,
            finish,
            start_time,
            distances: DistanceMatrix::new(vertex_count),
            speeds: SpeedMatrix::new(vertex_count),
        })
    }

    /// Sets the length of the road between vertices `a` and `b`.
    ///
    /// A zero distance removes the road. Self-loops must have zero length.
    pub fn set_distance(&mut self, a: usize, b: usize, distance: f64) -> Result<()> {
        let (i, j) = self.indices(a, b)?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::graph(
                0,
                format!("distance {distance} between {a} and {b} must be finite and non-negative"),
            ));
        }
        if i == j && distance != 0.0 {
            return Err(Error::graph(0, format!("vertex {a} cannot have a road to itself")));
        }
        self.distances.set_symmetric(i, j, distance);
        Ok(())
    }

    /// Declares a speed limit on the road between `a` and `b` for `window`.
    pub fn add_speed_limit(
        &mut self,
        a: usize,
        b: usize,
        speed: i64,
        window: SpeedWindow,
    ) -> Result<()> {
        let (i, j) = self.indices(a, b)?;
        self.speeds.insert_symmetric(i, j, speed, window);
        Ok(())
    }

    fn indices(&self, a: usize, b: usize) -> Result<(usize, usize)> {
        for v in [a, b] {
            if !self.contains_vertex(v) {
                return Err(Error::graph(
                    0,
                    format!("vertex {v} is outside 1..={}", self.vertex_count),
                ));
            }
        }
        Ok((a - 1, b - 1))
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Vertex id where every trip starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Vertex id where every trip ends.
    pub fn finish(&self) -> usize {
        self.finish
    }

    /// Departure time of the trip.
    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    /// Returns `true` if `vertex` is a valid vertex id.
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        (1..=self.vertex_count).contains(&vertex)
    }

    /// Road length between vertex ids `a` and `b` (0 if no road).
    ///
    /// # Panics
    ///
    /// Panics if either id is not a vertex of this graph.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances.get(a - 1, b - 1)
    }

    /// Returns `true` if a road of positive length joins vertex ids `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not a vertex of this graph.
    pub fn has_road(&self, a: usize, b: usize) -> bool {
        self.distances.has_edge(a - 1, b - 1)
    }

    /// Speed table of the road between vertex ids `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not a vertex of this graph.
    pub fn speed_table(&self, a: usize, b: usize) -> &SpeedTable {
        self.speeds.get(a - 1, b - 1)
    }

    /// The full distance matrix, indexed by `id - 1`.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The full speed matrix, indexed by `id - 1`.
    pub fn speeds(&self) -> &SpeedMatrix {
        &self.speeds
    }

    /// Number of start→finish vertex sequences that never repeat a vertex.
    ///
    /// With `n = vertex_count - 2` intermediate vertices this is
    /// `Σ_{k=0}^{n} n!/(n-k)!`. Reachability is not considered: the count
    /// includes sequences that use missing roads. Saturates at `u128::MAX`.
    pub fn all_different_ways_count(&self) -> u128 {
        if self.vertex_count < 2 {
            return 0;
        }
        let n = (self.vertex_count - 2) as u128;
        let mut total: u128 = 1;
        let mut term: u128 = 1;
        for k in 1..=n {
            term = term.saturating_mul(n - k + 1);
            total = total.saturating_add(term);
        }
        total
    }
}
