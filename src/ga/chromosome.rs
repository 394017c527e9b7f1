//! Fixed-length path chromosome.
//!
//! A chromosome lists the vertex ids of a candidate path from the start
//! vertex to the finish vertex, padded on the right with [`UNUSED`] genes up
//! to the vertex count of the graph. Operators that can open zero gaps in
//! the middle of a chromosome repack it with [`Chromosome::compacted`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::RoadGraph;

/// Sentinel gene marking an unused slot.
pub const UNUSED: usize = 0;

/// A candidate path encoded as a sequence of vertex ids.
///
/// # Examples
///
/// ```
/// use u_quickroute::ga::Chromosome;
///
/// let c = Chromosome::new(vec![1, 0, 4, 0, 3]);
/// assert_eq!(c.compacted(5).genes(), &[1, 4, 3, 0, 0]);
/// assert_eq!(c.strip_zeros(), vec![1, 4, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Creates a chromosome from raw genes.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// Returns the genes.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of genes, used or not.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the chromosome has no genes at all.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The leading run of used genes, up to the first [`UNUSED`] gene.
    pub fn active(&self) -> &[usize] {
        let end = self
            .genes
            .iter()
            .position(|&g| g == UNUSED)
            .unwrap_or(self.genes.len());
        &self.genes[..end]
    }

    /// Returns true if a vertex repeats within the leading run of used genes.
    pub fn has_cycle(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.genes.len());
        self.active().iter().any(|&g| !seen.insert(g))
    }

    /// Returns true if the chromosome starts at `start` and its last used
    /// gene is `finish`.
    pub fn is_target_path(&self, start: usize, finish: usize) -> bool {
        match self.genes.first() {
            Some(&first) if first == start => {}
            _ => return false,
        }
        self.genes.iter().rev().find(|&&g| g != UNUSED) == Some(&finish)
    }

    /// Returns true if the chromosome is a cycle-free path from the graph's
    /// start vertex to its finish vertex.
    pub fn is_valid(&self, graph: &RoadGraph) -> bool {
        !self.is_empty() && self.is_target_path(graph.start(), graph.finish()) && !self.has_cycle()
    }

    /// Repacks the used genes to the left, in their original order, and pads
    /// with [`UNUSED`] to exactly `len` genes.
    ///
    /// Used genes beyond `len` are dropped.
    pub fn compacted(&self, len: usize) -> Chromosome {
        let mut genes: Vec<usize> = self
            .genes
            .iter()
            .copied()
            .filter(|&g| g != UNUSED)
            .take(len)
            .collect();
        genes.resize(len, UNUSED);
        Chromosome { genes }
    }

    /// The used genes only, for reporting a path.
    pub fn strip_zeros(&self) -> Vec<usize> {
        self.genes.iter().copied().filter(|&g| g != UNUSED).collect()
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    fn graph() -> RoadGraph {
        RoadGraph::new(5, 1, 5, TimeOfDay::MIDNIGHT).expect("valid")
    }

    #[test]
    fn test_active_prefix() {
        let c = Chromosome::new(vec![1, 2, 0, 3, 0]);
        assert_eq!(c.active(), &[1, 2]);
        assert_eq!(Chromosome::new(vec![1, 2, 3]).active(), &[1, 2, 3]);
    }

    #[test]
    fn test_has_cycle() {
        assert!(Chromosome::new(vec![1, 2, 1, 5, 0]).has_cycle());
        assert!(!Chromosome::new(vec![1, 2, 3, 5, 0]).has_cycle());
        // Repeats after the first gap are not part of the active run
        assert!(!Chromosome::new(vec![1, 2, 0, 2, 5]).has_cycle());
    }

    #[test]
    fn test_is_target_path() {
        assert!(Chromosome::new(vec![1, 3, 5, 0, 0]).is_target_path(1, 5));
        assert!(!Chromosome::new(vec![2, 3, 5, 0, 0]).is_target_path(1, 5));
        assert!(!Chromosome::new(vec![1, 5, 3, 0, 0]).is_target_path(1, 5));
        assert!(!Chromosome::new(vec![1, 0, 0, 0, 0]).is_target_path(1, 5));
        assert!(!Chromosome::new(vec![]).is_target_path(1, 5));
    }

    #[test]
    fn test_is_valid() {
        let g = graph();
        assert!(Chromosome::new(vec![1, 5, 0, 0, 0]).is_valid(&g));
        assert!(Chromosome::new(vec![1, 2, 3, 4, 5]).is_valid(&g));
        assert!(!Chromosome::new(vec![1, 2, 2, 5, 0]).is_valid(&g));
        assert!(!Chromosome::new(vec![1, 5, 2, 5, 0]).is_valid(&g));
        assert!(!Chromosome::new(vec![]).is_valid(&g));
    }

    #[test]
    fn test_compacted() {
        let c = Chromosome::new(vec![0, 1, 0, 2, 5]);
        let packed = c.compacted(5);
        assert_eq!(packed.genes(), &[1, 2, 5, 0, 0]);
        assert_eq!(packed.compacted(5), packed);
    }

    #[test]
    fn test_compacted_pads_and_truncates() {
        assert_eq!(Chromosome::new(vec![1, 5]).compacted(4).genes(), &[1, 5, 0, 0]);
        assert_eq!(Chromosome::new(vec![1, 2, 3]).compacted(2).genes(), &[1, 2]);
    }

    #[test]
    fn test_strip_zeros() {
        let c = Chromosome::new(vec![1, 3, 5, 0, 0]);
        assert_eq!(c.strip_zeros(), vec![1, 3, 5]);
        assert!(Chromosome::default().strip_zeros().is_empty());
    }
}
