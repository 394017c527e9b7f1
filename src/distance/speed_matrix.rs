//! Dense matrix of per-road speed tables.

use crate::models::{SpeedTable, SpeedWindow};

/// A dense n×n matrix of [`SpeedTable`]s, kept symmetric by its setters.
///
/// An empty table means no speed is known for the road, which makes any
/// path using it untravellable.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedMatrix {
    tables: Vec<SpeedTable>,
    size: usize,
}

impl SpeedMatrix {
    /// Creates a matrix of empty tables.
    pub fn new(size: usize) -> Self {
        Self {
            tables: vec![SpeedTable::new(); size * size],
            size,
        }
    }

    /// Returns the speed table of the road between `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> &SpeedTable {
        &self.tables[from * self.size + to]
    }

    /// Declares `speed` on the road `a`–`b` (both directions) for `window`.
    pub fn insert_symmetric(&mut self, a: usize, b: usize, speed: i64, window: SpeedWindow) {
        self.tables[a * self.size + b].insert(speed, window);
        if a != b {
            self.tables[b * self.size + a].insert(speed, window);
        }
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
