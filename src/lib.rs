//! # u-quickroute
//!
//! Quickest-path search over road networks whose roads have fixed lengths
//! but speed limits that change with the time of day. Candidate paths are
//! evolved by a genetic algorithm over fixed-length chromosomes.
//!
//! ## Modules
//!
//! - [`models`] — Road graph, time of day, speed windows, text format reader
//! - [`distance`] — Dense distance and speed matrices
//! - [`evaluation`] — Path length, simulated travel time, and ranking
//! - [`ga`] — Chromosomes, population, operators, and the evolution loop
//! - [`error`] — Crate error type
//!
//! ## Example
//!
//! ```
//! use u_quickroute::ga::{QuickestPathSearch, SearchConfig};
//! use u_quickroute::models::RoadGraph;
//!
//! let graph: RoadGraph = "3\n1 3\n08:00\n\n1 2 10\n2 3 10\n\n1 2 50 00:00 23:59\n2 3 50 00:00 23:59\n"
//!     .parse()?;
//! let result = QuickestPathSearch::run(&graph, &SearchConfig::default().with_seed(1))?;
//! assert_eq!(result.path, vec![1, 2, 3]);
//! assert_eq!(result.length, Some(20.0));
//! # Ok::<(), u_quickroute::Error>(())
//! ```

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;

pub use error::{Error, Result};
