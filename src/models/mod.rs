//! Domain model types for road networks.
//!
//! Provides the network graph, time-of-day values, per-road speed limits
//! with their time windows, and the text format reader.

mod clock;
mod graph;
mod parser;
mod speed;

pub use clock::{format_hhmm, TimeOfDay};
pub use graph::RoadGraph;
pub use speed::{SpeedLimit, SpeedTable, SpeedWindow};
