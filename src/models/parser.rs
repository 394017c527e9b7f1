//! Text format reader for [`RoadGraph`].
//!
//! ```text
//! 3            <- vertex count
//! 1 3          <- start and finish vertices
//! 08:00        <- departure time
//!              <- blank line
//! 1 2 10       <- "i j distance" lines ...
//! 2 3 10
//!              <- ... terminated by a blank line
//! 1 2 50 00:00 23:59   <- "i j speed from to" lines to the end of input
//! 2 3 50 00:00 23:59
//! ```

use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::clock::TimeOfDay;
use super::graph::RoadGraph;
use super::speed::SpeedWindow;

impl RoadGraph {
    /// Reads and parses a graph description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }
}

impl FromStr for RoadGraph {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (no, line) = next_line(&mut lines, "vertex count")?;
        let vertex_count: usize = field(no, &tokens(line), 0, "vertex count")?;

        let (endpoints_no, line) = next_line(&mut lines, "start and finish vertices")?;
        let parts = tokens(line);
        let start: usize = field(endpoints_no, &parts, 0, "start vertex")?;
        let finish: usize = field(endpoints_no, &parts, 1, "finish vertex")?;

        let (no, line) = next_line(&mut lines, "start time")?;
        let start_time = time_field(no, &tokens(line), 0, "start time")?;

        let mut graph = RoadGraph::new(vertex_count, start, finish, start_time)
            .map_err(|e| at_line(e, endpoints_no))?;

        match lines.next() {
            Some((_, l)) if l.trim().is_empty() => {}
            Some((no, _)) => {
                return Err(Error::graph(no, "expected a blank line after the start time"))
            }
            None => return Ok(graph),
        }

        // Distance section, up to the first blank line.
        for (no, line) in lines.by_ref() {
            let parts = tokens(line);
            if parts.is_empty() {
                break;
            }
            let a: usize = field(no, &parts, 0, "first vertex")?;
            let b: usize = field(no, &parts, 1, "second vertex")?;
            let d: f64 = field(no, &parts, 2, "distance")?;
            graph.set_distance(a, b, d).map_err(|e| at_line(e, no))?;
        }

        // Speed section, to the end of input.
        for (no, line) in lines {
            let parts = tokens(line);
            if parts.is_empty() {
                continue;
            }
            let a: usize = field(no, &parts, 0, "first vertex")?;
            let b: usize = field(no, &parts, 1, "second vertex")?;
            let speed: i64 = field(no, &parts, 2, "speed")?;
            let from = time_field(no, &parts, 3, "window start")?;
            let to = time_field(no, &parts, 4, "window end")?;
            graph
                .add_speed_limit(a, b, speed, SpeedWindow::new(from, to))
                .map_err(|e| at_line(e, no))?;
        }

        Ok(graph)
    }
}

fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> Result<(usize, &'a str)> {
    lines
        .next()
        .ok_or_else(|| Error::graph(0, format!("input ends before the {what}")))
}

fn field<T: FromStr>(line: usize, parts: &[&str], idx: usize, what: &str) -> Result<T> {
    let raw = parts
        .get(idx)
        .ok_or_else(|| Error::graph(line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| Error::graph(line, format!("cannot parse {what} from '{raw}'")))
}

fn time_field(line: usize, parts: &[&str], idx: usize, what: &str) -> Result<TimeOfDay> {
    let raw = parts
        .get(idx)
        .ok_or_else(|| Error::graph(line, format!("missing {what}")))?;
    TimeOfDay::parse(raw)
        .ok_or_else(|| Error::graph(line, format!("{what} '{raw}' is not an HH:MM time")))
}

/// Attaches a line number to an error raised by the graph setters.
fn at_line(err: Error, line: usize) -> Error {
    match err {
        Error::InvalidGraphData { reason, .. } => Error::InvalidGraphData { line, reason },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3\n1 3\n08:00\n\n1 2 10\n2 3 10\n\n1 2 50 00:00 23:59\n2 3 50 00:00 23:59\n";

    #[test]
    fn test_parse_sample() {
        let g: RoadGraph = SAMPLE.parse().expect("valid");
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.start(), 1);
        assert_eq!(g.finish(), 3);
        assert_eq!(g.start_time(), TimeOfDay::parse("08:00").expect("valid"));
        assert_eq!(g.distance(1, 2), 10.0);
        assert_eq!(g.distance(3, 2), 10.0);
        assert_eq!(g.distance(1, 3), 0.0);
        assert_eq!(g.speed_table(2, 1).speed_at(0), Some(50));
        assert!(g.speed_table(1, 3).is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let g: RoadGraph = "2\n1 2\n10:15\n".parse().expect("valid");
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.distance(1, 2), 0.0);
    }

    #[test]
    fn test_parse_without_speed_section() {
        let g: RoadGraph = "2\n1 2\n10:15\n\n1 2 3.5\n".parse().expect("valid");
        assert_eq!(g.distance(2, 1), 3.5);
        assert!(g.speed_table(1, 2).is_empty());
    }

    #[test]
    fn test_parse_truncated() {
        let err = "3\n1 3\n".parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 0, .. }));
    }

    #[test]
    fn test_parse_bad_time_reports_line() {
        let err = "3\n1 3\n8h00\n".parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 3, .. }));
    }

    #[test]
    fn test_parse_out_of_range_vertex_reports_line() {
        let text = "3\n1 3\n08:00\n\n1 2 10\n2 4 10\n";
        let err = text.parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 6, .. }));
    }

    #[test]
    fn test_parse_missing_blank_line() {
        let err = "3\n1 3\n08:00\n1 2 10\n".parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 4, .. }));
    }

    #[test]
    fn test_parse_bad_speed_line() {
        let text = "3\n1 3\n08:00\n\n1 2 10\n\n1 2 fast 00:00 23:59\n";
        let err = text.parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 7, .. }));
    }

    #[test]
    fn test_parse_same_endpoints() {
        let err = "3\n2 2\n08:00\n".parse::<RoadGraph>().unwrap_err();
        assert!(matches!(err, Error::InvalidGraphData { line: 2, .. }));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = RoadGraph::from_path("/nonexistent/graph.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
