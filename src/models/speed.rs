//! Speed limits that apply to a road during a time-of-day window.

use serde::{Deserialize, Serialize};

use super::clock::TimeOfDay;

/// The interval of the day during which a speed limit applies.
///
/// Both ends are inclusive. A window whose start lies after its end never
/// contains any instant.
///
/// # Examples
///
/// ```
/// use u_quickroute::models::{SpeedWindow, TimeOfDay};
///
/// let w = SpeedWindow::new(
///     TimeOfDay::parse("07:00").unwrap(),
///     TimeOfDay::parse("09:00").unwrap(),
/// );
/// assert!(w.contains(8 * 3600));
/// assert!(w.contains(9 * 3600));
/// assert!(!w.contains(9 * 3600 + 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl SpeedWindow {
    /// Creates a window from its two bounds.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// First instant of the window.
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Last instant of the window.
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Returns `true` if the simulation clock (seconds since midnight of the
    /// departure day) falls within this window.
    ///
    /// The clock does not wrap, so instants past midnight never match.
    pub fn contains(&self, clock: u64) -> bool {
        clock >= self.start.seconds() && clock <= self.end.seconds()
    }
}

/// A speed limit keyed by its speed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedLimit {
    /// Speed in distance units per hour.
    pub speed: i64,
    pub window: SpeedWindow,
}

/// Ordered speed limits of one road.
///
/// Keys keep the order in which they were first declared; declaring a key
/// again only replaces its window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTable {
    limits: Vec<SpeedLimit>,
}

impl SpeedTable {
    /// Creates an empty table (no road).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `speed` for `window`.
    pub fn insert(&mut self, speed: i64, window: SpeedWindow) {
        match self.limits.iter_mut().find(|l| l.speed == speed) {
            Some(existing) => existing.window = window,
            None => self.limits.push(SpeedLimit { speed, window }),
        }
    }

    /// All declared limits in key order.
    pub fn limits(&self) -> &[SpeedLimit] {
        &self.limits
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// Returns `true` if no speed is declared.
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Picks the speed that applies at `clock`.
    ///
    /// Every key but the last is checked in order and the first whose window
    /// holds `clock` wins. The last key is the unconditional fallback; its
    /// window is never consulted. Returns `None` for an empty table.
    pub fn speed_at(&self, clock: u64) -> Option<i64> {
        let (last, rest) = self.limits.split_last()?;
        let speed = rest
            .iter()
            .find(|l| l.window.contains(clock))
            .map_or(last.speed, |l| l.speed);
        Some(speed)
    }
}
