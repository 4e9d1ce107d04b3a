use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Heading chosen for a walk step. `None` only appears on the genesis step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Motor neuron order; softmax ties resolve to the earliest entry.
    pub const MOTOR_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit grid delta `(dx, dy)`.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Position one step away in `direction`.
    pub fn advance(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One entry of the walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStep {
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
    /// Signatures of the batch that produced this step, in batch order
    #[serde(rename = "affectedTransactions")]
    pub affected_transactions: Vec<String>,
    pub index: u64,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl WalkStep {
    pub fn genesis() -> Self {
        Self {
            x: 0,
            y: 0,
            direction: Direction::None,
            affected_transactions: Vec::new(),
            index: 0,
            timestamp: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Ordered, append-only walk: genesis followed by one step per batch.
///
/// Only the simulator appends; consumers get read access. Serializes as a
/// bare JSON array of steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WalkHistory {
    steps: Vec<WalkStep>,
}

impl WalkHistory {
    pub(crate) fn with_capacity(batches: usize) -> Self {
        let mut steps = Vec::with_capacity(batches + 1);
        steps.push(WalkStep::genesis());
        Self { steps }
    }

    /// Append the step produced by a batch, moving from the current position.
    pub(crate) fn record(
        &mut self,
        direction: Direction,
        affected_transactions: Vec<String>,
        timestamp: i64,
    ) -> &WalkStep {
        let next = self.position().advance(direction);
        let index = self.steps.len() as u64;
        self.steps.push(WalkStep {
            x: next.x,
            y: next.y,
            direction,
            affected_transactions,
            index,
            timestamp,
        });
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[WalkStep] {
        &self.steps
    }

    /// Most recent step (genesis when the log was empty).
    pub fn latest(&self) -> &WalkStep {
        // Never empty: genesis is pushed on construction.
        &self.steps[self.steps.len() - 1]
    }

    pub fn position(&self) -> Position {
        self.latest().position()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// False for any history built by the simulator, which starts at genesis.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, WalkStep> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<WalkStep> {
        self.steps
    }
}

impl Default for WalkHistory {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<'a> IntoIterator for &'a WalkHistory {
    type Item = &'a WalkStep;
    type IntoIter = core::slice::Iter<'a, WalkStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn deltas_are_unit_vectors() {
        for dir in Direction::MOTOR_ORDER {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{} is not a unit step", dir);
        }
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn advance_moves_one_cell() {
        let p = Position::ORIGIN;
        assert_eq!(p.advance(Direction::Up), Position::new(0, 1));
        assert_eq!(p.advance(Direction::Down), Position::new(0, -1));
        assert_eq!(p.advance(Direction::Left), Position::new(-1, 0));
        assert_eq!(p.advance(Direction::Right), Position::new(1, 0));
        assert_eq!(p.advance(Direction::None), p);
    }

    #[test]
    fn default_history_is_genesis_only() {
        let history = WalkHistory::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), &WalkStep::genesis());
        assert!(!history.is_empty());
    }

    #[test]
    fn record_chains_positions_and_indices() {
        let mut history = WalkHistory::default();
        history.record(Direction::Right, vec!["a".to_string()], 1000);
        history.record(Direction::Up, vec!["b".to_string()], 2000);
        let last = history.record(Direction::Up, vec!["c".to_string()], 3000).clone();

        assert_eq!(last.position(), Position::new(1, 2));
        assert_eq!(last.index, 3);
        let indices: Vec<u64> = history.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
