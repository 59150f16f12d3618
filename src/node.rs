use serde::Serialize;
use std::fmt;

/// A vertex of the grid graph.
///
/// `Cell` is an integer lattice point. `Center` sits in the middle of the
/// unit square whose lower-left corner is `(x, y)`, i.e. at `(x + 0.5, y + 0.5)`,
/// and links the four corners of that square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Cell { x: i32, y: i32 },
    Center { x: i32, y: i32 },
}

impl Node {
    pub fn cell(x: i32, y: i32) -> Self {
        Node::Cell { x, y }
    }

    pub fn center(x: i32, y: i32) -> Self {
        Node::Center { x, y }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Node::Cell { .. })
    }

    /// Coordinates scaled by two so centers land on integers
    pub fn doubled(&self) -> (i64, i64) {
        match *self {
            Node::Cell { x, y } => (2 * x as i64, 2 * y as i64),
            Node::Center { x, y } => (2 * x as i64 + 1, 2 * y as i64 + 1),
        }
    }

    /// Manhattan distance `|dx| + |dy|`.
    ///
    /// Between a center and a cell both terms are half-integers, so the sum is
    /// still whole; the division below is exact whenever either side is a cell.
    pub fn manhattan(&self, other: &Node) -> u64 {
        let (ax, ay) = self.doubled();
        let (bx, by) = other.doubled();
        ((ax - bx).unsigned_abs() + (ay - by).unsigned_abs()) / 2
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Node::Cell { x, y } => write!(f, "({},{})", x, y),
            Node::Center { x, y } => write!(f, "({}.5,{}.5)", x, y),
        }
    }
}
